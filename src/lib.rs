//
//  bitbucket-deploy-keys
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Deploy Keys Library
//!
//! Library backing the `bbdk` CLI for managing deploy keys on Bitbucket
//! Cloud repositories.
//!
//! ## Overview
//!
//! A deploy key is an SSH public key registered against a single repository,
//! granting read access over SSH without a full user account. This crate
//! provides a typed API client for the Bitbucket Cloud deploy key endpoints
//! and a declarative resource layer over them, addressed by a stable
//! composite identifier.
//!
//! ## The composite identifier
//!
//! Every managed key is handled through a single opaque string of the form
//! `workspace/repository/key_id` — exactly three slash-delimited non-empty
//! segments. The handle is minted when a key is created, accepted verbatim
//! for import of pre-existing keys, and cleared when a read discovers the
//! remote key is gone (drift). Callers that persist the handle can always
//! reconstruct the full remote address from it.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client for the Bitbucket Cloud API v2.0
//! - [`resource`]: Deploy key lifecycle (create / read / update / delete)
//! - [`auth`]: Credential resolution and keyring storage
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (Table, JSON)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_deploy_keys::api::BitbucketClient;
//! use bitbucket_deploy_keys::resource::{DeployKeyResource, DeployKeyState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resource = DeployKeyResource::new(BitbucketClient::cloud()?);
//!
//! // Adopt a pre-existing key by its composite identifier
//! let mut state = DeployKeyState::import("myteam/backend/1234")?;
//! resource.read(&mut state).await?;
//!
//! if state.exists() {
//!     println!("label: {:?}", state.label);
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API.
pub mod cli;

/// API client for the Bitbucket Cloud API v2.0.
///
/// Handles authentication, request building, pagination, and error mapping.
pub mod api;

/// Credential resolution and secure storage.
///
/// Supports access tokens (Bearer) and app passwords (Basic), resolved from
/// environment variables or the system keyring.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/bbdk/config.toml`
/// - macOS: `~/Library/Application Support/bbdk/config.toml`
/// - Windows: `%APPDATA%\bbdk\config.toml`
pub mod config;

/// Output formatting for table and JSON modes.
pub mod output;

/// Deploy key lifecycle management.
///
/// The declarative core of the crate: composite identifiers, declared
/// configuration, local state, and the create/read/update/delete operations
/// against the remote service.
pub mod resource;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Re-export of the deploy key resource layer entry points.
pub use resource::{DeployKeyResource, DeployKeyState};

/// Application name constant.
pub const APP_NAME: &str = "bbdk";

/// Application version constant, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts to
/// programmatically detect the outcome of CLI operations.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// Run `bbdk auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The repository or deploy key does not exist or is not accessible.
    pub const NOT_FOUND: i32 = 8;
}
