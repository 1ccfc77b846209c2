//
//  bitbucket-deploy-keys
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client implementation for the Bitbucket
//! Cloud REST API v2.0 at `api.bitbucket.org`, along with the typed
//! request/response surface for repository deploy keys.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and request handling
//! - [`deploy_keys`]: Deploy key types and endpoint paths
//! - [`common`]: Shared types (errors, pagination)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_deploy_keys::api::BitbucketClient;
//! use bitbucket_deploy_keys::auth::AuthCredential;
//!
//! let client = BitbucketClient::cloud()
//!     .expect("Failed to create client")
//!     .with_auth(AuthCredential::access_token("your-token"));
//! ```
//!
//! ## Error Handling
//!
//! API errors are returned as [`ApiError`] variants mapping common HTTP
//! error scenarios:
//!
//! - `AuthRequired`: 401 Unauthorized
//! - `Forbidden`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `RateLimited`: 429 Too Many Requests
//! - `ServerError`: 5xx Server Errors

/// Core HTTP client wrapper for the Bitbucket Cloud API.
///
/// Provides the [`BitbucketClient`] struct which handles authentication
/// header injection, request/response serialization, and status-code
/// mapping.
pub mod client;

/// Common types shared by all API calls.
///
/// Includes:
/// - [`common::ApiError`]: Standardized error type
/// - [`common::PaginatedResponse`]: Cloud pagination envelope
pub mod common;

/// Deploy key resource types and endpoint paths.
pub mod deploy_keys;

/// Re-export of the main Bitbucket API client.
pub use client::BitbucketClient;

/// Re-export of the unified API error type.
pub use common::ApiError;
