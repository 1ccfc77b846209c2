//
//  bitbucket-deploy-keys
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod config;
mod deploy_key;

pub use auth::AuthCommand;
pub use config::ConfigCommand;
pub use deploy_key::{AddArgs, DeleteArgs, ListArgs, ShowArgs, UpdateArgs};

use clap::{Parser, Subcommand};

/// Bitbucket deploy keys - Manage repository deploy keys from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bbdk",
    version,
    about = "Manage Bitbucket Cloud repository deploy keys",
    long_about = "bbdk manages deploy keys on Bitbucket Cloud repositories.\n\n\
                  Deploy keys grant read access over SSH without a full user account,\n\
                  which makes them the right credential for CI runners and deployment\n\
                  agents.",
    propagate_version = true,
    after_help = "Use 'bbdk <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Workspace slug for the operation
    #[arg(long, short = 'w', global = true, env = "BBDK_WORKSPACE")]
    pub workspace: Option<String>,

    /// Repository slug for the operation
    #[arg(long, short = 'R', global = true, env = "BBDK_REPOSITORY")]
    pub repository: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "BBDK_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with Bitbucket
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// List deploy keys on a repository
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Add a deploy key to a repository
    Add(AddArgs),

    /// Show a deploy key by its composite ID
    Show(ShowArgs),

    /// Update a deploy key's label
    Update(UpdateArgs),

    /// Delete a deploy key
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Show version information
    Version,
}
