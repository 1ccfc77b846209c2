//
//  bitbucket-deploy-keys
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_deploy_keys::api::ApiError;
use bitbucket_deploy_keys::cli::{Cli, Commands};
use bitbucket_deploy_keys::exit_codes;
use bitbucket_deploy_keys::resource::IdParseError;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Picks the exit code for a failed command from its error chain.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            return match api {
                ApiError::AuthRequired => exit_codes::AUTH_ERROR,
                ApiError::NotFound(_) => exit_codes::NOT_FOUND,
                _ => exit_codes::ERROR,
            };
        }
        if cause.downcast_ref::<IdParseError>().is_some() {
            return exit_codes::USAGE;
        }
    }
    exit_codes::ERROR
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BBDK_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::List(cmd) => cmd.run(&cli.global).await,
        Commands::Add(cmd) => cmd.run(&cli.global).await,
        Commands::Show(cmd) => cmd.run(&cli.global).await,
        Commands::Update(cmd) => cmd.run(&cli.global).await,
        Commands::Delete(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("bbdk version {}", bitbucket_deploy_keys::VERSION);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_exit_code_for_auth_required() {
        let err = anyhow!(ApiError::AuthRequired);
        assert_eq!(exit_code_for(&err), exit_codes::AUTH_ERROR);
    }

    #[test]
    fn test_exit_code_for_not_found() {
        let err = anyhow!(ApiError::NotFound("gone".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_exit_code_for_wrapped_api_error() {
        let err =
            anyhow!(ApiError::AuthRequired).context("error reading deploy key (a/b/c)");
        assert_eq!(exit_code_for(&err), exit_codes::AUTH_ERROR);
    }

    #[test]
    fn test_exit_code_for_malformed_id() {
        let err = anyhow::Error::from(IdParseError("a/b".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::USAGE);
    }

    #[test]
    fn test_exit_code_for_plain_error() {
        assert_eq!(exit_code_for(&anyhow!("boom")), exit_codes::ERROR);
    }
}
