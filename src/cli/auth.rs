//
//  bitbucket-deploy-keys
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Authentication commands
//!
//! ## Examples
//!
//! ```bash
//! # Log in with an access token (prompted, hidden input)
//! bbdk auth login
//!
//! # Log in from a pipe (CI)
//! echo "$TOKEN" | bbdk auth login --with-token
//!
//! # Check who you are authenticated as
//! bbdk auth status
//!
//! # Remove the stored token
//! bbdk auth logout
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Deserialize;

use crate::api::BitbucketClient;
use crate::auth::{resolve_credential, validate_token, AuthCredential, KeyringStore, CLOUD_HOST};

use super::GlobalOptions;

/// Manage authentication
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store an access token for Bitbucket Cloud
    Login(LoginArgs),

    /// Remove the stored token
    Logout,

    /// Show authentication status
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,
}

/// Response from the Cloud user endpoint.
#[derive(Deserialize)]
struct CloudUser {
    username: String,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => self.login(args, global).await,
            AuthSubcommand::Logout => self.logout(global).await,
            AuthSubcommand::Status => self.status(global).await,
        }
    }

    /// Store an access token after verifying it against the API
    async fn login(&self, args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
        let token = if args.with_token || global.no_prompt {
            read_token_from_stdin()?
        } else {
            dialoguer::Password::new()
                .with_prompt("Access token")
                .interact()?
        };

        if !validate_token(&token) {
            bail!("Invalid token format");
        }

        // Probe the token before persisting it.
        let client = probe_client()?.with_auth(AuthCredential::access_token(&token));
        let user: CloudUser = client.get("/user").await.map_err(|e| {
            anyhow::anyhow!("Token verification failed: {}", e)
        })?;

        let store = KeyringStore::new();
        store.store(CLOUD_HOST, &token)?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "username": user.username,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Logged in as {}",
                style("✓").green(),
                style(&user.username).cyan()
            );
        }

        Ok(())
    }

    /// Remove the stored token
    async fn logout(&self, global: &GlobalOptions) -> Result<()> {
        let store = KeyringStore::new();
        store.delete(CLOUD_HOST)?;

        if global.json {
            println!("{}", serde_json::json!({"success": true}));
        } else {
            println!("{} Logged out", style("✓").green());
        }

        Ok(())
    }

    /// Show which identity the current credentials resolve to
    async fn status(&self, global: &GlobalOptions) -> Result<()> {
        let Some(credential) = resolve_credential()? else {
            bail!("Not authenticated. Run 'bbdk auth login' or set BITBUCKET_TOKEN.");
        };

        let client = probe_client()?.with_auth(credential);
        let user: CloudUser = client.get("/user").await.map_err(|e| {
            anyhow::anyhow!("Stored credentials were rejected: {}", e)
        })?;

        if global.json {
            let result = serde_json::json!({
                "authenticated": true,
                "username": user.username,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Authenticated as {}",
                style("✓").green(),
                style(&user.username).cyan()
            );
        }

        Ok(())
    }
}

/// Builds an unauthenticated client honoring `BITBUCKET_API_URL`.
fn probe_client() -> Result<BitbucketClient> {
    let mut client = BitbucketClient::cloud()?;
    if let Ok(url) = std::env::var("BITBUCKET_API_URL") {
        if !url.is_empty() {
            client = client.with_base_url(&url);
        }
    }
    Ok(client)
}

/// Reads a token from standard input.
///
/// Only the first line is read and whitespace is trimmed, so the command
/// works with piped input: `echo "$TOKEN" | bbdk auth login --with-token`.
fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}
