//
//  bitbucket-deploy-keys
//  cli/deploy_key.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Deploy key management commands
//!
//! This module provides the commands for managing deploy keys on a
//! repository. Every key a command touches is addressed by its composite ID
//! `workspace/repository/key_id`, which `add` prints on success and the
//! other commands accept back.
//!
//! ## Examples
//!
//! ```bash
//! # List deploy keys on a repository
//! bbdk list -w myteam -R backend
//!
//! # Add a new deploy key
//! bbdk add -w myteam -R backend --label "CI runner" --key-file ~/.ssh/ci_ed25519.pub
//!
//! # Show / relabel / delete by composite ID
//! bbdk show myteam/backend/1234
//! bbdk update myteam/backend/1234 --label "Release bot"
//! bbdk delete myteam/backend/1234
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::api::common::PaginatedResponse;
use crate::api::deploy_keys::{self, DeployKey};
use crate::api::BitbucketClient;
use crate::auth::resolve_credential;
use crate::config::Config;
use crate::output::{print_field, print_header, OutputFormat, OutputWriter, TableOutput};
use crate::resource::{DeployKeyConfig, DeployKeyResource, DeployKeyState};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ListArgs {}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Key label
    #[arg(long, short = 'l')]
    pub label: Option<String>,

    /// SSH public key content
    #[arg(long, short = 'k', conflicts_with = "key_file")]
    pub key: Option<String>,

    /// Read key from file
    #[arg(long, short = 'f', conflicts_with = "key")]
    pub key_file: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Composite ID (WORKSPACE/REPOSITORY/KEY-ID)
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Composite ID (WORKSPACE/REPOSITORY/KEY-ID)
    pub id: String,

    /// New key label
    #[arg(long, short = 'l')]
    pub label: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Composite ID (WORKSPACE/REPOSITORY/KEY-ID)
    pub id: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub confirm: bool,
}

// Output types

#[derive(Debug, Serialize)]
struct DeployKeyListItem {
    id: String,
    key_id: u64,
    label: String,
    comment: String,
    created_on: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeployKeyDetail {
    id: String,
    key_id: String,
    workspace: String,
    repository: String,
    label: Option<String>,
    comment: Option<String>,
}

impl TableOutput for DeployKeyListItem {
    fn print_table(&self, _color: bool) {
        println!(
            "{:<10} {:<24} {:<30} {}",
            self.key_id,
            truncate(&self.label, 22),
            truncate(&self.comment, 28),
            self.created_on.as_deref().unwrap_or("-")
        );
    }
}

impl TableOutput for DeployKeyDetail {
    fn print_table(&self, color: bool) {
        print_field("ID", &self.id, color);
        print_field("Workspace", &self.workspace, color);
        print_field("Repository", &self.repository, color);
        print_field("Key ID", &self.key_id, color);
        print_field("Label", self.label.as_deref().unwrap_or("-"), color);
        print_field("Comment", self.comment.as_deref().unwrap_or("-"), color);
    }
}

/// Builds an authenticated API client.
///
/// Honors the `BITBUCKET_API_URL` environment variable for pointing the CLI
/// at a non-default API endpoint (proxies, test servers).
fn api_client() -> Result<BitbucketClient> {
    let credential = resolve_credential()?.ok_or_else(|| {
        anyhow::anyhow!("Not authenticated. Run 'bbdk auth login' or set BITBUCKET_TOKEN.")
    })?;

    let mut client = BitbucketClient::cloud()?.with_auth(credential);
    if let Ok(url) = std::env::var("BITBUCKET_API_URL") {
        if !url.is_empty() {
            client = client.with_base_url(&url);
        }
    }
    Ok(client)
}

/// Resolves the target workspace and repository.
///
/// CLI flags win over configuration defaults.
fn resolve_target(global: &GlobalOptions) -> Result<(String, String)> {
    let config = Config::load().unwrap_or_default();

    let workspace = global
        .workspace
        .clone()
        .or(config.core.default_workspace.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No workspace specified. Use --workspace or 'bbdk config set default_workspace <slug>'."
            )
        })?;

    let repository = global
        .repository
        .clone()
        .or(config.core.default_repository.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No repository specified. Use --repository or 'bbdk config set default_repository <slug>'."
            )
        })?;

    Ok((workspace, repository))
}

fn output_format(global: &GlobalOptions) -> OutputFormat {
    if global.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    }
}

impl ListArgs {
    /// List deploy keys on the target repository
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (workspace, repository) = resolve_target(global)?;
        let client = api_client()?;

        let mut url = deploy_keys::collection_path(&workspace, &repository);
        let mut keys: Vec<DeployKey> = Vec::new();

        // Walk Cloud pagination; `next` is absolute, so strip our base back off.
        loop {
            let page: PaginatedResponse<DeployKey> = client.get(&url).await?;
            keys.extend(page.values);
            match page.next {
                Some(next) => match next.strip_prefix(client.base_url()) {
                    Some(path) => url = path.to_string(),
                    None => break,
                },
                None => break,
            }
        }

        let items: Vec<DeployKeyListItem> = keys
            .into_iter()
            .map(|key| DeployKeyListItem {
                id: format!("{}/{}/{}", workspace, repository, key.id),
                key_id: key.id,
                label: key.label.unwrap_or_default(),
                comment: key.comment.unwrap_or_default(),
                created_on: key.created_on.map(|t| t.format("%Y-%m-%d").to_string()),
            })
            .collect();

        if items.is_empty() && !global.json {
            println!("No deploy keys found on {}/{}.", workspace, repository);
            println!();
            println!("Add one with:");
            println!("  bbdk add --label \"CI runner\" --key-file ~/.ssh/ci_ed25519.pub");
            return Ok(());
        }

        let writer = OutputWriter::new(output_format(global));

        if !global.json {
            println!();
            print_header(&format!("Deploy keys on {}/{}", workspace, repository));
            println!(
                "{} {} {} {}",
                style(format!("{:<10}", "KEY-ID")).bold(),
                style(format!("{:<24}", "LABEL")).bold(),
                style(format!("{:<30}", "COMMENT")).bold(),
                style("CREATED").bold()
            );

            for item in &items {
                item.print_table(writer.color_enabled());
            }

            println!();
            println!("Showing {} deploy key(s)", items.len());
        } else {
            writer.write_list(&items)?;
        }

        Ok(())
    }
}

impl AddArgs {
    /// Add a deploy key to the target repository
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (workspace, repository) = resolve_target(global)?;

        // Get the key content
        let key_content = if let Some(key) = &self.key {
            key.clone()
        } else if let Some(key_file) = &self.key_file {
            fs::read_to_string(key_file)
                .with_context(|| format!("Failed to read key file {}", key_file))?
                .trim()
                .to_string()
        } else {
            bail!("Either --key or --key-file is required");
        };

        // Validate key format
        if !key_content.starts_with("ssh-") && !key_content.starts_with("ecdsa-") {
            bail!("Invalid SSH public key format. Key should start with 'ssh-' or 'ecdsa-'");
        }

        let resource = DeployKeyResource::new(api_client()?);
        let state = resource
            .create(&DeployKeyConfig {
                workspace,
                repository,
                key: Some(key_content),
                label: self.label.clone(),
            })
            .await?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "id": state.id,
                "key_id": state.key_id,
                "label": state.label,
                "comment": state.comment,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Added deploy key {}",
                style("✓").green(),
                style(state.label.as_deref().unwrap_or(&state.key_id)).cyan()
            );
            println!("  ID: {}", state.id);
        }

        Ok(())
    }
}

impl ShowArgs {
    /// Show a deploy key by composite ID
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut state = DeployKeyState::import(&self.id)?;

        let resource = DeployKeyResource::new(api_client()?);
        resource.read(&mut state).await?;

        if !state.exists() {
            bail!("deploy key ({}) no longer exists on the remote", self.id);
        }

        let detail = DeployKeyDetail {
            id: state.id.clone(),
            key_id: state.key_id.clone(),
            workspace: state.workspace.clone(),
            repository: state.repository.clone(),
            label: state.label.clone(),
            comment: state.comment.clone(),
        };

        let writer = OutputWriter::new(output_format(global));
        if !global.json {
            println!();
        }
        writer.write(&detail)?;

        Ok(())
    }
}

impl UpdateArgs {
    /// Relabel a deploy key
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut state = DeployKeyState::import(&self.id)?;

        let resource = DeployKeyResource::new(api_client()?);
        resource.read(&mut state).await?;
        if !state.exists() {
            bail!("deploy key ({}) no longer exists on the remote", self.id);
        }

        state.label = Some(self.label.clone());
        resource.update(&mut state).await?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "id": state.id,
                "label": state.label,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Updated deploy key {}",
                style("✓").green(),
                style(&state.id).cyan()
            );
        }

        Ok(())
    }
}

impl DeleteArgs {
    /// Delete a deploy key by composite ID
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let state = DeployKeyState::import(&self.id)?;

        // Confirm deletion
        if !self.confirm && !global.no_prompt {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete deploy key {}?", self.id))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{} Cancelled.", style("!").yellow());
                return Ok(());
            }
        }

        let resource = DeployKeyResource::new(api_client()?);
        resource.delete(&state).await?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "id": self.id,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Deleted deploy key {}",
                style("✓").green(),
                style(&self.id).cyan()
            );
        }

        Ok(())
    }
}

/// Truncate a string to max length, adding "…" if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-rather-long-label", 10), "a-rather-…");
    }

    #[test]
    fn test_truncate_multibyte_label() {
        // Labels come from the server and are not guaranteed ASCII.
        assert_eq!(
            truncate("ポートフォリオのデプロイキー", 22),
            "ポートフォリオのデプロイキー"
        );
        assert_eq!(truncate("ポートフォリオのデプロイキー", 10), "ポートフォリオのデ…");
    }
}
