//
//  bitbucket-deploy-keys
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for managing the CLI configuration:
//! getting, setting, unsetting, and listing configuration values.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::config::Config;

use super::GlobalOptions;

/// Valid configuration keys
const VALID_KEYS: &[&str] = &["default_workspace", "default_repository"];

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset a configuration value
    Unset(UnsetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        let Some(value) = config.get(&args.key) else {
            bail!(
                "Unknown or unset key '{}'. Valid keys: {}",
                args.key,
                VALID_KEYS.join(", ")
            );
        };

        if global.json {
            let result = serde_json::json!({"key": args.key, "value": value});
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", value);
        }

        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, _global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;

        if !config.set(&args.key, args.value.clone()) {
            bail!(
                "Unknown key '{}'. Valid keys: {}",
                args.key,
                VALID_KEYS.join(", ")
            );
        }

        config.save()?;
        println!("Set {} = {}", args.key, args.value);
        Ok(())
    }

    /// Unset a configuration value
    fn unset(&self, args: &UnsetArgs, _global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;

        if !config.unset(&args.key) {
            bail!(
                "Unknown key '{}'. Valid keys: {}",
                args.key,
                VALID_KEYS.join(", ")
            );
        }

        config.save()?;
        println!("Unset {}", args.key);
        Ok(())
    }

    /// List all configuration values
    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        for key in VALID_KEYS {
            match config.get(key) {
                Some(value) => println!("{} = {}", key, value),
                None => println!("{} =", key),
            }
        }

        Ok(())
    }

    /// Show configuration file path
    fn path(&self, _global: &GlobalOptions) -> Result<()> {
        println!("{}", Config::config_path()?.display());
        Ok(())
    }
}
