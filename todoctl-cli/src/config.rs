//! Config file handling: ~/.todoctl/config.toml
//!
//! The file is optional. Every value in it can be overridden on the
//! command line.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Contents of config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoctlConfig {
    #[serde(default)]
    pub server: ServerSection,
}

/// `[server]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    /// "session" or "postgres"
    pub storage: Option<String>,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub cors_permissive: Option<bool>,
}

impl TodoctlConfig {
    /// Load the config file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse config file (invalid TOML)")
    }

    /// Config file path: $TODOCTL_CONFIG or ~/.todoctl/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("TODOCTL_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".todoctl/config.toml")
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the loaded config as TOML
    Show,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", TodoctlConfig::config_path().display());
        }
        ConfigCommands::Show => {
            let config = TodoctlConfig::load()?;
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render config as TOML")?;
            print!("{}", rendered);
        }
    }
    Ok(())
}
