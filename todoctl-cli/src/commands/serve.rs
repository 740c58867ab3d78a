//! HTTP server command
//!
//! Opens the selected store and runs the todoctl HTTP server.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::http::{run_server, ServerConfig, DEFAULT_PORT};
use todoctl_server::storage::pool::DEFAULT_MAX_CONNECTIONS;
use todoctl_server::{open_store, StorageKind};

use crate::config::TodoctlConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5003)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Storage backend: session (volatile) or postgres
    #[arg(long, short = 's')]
    pub storage: Option<StorageKind>,

    /// Database URL for the postgres backend (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Serve settings after merging flags over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedServe {
    pub bind: SocketAddr,
    pub storage: StorageKind,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub cors_permissive: bool,
}

/// Flags win over the config file, which wins over defaults.
pub fn resolve(args: ServeArgs, file: &TodoctlConfig) -> Result<ResolvedServe> {
    let section = &file.server;

    let storage = match (args.storage, section.storage.as_deref()) {
        (Some(kind), _) => kind,
        (None, Some(name)) => name
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Invalid `server.storage` in config file")?,
        (None, None) => StorageKind::default(),
    };

    Ok(ResolvedServe {
        bind: args
            .bind
            .or(section.bind)
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))),
        storage,
        database_url: args.database_url.or_else(|| section.database_url.clone()),
        max_connections: args
            .max_connections
            .or(section.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        cors_permissive: args.cors_permissive || section.cors_permissive.unwrap_or(false),
    })
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file = TodoctlConfig::load()?;
    let settings = resolve(args, &file)?;

    if settings.storage == StorageKind::Postgres && settings.database_url.is_none() {
        anyhow::bail!(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or {}",
            TodoctlConfig::config_path().display()
        );
    }

    tracing::info!(
        storage = settings.storage.as_str(),
        "Starting todoctl server on {}",
        settings.bind
    );

    let store = open_store(
        settings.storage,
        settings.database_url.as_deref(),
        settings.max_connections,
    )
    .await
    .context("Failed to open storage")?;

    let config = ServerConfig {
        bind_addr: settings.bind,
        cors_permissive: settings.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
