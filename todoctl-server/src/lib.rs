//! todoctl-server: to-do lists over HTTP
//!
//! Lists and their todos are kept in one of two interchangeable stores,
//! a volatile per-session store or PostgreSQL, and served as a JSON API.

pub mod http;
pub mod models;
pub mod storage;

use std::sync::Arc;

pub use http::{build_router, run_server, AppState, ServerConfig};
pub use storage::{PgStore, SessionStore, StoreError, TodoStore};

/// Which storage backend to serve from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// Volatile, lost on restart
    #[default]
    Session,
    Postgres,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Postgres => "postgres",
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "session" | "memory" => Ok(Self::Session),
            "postgres" | "postgresql" | "database" => Ok(Self::Postgres),
            other => Err(format!("unknown storage backend: '{}'", other)),
        }
    }
}

/// Open the requested store. PostgreSQL gets a pool and its schema.
pub async fn open_store(
    kind: StorageKind,
    database_url: Option<&str>,
    max_connections: u32,
) -> Result<Arc<dyn TodoStore>, StoreError> {
    match kind {
        StorageKind::Session => Ok(Arc::new(SessionStore::new())),
        StorageKind::Postgres => {
            let url = database_url.ok_or_else(|| {
                StoreError::Database(sqlx::Error::Configuration(
                    "DATABASE_URL is required for the postgres backend".into(),
                ))
            })?;
            let pool = storage::create_pool_with_options(url, max_connections).await?;
            storage::migrations::run(&pool).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}
