//! Storage layer - one interface, two backends
//!
//! # Backends
//!
//! - [`SessionStore`]: volatile, one per session, UUID string ids
//! - [`PgStore`]: PostgreSQL via a connection pool, SERIAL integer ids
//!
//! Both are used through `Arc<dyn TodoStore>`. Ids are carried as strings;
//! an id that cannot exist in a backend is simply not found.

pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod session;

use async_trait::async_trait;

use crate::models::{ListTitle, Todo, TodoList, TodoTitle};

pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use session::SessionStore;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub(crate) fn list_not_found(list_id: &str) -> Self {
        Self::NotFound {
            resource: "list",
            id: list_id.to_owned(),
        }
    }

    pub(crate) fn todo_not_found(todo_id: &str) -> Self {
        Self::NotFound {
            resource: "todo",
            id: todo_id.to_owned(),
        }
    }
}

/// List and todo persistence.
///
/// Mutations on a missing list or todo return [`StoreError::NotFound`];
/// lookups return `None`.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Every list with its todos, in creation order.
    async fn all_lists(&self) -> Result<Vec<TodoList>, StoreError>;

    async fn find_list(&self, list_id: &str) -> Result<Option<TodoList>, StoreError>;

    /// A todo, only if it belongs to `list_id`.
    async fn find_todo(&self, list_id: &str, todo_id: &str) -> Result<Option<Todo>, StoreError>;

    async fn create_list(&self, title: ListTitle) -> Result<TodoList, StoreError>;

    async fn update_list_title(&self, list_id: &str, title: ListTitle) -> Result<(), StoreError>;

    /// Delete a list together with all of its todos.
    async fn delete_list(&self, list_id: &str) -> Result<(), StoreError>;

    /// Append a new, incomplete todo to a list.
    async fn create_todo(&self, list_id: &str, title: TodoTitle) -> Result<Todo, StoreError>;

    async fn delete_todo(&self, list_id: &str, todo_id: &str) -> Result<(), StoreError>;

    async fn update_todo_status(
        &self,
        list_id: &str,
        todo_id: &str,
        completed: bool,
    ) -> Result<(), StoreError>;

    /// Mark every todo in the list completed.
    async fn complete_all_todos(&self, list_id: &str) -> Result<(), StoreError>;
}
