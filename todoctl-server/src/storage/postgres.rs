//! PostgreSQL store
//!
//! - all_lists / find_list: one LEFT JOIN, grouped in Rust (no N+1)
//! - title uniqueness and list ownership rely on DB constraints
//! - ids are SERIAL integers; a non-numeric id is never found

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::{StoreError, TodoStore};
use crate::models::{ListTitle, Todo, TodoList, TodoTitle};

/// List row without todos
#[derive(Debug, Clone, FromRow)]
struct ListRow {
    id: i32,
    title: String,
}

/// Todo row
#[derive(Debug, Clone, FromRow)]
struct TodoRow {
    id: i32,
    title: String,
    completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            completed: row.completed,
        }
    }
}

/// PostgreSQL-backed list store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ids are rendered as plain decimal, so only that form addresses a row.
fn parse_id(id: &str) -> Option<i32> {
    let canonical = !id.is_empty()
        && id.bytes().all(|b| b.is_ascii_digit())
        && (id == "0" || !id.starts_with('0'));
    if !canonical {
        return None;
    }
    id.parse().ok()
}

/// Map a unique violation on `lists.title` to a conflict.
fn title_conflict(err: sqlx::Error, title: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(format!("list title '{}' already exists", title))
        }
        _ => StoreError::Database(err),
    }
}

/// Fold `(list, todo?)` join rows into lists, preserving row order.
fn group_rows(rows: Vec<PgRow>) -> Vec<TodoList> {
    let mut lists: Vec<TodoList> = Vec::new();

    for row in rows {
        let list_id: i32 = row.get("list_id");
        let list_id = list_id.to_string();

        if lists.last().map(|l| l.id.as_str()) != Some(list_id.as_str()) {
            lists.push(TodoList {
                id: list_id,
                title: row.get("list_title"),
                todos: Vec::new(),
            });
        }

        let todo_id: Option<i32> = row.get("todo_id");
        if let (Some(todo_id), Some(list)) = (todo_id, lists.last_mut()) {
            list.todos.push(Todo {
                id: todo_id.to_string(),
                title: row.get("todo_title"),
                completed: row.get("completed"),
            });
        }
    }

    lists
}

#[async_trait]
impl TodoStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn all_lists(&self) -> Result<Vec<TodoList>, StoreError> {
        tracing::debug!("postgres: select all lists");
        let rows = sqlx::query(
            r#"
            SELECT
                l.id AS list_id,
                l.title AS list_title,
                t.id AS todo_id,
                t.title AS todo_title,
                t.completed
            FROM lists l
            LEFT JOIN todos t ON t.list_id = l.id
            ORDER BY l.id, t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(group_rows(rows))
    }

    async fn find_list(&self, list_id: &str) -> Result<Option<TodoList>, StoreError> {
        let Some(id) = parse_id(list_id) else {
            return Ok(None);
        };

        tracing::debug!(list_id = id, "postgres: select list");
        let rows = sqlx::query(
            r#"
            SELECT
                l.id AS list_id,
                l.title AS list_title,
                t.id AS todo_id,
                t.title AS todo_title,
                t.completed
            FROM lists l
            LEFT JOIN todos t ON t.list_id = l.id
            WHERE l.id = $1
            ORDER BY t.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(group_rows(rows).into_iter().next())
    }

    async fn find_todo(&self, list_id: &str, todo_id: &str) -> Result<Option<Todo>, StoreError> {
        let (Some(list_id), Some(todo_id)) = (parse_id(list_id), parse_id(todo_id)) else {
            return Ok(None);
        };

        tracing::debug!(list_id, todo_id, "postgres: select todo");
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, completed
            FROM todos
            WHERE id = $1 AND list_id = $2
            "#,
        )
        .bind(todo_id)
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn create_list(&self, title: ListTitle) -> Result<TodoList, StoreError> {
        tracing::debug!(title = title.as_str(), "postgres: insert list");
        let row: ListRow = sqlx::query_as(
            r#"
            INSERT INTO lists (title)
            VALUES ($1)
            RETURNING id, title
            "#,
        )
        .bind(title.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| title_conflict(e, title.as_str()))?;

        Ok(TodoList {
            id: row.id.to_string(),
            title: row.title,
            todos: Vec::new(),
        })
    }

    async fn update_list_title(&self, list_id: &str, title: ListTitle) -> Result<(), StoreError> {
        let id = parse_id(list_id).ok_or_else(|| StoreError::list_not_found(list_id))?;

        tracing::debug!(list_id = id, title = title.as_str(), "postgres: update list title");
        let result = sqlx::query(
            r#"
            UPDATE lists
            SET title = $1
            WHERE id = $2
            "#,
        )
        .bind(title.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| title_conflict(e, title.as_str()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::list_not_found(list_id));
        }
        Ok(())
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), StoreError> {
        let id = parse_id(list_id).ok_or_else(|| StoreError::list_not_found(list_id))?;

        // todos go with it via ON DELETE CASCADE
        tracing::debug!(list_id = id, "postgres: delete list");
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::list_not_found(list_id));
        }
        Ok(())
    }

    async fn create_todo(&self, list_id: &str, title: TodoTitle) -> Result<Todo, StoreError> {
        let id = parse_id(list_id).ok_or_else(|| StoreError::list_not_found(list_id))?;

        tracing::debug!(list_id = id, title = title.as_str(), "postgres: insert todo");
        let row: TodoRow = sqlx::query_as(
            r#"
            INSERT INTO todos (title, list_id)
            VALUES ($1, $2)
            RETURNING id, title, completed
            "#,
        )
        .bind(title.as_str())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::list_not_found(list_id)
            }
            _ => StoreError::Database(e),
        })?;

        Ok(row.into())
    }

    async fn delete_todo(&self, list_id: &str, todo_id: &str) -> Result<(), StoreError> {
        let (Some(lid), Some(tid)) = (parse_id(list_id), parse_id(todo_id)) else {
            return Err(StoreError::todo_not_found(todo_id));
        };

        tracing::debug!(list_id = lid, todo_id = tid, "postgres: delete todo");
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND list_id = $2")
            .bind(tid)
            .bind(lid)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::todo_not_found(todo_id));
        }
        Ok(())
    }

    async fn update_todo_status(
        &self,
        list_id: &str,
        todo_id: &str,
        completed: bool,
    ) -> Result<(), StoreError> {
        let (Some(lid), Some(tid)) = (parse_id(list_id), parse_id(todo_id)) else {
            return Err(StoreError::todo_not_found(todo_id));
        };

        tracing::debug!(list_id = lid, todo_id = tid, completed, "postgres: update todo status");
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET completed = $1
            WHERE id = $2 AND list_id = $3
            "#,
        )
        .bind(completed)
        .bind(tid)
        .bind(lid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::todo_not_found(todo_id));
        }
        Ok(())
    }

    async fn complete_all_todos(&self, list_id: &str) -> Result<(), StoreError> {
        let id = parse_id(list_id).ok_or_else(|| StoreError::list_not_found(list_id))?;

        let mut tx = self.pool.begin().await?;

        // An empty list updates zero rows, so existence is checked separately.
        let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM lists WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StoreError::list_not_found(list_id));
        }

        tracing::debug!(list_id = id, "postgres: complete all todos");
        sqlx::query("UPDATE todos SET completed = true WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
