//! Route handlers organized by resource
//!
//! Every mutation answers with a [`Notice`] plus the view the user lands on
//! next: the overview for list-level changes, the list itself for todo
//! changes.

pub mod health;
pub mod lists;
pub mod todos;

use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{
    is_list_completed, is_todo_completed, sort_items, todos_remaining, Todo, TodoList,
};

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot feedback message for the user
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub fn success(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message,
        }
    }
}

/// Mutation response: notice plus the resulting view
#[derive(Debug, Serialize)]
pub struct Notified<T> {
    pub notice: Notice,
    pub data: T,
}

impl<T> Notified<T> {
    pub fn success(message: &'static str, data: T) -> Self {
        Self {
            notice: Notice::success(message),
            data,
        }
    }
}

/// A list as shown in the overview
#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub id: String,
    pub title: String,
    pub todos_count: usize,
    pub todos_remaining: usize,
    pub completed: bool,
}

impl From<&TodoList> for ListSummary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id.clone(),
            title: list.title.clone(),
            todos_count: list.todos.len(),
            todos_remaining: todos_remaining(list),
            completed: is_list_completed(list),
        }
    }
}

/// Overview of all lists, completed lists last
#[derive(Debug, Clone, Serialize)]
pub struct ListsView {
    pub lists: Vec<ListSummary>,
}

impl From<Vec<TodoList>> for ListsView {
    fn from(lists: Vec<TodoList>) -> Self {
        let lists = sort_items(lists, is_list_completed);
        Self {
            lists: lists.iter().map(ListSummary::from).collect(),
        }
    }
}

/// A single list with its todos, completed todos last
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub todos_remaining: usize,
    pub todos: Vec<Todo>,
}

impl From<TodoList> for ListView {
    fn from(list: TodoList) -> Self {
        let completed = is_list_completed(&list);
        let remaining = todos_remaining(&list);
        Self {
            id: list.id,
            title: list.title,
            completed,
            todos_remaining: remaining,
            todos: sort_items(list.todos, is_todo_completed),
        }
    }
}

/// Current overview, as shown after list-level changes.
async fn lists_view(state: &AppState) -> Result<ListsView, ApiError> {
    Ok(ListsView::from(state.store.all_lists().await?))
}

/// Current state of one list, as shown after todo-level changes.
async fn list_view(state: &AppState, list_id: &str) -> Result<ListView, ApiError> {
    state
        .store
        .find_list(list_id)
        .await?
        .map(ListView::from)
        .ok_or_else(|| ApiError::list_not_found(list_id))
}
