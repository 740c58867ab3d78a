//! Todo endpoints, nested under their list

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;

use super::{list_view, ListView, Notified};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, RequireList, RequireTodo};
use crate::http::server::AppState;
use crate::models::TodoTitle;

/// Create todo request
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub todo: String,
}

/// Toggle todo request
#[derive(Debug, Deserialize)]
pub struct ToggleTodoRequest {
    pub completed: bool,
}

/// POST /lists/{list_id}/todos - add a todo
async fn create_todo(
    State(state): State<Arc<AppState>>,
    RequireList(list): RequireList,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Notified<ListView>>), ApiError> {
    let title = TodoTitle::parse(&req.todo)?;

    let todo = state.store.create_todo(&list.id, title).await?;
    tracing::info!(list_id = %list.id, todo_id = %todo.id, "todo created");

    Ok((
        StatusCode::CREATED,
        Json(Notified::success(
            "The todo was added.",
            list_view(&state, &list.id).await?,
        )),
    ))
}

/// POST /lists/{list_id}/todos/{todo_id}/toggle - set completion
async fn update_todo_status(
    State(state): State<Arc<AppState>>,
    RequireTodo(list, todo): RequireTodo,
    JsonBody(req): JsonBody<ToggleTodoRequest>,
) -> Result<Json<Notified<ListView>>, ApiError> {
    state
        .store
        .update_todo_status(&list.id, &todo.id, req.completed)
        .await?;

    Ok(Json(Notified::success(
        "The todo has been updated.",
        list_view(&state, &list.id).await?,
    )))
}

/// POST /lists/{list_id}/todos/{todo_id}/delete - remove a todo
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    RequireTodo(list, todo): RequireTodo,
) -> Result<Json<Notified<ListView>>, ApiError> {
    state.store.delete_todo(&list.id, &todo.id).await?;
    tracing::info!(list_id = %list.id, todo_id = %todo.id, "todo deleted");

    Ok(Json(Notified::success(
        "The todo has been deleted.",
        list_view(&state, &list.id).await?,
    )))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists/{list_id}/todos", post(create_todo))
        .route("/lists/{list_id}/todos/{todo_id}/toggle", post(update_todo_status))
        .route("/lists/{list_id}/todos/{todo_id}/delete", post(delete_todo))
}
