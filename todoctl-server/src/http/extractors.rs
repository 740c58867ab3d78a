//! Custom Axum extractors
//!
//! `RequireList` and `RequireTodo` load the resource named in the path and
//! reject with 404 before the handler runs. `JsonBody` rejects malformed
//! bodies with the same JSON error shape as a failed validation.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use super::server::AppState;
use crate::models::{Todo, TodoList};

async fn path_params(
    parts: &mut Parts,
    state: &Arc<AppState>,
) -> Result<HashMap<String, String>, ApiError> {
    let Path(params): Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::list_not_found(""))?;
    Ok(params)
}

async fn load_list(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<TodoList, ApiError> {
    let list_id = params
        .get("list_id")
        .ok_or_else(|| ApiError::list_not_found(""))?;

    state
        .store
        .find_list(list_id)
        .await?
        .ok_or_else(|| ApiError::list_not_found(list_id.as_str()))
}

/// The list addressed by `{list_id}`
pub struct RequireList(pub TodoList);

impl FromRequestParts<Arc<AppState>> for RequireList {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;
        Ok(Self(load_list(state, &params).await?))
    }
}

/// The list addressed by `{list_id}` and its todo `{todo_id}`
pub struct RequireTodo(pub TodoList, pub Todo);

impl FromRequestParts<Arc<AppState>> for RequireTodo {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;
        let list = load_list(state, &params).await?;

        let todo_id = params
            .get("todo_id")
            .ok_or_else(|| ApiError::todo_not_found(""))?;
        let todo = list
            .todo(todo_id)
            .cloned()
            .ok_or_else(|| ApiError::todo_not_found(todo_id.as_str()))?;

        Ok(Self(list, todo))
    }
}

/// `Json<T>` whose rejection is an `ApiError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
