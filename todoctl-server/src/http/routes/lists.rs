//! List endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::{list_view, lists_view, ListView, ListsView, Notified};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, RequireList};
use crate::http::server::AppState;
use crate::models::ListTitle;

/// Create or rename list request
#[derive(Debug, Deserialize)]
pub struct ListTitleRequest {
    pub list_title: String,
}

/// GET / - the overview lives at /lists
async fn index() -> Redirect {
    Redirect::to("/lists")
}

/// GET /lists - all lists, completed last
async fn get_lists(State(state): State<Arc<AppState>>) -> Result<Json<ListsView>, ApiError> {
    Ok(Json(lists_view(&state).await?))
}

/// POST /lists - create a new list
async fn create_list(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ListTitleRequest>,
) -> Result<(StatusCode, Json<Notified<ListsView>>), ApiError> {
    let existing = state.store.all_lists().await?;
    let title = ListTitle::parse(&req.list_title, &existing)?;

    let list = state.store.create_list(title).await?;
    tracing::info!(list_id = %list.id, "list created");

    Ok((
        StatusCode::CREATED,
        Json(Notified::success(
            "The list has been created.",
            lists_view(&state).await?,
        )),
    ))
}

/// GET /lists/{list_id} - one list, completed todos last
async fn show_list(RequireList(list): RequireList) -> Json<ListView> {
    Json(ListView::from(list))
}

/// POST /lists/{list_id} - rename a list
async fn update_list(
    State(state): State<Arc<AppState>>,
    RequireList(list): RequireList,
    JsonBody(req): JsonBody<ListTitleRequest>,
) -> Result<Json<Notified<ListsView>>, ApiError> {
    let others: Vec<_> = state
        .store
        .all_lists()
        .await?
        .into_iter()
        .filter(|other| other.id != list.id)
        .collect();
    let title = ListTitle::parse(&req.list_title, &others)?;

    state.store.update_list_title(&list.id, title).await?;
    tracing::info!(list_id = %list.id, "list renamed");

    Ok(Json(Notified::success(
        "The list has been updated.",
        lists_view(&state).await?,
    )))
}

/// POST /lists/{list_id}/delete - delete a list and its todos
async fn delete_list(
    State(state): State<Arc<AppState>>,
    RequireList(list): RequireList,
) -> Result<Json<Notified<ListsView>>, ApiError> {
    state.store.delete_list(&list.id).await?;
    tracing::info!(list_id = %list.id, todos = list.todos.len(), "list deleted");

    Ok(Json(Notified::success(
        "The list has been deleted.",
        lists_view(&state).await?,
    )))
}

/// POST /lists/{list_id}/complete_all - mark every todo completed
async fn complete_all(
    State(state): State<Arc<AppState>>,
    RequireList(list): RequireList,
) -> Result<Json<Notified<ListView>>, ApiError> {
    state.store.complete_all_todos(&list.id).await?;

    Ok(Json(Notified::success(
        "All todos have been updated.",
        list_view(&state, &list.id).await?,
    )))
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/lists", get(get_lists).post(create_list))
        .route("/lists/{list_id}", get(show_list).post(update_list))
        .route("/lists/{list_id}/delete", post(delete_list))
        .route("/lists/{list_id}/complete_all", post(complete_all))
}
