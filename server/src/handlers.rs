//! One handler per route. Each parses its input, calls the store once, and
//! turns the outcome into a response.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;
use crate::model::{Todo, TodoFields};
use crate::state::AppState;

/// Ids that do not parse as integers can never match a record.
fn todo_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

fn todo_fields(payload: Result<Json<Value>, JsonRejection>) -> Result<TodoFields, ApiError> {
    let Json(body) = payload?;
    Ok(TodoFields::from_json(&body)?)
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.lock().await.list_all()?;
    tracing::debug!(count = todos.len(), "listed todos");
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let fields = todo_fields(payload)?;
    let todo = state.store.lock().await.create(fields)?;
    tracing::info!(todo_id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(path)?;
    let todo = state.store.lock().await.get(id)?;
    Ok(Json(todo))
}

/// Serves both PUT and PATCH: only the supplied fields change.
pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(path)?;
    let fields = todo_fields(payload)?;
    let todo = state.store.lock().await.update(id, fields)?;
    tracing::info!(todo_id = id, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = todo_id(path)?;
    state.store.lock().await.delete(id)?;
    tracing::info!(todo_id = id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
