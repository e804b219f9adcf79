//! Request handlers.
//!
//! Each handler takes the store lock once and holds it for its whole read or
//! mutation, so a request sees and leaves the collection in a single pass.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, ErrorBody, StoreError};
use crate::types::{Banner, CreateTodo, Health, Todo, UpdateTodo};
use crate::Db;

pub async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Demo Todos API",
    })
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.list().to_vec())
}

pub async fn create_todo(
    State(db): State<Db>,
    input: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = input?;
    let todo = db.write().await.create(input)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(id)?;
    let store = db.read().await;
    Ok(Json(store.get(id)?.clone()))
}

pub async fn update_todo(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
    input: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(id)?;
    let Json(input) = input?;
    let mut store = db.write().await;
    Ok(Json(store.update(id, input)?.clone()))
}

pub async fn delete_todo(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(id)?;
    let removed = db.write().await.delete(id)?;
    Ok(Json(removed))
}

/// Answers requests that match no route.
pub async fn fallback() -> ApiError {
    ApiError::Store(StoreError::NotFound)
}

/// Answers requests whose path exists but whose method does not.
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("method not allowed")),
    )
}

/// A path segment that is not a non-negative integer cannot name any todo.
fn todo_id(id: Result<Path<u64>, PathRejection>) -> Result<u64, StoreError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unparseable todo id");
            Err(StoreError::NotFound)
        }
    }
}
