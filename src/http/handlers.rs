//! HTTP controller: route table and thin request-binding handlers.
//!
//! Handlers do nothing beyond binding, validation invocation, service
//! dispatch, and status code selection; every failure is expressed as an
//! [`ApiError`] and rendered by the envelope middleware.

use crate::http::dtos::{CreateTaskBody, TaskResponse, UpdateTaskBody};
use crate::http::error::{ApiError, render_error_envelope};
use crate::task::domain::{TaskId, TaskStatus};
use crate::task::ports::TaskRepository;
use crate::task::services::TaskService;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use mockable::Clock;
use std::sync::Arc;

/// Shared application state handed to every handler.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: Arc<TaskService<R, C>>,
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the state from a task service.
    #[must_use]
    pub const fn new(service: Arc<TaskService<R, C>>) -> Self {
        Self { service }
    }
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Builds the router: six task routes, an enveloped fallback for unmapped
/// paths and methods, and the error-envelope middleware.
pub fn build_router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/api/tasks",
            post(create_task::<R, C>).get(list_tasks::<R, C>),
        )
        .route(
            "/api/tasks/{id}",
            get(get_task::<R, C>)
                .put(update_task::<R, C>)
                .delete(delete_task::<R, C>),
        )
        .route(
            "/api/tasks/status/{status}",
            get(list_tasks_by_status::<R, C>),
        )
        .fallback(unmapped_route)
        .method_not_allowed_fallback(unmapped_route)
        .layer(middleware::from_fn(render_error_envelope))
        .with_state(state)
}

async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload.map_err(|rejection| ApiError::from_json_rejection(&rejection))?;
    let command = body.into_command()?;
    let task = state
        .service
        .create(command)
        .await
        .map_err(ApiError::from_service)?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<Vec<TaskResponse>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = state
        .service
        .list_all()
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state
        .service
        .get(bind_task_id(id)?)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(TaskResponse::from(&task)))
}

async fn list_tasks_by_status<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_status): Path<String>,
) -> Result<Json<Vec<TaskResponse>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let status = TaskStatus::try_from(raw_status.as_str())
        .map_err(|err| ApiError::InvalidData(err.to_string()))?;
    let tasks = state
        .service
        .list_by_status(status)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = bind_task_id(id)?;
    let Json(body) = payload.map_err(|rejection| ApiError::from_json_rejection(&rejection))?;
    let command = body.into_command()?;
    let task = state
        .service
        .update(task_id, command)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(TaskResponse::from(&task)))
}

async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    state
        .service
        .delete(bind_task_id(id)?)
        .await
        .map_err(ApiError::from_service)?;
    Ok(StatusCode::NO_CONTENT)
}

#[expect(clippy::unused_async, reason = "axum handlers must be async")]
async fn unmapped_route(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound(format!("no route matches {method} {}", uri.path()))
}

fn bind_task_id(id: Result<Path<i64>, PathRejection>) -> Result<TaskId, ApiError> {
    id.map(|Path(value)| TaskId::new(value)).map_err(|_| {
        ApiError::InvalidData("invalid value for parameter 'id'; expected an integer".to_owned())
    })
}
