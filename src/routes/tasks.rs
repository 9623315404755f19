use crate::{
    auth::AuthenticatedAccount,
    error::AppError,
    models::{Task, TaskInput, TaskPatch},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated account's tasks.
///
/// Tasks are ordered by creation date, newest first. Another account's
/// tasks are never included; the ownership filter is part of the store
/// lookup itself.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    account: AuthenticatedAccount,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_by_owner(account.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated account.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description` (optional).
/// - `dueDate` (optional).
///
/// Every new task starts as `pending`; a status named in the create body
/// is ignored.
///
/// ## Responses:
/// - `201 Created`: the new `Task` object.
/// - `400 Bad Request`: validation failed.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskInput>,
    account: AuthenticatedAccount,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), account.0);
    let created = state.tasks.insert(task).await?;

    Ok(HttpResponse::Created().json(created))
}

/// Applies a partial update to a task owned by the authenticated account.
///
/// Fields omitted from the body keep their current value. `status` only
/// accepts `pending` or `done`; anything else is a 400 and the task is left
/// unchanged. A task owned by another account responds exactly like a
/// missing one.
///
/// ## Responses:
/// - `200 OK`: the updated `Task` object.
/// - `400 Bad Request`: validation failed.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this account.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    patch: web::Json<TaskPatch>,
    account: AuthenticatedAccount,
) -> Result<impl Responder, AppError> {
    patch.validate()?;

    let updated = state
        .tasks
        .update(account.0, task_id.into_inner(), patch.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes a task owned by the authenticated account.
///
/// The delete is final; there is no soft-delete or recovery. Same
/// ownership rule as update: a foreign task is a 404.
///
/// ## Responses:
/// - `200 OK`: a confirmation body.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this account.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    account: AuthenticatedAccount,
) -> Result<impl Responder, AppError> {
    state.tasks.delete(account.0, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "task deleted" })))
}
