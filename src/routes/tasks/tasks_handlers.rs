use actix_web::{web, HttpRequest, HttpResponse};
use log::{info, warn};
use uuid::Uuid;

use super::tasks_models::{DeleteResponse, PublicTasksResponse, TaskPayload, TaskView};
use crate::auth::require_user;
use crate::error::ApiError;
use crate::models::task::NewTask;
use crate::policy;
use crate::state::AppState;
use crate::validation::validate_task_payload;

fn asset_key(extension: &str) -> String {
    format!("tasks_images/{}.{}", Uuid::new_v4(), extension)
}

fn task_not_found(id: u64) -> ApiError {
    ApiError::NotFound(format!("Task {} not found", id))
}

// GET /tasks: every task the caller may read, insertion order.
pub async fn list_tasks(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = require_user(&req, &state).await?;

    let views: Vec<TaskView> = state
        .tasks
        .list()
        .await?
        .iter()
        .filter(|task| policy::can_read(actor.user_id, task))
        .map(|task| TaskView::from_task(task, state.assets.as_ref()))
        .collect();

    Ok(HttpResponse::Ok().json(views))
}

// POST /tasks: validate, store the image asset if any, persist the row.
pub async fn create_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<TaskPayload>,
) -> Result<HttpResponse, ApiError> {
    let actor = require_user(&req, &state).await?;
    let fields = validate_task_payload(&payload)?;

    let image = match fields.image {
        Some(img) => {
            let key = asset_key(img.extension);
            state.assets.store(&key, &img.bytes).await?;
            Some(key)
        }
        None => None,
    };

    let task = state
        .tasks
        .insert(NewTask {
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            image,
            is_private: fields.is_private.unwrap_or(false),
            user_id: actor.user_id,
        })
        .await?;

    info!("User {} created task {}", actor.user_id, task.id);
    Ok(HttpResponse::Created().json(TaskView::from_task(&task, state.assets.as_ref())))
}

// GET /tasks/{id}. A private task reads as absent to non-owners.
pub async fn get_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let actor = require_user(&req, &state).await?;
    let id = path.into_inner();

    let task = state.tasks.get(id).await?.ok_or_else(|| task_not_found(id))?;
    if !policy::can_read(actor.user_id, &task) {
        return Err(task_not_found(id));
    }

    Ok(HttpResponse::Ok().json(TaskView::from_task(&task, state.assets.as_ref())))
}

// PUT /tasks/{id}: owner-only. Replacing the image deletes the previous
// asset so a task never holds more than one stored image.
pub async fn update_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
    payload: web::Json<TaskPayload>,
) -> Result<HttpResponse, ApiError> {
    let actor = require_user(&req, &state).await?;
    let id = path.into_inner();

    let mut task = state.tasks.get(id).await?.ok_or_else(|| task_not_found(id))?;
    policy::authorize_mutation(actor.user_id, &task)?;

    let fields = validate_task_payload(&payload)?;

    if let Some(img) = fields.image {
        if let Some(old_key) = task.image.take() {
            // Orphaned assets are loggable, never a reason to fail the update.
            if let Err(e) = state.assets.delete(&old_key).await {
                warn!("Failed to delete replaced image {}: {:#}", old_key, e);
            }
        }
        let key = asset_key(img.extension);
        state.assets.store(&key, &img.bytes).await?;
        task.image = Some(key);
    }

    task.title = fields.title;
    task.description = fields.description;
    task.due_date = fields.due_date;
    task.is_private = fields.is_private.unwrap_or(task.is_private);

    state.tasks.update(&task).await?;

    info!("User {} updated task {}", actor.user_id, id);
    Ok(HttpResponse::Ok().json(TaskView::from_task(&task, state.assets.as_ref())))
}

// PUT /tasks/{id}/complete: one-way and idempotent.
pub async fn complete_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let actor = require_user(&req, &state).await?;
    let id = path.into_inner();

    let mut task = state.tasks.get(id).await?.ok_or_else(|| task_not_found(id))?;
    policy::authorize_mutation(actor.user_id, &task)?;

    if !task.completed {
        state.tasks.set_completed(id).await?;
        task.completed = true;
        info!("User {} completed task {}", actor.user_id, id);
    }

    Ok(HttpResponse::Ok().json(TaskView::from_task(&task, state.assets.as_ref())))
}

// DELETE /tasks/{id}: removes the row and its asset in one logical step.
pub async fn delete_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let actor = require_user(&req, &state).await?;
    let id = path.into_inner();

    let task = state.tasks.get(id).await?.ok_or_else(|| task_not_found(id))?;
    policy::authorize_mutation(actor.user_id, &task)?;

    if let Some(key) = &task.image {
        if let Err(e) = state.assets.delete(key).await {
            warn!("Failed to delete image {} for task {}: {:#}", key, id, e);
        }
    }

    state.tasks.delete(id).await?;

    info!("User {} deleted task {}", actor.user_id, id);
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Task deleted successfully".into(),
    }))
}

// GET /public/tasks: cross-user listing of public tasks plus the latest
// due date among them.
pub async fn public_tasks(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_user(&req, &state).await?;

    let tasks = state.tasks.list().await?;
    let public: Vec<_> = tasks.iter().filter(|t| !t.is_private).collect();

    let latest_date = public.iter().map(|t| t.due_date).max();
    let views: Vec<TaskView> = public
        .iter()
        .map(|task| TaskView::from_task(task, state.assets.as_ref()))
        .collect();

    Ok(HttpResponse::Ok().json(PublicTasksResponse {
        tasks: views,
        latest_date,
    }))
}
