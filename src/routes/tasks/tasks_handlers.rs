use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use sqlx::SqlitePool;

use super::tasks_models::{CreateTaskResponse, TaskPayload, TaskResponse};
use crate::auth::{authenticate, authorize_admin, can_access_task};
use crate::db::{group_exists, user_exists};
use crate::error::{ApiError, ApiResult};
use crate::models::task::Task;
use crate::routes::validate::{check_length, check_not_empty, json_body};

const TITLE_MAX: usize = 80;
const DESCRIPTION_MAX: usize = 120;

const SELECT_TASK: &str =
    "SELECT id, title, description, assignee, owner, group_id, done FROM tasks WHERE id = ?";
const LIST_TASKS: &str =
    "SELECT id, title, description, assignee, owner, group_id, done FROM tasks ORDER BY id";
const LIST_ASSIGNED_TASKS: &str = "SELECT id, title, description, assignee, owner, group_id, done
     FROM tasks WHERE assignee = ? ORDER BY id";

// Field checks plus existence of every referenced row
async fn validate(pool: &SqlitePool, payload: &TaskPayload) -> ApiResult<()> {
    check_not_empty("title", &payload.title)?;
    check_length("title", &payload.title, TITLE_MAX)?;
    check_length("description", &payload.description, DESCRIPTION_MAX)?;

    if !user_exists(pool, payload.assignee).await? {
        return Err(ApiError::BadRequest(format!(
            "assignee {} does not exist",
            payload.assignee
        )));
    }
    if !user_exists(pool, payload.owner).await? {
        return Err(ApiError::BadRequest(format!(
            "owner {} does not exist",
            payload.owner
        )));
    }
    if !group_exists(pool, payload.group_id).await? {
        return Err(ApiError::BadRequest(format!(
            "group {} does not exist",
            payload.group_id
        )));
    }
    Ok(())
}

async fn fetch_task(pool: &SqlitePool, id: i64) -> ApiResult<Task> {
    sqlx::query_as::<_, Task>(SELECT_TASK)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound("Task"))
}

// Admins see every task, everyone else only what is assigned to them
pub async fn get_tasks(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let user = authenticate(pool.get_ref(), &req).await?;

    let tasks = if user.is_admin() {
        sqlx::query_as::<_, Task>(LIST_TASKS)
            .fetch_all(pool.get_ref())
            .await?
    } else {
        sqlx::query_as::<_, Task>(LIST_ASSIGNED_TASKS)
            .bind(user.id)
            .fetch_all(pool.get_ref())
            .await?
    };

    info!("Returning {} tasks to {}", tasks.len(), user.username);
    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn create_task(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    body: Result<web::Json<TaskPayload>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let payload = json_body(body)?;
    validate(pool.get_ref(), &payload).await?;

    let result = sqlx::query(
        "INSERT INTO tasks (title, description, assignee, owner, group_id, done)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.assignee)
    .bind(payload.owner)
    .bind(payload.group_id)
    .bind(payload.done)
    .execute(pool.get_ref())
    .await?;

    let id = result.last_insert_rowid();
    info!("Task {} created with ID: {}", payload.title, id);
    Ok(HttpResponse::Created().json(CreateTaskResponse {
        success: true,
        message: "Task created!".into(),
        id,
    }))
}

pub async fn get_task(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = authenticate(pool.get_ref(), &req).await?;
    let task = fetch_task(pool.get_ref(), path.into_inner()).await?;

    if !can_access_task(&user, &task) {
        info!("User {} may not read task {}", user.username, task.id);
        return Err(ApiError::AuthorizationFailed);
    }

    Ok(HttpResponse::Ok().json(task))
}

// Admin or assignee; every field is replaced
pub async fn update_task(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: Result<web::Json<TaskPayload>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let user = authenticate(pool.get_ref(), &req).await?;
    let task = fetch_task(pool.get_ref(), path.into_inner()).await?;

    if !can_access_task(&user, &task) {
        info!("User {} may not update task {}", user.username, task.id);
        return Err(ApiError::AuthorizationFailed);
    }

    let payload = json_body(body)?;
    validate(pool.get_ref(), &payload).await?;

    let result = sqlx::query(
        "UPDATE tasks
         SET title = ?, description = ?, assignee = ?, owner = ?, group_id = ?, done = ?
         WHERE id = ?",
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.assignee)
    .bind(payload.owner)
    .bind(payload.group_id)
    .bind(payload.done)
    .bind(task.id)
    .execute(pool.get_ref())
    .await?;

    // deleted between the read and the write
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Task"));
    }

    info!("Task {} updated by {}", task.id, user.username);
    Ok(HttpResponse::Ok().json(TaskResponse {
        success: true,
        message: "Task updated!".into(),
    }))
}

pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Task"));
    }

    info!("Task {} deleted", id);
    Ok(HttpResponse::Ok().json(TaskResponse {
        success: true,
        message: "Task deleted!".into(),
    }))
}
