use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use sqlx::SqlitePool;

use super::groups_models::{
    CreateGroupResponse, DeleteGroupResponse, GroupPayload, UpdateGroupResponse,
};
use crate::auth::{authenticate, authorize_admin};
use crate::error::{map_constraint, ApiError, ApiResult};
use crate::models::group::Group;
use crate::routes::validate::{check_length, check_not_empty, json_body};

const GROUP_NAME_MAX: usize = 20;
const GROUP_NAME_TAKEN: &str = "Group name already exists";
const GROUP_REFERENCED: &str = "Group is still referenced by tasks";

fn validate(payload: &GroupPayload) -> ApiResult<()> {
    check_not_empty("name", &payload.name)?;
    check_length("name", &payload.name, GROUP_NAME_MAX)
}

pub async fn get_groups(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;

    let groups = sqlx::query_as::<_, Group>("SELECT id, name FROM groups ORDER BY id")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(groups))
}

pub async fn create_group(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    body: Result<web::Json<GroupPayload>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let payload = json_body(body)?;
    validate(&payload)?;

    let result = sqlx::query("INSERT INTO groups (name) VALUES (?)")
        .bind(&payload.name)
        .execute(pool.get_ref())
        .await
        .map_err(|e| map_constraint(e, GROUP_NAME_TAKEN, GROUP_REFERENCED))?;

    let id = result.last_insert_rowid();
    info!("Group {} created successfully with ID: {}", payload.name, id);
    Ok(HttpResponse::Created().json(CreateGroupResponse {
        success: true,
        message: "Group created!".into(),
        id,
        name: payload.name,
    }))
}

// Any authenticated user may look a group up by id
pub async fn get_group(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    authenticate(pool.get_ref(), &req).await?;
    let id = path.into_inner();

    let group = sqlx::query_as::<_, Group>("SELECT id, name FROM groups WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::NotFound("Group"))?;

    Ok(HttpResponse::Ok().json(group))
}

pub async fn update_group(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: Result<web::Json<GroupPayload>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let id = path.into_inner();
    let payload = json_body(body)?;
    validate(&payload)?;

    let result = sqlx::query("UPDATE groups SET name = ? WHERE id = ?")
        .bind(&payload.name)
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| map_constraint(e, GROUP_NAME_TAKEN, GROUP_REFERENCED))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Group"));
    }

    info!("Group {} renamed to {}", id, payload.name);
    Ok(HttpResponse::Ok().json(UpdateGroupResponse {
        success: true,
        message: "Group updated!".into(),
        name: payload.name,
    }))
}

pub async fn delete_group(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM groups WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| map_constraint(e, GROUP_NAME_TAKEN, GROUP_REFERENCED))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Group"));
    }

    info!("Group {} deleted", id);
    Ok(HttpResponse::Ok().json(DeleteGroupResponse {
        success: true,
        message: "Group deleted!".into(),
    }))
}
