use actix_web::{web, HttpRequest, HttpResponse};
use bcrypt::hash;
use log::info;
use sqlx::SqlitePool;

use super::users_models::{CreateUserResponse, UserPayload, UserResponse};
use crate::auth::authorize_admin;
use crate::config::Config;
use crate::error::{map_constraint, ApiError, ApiResult};
use crate::models::user::User;
use crate::routes::validate::{check_length, check_not_empty, check_password, json_body};

const USERNAME_MAX: usize = 20;
const USERNAME_TAKEN: &str = "Username already exists";
const USER_REFERENCED: &str = "User is still referenced by tasks";

fn validate(payload: &UserPayload) -> ApiResult<()> {
    check_not_empty("username", &payload.username)?;
    check_length("username", &payload.username, USERNAME_MAX)?;
    check_password(&payload.password)
}

pub async fn get_users(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;

    let users = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, role FROM users ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(users))
}

pub async fn create_user(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: Result<web::Json<UserPayload>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let payload = json_body(body)?;
    validate(&payload)?;

    let password_hash = hash(&payload.password, config.bcrypt_cost)?;
    let result = sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
        .bind(&payload.username)
        .bind(password_hash)
        .bind(payload.role)
        .execute(pool.get_ref())
        .await
        .map_err(|e| map_constraint(e, USERNAME_TAKEN, USER_REFERENCED))?;

    let id = result.last_insert_rowid();
    info!("User {} created with ID: {}", payload.username, id);
    Ok(HttpResponse::Created().json(CreateUserResponse {
        success: true,
        message: "User created!".into(),
        id,
    }))
}

pub async fn get_user(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let id = path.into_inner();

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, role FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("User"))?;

    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_user(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: Result<web::Json<UserPayload>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let id = path.into_inner();
    let payload = json_body(body)?;
    validate(&payload)?;

    let password_hash = hash(&payload.password, config.bcrypt_cost)?;
    let result = sqlx::query(
        "UPDATE users SET username = ?, password_hash = ?, role = ? WHERE id = ?",
    )
    .bind(&payload.username)
    .bind(password_hash)
    .bind(payload.role)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| map_constraint(e, USERNAME_TAKEN, USER_REFERENCED))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User"));
    }

    info!("User {} updated", id);
    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        message: "User updated!".into(),
    }))
}

pub async fn delete_user(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    authorize_admin(pool.get_ref(), &req).await?;
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| map_constraint(e, USERNAME_TAKEN, USER_REFERENCED))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User"));
    }

    info!("User {} deleted", id);
    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        message: "User deleted!".into(),
    }))
}
