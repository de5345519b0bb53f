use actix_web::{web, HttpResponse, Responder};
use log::info;
use sqlx::SqlitePool;

use super::login_models::{LoginRequest, LoginResponse};
use crate::auth::verify_credentials;
use crate::error::{ApiError, ApiResult};

pub async fn root_get() -> impl Responder {
    HttpResponse::Ok().body("Task tracker is running.")
}

// login logic
pub async fn login(
    pool: web::Data<SqlitePool>,
    req: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    info!("Received login request for user: {}", req.username);

    let user = verify_credentials(pool.get_ref(), &req.username, &req.password)
        .await?
        .ok_or(ApiError::LoginFailed)?;

    info!("User {} logged in successfully", user.username);
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful!".into(),
        name: user.username,
        role: user.role,
    }))
}
