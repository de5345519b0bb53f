use actix_web::web;

use crate::auth::MAX_PASSWORD_BYTES;
use crate::error::{ApiError, ApiResult};

/// Unwraps a JSON body extracted as `Result` so the handler can run its
/// credential guard before reporting a malformed payload.
pub fn json_body<T>(body: Result<web::Json<T>, actix_web::Error>) -> ApiResult<T> {
    body.map(web::Json::into_inner)
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub fn check_length(field: &str, value: &str, max: usize) -> ApiResult<()> {
    if value.chars().count() > max {
        return Err(ApiError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn check_not_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

// bcrypt ignores everything past 72 bytes, so longer secrets are refused
pub fn check_password(value: &str) -> ApiResult<()> {
    check_not_empty("password", value)?;
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(ApiError::BadRequest(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}
