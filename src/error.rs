use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::{error, info};
use serde::Serialize;
use thiserror::Error;

/// Every failure a handler can surface to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required!")]
    AuthenticationRequired,

    #[error("Authentication failed!")]
    AuthenticationFailed,

    #[error("Authorization failed!")]
    AuthorizationFailed,

    #[error("Login failed!")]
    LoginFailed,

    #[error("{0} not found!")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ApiError {
    fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Database(_) | ApiError::PasswordHash(_))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthenticationRequired
            | ApiError::AuthenticationFailed
            | ApiError::AuthorizationFailed
            | ApiError::LoginFailed => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_server_error() {
            match self {
                ApiError::Database(e) => error!("Database error: {}", e),
                ApiError::PasswordHash(e) => error!("Password hashing error: {}", e),
                _ => {}
            }
            "Internal server error".to_string()
        } else {
            info!("Request rejected: {}", self);
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            message,
        })
    }
}

/// Maps store constraint violations onto the caller-facing taxonomy.
///
/// `unique` and `referenced` are the messages used when the write hit a
/// UNIQUE or FOREIGN KEY constraint respectively.
pub fn map_constraint(e: sqlx::Error, unique: &str, referenced: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return ApiError::Conflict(unique.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return ApiError::Conflict(referenced.to_string());
        }
    }
    ApiError::Database(e)
}
