use serde::{Deserialize, Serialize};

use crate::models::user::Role;

// Login request and response
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub name: String,
    pub role: Role,
}
