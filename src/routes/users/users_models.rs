use serde::{Deserialize, Serialize};

use crate::models::user::Role;

// Body of both create and update; update replaces every field
#[derive(Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
}
