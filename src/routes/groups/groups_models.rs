use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct GroupPayload {
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateGroupResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
pub struct UpdateGroupResponse {
    pub success: bool,
    pub message: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct DeleteGroupResponse {
    pub success: bool,
    pub message: String,
}
