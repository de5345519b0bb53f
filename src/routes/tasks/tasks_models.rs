use serde::{Deserialize, Serialize};

// Body of both create and update; update replaces every field
#[derive(Deserialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub assignee: i64,
    pub owner: i64,
    #[serde(rename = "group")]
    pub group_id: i64,
    pub done: bool,
}

#[derive(Serialize)]
pub struct CreateTaskResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

#[derive(Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub message: String,
}
