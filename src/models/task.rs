use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub assignee: i64,
    pub owner: i64,
    #[serde(rename = "group")]
    pub group_id: i64,
    pub done: bool,
}
