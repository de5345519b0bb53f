#![allow(dead_code)]

use actix_web::http::header;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use task_tracker::config::Config;
use task_tracker::{auth, db};
use task_tracker::models::user::Role;

pub const TEST_COST: u32 = 4;

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        bind_address: "127.0.0.1:0".into(),
        max_connections: 1,
        admin_password: "admin".into(),
        bcrypt_cost: TEST_COST,
        cors_allowed_origins: Vec::new(),
    }
}

/// Fresh in-memory store with the schema and the seeded admin/admin account.
/// A single connection that never expires keeps the in-memory database alive.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    auth::prepare_dummy_hash(TEST_COST).unwrap();
    db::init_schema(&pool).await.unwrap();
    db::seed_admin(&pool, "admin", TEST_COST).await.unwrap();
    pool
}

pub fn basic(username: &str, password: &str) -> (header::HeaderName, String) {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    (header::AUTHORIZATION, format!("Basic {}", encoded))
}

pub fn admin() -> (header::HeaderName, String) {
    basic("admin", "admin")
}

pub async fn admin_id(pool: &SqlitePool) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM users WHERE username = 'admin'")
        .fetch_one(pool)
        .await
        .unwrap();
    id
}

pub async fn insert_user(pool: &SqlitePool, username: &str, password: &str, role: Role) -> i64 {
    let password_hash = bcrypt::hash(password, TEST_COST).unwrap();
    sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn insert_group(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO groups (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn insert_task(pool: &SqlitePool, title: &str, assignee: i64, owner: i64, group: i64) -> i64 {
    sqlx::query(
        "INSERT INTO tasks (title, description, assignee, owner, group_id, done)
         VALUES (?, '', ?, ?, ?, 0)",
    )
    .bind(title)
    .bind(assignee)
    .bind(owner)
    .bind(group)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

/// Builds the full application over `$pool`.
macro_rules! app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(task_tracker::cors::cors(&common::test_config()))
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new(common::test_config()))
                .configure(task_tracker::routes::routes::configure),
        )
        .await
    };
}

/// Sends `$req` (a `TestRequest`) and yields `(status, json body)`.
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}
