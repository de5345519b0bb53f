use actix_web::web;

use crate::error::ApiError;

use super::groups::groups_handlers;
use super::login::login_handlers;
use super::tasks::tasks_handlers;
use super::users::users_handlers;

/// Registers every route plus the extractor configuration they share.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Non-numeric ids never match a record
    cfg.app_data(
        web::PathConfig::default().error_handler(|_, _| ApiError::NotFound("Resource").into()),
    );
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        ApiError::BadRequest(format!("Invalid request body: {}", err)).into()
    }));
    login_configure(cfg);
    users_configure(cfg);
    groups_configure(cfg);
    tasks_configure(cfg);
}

pub fn login_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(login_handlers::root_get))
        .route("/login", web::post().to(login_handlers::login));
}

pub fn users_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users_handlers::get_users))
            .route("", web::post().to(users_handlers::create_user))
            .route("/{id}", web::get().to(users_handlers::get_user))
            .route("/{id}", web::put().to(users_handlers::update_user))
            .route("/{id}", web::delete().to(users_handlers::delete_user))
    );
}

pub fn groups_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/groups")
            .route("", web::get().to(groups_handlers::get_groups))
            .route("", web::post().to(groups_handlers::create_group))
            .route("/{id}", web::get().to(groups_handlers::get_group))
            .route("/{id}", web::put().to(groups_handlers::update_group))
            .route("/{id}", web::delete().to(groups_handlers::delete_group))
    );
}

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .route("", web::get().to(tasks_handlers::get_tasks))
            .route("", web::post().to(tasks_handlers::create_task))
            .route("/{id}", web::get().to(tasks_handlers::get_task))
            .route("/{id}", web::put().to(tasks_handlers::update_task))
            .route("/{id}", web::delete().to(tasks_handlers::delete_task))
    );
}
