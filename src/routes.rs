pub mod routes;
pub mod validate;

pub mod login {
    pub mod login_handlers;
    pub mod login_models;
}

pub mod users {
    pub mod users_handlers;
    pub mod users_models;
}

pub mod groups {
    pub mod groups_handlers;
    pub mod groups_models;
}

pub mod tasks {
    pub mod tasks_handlers;
    pub mod tasks_models;
}
