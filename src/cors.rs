use actix_cors::Cors;

use crate::config::Config;

/// Browser access policy. With no configured origins every origin is
/// accepted, otherwise only the listed ones.
pub fn cors(config: &Config) -> Cors {
    if config.cors_allowed_origins.is_empty() {
        return Cors::permissive();
    }

    config
        .cors_allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
