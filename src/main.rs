use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io;

use task_tracker::config::Config;
use task_tracker::{auth, cors, db, routes};

fn startup_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, e);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let pool = db::connect(&config)
        .await
        .map_err(|e| startup_error("Failed to create pool", e))?;
    db::init_schema(&pool)
        .await
        .map_err(|e| startup_error("Failed to create schema", e))?;
    db::seed_admin(&pool, &config.admin_password, config.bcrypt_cost)
        .await
        .map_err(|e| startup_error("Failed to seed admin account", e))?;

    auth::prepare_dummy_hash(config.bcrypt_cost)
        .map_err(|e| startup_error("Failed to prepare password hashing", e))?;

    let server_address = config.bind_address.clone();
    info!("Server running at http://{}", server_address);

    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .wrap(cors::cors(config.get_ref()))
            .wrap(Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .configure(routes::routes::configure)
    })
    .bind(server_address)?
    .run()
    .await
}
