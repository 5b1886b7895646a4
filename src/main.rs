use std::io;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, App, HttpServer};
use env_logger::Env;

use taskvault::{config::Config, recover::CatchPanic, routes, store, AppState};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let pool = store::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| startup_error("failed to connect to database", e))?;
    store::migrate(&pool)
        .await
        .map_err(|e| startup_error("failed to run migrations", e))?;

    let state = AppState::new(pool, &config.auth);
    let origins = config.cors_allowed_origins.clone();

    log::info!("Starting taskvault server at {}", config.server_url());
    HttpServer::new(move || {
        let cors = origins.iter().fold(
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
                .allowed_headers(vec![
                    header::ORIGIN,
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::AUTHORIZATION,
                ])
                .max_age(3600),
            |cors, origin| cors.allowed_origin(origin),
        );
        let state = state.clone();

        App::new()
            .wrap(CatchPanic)
            .wrap(Logger::default())
            .wrap(cors)
            .configure(move |cfg| routes::config(cfg, &state))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
