//! Single binary web server exposing the tournament API over REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, ASSIGN_MAX_ATTEMPTS.

use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use esports_tournament_web::{api, config::ServerConfig, MemoryStore, TournamentStore};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} (assignment attempts: {})",
        config.host,
        config.port,
        config.assign_max_attempts
    );

    let store: Arc<dyn TournamentStore> = Arc::new(MemoryStore::new());
    let state = Data::new(api::AppState::new(store, config.assign_max_attempts));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
