//! # Blog API Server
//!
//! Actix-web entry point for the personal blog backend: posts, themes and
//! users under `/postagens`, `/temas` and `/usuarios`.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blog_core::ports::{PasswordService, TokenService};
use blog_infra::{Argon2PasswordService, JwtTokenService, PasswordConfig};

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::cors::build_cors;
use state::{AppState, Repositories};
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting blog API on {}:{}", config.host, config.port);

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let passwords: Arc<dyn PasswordService> = Arc::new(
        Argon2PasswordService::with_config(PasswordConfig::from_env())
            .map_err(|e| std::io::Error::other(e.to_string()))?,
    );

    let repos = Repositories::connect(config.database.as_ref(), config.auto_migrate).await;
    let state = AppState::new(repos, passwords, tokens);

    if config.cors.permissive {
        tracing::warn!("CORS is permissive. Any origin may call the API.");
    }
    let cors = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
