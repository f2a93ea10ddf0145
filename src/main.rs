//! Triage platform
//!
//! Main entry point for the triage HTTP server.

use actix_cors::Cors;
use actix_files as fs;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use triage::api::{self, AppState};
use triage::config::{self, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = config::load_config().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    // Open record stores and the session store
    let state = web::Data::new(
        AppState::new(config.clone())
            .await
            .context("Failed to open record stores")?,
    );

    let static_dir = config.storage.static_dir.clone();
    info!(host = %config.server.host, port = config.server.port, "starting triage server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(api::configure)
            // Serve the frontend from the static directory
            .service(fs::Files::new("/static", static_dir.clone()).index_file("index.html"))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
