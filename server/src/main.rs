// bookshop_app/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod seed;
mod state;
mod web;


use crate::config::AppConfig;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use bookshop::Database;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

// Main function
#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  // (Customize as needed, e.g., with JSON output, OpenTelemetry)
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting bookshop application server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      // For a simple example, panic is okay. In prod, might exit gracefully.
      panic!("Configuration error: {}", e);
    }
  };

  // The document store lives in-process; collections share their data across
  // cloned handles, so one Database serves every worker.
  let db = Database::new();

  // Seed the store if configured
  if app_config.seed_db {
    match seed::seed_database(&db).await {
      Ok(summary) => tracing::info!(%summary, "Store seeded."),
      Err(e) => tracing::error!(error = %e, "Failed to seed store."),
    }
  }

  // Create AppState
  let app_state = AppState {
    db,
    config: app_config.clone(), // Clone Arc for AppState
  };

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
