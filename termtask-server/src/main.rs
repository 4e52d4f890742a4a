//! `TermTask` task service -- in-memory JSON REST persistence.
//!
//! An axum HTTP server holding the task collection the TUI client
//! reads and mutates. State lives in memory; restarting the service
//! starts from an empty collection.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:5000
//! cargo run --bin termtask-server
//!
//! # Run on custom address
//! cargo run --bin termtask-server -- --bind 127.0.0.1:8080
//!
//! # Or via environment variable
//! TERMTASK_SERVER_ADDR=127.0.0.1:8080 cargo run --bin termtask-server
//! ```

use std::sync::Arc;

use clap::Parser;
use termtask_server::config::{ServerCliArgs, ServerConfig};
use termtask_server::routes;
use termtask_server::store::TaskStore;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting termtask service");

    let store = Arc::new(TaskStore::new());

    match routes::start_server_with_state(&config.bind_addr, store).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task service listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task service task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task service");
            std::process::exit(1);
        }
    }
}
