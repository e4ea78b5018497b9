//! Taskdeck API server -- a four-route JSON CRUD surface over a task store.
//!
//! # Usage
//!
//! ```bash
//! # Run on the default address 127.0.0.1:8000
//! cargo run --bin taskdeck-server
//!
//! # Run on a custom address with a custom snapshot file
//! cargo run --bin taskdeck-server -- --bind 0.0.0.0:9100 \
//!     --data-file /var/lib/taskdeck/tasks.json
//!
//! # In-memory only (nothing written to disk)
//! cargo run --bin taskdeck-server -- --ephemeral
//! ```

use std::sync::Arc;

use clap::Parser;
use taskdeck_server::config::{ServerCliArgs, ServerConfig};
use taskdeck_server::routes::{self, ServerState};
use taskdeck_server::store::TaskStore;

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

    tracing::info!(addr = %config.bind_addr, "starting taskdeck api server");

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to open task store");
            std::process::exit(1);
        }
    };
    let state = Arc::new(ServerState::new(store));

    match routes::start_server(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "api server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "api server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start api server");
            std::process::exit(1);
        }
    }
}

/// Opens the task store per config, creating the snapshot directory first.
fn open_store(config: &ServerConfig) -> Result<TaskStore, Box<dyn std::error::Error>> {
    let Some(path) = &config.data_file else {
        tracing::info!("running with an in-memory store (--ephemeral)");
        return Ok(TaskStore::in_memory());
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(TaskStore::open(path)?)
}
