mod app_context;
mod config;
mod directory;
mod orchestrator;
mod server;
mod swap;
mod templates;

use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::config::{load_config, Config};
use crate::directory::ActiveAlarmDirectory;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    init_json_logging();

    let config: Config = match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    if config.simulation.enabled {
        log::warn!("simulation_mode_enabled source=alarm_directory");
    }

    let directory = match ActiveAlarmDirectory::from_config(&config) {
        Ok(directory) => directory,
        Err(error) => {
            log::error!("Alarm directory initialization failed: {}", error);
            return;
        }
    };

    let listen_addr = config.listen_addr.clone();
    let app_context = AppContext::new(config, directory);

    log::info!("deploy-alarm-sync is starting... listen_addr={}", listen_addr);

    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(error) => {
            log::error!("Failed to bind {}: {}", listen_addr, error);
            return;
        }
    };

    if let Err(error) = axum::serve(listener, server::router(app_context)).await {
        log::error!("Server error: {}", error);
    }
}
