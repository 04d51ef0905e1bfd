//! # Roster Server
//!
//! Loads configuration, wires the user service, starts the cache sweeper,
//! and runs the startup walkthrough.

use roster_config::ConfigLoader;
use roster_core::RosterResult;
use roster_server::di::{build_module, RosterResolver};
use roster_server::{demo, startup};
use roster_service::CacheSweeper;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config_loader).await {
        error!(error_code = e.error_code(), "Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config_loader: ConfigLoader) -> RosterResult<()> {
    let config = config_loader.get().await;

    if let Err(e) = startup::init_logging(&config.observability) {
        eprintln!("Logging already initialized: {e}");
    }
    startup::print_banner(&config.app);

    let module = build_module(&config)?;

    let sweeper = if config.cache.enabled {
        Some(CacheSweeper::spawn(module.cache(), config.cache.cleanup_interval()))
    } else {
        info!("Cache disabled; sweeper not started");
        None
    };

    let user_service = module.user_service();
    let result = demo::run(user_service.as_ref()).await;

    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }

    info!("Shutdown complete");
    result
}
