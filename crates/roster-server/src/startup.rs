//! Server startup utilities.

use roster_config::{AppMetadata, ObservabilityConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns an error if a
/// subscriber is already installed.
pub fn init_logging(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    }
}

/// Workspace crates that follow the configured level.
const ROSTER_TARGETS: &[&str] = &[
    "roster_core",
    "roster_config",
    "roster_repository",
    "roster_security",
    "roster_service",
    "roster_server",
];

/// Default filter: the configured level for our crates, and dependencies
/// held at `warn` unless the configured level is coarser.
fn default_directives(level: &str) -> String {
    let level = level.to_lowercase();
    let dependencies = if level == "error" { "error" } else { "warn" };

    let mut directives = vec![dependencies.to_string()];
    directives.extend(ROSTER_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Prints the startup banner.
pub fn print_banner(app: &AppMetadata) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("{} v{} ({})", app.name, app.version, app.environment);
    info!("{}", separator);
}
