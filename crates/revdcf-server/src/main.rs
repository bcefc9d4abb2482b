//! RevDCF server entry point.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revdcf_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,revdcf=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("RevDCF Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/revdcf.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    info!(
        "Solving over growth rates [{}, {}] with tolerance {}",
        config.solver.lower_bound, config.solver.upper_bound, config.solver.tolerance
    );

    Server::new(config)?.start().await?;

    Ok(())
}
