//! Clodo Framework demo.
//!
//! Configured through environment variables only; see [`DemoConfig::from_env`].

use clodo_demo::prelude::*;
use clodo_demo::runtime;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    println!("🚀 Clodo Framework Demo!");
    println!("🎯 Edit this code and see changes instantly!");
    println!();

    tracing::info!(
        variant = %config.variant,
        backend = %config.backend,
        interactive = config.interactive,
        "Starting demo"
    );

    let mut menu = Menu::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let responses = runtime::run(&config, load_framework, &mut menu).await?;

    tracing::info!("Handled {} requests", responses.len());
    Ok(())
}
