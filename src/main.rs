//! Bedwood storefront server
//!
//! Entry point serving the marketing site widgets.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use bedwood_storefront::config::{AppConfig, LogFormat, LoggingConfig};
use bedwood_storefront::server;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing (M-LOG-STRUCTURED). `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);

    info!(
        name: "config.loaded",
        port = config.server.port,
        popup_recipient = %config.messaging.popup_recipient,
        cart_recipient = %config.messaging.cart_recipient,
        cards = config.cards.len(),
        "Configuration loaded"
    );

    server::start_server(Arc::new(config)).await
}
