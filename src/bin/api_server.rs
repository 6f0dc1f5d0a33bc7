// API Server Binary Entry Point
//
// Purpose: Serve the site with server-rendered head metadata and JSON-LD
// Usage: cargo run --features api --bin api_server

use seo_site::{create_router, AppState, SiteConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "seo_site=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = SiteConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  SITE_BASE_URL: {}", config.base_url);
    tracing::info!("  SITE_NAME: {}", config.site_name);
    tracing::info!("  PAGES_FILE: {:?}", config.pages_file);
    tracing::info!("  PORT: {}", config.port);

    let state = AppState::new(&config)?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
