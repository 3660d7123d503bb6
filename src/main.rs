use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use mailtpl::config::Config;
use mailtpl::views::Views;
use mailtpl::{AppState, app, log_filter, registry};

const IS_DEV: bool = cfg!(debug_assertions);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = log_filter(IS_DEV, std::env::var("RUST_LOG").ok().as_deref());
    if IS_DEV {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::load()?;
    let registry = registry::builtin();
    info!(
        "Loaded {} active templates across {} categories",
        registry.list_all_active().len(),
        registry.list_categories().len()
    );

    let address = config.listen_address.clone();
    let state = Arc::new(AppState {
        config,
        views: Views::new()?,
        registry,
    });

    info!("Starting server on {}", address);
    let listener = TcpListener::bind(&address).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
