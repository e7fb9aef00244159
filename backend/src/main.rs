use anyhow::Result;
use expense_tracker_backend::{config::Config, create_router, initialize_backend};
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let span = info_span!("expense_tracker");

    let app_state = initialize_backend(&config, span.clone()).await?;
    let app = create_router(app_state, &config)?;

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(parent: &span, "Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
