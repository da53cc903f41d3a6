//! AR/AP reporting server.
//!
//! Main entry point: loads configuration, wires the warehouse-backed invoice
//! source into the router and serves HTTP.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arap_api::{AppState, create_router};
use arap_core::reports::ReportOptions;
use arap_db::{InvoiceRepository, LazyConnection};
use arap_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arap=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    // The warehouse is contacted on the first report request, not at startup.
    let connection = Arc::new(LazyConnection::new(config.warehouse.clone()));
    let repository = InvoiceRepository::new(connection);

    let options = ReportOptions::from(&config.report);
    info!(
        period_days = options.period_days,
        mean_days_basis = ?options.mean_days_basis,
        forecast_window = options.forecast_window,
        "Report options loaded"
    );

    let state = AppState {
        source: Arc::new(repository),
        options,
    };
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
