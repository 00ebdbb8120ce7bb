use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripwise_api::{app, config::Config, AppState};
use tripwise_booking::{BookingSession, SessionHandle};
use tripwise_catalog::Catalog;
use tripwise_core::{HttpLocationResolver, LocationResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripwise_api=debug,tripwise_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Tripwise API on port {}", config.server.port);

    let catalog = match &config.catalog.path {
        Some(path) => Catalog::load(path).context("Failed to load catalog")?,
        None => Catalog::builtin(),
    };
    let catalog = Arc::new(catalog);

    let resolver: Option<Arc<dyn LocationResolver>> = if config.geolocation.enabled {
        let timeout = config.geolocation.timeout_secs.map(Duration::from_secs);
        let resolver = HttpLocationResolver::new(config.geolocation.endpoint.clone(), timeout)?;
        Some(Arc::new(resolver))
    } else {
        tracing::info!("Citizenship lookup disabled");
        None
    };

    let session = BookingSession::new(catalog.clone(), config.booking.clone());
    let app_state = AppState {
        session: SessionHandle::spawn(session, resolver),
        catalog,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
