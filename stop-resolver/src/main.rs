use std::error::Error;
use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stop_resolver::cache::CachedTransitClient;
use stop_resolver::config::ResolverConfig;
use stop_resolver::transit::{MockTransitClient, TransitClient, TransitConfig};
use stop_resolver::web::{AppState, DataSource, create_router};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ResolverConfig::from_env()?;
    info!(?config, "loaded configuration");

    // Mock data takes precedence over the live API
    let source = match std::env::var("TRANSIT_MOCK_DIR") {
        Ok(dir) => {
            info!(%dir, "serving mock transit data");
            DataSource::Mock(MockTransitClient::new(&dir)?)
        }
        Err(_) => {
            let mut transit_config = TransitConfig::new();
            if let Ok(url) = std::env::var("TRANSIT_BASE_URL") {
                transit_config = transit_config.with_base_url(url);
            }
            match std::env::var("TRANSIT_API_KEY") {
                Ok(key) => transit_config = transit_config.with_api_key(key),
                Err(_) => warn!("TRANSIT_API_KEY not set, requests may be rejected"),
            }

            let client = TransitClient::new(transit_config)?;
            DataSource::Live(CachedTransitClient::new(client, config.catalog_ttl))
        }
    };

    let state = AppState::new(source, config);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    info!("stop resolver listening on http://{addr}");
    info!("  GET /health");
    info!("  GET /api/services/:service_id/directions");
    info!("  GET /api/stops/nearby?lat=&lon=[&radius=]");
    info!("  GET /api/stops/lookup?name=");
    info!("  GET /api/vehicles[?service=]");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
