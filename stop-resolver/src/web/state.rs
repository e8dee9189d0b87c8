//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedTransitClient;
use crate::config::ResolverConfig;
use crate::domain::{Stop, Vehicle};
use crate::live::{PollingSession, vehicle_feed};
use crate::transit::{FetchError, MockTransitClient, TransitClient, TransitSource};

/// Where the server gets its data.
pub enum DataSource {
    /// The transit API, with the catalog cached.
    Live(CachedTransitClient<TransitClient>),
    /// Fixture files.
    Mock(MockTransitClient),
}

impl TransitSource for DataSource {
    async fn stops(&self) -> Result<Vec<Stop>, FetchError> {
        match self {
            DataSource::Live(client) => client.stops().await,
            DataSource::Mock(client) => client.stops().await,
        }
    }

    async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        match self {
            DataSource::Live(client) => client.vehicles().await,
            DataSource::Mock(client) => client.vehicles().await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Stop and vehicle source
    pub source: Arc<DataSource>,

    /// Resolution and refresh configuration
    pub config: Arc<ResolverConfig>,

    /// Process-wide vehicle position session
    pub vehicles: Arc<PollingSession<Vec<Vehicle>>>,
}

impl AppState {
    /// Create a new app state and start the vehicle session.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(source: DataSource, config: ResolverConfig) -> Self {
        let source = Arc::new(source);
        let vehicles = vehicle_feed(Arc::clone(&source), None, &config, |_| {}, |_| {});

        Self {
            source,
            config: Arc::new(config),
            vehicles: Arc::new(vehicles),
        }
    }
}
