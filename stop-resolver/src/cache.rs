//! Caching layer for the stop catalog.
//!
//! The stop catalog changes rarely but is large, while live sessions refresh
//! every few seconds. Catalog responses are cached for a configurable TTL;
//! vehicle positions always go to the source.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Stop, Vehicle};
use crate::transit::{FetchError, TransitSource};

/// The catalog is one entry; the key carries no information.
type CatalogKey = ();

/// Cached catalog entry.
type CatalogEntry = Arc<Vec<Stop>>;

/// Transit source with a cached stop catalog.
///
/// Wraps any [`TransitSource`]. Failed fetches are not cached.
pub struct CachedTransitClient<S> {
    source: S,
    catalog: MokaCache<CatalogKey, CatalogEntry>,
}

impl<S: TransitSource> CachedTransitClient<S> {
    /// Create a new cached client keeping the catalog for `ttl`.
    pub fn new(source: S, ttl: Duration) -> Self {
        let catalog = MokaCache::builder().time_to_live(ttl).max_capacity(1).build();

        Self { source, catalog }
    }

    /// Get the stop catalog, using the cache if available.
    pub async fn get_stops(&self) -> Result<CatalogEntry, FetchError> {
        if let Some(cached) = self.catalog.get(&()).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.source.stops().await?);
        debug!(stops = entry.len(), "cached stop catalog");
        self.catalog.insert((), entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop the cached catalog so the next request refetches it.
    pub fn invalidate(&self) {
        self.catalog.invalidate_all();
    }
}

impl<S: TransitSource> TransitSource for CachedTransitClient<S> {
    async fn stops(&self) -> Result<Vec<Stop>, FetchError> {
        let entry = self.get_stops().await?;
        Ok(entry.as_ref().clone())
    }

    async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        self.source.vehicles().await
    }
}
