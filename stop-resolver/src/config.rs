//! Tunable constants for stop resolution and live refresh.

use std::str::FromStr;
use std::time::Duration;

use crate::resolve::UnclassifiedPolicy;

/// Default radius around the user for nearby stops.
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 1000.0;

/// Default radius within which same-name stops share a marker.
pub const DEFAULT_MERGE_RADIUS_M: f64 = 50.0;

/// Default pause between refreshes of a live session.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Default lifetime of a cached stop catalog.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(5 * 60);

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something unusable
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Configuration for resolution and refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Only stops within this distance of the center are shown (meters).
    pub nearby_radius_m: f64,

    /// Same-name stops closer than this share one marker (meters).
    pub merge_radius_m: f64,

    /// Pause between the end of one fetch and the start of the next.
    pub refresh_interval: Duration,

    /// How long a fetched stop catalog is reused.
    pub catalog_ttl: Duration,

    /// Where stops no heuristic could place end up.
    pub unclassified_policy: UnclassifiedPolicy,
}

impl ResolverConfig {
    pub fn with_nearby_radius(mut self, meters: f64) -> Self {
        self.nearby_radius_m = meters;
        self
    }

    pub fn with_merge_radius(mut self, meters: f64) -> Self {
        self.merge_radius_m = meters;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_catalog_ttl(mut self, ttl: Duration) -> Self {
        self.catalog_ttl = ttl;
        self
    }

    pub fn with_unclassified_policy(mut self, policy: UnclassifiedPolicy) -> Self {
        self.unclassified_policy = policy;
        self
    }

    /// Defaults overridden by environment variables.
    ///
    /// | Variable                | Meaning                          |
    /// |-------------------------|----------------------------------|
    /// | `STOP_NEARBY_RADIUS_M`  | nearby radius in meters          |
    /// | `STOP_MERGE_RADIUS_M`   | merge radius in meters           |
    /// | `STOP_REFRESH_SECS`     | refresh interval in seconds      |
    /// | `STOP_CATALOG_TTL_SECS` | catalog cache lifetime, seconds  |
    /// | `STOP_UNCLASSIFIED`     | `outbound`, `keep` or `drop`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("STOP_NEARBY_RADIUS_M") {
            config.nearby_radius_m = parse_positive("STOP_NEARBY_RADIUS_M", &v)?;
        }
        if let Some(v) = lookup("STOP_MERGE_RADIUS_M") {
            config.merge_radius_m = parse_positive("STOP_MERGE_RADIUS_M", &v)?;
        }
        if let Some(v) = lookup("STOP_REFRESH_SECS") {
            config.refresh_interval =
                Duration::from_secs(parse_positive("STOP_REFRESH_SECS", &v)?);
        }
        if let Some(v) = lookup("STOP_CATALOG_TTL_SECS") {
            config.catalog_ttl = Duration::from_secs(parse_positive("STOP_CATALOG_TTL_SECS", &v)?);
        }
        if let Some(v) = lookup("STOP_UNCLASSIFIED") {
            config.unclassified_policy = match v.trim().to_ascii_lowercase().as_str() {
                "outbound" => UnclassifiedPolicy::Outbound,
                "keep" => UnclassifiedPolicy::Keep,
                "drop" => UnclassifiedPolicy::Drop,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "STOP_UNCLASSIFIED",
                        value: v,
                        reason: "expected outbound, keep or drop",
                    });
                }
            };
        }

        Ok(config)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nearby_radius_m: DEFAULT_NEARBY_RADIUS_M,
            merge_radius_m: DEFAULT_MERGE_RADIUS_M,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            catalog_ttl: DEFAULT_CATALOG_TTL,
            unclassified_policy: UnclassifiedPolicy::default(),
        }
    }
}

/// Parse a strictly positive number.
fn parse_positive<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let invalid = |reason| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason,
    };

    let parsed: T = value.trim().parse().map_err(|_| invalid("not a number"))?;
    // NaN fails this comparison too
    if !(parsed > T::default()) {
        return Err(invalid("must be positive"));
    }
    Ok(parsed)
}
