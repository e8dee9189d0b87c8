//! Live vehicle positions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Coordinate;

/// A vehicle position from one polling cycle.
///
/// Vehicles have no identity beyond the refresh that produced them; each
/// cycle replaces the previous list wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: String,
    pub coordinate: Coordinate,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub bearing: Option<f64>,
    pub service_name: Option<String>,
    pub destination: Option<String>,
    pub journey_id: Option<String>,
    /// When the GPS fix was taken, if reported.
    pub last_fix: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Create a vehicle with only the required fields set.
    pub fn new(id: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            coordinate,
            heading: None,
            speed: None,
            bearing: None,
            service_name: None,
            destination: None,
            journey_id: None,
            last_fix: None,
        }
    }

    pub fn with_service(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// Whether this vehicle is running `service_name` (trimmed, exact match).
    pub fn runs(&self, service_name: &str) -> bool {
        self.service_name
            .as_deref()
            .is_some_and(|s| s.trim() == service_name.trim())
    }
}
