//! Transit API response DTOs.
//!
//! These types map directly to the open-data JSON responses. Most fields are
//! optional because the API omits them rather than sending null.

use serde::{Deserialize, Serialize};

/// Response from `GET /stops`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopsResponse {
    /// Unix time the catalog was last regenerated.
    pub last_updated: Option<u64>,

    pub stops: Vec<StopDto>,
}

/// A stop record as published.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StopDto {
    pub stop_id: u64,

    /// ATCO code.
    #[serde(default)]
    pub atco_code: String,

    pub name: String,

    /// Short on-street identifier.
    pub identifier: Option<String>,

    pub locality: Option<String>,

    /// Bearing the stop faces, degrees.
    pub orientation: Option<f64>,

    /// Compass point the stop faces, e.g. "N".
    pub direction: Option<String>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    /// "bus" or "tram".
    pub service_type: Option<String>,

    /// Destinations served from this stop.
    pub destinations: Option<Vec<String>>,

    /// Service names, sometimes with stray whitespace.
    pub services: Option<Vec<String>>,

    /// Position along the route when fetched per service.
    pub sequence: Option<u32>,
}

/// Response from `GET /vehicle_locations`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehiclesResponse {
    pub last_updated: Option<u64>,

    pub vehicles: Vec<VehicleDto>,
}

/// A vehicle position as published.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VehicleDto {
    pub vehicle_id: String,

    /// Unix time of the GPS fix.
    pub last_gps_fix: Option<i64>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    /// Speed in km/h.
    pub speed: Option<f64>,

    /// Heading in degrees.
    pub heading: Option<f64>,

    pub bearing: Option<f64>,

    pub service_name: Option<String>,

    pub destination: Option<String>,

    pub journey_id: Option<String>,

    pub next_stop_id: Option<u64>,

    pub vehicle_type: Option<String>,
}
