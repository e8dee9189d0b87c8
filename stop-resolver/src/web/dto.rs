//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Stop, Vehicle};
use crate::resolve::base_name;

/// Query for stops around a point.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub lat: f64,
    pub lon: f64,

    /// Search radius in meters (defaults to the configured nearby radius)
    pub radius: Option<f64>,
}

/// Query for a stop by name.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub name: String,
}

/// Query for vehicle positions.
#[derive(Debug, Deserialize)]
pub struct VehiclesRequest {
    /// Only vehicles on this service
    pub service: Option<String>,
}

/// A stop in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopResult {
    pub id: u64,
    pub code: String,
    pub name: String,

    /// Name without parenthetical suffix
    pub base_name: String,

    pub latitude: f64,
    pub longitude: f64,
    pub direction: Option<String>,

    /// Trimmed service ids
    pub services: Vec<String>,
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id,
            code: stop.code.clone(),
            name: stop.name.clone(),
            base_name: base_name(&stop.name),
            latitude: stop.latitude(),
            longitude: stop.longitude(),
            direction: stop.compass().map(str::to_string),
            services: stop
                .services
                .iter()
                .flatten()
                .map(|s| s.trim().to_string())
                .collect(),
        }
    }

    pub fn from_stops(stops: &[Stop]) -> Vec<Self> {
        stops.iter().map(Self::from_stop).collect()
    }
}

/// Response for a service's directions.
#[derive(Debug, Serialize)]
pub struct DirectionsResponse {
    pub service: String,
    pub outbound: Vec<StopResult>,
    pub inbound: Vec<StopResult>,
    pub unclassified: Vec<StopResult>,
}

/// Response for nearby stops.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub stops: Vec<StopResult>,
}

/// A vehicle in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleResult {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub service: Option<String>,
    pub destination: Option<String>,

    /// GPS fix time, RFC 3339
    pub last_fix: Option<String>,
}

impl VehicleResult {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            latitude: vehicle.coordinate.latitude(),
            longitude: vehicle.coordinate.longitude(),
            heading: vehicle.heading,
            speed: vehicle.speed,
            service: vehicle.service_name.clone(),
            destination: vehicle.destination.clone(),
            last_fix: vehicle.last_fix.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response for vehicle positions.
#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    /// False until the first refresh has succeeded
    pub ready: bool,
    pub vehicles: Vec<VehicleResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn stop_result_trims_services_and_strips_name() {
        let stop = Stop::new(
            1,
            "6200206520",
            "Princes St (Stop IK)",
            Coordinate::new(55.9519, -3.196).unwrap(),
        )
        .with_services([" 22", "10 "])
        .with_direction(" E ");

        let result = StopResult::from_stop(&stop);
        assert_eq!(result.base_name, "Princes St");
        assert_eq!(result.services, vec!["22", "10"]);
        assert_eq!(result.direction.as_deref(), Some("E"));
    }

    #[test]
    fn stop_result_without_services() {
        let stop = Stop::new(1, "1", "Leith Walk", Coordinate::new(55.96, -3.17).unwrap());
        assert!(StopResult::from_stop(&stop).services.is_empty());
    }
}
