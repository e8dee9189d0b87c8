//! Mock transit source for running without API access.
//!
//! Loads a stop catalog and vehicle positions from JSON files in the same
//! shape the live API returns and serves them as if they were live.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Stop, Vehicle};

use super::TransitSource;
use super::convert::{convert_stops, convert_vehicles};
use super::error::FetchError;
use super::types::{StopDto, StopsResponse, VehicleDto, VehiclesResponse};

/// Mock transit source that serves data from JSON files.
///
/// Expects `stops.json` (required) and `vehicles.json` (optional) in the
/// data directory.
#[derive(Debug, Clone, Default)]
pub struct MockTransitClient {
    stops: Arc<RwLock<Vec<StopDto>>>,
    vehicles: Arc<RwLock<Vec<VehicleDto>>>,
}

impl MockTransitClient {
    /// Load mock data from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let (stops, vehicles) = load_dir(data_dir.as_ref())?;
        Ok(Self::from_dtos(stops, vehicles))
    }

    /// Serve the given records.
    pub fn from_dtos(stops: Vec<StopDto>, vehicles: Vec<VehicleDto>) -> Self {
        Self {
            stops: Arc::new(RwLock::new(stops)),
            vehicles: Arc::new(RwLock::new(vehicles)),
        }
    }

    /// Replace the served vehicle positions.
    pub async fn set_vehicles(&self, vehicles: Vec<VehicleDto>) {
        *self.vehicles.write().await = vehicles;
    }

    /// Reload mock data from disk (useful for development).
    ///
    /// On failure the current data is kept.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), FetchError> {
        let (stops, vehicles) = load_dir(data_dir.as_ref())?;
        *self.stops.write().await = stops;
        *self.vehicles.write().await = vehicles;
        Ok(())
    }
}

impl TransitSource for MockTransitClient {
    async fn stops(&self) -> Result<Vec<Stop>, FetchError> {
        let stops = self.stops.read().await;
        Ok(convert_stops(stops.clone()))
    }

    async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        let vehicles = self.vehicles.read().await;
        Ok(convert_vehicles(vehicles.clone()))
    }
}

fn load_dir(data_dir: &Path) -> Result<(Vec<StopDto>, Vec<VehicleDto>), FetchError> {
    let stops_path = data_dir.join("stops.json");
    let json = std::fs::read_to_string(&stops_path).map_err(|e| {
        FetchError::Unavailable(format!("failed to read {}: {}", stops_path.display(), e))
    })?;
    let stops: StopsResponse = serde_json::from_str(&json).map_err(|e| FetchError::Json {
        message: format!("failed to parse {}: {}", stops_path.display(), e),
        body: None,
    })?;

    let vehicles_path = data_dir.join("vehicles.json");
    let vehicles = if vehicles_path.is_file() {
        let json = std::fs::read_to_string(&vehicles_path).map_err(|e| {
            FetchError::Unavailable(format!("failed to read {}: {}", vehicles_path.display(), e))
        })?;
        let response: VehiclesResponse =
            serde_json::from_str(&json).map_err(|e| FetchError::Json {
                message: format!("failed to parse {}: {}", vehicles_path.display(), e),
                body: None,
            })?;
        response.vehicles
    } else {
        Vec::new()
    };

    Ok((stops.stops, vehicles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const STOPS: &str = r#"{
        "last_updated": 1700000000,
        "stops": [
            {"stop_id": 1, "atco_code": "6200206520", "name": "Princes St (Stop IK)",
             "latitude": 55.9519, "longitude": -3.1960, "services": ["22", " 10"]},
            {"stop_id": 2, "atco_code": "6200206530", "name": "Princes St (Stop IF)",
             "latitude": 55.9521, "longitude": -3.1955, "services": ["22"]},
            {"stop_id": 3, "atco_code": "6200236520", "name": "Broken", "services": ["22"]}
        ]
    }"#;

    const VEHICLES: &str = r#"{
        "vehicles": [
            {"vehicle_id": "3045", "latitude": 55.95, "longitude": -3.19, "service_name": "22",
             "last_gps_fix": 1700000000, "heading": 90}
        ]
    }"#;

    #[tokio::test]
    async fn load_mock_data() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("stops.json"), STOPS).unwrap();
        std::fs::write(dir.path().join("vehicles.json"), VEHICLES).unwrap();

        let client = MockTransitClient::new(dir.path()).unwrap();

        let stops = client.stops().await.unwrap();
        // The record without coordinates is dropped
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].services.as_ref().unwrap()[1], " 10");

        let vehicles = client.vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].heading, Some(90.0));
    }

    #[tokio::test]
    async fn vehicles_file_is_optional() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("stops.json"), STOPS).unwrap();

        let client = MockTransitClient::new(dir.path()).unwrap();
        assert!(client.vehicles().await.unwrap().is_empty());
    }

    #[test]
    fn missing_stops_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = MockTransitClient::new(dir.path()).unwrap_err();
        assert!(matches!(err, FetchError::Unavailable(_)));
    }

    #[test]
    fn bad_json_is_json_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("stops.json"), "{ not json").unwrap();
        let err = MockTransitClient::new(dir.path()).unwrap_err();
        assert!(matches!(err, FetchError::Json { .. }));
    }

    #[tokio::test]
    async fn reload_keeps_data_on_failure() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("stops.json"), STOPS).unwrap();
        let client = MockTransitClient::new(dir.path()).unwrap();

        let empty = tempdir().unwrap();
        assert!(client.reload(empty.path()).await.is_err());
        assert_eq!(client.stops().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn set_vehicles_replaces_positions() {
        let client = MockTransitClient::default();
        client
            .set_vehicles(vec![VehicleDto {
                vehicle_id: "1".into(),
                latitude: Some(55.95),
                longitude: Some(-3.19),
                ..Default::default()
            }])
            .await;
        assert_eq!(client.vehicles().await.unwrap().len(), 1);

        client.set_vehicles(Vec::new()).await;
        assert!(client.vehicles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bundled_sample_data_resolves() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/mock");
        let client = MockTransitClient::new(dir).unwrap();

        let stops = client.stops().await.unwrap();
        let result = crate::resolve::resolve_directions(&stops, "22");

        let mut outbound: Vec<u64> = result.outbound.iter().map(|s| s.id).collect();
        let mut inbound: Vec<u64> = result.inbound.iter().map(|s| s.id).collect();
        outbound.sort();
        inbound.sort();

        assert_eq!(outbound, vec![36232896, 36236496, 36237102]);
        assert_eq!(inbound, vec![36232897, 36236495, 36237101]);
        assert!(result.unclassified.is_empty());
    }
}
