//! Conversion from transit DTOs to domain types.
//!
//! A record that cannot be converted is skipped with a warning; one bad stop
//! never fails the whole catalog.

use chrono::DateTime;
use tracing::warn;

use crate::domain::{Coordinate, InvalidCoordinate, Stop, Vehicle};

use super::types::{StopDto, VehicleDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Coordinates outside WGS84 bounds
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
}

/// Convert a stop catalog, dropping malformed records.
pub fn convert_stops(dtos: Vec<StopDto>) -> Vec<Stop> {
    dtos.into_iter()
        .filter_map(|dto| {
            let id = dto.stop_id;
            match convert_stop(dto) {
                Ok(stop) => Some(stop),
                Err(e) => {
                    warn!(stop = id, error = %e, "skipping malformed stop");
                    None
                }
            }
        })
        .collect()
}

/// Convert a single stop record.
pub fn convert_stop(dto: StopDto) -> Result<Stop, ConversionError> {
    let coordinate = coordinate(dto.latitude, dto.longitude)?;

    Ok(Stop {
        id: dto.stop_id,
        code: dto.atco_code,
        name: dto.name,
        locality: dto.locality,
        direction: dto.direction,
        coordinate,
        services: dto.services,
        sequence: dto.sequence,
    })
}

/// Convert vehicle positions, dropping malformed records.
pub fn convert_vehicles(dtos: Vec<VehicleDto>) -> Vec<Vehicle> {
    dtos.into_iter()
        .filter_map(|dto| {
            let id = dto.vehicle_id.clone();
            match convert_vehicle(dto) {
                Ok(vehicle) => Some(vehicle),
                Err(e) => {
                    warn!(vehicle = %id, error = %e, "skipping malformed vehicle");
                    None
                }
            }
        })
        .collect()
}

/// Convert a single vehicle record.
pub fn convert_vehicle(dto: VehicleDto) -> Result<Vehicle, ConversionError> {
    let coordinate = coordinate(dto.latitude, dto.longitude)?;

    Ok(Vehicle {
        id: dto.vehicle_id,
        coordinate,
        heading: dto.heading,
        speed: dto.speed,
        bearing: dto.bearing,
        service_name: dto.service_name,
        destination: dto.destination,
        journey_id: dto.journey_id,
        last_fix: dto
            .last_gps_fix
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
    })
}

fn coordinate(latitude: Option<f64>, longitude: Option<f64>) -> Result<Coordinate, ConversionError> {
    let latitude = latitude.ok_or(ConversionError::MissingField("latitude"))?;
    let longitude = longitude.ok_or(ConversionError::MissingField("longitude"))?;
    Ok(Coordinate::new(latitude, longitude)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_dto(id: u64, lat: Option<f64>, lon: Option<f64>) -> StopDto {
        StopDto {
            stop_id: id,
            atco_code: format!("620{id}"),
            name: "Princes St (Stop IK)".to_string(),
            direction: Some("E".to_string()),
            latitude: lat,
            longitude: lon,
            services: Some(vec![" 22".to_string(), "10 ".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn converts_stop_fields() {
        let stop = convert_stop(stop_dto(1, Some(55.95), Some(-3.19))).unwrap();

        assert_eq!(stop.id, 1);
        assert_eq!(stop.code, "6201");
        assert_eq!(stop.name, "Princes St (Stop IK)");
        assert_eq!(stop.direction.as_deref(), Some("E"));
        assert_eq!(stop.latitude(), 55.95);
        assert_eq!(stop.longitude(), -3.19);
    }

    #[test]
    fn services_kept_untrimmed() {
        let stop = convert_stop(stop_dto(1, Some(55.95), Some(-3.19))).unwrap();
        assert_eq!(
            stop.services,
            Some(vec![" 22".to_string(), "10 ".to_string()])
        );
    }

    #[test]
    fn missing_coordinate_is_error() {
        assert_eq!(
            convert_stop(stop_dto(1, None, Some(-3.19))).unwrap_err(),
            ConversionError::MissingField("latitude")
        );
        assert_eq!(
            convert_stop(stop_dto(1, Some(55.95), None)).unwrap_err(),
            ConversionError::MissingField("longitude")
        );
    }

    #[test]
    fn malformed_stops_skipped_not_fatal() {
        let stops = convert_stops(vec![
            stop_dto(1, Some(55.95), Some(-3.19)),
            stop_dto(2, None, None),
            stop_dto(3, Some(255.0), Some(-3.19)),
            stop_dto(4, Some(55.96), Some(-3.18)),
        ]);

        let ids: Vec<u64> = stops.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn converts_vehicle() {
        let dto = VehicleDto {
            vehicle_id: "3045".to_string(),
            last_gps_fix: Some(1_700_000_000),
            latitude: Some(55.95),
            longitude: Some(-3.19),
            heading: Some(90.0),
            service_name: Some("22".to_string()),
            destination: Some("Ocean Terminal".to_string()),
            journey_id: Some("1234".to_string()),
            ..Default::default()
        };

        let vehicle = convert_vehicle(dto).unwrap();
        assert_eq!(vehicle.id, "3045");
        assert_eq!(vehicle.heading, Some(90.0));
        assert_eq!(vehicle.service_name.as_deref(), Some("22"));
        assert_eq!(vehicle.last_fix.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn vehicles_without_position_skipped() {
        let vehicles = convert_vehicles(vec![
            VehicleDto {
                vehicle_id: "1".to_string(),
                latitude: Some(55.95),
                longitude: Some(-3.19),
                ..Default::default()
            },
            VehicleDto {
                vehicle_id: "2".to_string(),
                ..Default::default()
            },
        ]);

        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].id, "1");
    }
}
