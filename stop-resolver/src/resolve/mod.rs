//! Stop classification and proximity resolution.
//!
//! Pure functions over catalog snapshots:
//! - [`base_name`] / [`stop_code`] normalize noisy stop names
//! - [`stops_for_service`] filters the catalog to one service
//! - [`classify`] splits a service's stops into outbound and inbound
//! - [`dedupe_nearby`] collapses same-name stops for map markers

mod classify;
mod dedupe;
mod error;
mod names;
mod select;

pub use classify::{DirectionAssignment, Tier, UnclassifiedPolicy, classify, classify_single};
pub use dedupe::dedupe_nearby;
pub use error::ResolveError;
pub use names::{base_name, stop_code};
pub use select::{find_stop_by_name, stops_for_service, vehicles_for_service};

use crate::domain::Stop;

/// Select the stops of `service_id` and split them by direction.
///
/// # Examples
///
/// ```
/// use stop_resolver::domain::{Coordinate, Stop};
/// use stop_resolver::resolve::resolve_directions;
///
/// let at = |lat, lon| Coordinate::new(lat, lon).unwrap();
/// let catalog = vec![
///     Stop::new(1, "6200206520", "Princes St (Stop IK)", at(55.9519, -3.1960)).with_services(["22"]),
///     Stop::new(2, "6200206530", "Princes St (Stop IF)", at(55.9521, -3.1955)).with_services(["22"]),
///     Stop::new(3, "6200236520", "Leith Walk", at(55.9630, -3.1770)).with_services(["22"]).with_direction("N"),
/// ];
///
/// let result = resolve_directions(&catalog, "22");
/// assert_eq!(result.outbound.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
/// assert_eq!(result.inbound.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 3]);
/// ```
pub fn resolve_directions(catalog: &[Stop], service_id: &str) -> DirectionAssignment {
    classify(&stops_for_service(catalog, service_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn at(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn end_to_end_service_directions() {
        let catalog = vec![
            Stop::new(1, "6200206520", "Princes St (Stop IK)", at(55.9519, -3.1960))
                .with_services(["22"]),
            Stop::new(2, "6200206530", "Princes St (Stop IF)", at(55.9521, -3.1955))
                .with_services(["22"]),
            Stop::new(3, "6200236520", "Leith Walk", at(55.9630, -3.1770))
                .with_services(["22"])
                .with_direction("N"),
            Stop::new(4, "6200999999", "Ocean Terminal", at(55.9810, -3.1770))
                .with_services(["11"]),
        ];

        let result = resolve_directions(&catalog, "22");

        let names = |stops: &[Stop]| stops.iter().map(|s| s.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&result.outbound), vec!["Princes St (Stop IK)"]);
        assert_eq!(
            names(&result.inbound),
            vec!["Princes St (Stop IF)", "Leith Walk"]
        );
        assert!(result.unclassified.is_empty());
    }

    #[test]
    fn unknown_service_is_empty() {
        let catalog = vec![
            Stop::new(1, "1", "Leith Walk", at(55.963, -3.177)).with_services(["22"]),
        ];
        assert!(resolve_directions(&catalog, "44").is_empty());
    }
}
