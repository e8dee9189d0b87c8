//! Service-based catalog filtering and lookups.

use crate::domain::{Stop, Vehicle};

use super::error::ResolveError;
use super::names::base_name;

/// Stops that serve `service_id`, in catalog order.
///
/// Membership is an exact, case-sensitive match after trimming both the
/// requested id and each of the stop's service ids. Stops with no service
/// list are excluded. The catalog records themselves are never modified.
pub fn stops_for_service(catalog: &[Stop], service_id: &str) -> Vec<Stop> {
    catalog
        .iter()
        .filter(|stop| stop.serves(service_id))
        .cloned()
        .collect()
}

/// Find a stop by name.
///
/// An exact (trimmed) name match wins; otherwise the first stop whose base
/// name matches the base name of `name` is returned.
pub fn find_stop_by_name<'a>(catalog: &'a [Stop], name: &str) -> Result<&'a Stop, ResolveError> {
    let wanted = name.trim();

    if let Some(stop) = catalog.iter().find(|s| s.name.trim() == wanted) {
        return Ok(stop);
    }

    let wanted_base = base_name(wanted);
    if !wanted_base.is_empty()
        && let Some(stop) = catalog.iter().find(|s| base_name(&s.name) == wanted_base)
    {
        return Ok(stop);
    }

    Err(ResolveError::StopNotFound {
        name: wanted.to_string(),
    })
}

/// Vehicles running `service_name`, or every vehicle when `None`.
pub fn vehicles_for_service(vehicles: &[Vehicle], service_name: Option<&str>) -> Vec<Vehicle> {
    match service_name {
        Some(service) => vehicles.iter().filter(|v| v.runs(service)).cloned().collect(),
        None => vehicles.to_vec(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinate;
    use proptest::prelude::*;

    fn arb_stop() -> impl Strategy<Value = Stop> {
        (
            any::<u64>(),
            proptest::option::of(proptest::collection::vec("[ ]{0,2}[0-9A-Z]{1,3}[ ]{0,2}", 0..4)),
        )
            .prop_map(|(id, services)| {
                let mut stop = Stop::new(id, "X", "Stop", Coordinate::new(55.9, -3.2).unwrap());
                stop.services = services;
                stop
            })
    }

    proptest! {
        #[test]
        fn result_is_subset_serving_service(
            catalog in proptest::collection::vec(arb_stop(), 0..20),
            service in "[0-9A-Z]{1,3}",
        ) {
            let selected = stops_for_service(&catalog, &service);

            prop_assert!(selected.len() <= catalog.len());
            for stop in &selected {
                prop_assert!(catalog.contains(stop));
                let services = stop.services.as_ref().unwrap();
                prop_assert!(services.iter().any(|s| s.trim() == service));
            }

            let expected = catalog.iter().filter(|s| s.serves(&service)).count();
            prop_assert_eq!(selected.len(), expected);
        }
    }
}
