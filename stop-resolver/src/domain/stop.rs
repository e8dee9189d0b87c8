//! Stop catalog entries.

use serde::Serialize;

use super::Coordinate;

/// A stop from the transit catalog.
///
/// Stops are immutable snapshots of the catalog record. `name` may embed a
/// disambiguating suffix such as `(Stop IK)` that is not part of the place
/// name; see [`crate::resolve::base_name`]. `services` is kept exactly as
/// published, including any stray whitespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    /// Numeric catalog id.
    pub id: u64,

    /// External (ATCO-style) code.
    pub code: String,

    /// Display name, possibly with a parenthetical suffix.
    pub name: String,

    /// Locality suffix, which may carry a route code.
    pub locality: Option<String>,

    /// Compass direction the stop faces, e.g. "N" or "SE".
    pub direction: Option<String>,

    /// Stop position.
    pub coordinate: Coordinate,

    /// Service ids calling at this stop, untrimmed.
    pub services: Option<Vec<String>>,

    /// Position along a route, when the catalog is route-ordered.
    pub sequence: Option<u32>,
}

impl Stop {
    /// Create a stop with only the required fields set.
    pub fn new(
        id: u64,
        code: impl Into<String>,
        name: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            locality: None,
            direction: None,
            coordinate,
            services: None,
            sequence: None,
        }
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = Some(services.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// The direction string, if present and not blank.
    pub fn compass(&self) -> Option<&str> {
        self.direction
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Whether `service_id` is among this stop's services.
    ///
    /// Both sides are trimmed before an exact, case-sensitive comparison.
    pub fn serves(&self, service_id: &str) -> bool {
        let wanted = service_id.trim();
        self.services
            .as_ref()
            .is_some_and(|services| services.iter().any(|s| s.trim() == wanted))
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> Stop {
        Stop::new(1, "6200206520", "Princes St", Coordinate::new(55.95, -3.19).unwrap())
    }

    #[test]
    fn serves_trims_both_sides() {
        let s = stop().with_services([" 22 ", "10"]);
        assert!(s.serves("22"));
        assert!(s.serves(" 10"));
        assert!(!s.serves("2"));
    }

    #[test]
    fn serves_is_case_sensitive() {
        let s = stop().with_services(["N22"]);
        assert!(s.serves("N22"));
        assert!(!s.serves("n22"));
    }

    #[test]
    fn no_services_serves_nothing() {
        assert!(!stop().serves("22"));
        assert!(!stop().with_services(Vec::<String>::new()).serves("22"));
    }

    #[test]
    fn blank_direction_is_absent() {
        assert_eq!(stop().compass(), None);
        assert_eq!(stop().with_direction("  ").compass(), None);
        assert_eq!(stop().with_direction(" SE ").compass(), Some("SE"));
    }
}
