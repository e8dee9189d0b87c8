//! Collapse near-duplicate stops for map display.
//!
//! The catalog often lists one physical stop several times under the same
//! name a few meters apart. Markers for those entries are merged so the map
//! shows one per location. Records are not modified; this only chooses which
//! entries to show.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Coordinate, Stop};

/// Stops within `max_distance_m` of `center`, one per spatial cluster.
///
/// Survivors are grouped by exact display name. Within a group, each stop not
/// yet suppressed is kept and suppresses every other unsuppressed stop of
/// the group within `merge_radius_m` of it. Groups are emitted in first-seen
/// order and keeps within a group in catalog order.
///
/// Distances are great-circle on a spherical Earth; see
/// [`crate::domain::EARTH_RADIUS_M`].
pub fn dedupe_nearby(
    stops: &[Stop],
    center: Coordinate,
    max_distance_m: f64,
    merge_radius_m: f64,
) -> Vec<Stop> {
    let mut groups: Vec<Vec<&Stop>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for stop in stops
        .iter()
        .filter(|s| s.coordinate.distance_to(&center) <= max_distance_m)
    {
        match index.get(stop.name.as_str()) {
            Some(&i) => groups[i].push(stop),
            None => {
                index.insert(stop.name.as_str(), groups.len());
                groups.push(vec![stop]);
            }
        }
    }

    let mut kept = Vec::new();
    for group in groups {
        if let [only] = group.as_slice() {
            kept.push((*only).clone());
            continue;
        }

        let before = kept.len();
        kept.extend(merge_group(&group, merge_radius_m));
        debug!(
            name = group[0].name.as_str(),
            entries = group.len(),
            markers = kept.len() - before,
            "merged same-name stops"
        );
    }

    kept
}

/// Single greedy pass over one same-name group.
fn merge_group(group: &[&Stop], merge_radius_m: f64) -> Vec<Stop> {
    let mut suppressed = vec![false; group.len()];
    let mut kept = Vec::new();

    for i in 0..group.len() {
        if suppressed[i] {
            continue;
        }
        kept.push(group[i].clone());

        for j in (i + 1)..group.len() {
            if !suppressed[j]
                && group[i].coordinate.distance_to(&group[j].coordinate) < merge_radius_m
            {
                suppressed[j] = true;
            }
        }
    }

    kept
}
