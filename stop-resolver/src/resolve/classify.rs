//! Outbound/inbound assignment for the stops of one service.
//!
//! Stops are grouped by base name. A group of one is a stop with no partner
//! across the road; a larger group is a directional pair (or cluster) whose
//! members must be split between the two directions.
//!
//! Each group is run through an ordered list of tiers. A tier either decides
//! or has no opinion, in which case the next tier is tried:
//!
//! | Group  | Tiers, in order                                                  |
//! |--------|------------------------------------------------------------------|
//! | single | bracket code, compass                                            |
//! | pair   | bracket codes, compass pair, latitude anchor, longitude fallback |
//!
//! The longitude fallback always decides, so every pair is placed. Singles
//! that no tier can place are returned as unclassified.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Compass, Direction, Stop};

use super::names::{base_name, stop_code};

/// What to do with stops no tier could place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnclassifiedPolicy {
    /// Show them as outbound.
    #[default]
    Outbound,
    /// Leave them in `unclassified` for the consumer to handle.
    Keep,
    /// Discard them.
    Drop,
}

/// Stops of one service split by direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectionAssignment {
    pub outbound: Vec<Stop>,
    pub inbound: Vec<Stop>,
    /// Stops no heuristic could place.
    pub unclassified: Vec<Stop>,
}

impl DirectionAssignment {
    /// Fold `unclassified` according to `policy`.
    pub fn apply_policy(mut self, policy: UnclassifiedPolicy) -> Self {
        match policy {
            UnclassifiedPolicy::Outbound => {
                let pending = std::mem::take(&mut self.unclassified);
                self.outbound.extend(pending);
            }
            UnclassifiedPolicy::Drop => self.unclassified.clear(),
            UnclassifiedPolicy::Keep => {}
        }
        self
    }

    /// Total number of stops in all three lists.
    pub fn len(&self) -> usize {
        self.outbound.len() + self.inbound.len() + self.unclassified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn place(&mut self, stop: &Stop, direction: Direction) {
        match direction {
            Direction::Outbound => self.outbound.push(stop.clone()),
            Direction::Inbound => self.inbound.push(stop.clone()),
        }
    }
}

/// The heuristic that decided a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Single stop, bracketed code found in the table.
    BracketCode,
    /// Single stop, compass direction.
    Compass,
    /// Two members with opposite bracketed codes.
    BracketCodes,
    /// Two members with directions, exactly one in the outbound set.
    CompassPair,
    /// Northernmost member with any opinion anchors the pair.
    LatitudeAnchor,
    /// Larger longitude is outbound.
    LongitudeFallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::BracketCode => "bracket code",
            Tier::Compass => "compass",
            Tier::BracketCodes => "bracket codes",
            Tier::CompassPair => "compass pair",
            Tier::LatitudeAnchor => "latitude anchor",
            Tier::LongitudeFallback => "longitude fallback",
        };
        f.write_str(name)
    }
}

/// Indices into a group for the two members of a decided pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PairPlacement {
    outbound: usize,
    inbound: usize,
}

type SingleTier = fn(&Stop) -> Option<Direction>;

/// `pair` holds the two northernmost members of `group`.
type PairTier = fn(group: &[&Stop], pair: [usize; 2]) -> Option<PairPlacement>;

const SINGLE_TIERS: [(Tier, SingleTier); 2] = [
    (Tier::BracketCode, by_bracket_code),
    (Tier::Compass, by_compass),
];

const PAIR_TIERS: [(Tier, PairTier); 4] = [
    (Tier::BracketCodes, pair_by_bracket_codes),
    (Tier::CompassPair, pair_by_compass),
    (Tier::LatitudeAnchor, pair_by_latitude_anchor),
    (Tier::LongitudeFallback, pair_by_longitude),
];

/// Split `stops` into outbound and inbound.
///
/// Groups appear in the output in the order their base name is first seen;
/// within a group, placed pair members come before any remaining members.
/// The function is pure and deterministic for a given input order.
pub fn classify(stops: &[Stop]) -> DirectionAssignment {
    let mut result = DirectionAssignment::default();

    for (name, group) in group_by_base_name(stops) {
        if let [stop] = group.as_slice() {
            place_single(&mut result, stop, &name);
        } else {
            place_group(&mut result, &group, &name);
        }
    }

    result
}

/// Run a stop through the single-stop tiers.
pub fn classify_single(stop: &Stop) -> Option<(Direction, Tier)> {
    SINGLE_TIERS
        .iter()
        .find_map(|(tier, decide)| decide(stop).map(|direction| (direction, *tier)))
}

fn group_by_base_name(stops: &[Stop]) -> Vec<(String, Vec<&Stop>)> {
    let mut groups: Vec<(String, Vec<&Stop>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for stop in stops {
        let key = base_name(&stop.name);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(stop),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![stop]));
            }
        }
    }

    groups
}

fn place_single(result: &mut DirectionAssignment, stop: &Stop, group_name: &str) {
    match classify_single(stop) {
        Some((direction, tier)) => {
            debug!(stop = stop.id, group = group_name, %direction, %tier, "placed single stop");
            result.place(stop, direction);
        }
        None => {
            debug!(stop = stop.id, group = group_name, "no tier placed single stop");
            result.unclassified.push(stop.clone());
        }
    }
}

fn place_group(result: &mut DirectionAssignment, group: &[&Stop], group_name: &str) {
    let pair = northernmost_two(group);

    let decision = PAIR_TIERS
        .iter()
        .find_map(|(tier, decide)| decide(group, pair).map(|placement| (placement, *tier)));

    let Some((placement, tier)) = decision else {
        // Unreachable while the longitude fallback is last
        result.unclassified.extend(group.iter().map(|s| (*s).clone()));
        return;
    };

    debug!(
        group = group_name,
        outbound = group[placement.outbound].id,
        inbound = group[placement.inbound].id,
        %tier,
        "placed stop pair"
    );
    result.place(group[placement.outbound], Direction::Outbound);
    result.place(group[placement.inbound], Direction::Inbound);

    // Members beyond the pair get the single-stop tiers
    for (i, stop) in group.iter().enumerate() {
        if i == placement.outbound || i == placement.inbound {
            continue;
        }
        match classify_single(stop) {
            Some((direction, tier)) => {
                debug!(stop = stop.id, group = group_name, %direction, %tier, "placed extra group member");
                result.place(stop, direction);
            }
            None => {
                warn!(
                    stop = stop.id,
                    group = group_name,
                    size = group.len(),
                    "ambiguous group member left unclassified"
                );
                result.unclassified.push((*stop).clone());
            }
        }
    }
}

/// Indices of the two members with the greatest latitude, northernmost first.
///
/// Ties keep group order. `group` must have at least two members.
fn northernmost_two(group: &[&Stop]) -> [usize; 2] {
    let mut order: Vec<usize> = (0..group.len()).collect();
    order.sort_by(|&a, &b| group[b].latitude().total_cmp(&group[a].latitude()));
    [order[0], order[1]]
}

fn by_bracket_code(stop: &Stop) -> Option<Direction> {
    stop_code(&stop.name).and_then(|code| code.direction())
}

fn by_compass(stop: &Stop) -> Option<Direction> {
    stop.compass().map(Compass::direction_of)
}

fn pair_by_bracket_codes(group: &[&Stop], _pair: [usize; 2]) -> Option<PairPlacement> {
    let coded: Vec<(usize, Direction)> = group
        .iter()
        .enumerate()
        .filter_map(|(i, stop)| by_bracket_code(stop).map(|d| (i, d)))
        .take(2)
        .collect();

    match coded.as_slice() {
        [(a, Direction::Outbound), (b, Direction::Inbound)] => Some(PairPlacement {
            outbound: *a,
            inbound: *b,
        }),
        [(a, Direction::Inbound), (b, Direction::Outbound)] => Some(PairPlacement {
            outbound: *b,
            inbound: *a,
        }),
        _ => None,
    }
}

fn pair_by_compass(group: &[&Stop], [a, b]: [usize; 2]) -> Option<PairPlacement> {
    let dir_a = by_compass(group[a])?;
    let dir_b = by_compass(group[b])?;

    match (dir_a, dir_b) {
        (Direction::Outbound, Direction::Inbound) => Some(PairPlacement {
            outbound: a,
            inbound: b,
        }),
        (Direction::Inbound, Direction::Outbound) => Some(PairPlacement {
            outbound: b,
            inbound: a,
        }),
        _ => None,
    }
}

fn pair_by_latitude_anchor(group: &[&Stop], [north, south]: [usize; 2]) -> Option<PairPlacement> {
    let (anchor, other, direction) = [(north, south), (south, north)]
        .into_iter()
        .find_map(|(anchor, other)| {
            classify_single(group[anchor]).map(|(direction, _)| (anchor, other, direction))
        })?;

    Some(match direction {
        Direction::Outbound => PairPlacement {
            outbound: anchor,
            inbound: other,
        },
        Direction::Inbound => PairPlacement {
            outbound: other,
            inbound: anchor,
        },
    })
}

fn pair_by_longitude(group: &[&Stop], [a, b]: [usize; 2]) -> Option<PairPlacement> {
    if group[b].longitude() > group[a].longitude() {
        Some(PairPlacement {
            outbound: b,
            inbound: a,
        })
    } else {
        Some(PairPlacement {
            outbound: a,
            inbound: b,
        })
    }
}
