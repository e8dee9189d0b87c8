//! Travel directions and compass headings.

use std::fmt;

use serde::Serialize;

/// One of the two canonical travel directions along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Outbound => Direction::Inbound,
            Direction::Inbound => Direction::Outbound,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outbound => f.write_str("outbound"),
            Direction::Inbound => f.write_str("inbound"),
        }
    }
}

/// Error returned when a compass string is not one of the eight points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid compass direction: {0:?}")]
pub struct InvalidCompass(String);

/// An eight-point compass heading as published on stop records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Compass {
    /// Parse a compass point, ignoring surrounding whitespace and case.
    pub fn parse(s: &str) -> Result<Self, InvalidCompass> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(Compass::N),
            "NE" => Ok(Compass::NE),
            "E" => Ok(Compass::E),
            "SE" => Ok(Compass::SE),
            "S" => Ok(Compass::S),
            "SW" => Ok(Compass::SW),
            "W" => Ok(Compass::W),
            "NW" => Ok(Compass::NW),
            _ => Err(InvalidCompass(s.to_string())),
        }
    }

    /// Travel direction implied by this heading.
    ///
    /// South, south-east and east are outbound; every other point is inbound.
    pub fn direction(self) -> Direction {
        match self {
            Compass::S | Compass::SE | Compass::E => Direction::Outbound,
            _ => Direction::Inbound,
        }
    }

    /// Direction for a raw compass string.
    ///
    /// Strings that are not a compass point classify as inbound, the same as
    /// any heading outside the outbound set.
    pub fn direction_of(raw: &str) -> Direction {
        Compass::parse(raw)
            .map(Compass::direction)
            .unwrap_or(Direction::Inbound)
    }
}
