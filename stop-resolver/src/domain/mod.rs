//! Domain types for stop resolution.
//!
//! Value types for the stop and vehicle catalogs consumed from the transit
//! API. Types that carry invariants (`Coordinate`, `StopCode`, `Compass`)
//! enforce them at construction time.

mod code;
mod compass;
mod geo;
mod stop;
mod vehicle;

pub use code::{InvalidStopCode, StopCode};
pub use compass::{Compass, Direction, InvalidCompass};
pub use geo::{Coordinate, EARTH_RADIUS_M, InvalidCoordinate, distance};
pub use stop::Stop;
pub use vehicle::Vehicle;
