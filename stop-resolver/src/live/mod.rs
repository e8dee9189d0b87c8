//! Live refresh of resolved stop and vehicle data.
//!
//! Each consumer (a direction screen, a map screen) owns its own
//! [`PollingSession`]; sessions share no state and failures in one never
//! reach another.

mod feeds;
mod session;

pub use feeds::{direction_feed, nearby_feed, vehicle_feed};
pub use session::{PollingSession, Snapshot};
