//! Transit API collaborator.
//!
//! Fetches the stop catalog and live vehicle positions from the transit
//! open-data API and converts them into domain types. Everything here is
//! pass-through plumbing; resolution happens in [`crate::resolve`].

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

pub use client::{TransitClient, TransitConfig};
pub use convert::{ConversionError, convert_stop, convert_stops, convert_vehicle, convert_vehicles};
pub use error::FetchError;
pub use mock::MockTransitClient;
pub use types::{StopDto, StopsResponse, VehicleDto, VehiclesResponse};

use crate::domain::{Stop, Vehicle};

/// Source of stop catalogs and vehicle positions.
///
/// This abstraction allows live sessions and the web layer to run against
/// mock data.
pub trait TransitSource: Send + Sync {
    /// Fetch the full stop catalog.
    fn stops(&self) -> impl Future<Output = Result<Vec<Stop>, FetchError>> + Send;

    /// Fetch current vehicle positions. Each call replaces the previous list.
    fn vehicles(&self) -> impl Future<Output = Result<Vec<Vehicle>, FetchError>> + Send;
}
