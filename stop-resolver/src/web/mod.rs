//! Web layer for the stop resolver.
//!
//! Provides JSON endpoints for service directions, nearby stops, stop
//! lookup and live vehicle positions.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, DataSource};
