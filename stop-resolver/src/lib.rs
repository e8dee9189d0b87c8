//! Stop classification and proximity resolution for a city bus and tram
//! network.
//!
//! Turns a noisy stop catalog into per-direction stop lists for a service
//! and deduplicated markers for a map, and keeps both fresh against the
//! live transit feed.

pub mod cache;
pub mod config;
pub mod domain;
pub mod live;
pub mod resolve;
pub mod transit;
pub mod web;
