//! Core data model and wire contract for the Sentinel-2 tile viewer.
//!
//! This crate holds everything the session controller and the front ends
//! share: the validated request types, the response schema of the imagery
//! service, and the tile layer model built from successful responses.
//! The optional `api` feature adds a reqwest-based client for native use
//! (CLI); WASM builds consume the same types through their own transport.

pub mod bounding_box;
pub mod date_range;
pub mod error;
pub mod layer;
pub mod request;

#[cfg(feature = "api")]
pub mod client;

/// Default public instance of the imagery service.
pub const DEFAULT_BASE_URL: &str = "https://geo-django-react-task.onrender.com";
