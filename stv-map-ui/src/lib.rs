//! Shared Dioxus components and Leaflet bridge for the sentinel viewer.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Leaflet map via `js_sys::eval()`
//! - `fetch`: the browser `fetch()` transport with abort support
//! - `state`: reactive AppState with Dioxus Signals
//! - `components`: reusable RSX components (date picker, map container, etc.)

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
