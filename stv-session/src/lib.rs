//! Layer session controller for the Sentinel-2 tile viewer.
//!
//! Owns the append-only sequence of loaded layer groups and the single
//! outstanding imagery request. The map widget and the HTTP transport
//! are injected capabilities ([`ViewportSource`], [`TileTransport`]),
//! so the same controller runs under Dioxus/WASM and in native tests.
//!
//! The concurrency model is cooperative and last-request-wins: starting
//! a new load aborts the previous one and advances a generation token;
//! a resolution carrying a stale token is discarded without touching
//! state.

pub mod controller;
pub mod transport;
pub mod viewport;

pub use controller::{LoadResolution, LoadStart, LoadToken, SessionController};
pub use transport::{AbortGuard, PendingFetch, TileTransport};
pub use viewport::ViewportSource;
