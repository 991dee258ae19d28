//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals the components render from
//! into a single struct provided via `use_context_provider`. It mirrors
//! the session controller's state for display; the controller itself
//! stays the single writer of session data.

use dioxus::prelude::*;

use stv_imagery::layer::LayerGroup;

/// Default date inputs shown on first load.
pub const DEFAULT_START_DATE: &str = "2025-01-01";
pub const DEFAULT_END_DATE: &str = "2025-01-31";

/// Shared application state for the sentinel viewer.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether an imagery request is in flight
    pub loading: Signal<bool>,
    /// Whether the Leaflet map finished initializing
    pub map_ready: Signal<bool>,
    /// Error message if the last load went wrong
    pub error_msg: Signal<Option<String>>,
    /// Start date input value (YYYY-MM-DD)
    pub start_date: Signal<String>,
    /// End date input value (YYYY-MM-DD)
    pub end_date: Signal<String>,
    /// Loaded layer groups, most recent first
    pub layer_groups: Signal<Vec<LayerGroup>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            loading: Signal::new(false),
            map_ready: Signal::new(false),
            error_msg: Signal::new(None),
            start_date: Signal::new(DEFAULT_START_DATE.to_string()),
            end_date: Signal::new(DEFAULT_END_DATE.to_string()),
            layer_groups: Signal::new(Vec::new()),
        }
    }
}
