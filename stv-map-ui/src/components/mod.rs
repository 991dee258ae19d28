//! Reusable Dioxus RSX components for the sentinel viewer.

mod date_range_picker;
mod error_display;
mod layer_group_panel;
mod load_button;
mod loading_spinner;
mod map_container;

pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use layer_group_panel::LayerGroupPanel;
pub use load_button::LoadButton;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
