use stv_imagery::bounding_box::ViewportBounds;

/// Read access to the map widget's current viewport.
///
/// The widget hands the controller an implementation through the
/// map-ready notification; the controller owns it from then on.
pub trait ViewportSource {
    /// Current visible extent, or `None` when the widget can no longer
    /// report one (e.g. it was removed from the page).
    fn viewport_bounds(&self) -> Option<ViewportBounds>;
}
