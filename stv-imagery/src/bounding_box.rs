use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw viewport extent as reported by the map widget.
///
/// Values are whatever the widget returned; nothing is checked until
/// the request validator runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl ViewportBounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

/// A validated geographic bounding box in floating-point degrees.
///
/// Invariant: west/east in [-180, 180], south/north in [-90, 90], all
/// four finite. Only the request validator constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Comma-joined `west,south,east,north` form used by the `bbox`
    /// query parameter.
    pub fn to_query_value(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_value())
    }
}
