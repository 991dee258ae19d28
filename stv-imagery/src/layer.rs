//! Tile layer model and the imagery service response schema.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::date_range::DateRange;
use crate::error::TransportError;
use crate::request::RequestDescriptor;

/// Metadata for one source image contributing to a composite layer.
///
/// The service includes id, acquisition date, and scene centroid for
/// each image; all fields default so older deployments that return
/// bare ids still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// One layer descriptor as returned by the imagery service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub label: String,
    /// Tile URL template with literal `{z}/{x}/{y}` tokens, used
    /// verbatim by the map widget.
    pub tms_url: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub images: Vec<ImageMeta>,
}

/// Body of a successful tile-listing response.
///
/// The service echoes the requested dates at the top level as well;
/// those and any other extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileServiceResponse {
    pub layers: Vec<LayerRecord>,
}

impl TileServiceResponse {
    /// Decode a response body, distinguishing a missing `layers` field
    /// from otherwise malformed JSON.
    pub fn from_json(body: &str) -> Result<Self, TransportError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| TransportError::Parse(e.to_string()))?;
        if value.get("layers").is_none() {
            return Err(TransportError::MissingLayers);
        }
        serde_json::from_value(value).map_err(|e| TransportError::Parse(e.to_string()))
    }
}

/// A single toggleable tile overlay, created from one [`LayerRecord`]
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub id: String,
    pub name: String,
    pub url_template: String,
    pub range_start: String,
    pub range_end: String,
    pub image_count: usize,
}

/// The batch of tile layers returned by one successful imagery request,
/// tagged with the date range and bounding box used to request it.
///
/// Groups are append-only for the session lifetime; the controller
/// keeps them most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerGroup {
    pub id: String,
    pub created_at_ms: i64,
    pub date_range: DateRange,
    pub bbox: BoundingBox,
    pub layers: Vec<TileLayer>,
}

impl LayerGroup {
    /// Build a group from a service response. `loaded_at_ms` tags the
    /// group and namespaces the per-layer ids.
    pub fn from_response(
        request: &RequestDescriptor,
        response: TileServiceResponse,
        loaded_at_ms: i64,
    ) -> Self {
        let layers = response
            .layers
            .into_iter()
            .map(|record| TileLayer {
                id: format!("{}-{}", record.label, loaded_at_ms),
                name: record.label,
                url_template: record.tms_url,
                range_start: record.start,
                range_end: record.end,
                image_count: record.images.len(),
            })
            .collect();

        Self {
            id: format!("group-{loaded_at_ms}"),
            created_at_ms: loaded_at_ms,
            date_range: request.date_range,
            bbox: request.bbox,
            layers,
        }
    }
}
