//! Request building and validation.
//!
//! `build_request` turns the raw date inputs plus the viewport extent
//! into a normalized [`RequestDescriptor`], or the full list of
//! validation failures. It has no side effects; the session controller
//! decides what happens with the result.

use chrono::NaiveDate;

use crate::bounding_box::{BoundingBox, ViewportBounds};
use crate::date_range::{DateRange, YEAR_FORMAT};
use crate::error::ValidationError;

/// Path of the tile-listing endpoint on the imagery service.
pub const TILES_PATH: &str = "/get_sentinel_tiles/";

/// Raw start/end values exactly as read from the two date inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateRangeInput {
    pub start: String,
    pub end: String,
}

impl DateRangeInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A normalized imagery request: validated date range plus viewport
/// bounding box. Immutable; produced fresh for every load attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub date_range: DateRange,
    pub bbox: BoundingBox,
}

impl RequestDescriptor {
    /// Query parameters in wire order.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            (
                "start_date",
                self.date_range.start.format(YEAR_FORMAT).to_string(),
            ),
            (
                "end_date",
                self.date_range.end.format(YEAR_FORMAT).to_string(),
            ),
            ("bbox", self.bbox.to_query_value()),
        ]
    }

    /// Full GET URL against the given service base.
    pub fn service_url(&self, base_url: &str) -> String {
        let query = self
            .query_pairs()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}{}?{}", base_url.trim_end_matches('/'), TILES_PATH, query)
    }
}

fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), YEAR_FORMAT).ok()
}

fn coordinate_ok(value: f64, max_abs: f64) -> bool {
    value.is_finite() && value.abs() <= max_abs
}

/// Validate the raw inputs and produce a request descriptor.
///
/// All checks run; failures accumulate in a fixed order (start date,
/// end date, date ordering, then west/east/south/north) so the caller
/// can report every problem at once. The ordering check only runs when
/// both endpoints parsed.
pub fn build_request(
    dates: &DateRangeInput,
    bounds: ViewportBounds,
) -> Result<RequestDescriptor, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let start = parse_input_date(&dates.start);
    let end = parse_input_date(&dates.end);
    if start.is_none() {
        errors.push(ValidationError::StartDate);
    }
    if end.is_none() {
        errors.push(ValidationError::EndDate);
    }
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            errors.push(ValidationError::DateOrder);
        }
    }

    if !coordinate_ok(bounds.west, 180.0) {
        errors.push(ValidationError::West);
    }
    if !coordinate_ok(bounds.east, 180.0) {
        errors.push(ValidationError::East);
    }
    if !coordinate_ok(bounds.south, 90.0) {
        errors.push(ValidationError::South);
    }
    if !coordinate_ok(bounds.north, 90.0) {
        errors.push(ValidationError::North);
    }

    match (start, end, errors.is_empty()) {
        (Some(start), Some(end), true) => Ok(RequestDescriptor {
            date_range: DateRange { start, end },
            bbox: BoundingBox {
                west: bounds.west,
                south: bounds.south,
                east: bounds.east,
                north: bounds.north,
            },
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london_bounds() -> ViewportBounds {
        ViewportBounds::new(-0.2, 51.4, 0.0, 51.6)
    }

    fn january() -> DateRangeInput {
        DateRangeInput::new("2025-01-01", "2025-01-31")
    }

    #[test]
    fn test_valid_inputs_produce_descriptor() {
        let descriptor = build_request(&january(), london_bounds()).unwrap();
        assert_eq!(descriptor.date_range.to_string(), "2025-01-01 to 2025-01-31");
        assert_eq!(descriptor.bbox.to_query_value(), "-0.2,51.4,0,51.6");
    }

    #[test]
    fn test_start_after_end_reports_date_order() {
        let dates = DateRangeInput::new("2025-02-01", "2025-01-01");
        let errors = build_request(&dates, london_bounds()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DateOrder]);
    }

    #[test]
    fn test_unparseable_date_skips_ordering_check() {
        let dates = DateRangeInput::new("not-a-date", "2025-01-01");
        let errors = build_request(&dates, london_bounds()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::StartDate]);
    }

    #[test]
    fn test_errors_accumulate_in_fixed_order() {
        let dates = DateRangeInput::new("nope", "also-nope");
        let bounds = ViewportBounds::new(-200.0, 95.0, 200.0, f64::NAN);
        let errors = build_request(&dates, bounds).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::StartDate,
                ValidationError::EndDate,
                ValidationError::West,
                ValidationError::East,
                ValidationError::South,
                ValidationError::North,
            ]
        );
    }

    #[test]
    fn test_boundary_coordinates_pass() {
        let bounds = ViewportBounds::new(-180.0, -90.0, 180.0, 90.0);
        assert!(build_request(&january(), bounds).is_ok());
    }

    #[test]
    fn test_out_of_range_longitude_fails() {
        let bounds = ViewportBounds::new(-180.1, 51.4, 0.0, 51.6);
        let errors = build_request(&january(), bounds).unwrap_err();
        assert_eq!(errors, vec![ValidationError::West]);
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        // Parses the format but not the calendar.
        let dates = DateRangeInput::new("2025-02-30", "2025-03-01");
        let errors = build_request(&dates, london_bounds()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::StartDate]);
    }

    #[test]
    fn test_service_url_shape() {
        let descriptor = build_request(&january(), london_bounds()).unwrap();
        let url = descriptor.service_url("https://imagery.example.com/");
        assert_eq!(
            url,
            "https://imagery.example.com/get_sentinel_tiles/?start_date=2025-01-01&end_date=2025-01-31&bbox=-0.2,51.4,0,51.6"
        );
    }
}
