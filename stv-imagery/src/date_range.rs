use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for imagery API query parameters: "YYYY-MM-DD".
pub const YEAR_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar date range. Invariant: `start <= end`.
///
/// Only produced by the request validator, so the invariant holds for
/// every value reachable outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of calendar days covered, endpoints included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(YEAR_FORMAT),
            self.end.format(YEAR_FORMAT)
        )
    }
}
