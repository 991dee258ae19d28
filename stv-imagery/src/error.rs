//! Error types for the imagery viewer.

use thiserror::Error;

/// A single request-validation failure.
///
/// The validator accumulates these instead of short-circuiting, so a
/// caller can report every problem with the inputs at once. Display
/// strings are the user-facing messages.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid start date")]
    StartDate,

    #[error("Invalid end date")]
    EndDate,

    #[error("End date must be after start date")]
    DateOrder,

    #[error("Invalid west coordinate")]
    West,

    #[error("Invalid east coordinate")]
    East,

    #[error("Invalid south coordinate")]
    South,

    #[error("Invalid north coordinate")]
    North,
}

/// Failure of a dispatched imagery request.
///
/// `Cancelled` is produced when the transport was asked to abort; the
/// session controller discards it silently rather than surfacing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never completed (connection refused, DNS, aborted
    /// socket, ...).
    #[error("Request failed: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body parsed as JSON but carried no `layers` field.
    #[error("Missing layers in response")]
    MissingLayers,

    /// The body was not valid JSON for the documented schema.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request was aborted by a superseding load or teardown.
    #[error("Request was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_ui_wording() {
        assert_eq!(ValidationError::StartDate.to_string(), "Invalid start date");
        assert_eq!(
            ValidationError::DateOrder.to_string(),
            "End date must be after start date"
        );
        assert_eq!(
            ValidationError::North.to_string(),
            "Invalid north coordinate"
        );
    }

    #[test]
    fn test_status_error_includes_body() {
        let err = TransportError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
