use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Shown when a link cannot be produced or handed off after a successful submit
pub const LINK_FAILURE_MESSAGE: &str = "Failed to generate link.";

/// Which date input failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateField {
    Pickup,
    DropOff,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Pickup => f.write_str("pickup"),
            DateField::DropOff => f.write_str("drop-off"),
        }
    }
}

/// Caller-correctable problems with a rental request.
///
/// Display strings are meant for direct display to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Pickup location is required.")]
    MissingField,

    #[error("Invalid {0} date format (use YYYY-MM-DD).")]
    MalformedDate(DateField),

    #[error("Pickup date cannot be in the past.")]
    PastDate,

    #[error("Drop-off date must be after pickup date.")]
    OrderingViolation,
}
