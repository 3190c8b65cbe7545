use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format accepted for pickup and drop-off dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One of the four editable fields of a rental search form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    PickupLocation,
    DropOffLocation,
    PickupDate,
    DropOffDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PickupLocation => "pickup-location",
            Field::DropOffLocation => "drop-off-location",
            Field::PickupDate => "pickup-date",
            Field::DropOffDate => "drop-off-date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup-location" => Ok(Field::PickupLocation),
            "drop-off-location" => Ok(Field::DropOffLocation),
            "pickup-date" => Ok(Field::PickupDate),
            "drop-off-date" => Ok(Field::DropOffDate),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// Draft rental request, mutable while the user is editing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RentalRequest {
    /// Where the car is picked up (required)
    pub pickup_location: String,
    /// Where the car is returned; blank or absent means same as pickup
    pub drop_off_location: Option<String>,
    /// Pickup date as `YYYY-MM-DD`
    pub pickup_date: String,
    /// Drop-off date as `YYYY-MM-DD`
    pub drop_off_date: String,
}

impl RentalRequest {
    /// Structural check used to enable the submit action.
    ///
    /// Drop-off location is never required here.
    pub fn is_submittable(&self) -> bool {
        !self.pickup_location.trim().is_empty()
            && !self.pickup_date.trim().is_empty()
            && !self.drop_off_date.trim().is_empty()
    }

    /// Replace one field with `value` as given.
    ///
    /// A blank drop-off location is stored as `None`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::PickupLocation => self.pickup_location = value,
            Field::DropOffLocation => {
                self.drop_off_location = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
            Field::PickupDate => self.pickup_date = value,
            Field::DropOffDate => self.drop_off_date = value,
        }
    }
}

/// A request that passed every structural and temporal check.
///
/// Only the validator can build one, so holding a value is proof that the
/// drop-off location is resolved and both dates are real, ordered dates.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidatedRentalRequest {
    pickup_location: String,
    drop_off_location: String,
    pickup_date: NaiveDate,
    drop_off_date: NaiveDate,
}

impl ValidatedRentalRequest {
    pub(crate) fn new(
        pickup_location: String,
        drop_off_location: String,
        pickup_date: NaiveDate,
        drop_off_date: NaiveDate,
    ) -> Self {
        Self {
            pickup_location,
            drop_off_location,
            pickup_date,
            drop_off_date,
        }
    }

    pub fn pickup_location(&self) -> &str {
        &self.pickup_location
    }

    pub fn drop_off_location(&self) -> &str {
        &self.drop_off_location
    }

    pub fn pickup_date(&self) -> NaiveDate {
        self.pickup_date
    }

    pub fn drop_off_date(&self) -> NaiveDate {
        self.drop_off_date
    }
}

/// Result of the last user action, exposed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// Normal editing state
    Editing(RentalRequest),
    /// Last submit failed; carries a display-ready reason
    Rejected(String),
    /// Last submit succeeded; the URL should be opened exactly once
    ReadyToNavigate(String),
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Editing(RentalRequest::default())
    }
}

impl Outcome {
    pub fn is_editing(&self) -> bool {
        matches!(self, Outcome::Editing(_))
    }

    pub fn rejection(&self) -> Option<&str> {
        match self {
            Outcome::Rejected(message) => Some(message),
            _ => None,
        }
    }

    pub fn navigation_url(&self) -> Option<&str> {
        match self {
            Outcome::ReadyToNavigate(url) => Some(url),
            _ => None,
        }
    }
}
