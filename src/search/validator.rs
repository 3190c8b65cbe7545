use crate::error::{DateField, ValidationError};
use crate::models::{RentalRequest, ValidatedRentalRequest, DATE_FORMAT};
use crate::search::traits::{Clock, LocalClock};
use chrono::NaiveDate;
use tracing::debug;

/// Checks rental requests before a link is built.
///
/// Checks run in a fixed order and stop at the first failure:
/// pickup location, date format, past pickup, then date ordering.
#[derive(Debug, Clone, Default)]
pub struct Validator<C: Clock = LocalClock> {
    clock: C,
}

impl<C: Clock> Validator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn validate(
        &self,
        request: &RentalRequest,
    ) -> Result<ValidatedRentalRequest, ValidationError> {
        if request.pickup_location.trim().is_empty() {
            debug!("Rejected request: blank pickup location");
            return Err(ValidationError::MissingField);
        }

        let pickup_date = parse_date(&request.pickup_date, DateField::Pickup)?;
        let drop_off_date = parse_date(&request.drop_off_date, DateField::DropOff)?;

        let today = self.clock.today();
        if pickup_date < today {
            debug!("Rejected request: pickup {} is before {}", pickup_date, today);
            return Err(ValidationError::PastDate);
        }

        // Same-day returns are allowed
        if drop_off_date < pickup_date {
            debug!(
                "Rejected request: drop-off {} is before pickup {}",
                drop_off_date, pickup_date
            );
            return Err(ValidationError::OrderingViolation);
        }

        let drop_off_location = match request.drop_off_location.as_deref() {
            Some(location) if !location.trim().is_empty() => location.to_string(),
            _ => request.pickup_location.clone(),
        };

        Ok(ValidatedRentalRequest::new(
            request.pickup_location.clone(),
            drop_off_location,
            pickup_date,
            drop_off_date,
        ))
    }
}

/// Parse a strict `YYYY-MM-DD` date; short forms like `2025-3-1` are refused.
fn parse_date(value: &str, field: DateField) -> Result<NaiveDate, ValidationError> {
    let bytes = value.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_shaped {
        debug!("Rejected {} date {:?}: not YYYY-MM-DD", field, value);
        return Err(ValidationError::MalformedDate(field));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        debug!("Rejected {} date {:?}: {}", field, value, e);
        ValidationError::MalformedDate(field)
    })
}
