//! Car rental search links.
//!
//! Validates a pickup/drop-off request and turns it into a deep link on a
//! rental search site. Opening the link and fetching location suggestions
//! are left to pluggable collaborators.

pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod state;

pub use config::AppConfig;
pub use error::{DateField, ValidationError};
pub use models::{Field, Outcome, RentalRequest, ValidatedRentalRequest};
pub use search::{LinkBuilder, SearchSite, Validator};
pub use state::{spawn_session, FormHandle, RequestState};
