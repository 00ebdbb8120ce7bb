pub mod itinerary;
pub mod validation;
pub mod geolocation;

pub use geolocation::{CallerLocation, HttpLocationResolver, LocationResolver, StaticLocationResolver};
pub use itinerary::{derive_selections, needs_regeneration};
pub use validation::{validate_booking, BookingField, ValidationErrors, ValidationRules};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Location lookup failed: {0}")]
    LocationUnavailable(String),
    #[error("Malformed location response: {0}")]
    MalformedLocation(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
