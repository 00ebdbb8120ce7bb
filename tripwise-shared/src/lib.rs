pub mod ids;
pub mod dates;
pub mod models;

pub use ids::{CitizenshipId, CountryId, DestinationId, HotelId, MealId};
pub use models::booking::{BoardType, BookingState, DaySelection, DaySelectionPatch};
