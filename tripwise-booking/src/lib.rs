pub mod action;
pub mod store;
pub mod selection;
pub mod session;
pub mod handle;

pub use action::BookingAction;
pub use store::{reduce, BookingStore};
pub use selection::{MealAvailability, MealPolicy, SelectionError};
pub use session::{BookingSession, BookingSnapshot, CitizenshipSeed, SessionCommand};
pub use handle::{CommandReply, SessionError, SessionHandle};
