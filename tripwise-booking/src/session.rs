use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tripwise_catalog::{Catalog, PriceSummary, PricingEngine};
use tripwise_core::{derive_selections, needs_regeneration, validate_booking, ValidationErrors, ValidationRules};
use tripwise_shared::dates;
use tripwise_shared::{BookingState, HotelId, MealId};
use uuid::Uuid;

use crate::action::BookingAction;
use crate::selection::{MealAvailability, MealPolicy, SelectionError};
use crate::store::BookingStore;

/// Progress of the one-time, location-based citizenship default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitizenshipSeed {
    NotAttempted,
    /// Lookup in flight
    Pending,
    Applied,
    /// Lookup failed, nothing matched, or citizenship was already chosen
    Skipped,
}

/// Commands accepted from presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Raw store operation
    Dispatch { action: BookingAction },
    SelectHotel { day: u32, hotel_id: Option<HotelId> },
    SelectLunch { day: u32, meal_id: Option<MealId> },
    SelectDinner { day: u32, meal_id: Option<MealId> },
    /// Typed check-in text, `DD-MM-YYYY` as it is being entered
    EnterStartDate { text: String },
    /// Typed check-out text; sets the day count once complete
    EnterCheckOut { text: String },
}

/// Everything presentation renders, computed from one committed state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSnapshot {
    pub session_id: Uuid,
    pub state: BookingState,
    pub errors: ValidationErrors,
    pub check_out: Option<NaiveDate>,
    pub check_out_display: String,
    pub pricing: PriceSummary,
    pub meal_availability: Vec<MealAvailability>,
    pub citizenship_seed: CitizenshipSeed,
}

/// One user's booking session.
///
/// Wraps the store with the orchestration the store leaves to its caller:
/// itinerary regeneration, board-type meal rules, text date entry and the
/// one-time citizenship default. Derived views are computed on read.
pub struct BookingSession {
    id: Uuid,
    store: BookingStore,
    catalog: Arc<Catalog>,
    rules: ValidationRules,
    citizenship_seed: CitizenshipSeed,
}

impl BookingSession {
    pub fn new(catalog: Arc<Catalog>, rules: ValidationRules) -> Self {
        let id = Uuid::new_v4();
        info!(session_id = %id, "Booking session started");

        Self {
            id,
            store: BookingStore::new(),
            catalog,
            rules,
            citizenship_seed: CitizenshipSeed::NotAttempted,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &BookingState {
        self.store.state()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn citizenship_seed(&self) -> CitizenshipSeed {
        self.citizenship_seed
    }

    /// Apply a store action, then bring the itinerary back in line with
    /// the start date and day count if the action could have moved it.
    /// Day patches pass through the board-type meal rules first.
    pub fn dispatch(&mut self, action: BookingAction) -> &BookingState {
        let action = match action {
            BookingAction::SetDaySelection { day, patch } => BookingAction::SetDaySelection {
                day,
                patch: MealPolicy::constrain(self.state().board_type, patch),
            },
            other => other,
        };
        let reshapes = action.reshapes_itinerary();
        self.store.apply(action);
        if reshapes {
            self.sync_itinerary();
        }
        self.store.state()
    }

    fn sync_itinerary(&mut self) {
        let state = self.store.state();
        let derived = derive_selections(&state.start_date, state.number_of_days, self.rules.max_days);

        // Converges: a second pass over an aligned itinerary is a no-op
        if needs_regeneration(&state.daily_selections, &derived) {
            debug!(session_id = %self.id, days = derived.len(), "Regenerating itinerary");
            self.store
                .apply(BookingAction::InitializeDailySelections { selections: derived });
        }
    }

    pub fn execute(&mut self, command: SessionCommand) -> Option<String> {
        match command {
            SessionCommand::Dispatch { action } => {
                self.dispatch(action);
                None
            }
            SessionCommand::SelectHotel { day, hotel_id } => {
                self.select_hotel(day, hotel_id);
                None
            }
            SessionCommand::SelectLunch { day, meal_id } => {
                if let Err(e) = self.select_lunch(day, meal_id) {
                    debug!(session_id = %self.id, day, "Lunch selection ignored: {}", e);
                }
                None
            }
            SessionCommand::SelectDinner { day, meal_id } => {
                if let Err(e) = self.select_dinner(day, meal_id) {
                    debug!(session_id = %self.id, day, "Dinner selection ignored: {}", e);
                }
                None
            }
            SessionCommand::EnterStartDate { text } => Some(self.enter_start_date(&text)),
            SessionCommand::EnterCheckOut { text } => Some(self.enter_check_out(&text)),
        }
    }

    pub fn select_hotel(&mut self, day: u32, hotel_id: Option<HotelId>) -> &BookingState {
        self.dispatch(BookingAction::SetDaySelection {
            day,
            patch: MealPolicy::hotel(hotel_id),
        })
    }

    pub fn select_lunch(&mut self, day: u32, lunch_id: Option<MealId>) -> Result<&BookingState, SelectionError> {
        let patch = MealPolicy::lunch(self.state().board_type, lunch_id)?;
        Ok(self.dispatch(BookingAction::SetDaySelection { day, patch }))
    }

    pub fn select_dinner(&mut self, day: u32, dinner_id: Option<MealId>) -> Result<&BookingState, SelectionError> {
        let patch = MealPolicy::dinner(self.state().board_type, dinner_id)?;
        Ok(self.dispatch(BookingAction::SetDaySelection { day, patch }))
    }

    /// Masks typed check-in text and commits it once it is a real date.
    ///
    /// Clearing the field clears the start date; partial input leaves the
    /// state untouched. Returns the masked text.
    pub fn enter_start_date(&mut self, text: &str) -> String {
        let masked = dates::mask_digits(text);

        if masked.trim().is_empty() {
            self.dispatch(BookingAction::SetStartDate { start_date: String::new() });
        } else if let Some(date) = dates::parse_display(&masked) {
            self.dispatch(BookingAction::SetStartDate {
                start_date: dates::to_canonical(date),
            });
        }
        masked
    }

    /// Masks typed check-out text and, when a start date is set, turns it
    /// into an inclusive day count. Non-positive lengths are ignored.
    pub fn enter_check_out(&mut self, text: &str) -> String {
        let masked = dates::mask_digits(text);

        let Some(end) = dates::parse_display(&masked) else {
            return masked;
        };
        let Some(start) = dates::parse_canonical(&self.state().start_date) else {
            return masked;
        };

        let length = dates::trip_length(start, end);
        match u32::try_from(length) {
            Ok(days) if days > 0 => {
                self.dispatch(BookingAction::SetNumberOfDays { number_of_days: days });
            }
            _ => debug!(session_id = %self.id, length, "Check-out before check-in ignored"),
        }
        masked
    }

    /// Claims the one-time citizenship default.
    ///
    /// Returns true exactly once per session, and only while citizenship
    /// is still unset; the caller then performs the lookup.
    pub fn claim_citizenship_seed(&mut self) -> bool {
        if self.citizenship_seed != CitizenshipSeed::NotAttempted {
            return false;
        }

        if self.state().citizenship.is_some() {
            self.citizenship_seed = CitizenshipSeed::Skipped;
            return false;
        }
        self.citizenship_seed = CitizenshipSeed::Pending;
        true
    }

    /// Applies a resolved country code as the default citizenship.
    ///
    /// Only acts on a pending claim, and never overrides a citizenship
    /// chosen while the lookup was in flight.
    pub fn seed_citizenship(&mut self, country_code: &str) -> bool {
        if self.citizenship_seed != CitizenshipSeed::Pending {
            return false;
        }

        let matched = match self.state().citizenship {
            Some(_) => None,
            None => self.catalog.citizenship_by_code(country_code).map(|c| c.id),
        };

        match matched {
            Some(citizenship_id) => {
                info!(session_id = %self.id, country_code, %citizenship_id, "Defaulted citizenship from location");
                self.dispatch(BookingAction::SetCitizenship { citizenship_id });
                self.citizenship_seed = CitizenshipSeed::Applied;
                true
            }
            None => {
                debug!(session_id = %self.id, country_code, "Citizenship default skipped");
                self.citizenship_seed = CitizenshipSeed::Skipped;
                false
            }
        }
    }

    /// The lookup behind a pending claim failed
    pub fn abandon_citizenship_seed(&mut self) {
        if self.citizenship_seed == CitizenshipSeed::Pending {
            self.citizenship_seed = CitizenshipSeed::Skipped;
        }
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        let start = dates::parse_canonical(&self.state().start_date)?;
        dates::checkout_date(start, self.state().number_of_days)
    }

    pub fn validation(&self, today: NaiveDate) -> ValidationErrors {
        validate_booking(self.state(), &self.rules, today)
    }

    pub fn pricing(&self) -> PriceSummary {
        PricingEngine::new(&self.catalog).summarize(self.state())
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        self.snapshot_at(dates::today())
    }

    pub fn snapshot_at(&self, today: NaiveDate) -> BookingSnapshot {
        let state = self.state();
        let check_out = self.check_out();

        BookingSnapshot {
            session_id: self.id,
            state: state.clone(),
            errors: self.validation(today),
            check_out,
            check_out_display: check_out.map(dates::format_display).unwrap_or_default(),
            pricing: self.pricing(),
            meal_availability: MealPolicy::availability(state.board_type, &state.daily_selections),
            citizenship_seed: self.citizenship_seed,
        }
    }
}
