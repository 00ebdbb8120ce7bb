use serde::{Deserialize, Serialize};
use tripwise_shared::{BoardType, CitizenshipId, CountryId, DaySelection, DaySelectionPatch};

/// The closed set of booking mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookingAction {
    SetCitizenship { citizenship_id: CitizenshipId },
    /// Canonical `YYYY-MM-DD`, or empty to unset
    SetStartDate { start_date: String },
    SetNumberOfDays { number_of_days: u32 },
    SetNumberOfGuests { number_of_guests: u32 },
    SetDestinationCountry { country_id: CountryId },
    SetBoardType { board_type: BoardType },
    /// Merge `patch` into the day numbered `day`; no-op if there is none
    SetDaySelection { day: u32, patch: DaySelectionPatch },
    /// Replace the whole itinerary
    InitializeDailySelections { selections: Vec<DaySelection> },
    Reset,
}

impl BookingAction {
    pub fn name(&self) -> &'static str {
        match self {
            BookingAction::SetCitizenship { .. } => "set_citizenship",
            BookingAction::SetStartDate { .. } => "set_start_date",
            BookingAction::SetNumberOfDays { .. } => "set_number_of_days",
            BookingAction::SetNumberOfGuests { .. } => "set_number_of_guests",
            BookingAction::SetDestinationCountry { .. } => "set_destination_country",
            BookingAction::SetBoardType { .. } => "set_board_type",
            BookingAction::SetDaySelection { .. } => "set_day_selection",
            BookingAction::InitializeDailySelections { .. } => "initialize_daily_selections",
            BookingAction::Reset => "reset",
        }
    }

    /// Whether applying this action can leave the itinerary out of line
    /// with the start date and day count
    pub fn reshapes_itinerary(&self) -> bool {
        matches!(
            self,
            BookingAction::SetStartDate { .. }
                | BookingAction::SetNumberOfDays { .. }
                | BookingAction::InitializeDailySelections { .. }
        )
    }
}
