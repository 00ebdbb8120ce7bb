use crate::action::BookingAction;
use tripwise_shared::BookingState;

/// Pure reducer: one action, one resulting state. Never fails.
pub fn reduce(mut state: BookingState, action: BookingAction) -> BookingState {
    match action {
        BookingAction::SetCitizenship { citizenship_id } => {
            state.citizenship = Some(citizenship_id);
        }
        BookingAction::SetStartDate { start_date } => {
            state.start_date = start_date;
        }
        BookingAction::SetNumberOfDays { number_of_days } => {
            state.number_of_days = number_of_days;
        }
        BookingAction::SetNumberOfGuests { number_of_guests } => {
            state.number_of_guests = number_of_guests;
        }
        BookingAction::SetDestinationCountry { country_id } => {
            state.destination_country = Some(country_id);
        }
        BookingAction::SetBoardType { board_type } => {
            state.board_type = Some(board_type);
        }
        BookingAction::SetDaySelection { day, patch } => {
            if let Some(selection) = state.daily_selections.iter_mut().find(|s| s.day == day) {
                selection.merge(&patch);
            }
        }
        BookingAction::InitializeDailySelections { selections } => {
            state.daily_selections = selections;
        }
        BookingAction::Reset => return BookingState::new(),
    }
    state
}

/// Holds the authoritative booking state and applies actions to it
#[derive(Debug, Default)]
pub struct BookingStore {
    state: BookingState,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            state: BookingState::new(),
        }
    }

    pub fn with_state(state: BookingState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Apply one action and return the committed state
    pub fn apply(&mut self, action: BookingAction) -> &BookingState {
        let name = action.name();
        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, action);

        tracing::debug!(
            action = name,
            days = self.state.daily_selections.len(),
            "Applied booking action"
        );
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tripwise_shared::{
        BoardType, CitizenshipId, CountryId, DaySelection, DaySelectionPatch, HotelId, MealId,
    };

    fn two_days() -> Vec<DaySelection> {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        vec![
            DaySelection::blank(1, start),
            DaySelection::blank(2, start.succ_opt().unwrap()),
        ]
    }

    #[test]
    fn test_scalar_setters() {
        let mut store = BookingStore::new();

        store.apply(BookingAction::SetCitizenship { citizenship_id: CitizenshipId(3) });
        store.apply(BookingAction::SetStartDate { start_date: "2025-06-01".to_string() });
        store.apply(BookingAction::SetNumberOfDays { number_of_days: 2 });
        store.apply(BookingAction::SetNumberOfGuests { number_of_guests: 4 });
        store.apply(BookingAction::SetDestinationCountry { country_id: CountryId(2) });
        let state = store.apply(BookingAction::SetBoardType { board_type: BoardType::HalfBoard });

        assert_eq!(state.citizenship, Some(CitizenshipId(3)));
        assert_eq!(state.start_date, "2025-06-01");
        assert_eq!(state.number_of_days, 2);
        assert_eq!(state.number_of_guests, 4);
        assert_eq!(state.destination_country, Some(CountryId(2)));
        assert_eq!(state.board_type, Some(BoardType::HalfBoard));
        // The store alone never derives an itinerary
        assert!(state.daily_selections.is_empty());
    }

    #[test]
    fn test_day_selection_merges_into_matching_day() {
        let mut store = BookingStore::new();
        store.apply(BookingAction::InitializeDailySelections { selections: two_days() });

        let state = store.apply(BookingAction::SetDaySelection {
            day: 2,
            patch: DaySelectionPatch::hotel(Some(HotelId(101))),
        });

        assert_eq!(state.daily_selections[0].hotel_id, None);
        assert_eq!(state.daily_selections[1].hotel_id, Some(HotelId(101)));
    }

    #[test]
    fn test_day_selection_is_blind_merge() {
        let mut store = BookingStore::new();
        store.apply(BookingAction::SetBoardType { board_type: BoardType::HalfBoard });
        store.apply(BookingAction::InitializeDailySelections { selections: two_days() });
        store.apply(BookingAction::SetDaySelection {
            day: 1,
            patch: DaySelectionPatch::dinner(Some(MealId(1))),
        });

        // The store itself does not enforce the half-board rule
        let state = store.apply(BookingAction::SetDaySelection {
            day: 1,
            patch: DaySelectionPatch::lunch(Some(MealId(4))),
        });
        assert_eq!(state.daily_selections[0].lunch_id, Some(MealId(4)));
        assert_eq!(state.daily_selections[0].dinner_id, Some(MealId(1)));
    }

    #[test]
    fn test_unknown_day_is_noop() {
        let mut store = BookingStore::new();
        store.apply(BookingAction::InitializeDailySelections { selections: two_days() });
        let before = store.state().clone();

        let after = store.apply(BookingAction::SetDaySelection {
            day: 9,
            patch: DaySelectionPatch::hotel(Some(HotelId(101))),
        });
        assert_eq!(*after, before);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut store = BookingStore::new();
        store.apply(BookingAction::SetNumberOfGuests { number_of_guests: 3 });
        store.apply(BookingAction::InitializeDailySelections { selections: two_days() });

        let state = store.apply(BookingAction::Reset);
        assert_eq!(*state, BookingState::new());
    }
}
