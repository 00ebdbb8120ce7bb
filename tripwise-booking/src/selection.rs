use serde::{Deserialize, Serialize};
use tripwise_shared::{BoardType, DaySelection, DaySelectionPatch, HotelId, MealId};

/// Board-type rules for turning a user's pick into a day patch
pub struct MealPolicy;

impl MealPolicy {
    pub fn hotel(hotel_id: Option<HotelId>) -> DaySelectionPatch {
        DaySelectionPatch::hotel(hotel_id)
    }

    /// Under half board a lunch pick also clears that day's dinner
    pub fn lunch(board: Option<BoardType>, lunch_id: Option<MealId>) -> Result<DaySelectionPatch, SelectionError> {
        match board {
            Some(BoardType::NoBoard) => Err(SelectionError::MealsNotIncluded),
            Some(BoardType::HalfBoard) if lunch_id.is_some() => {
                Ok(DaySelectionPatch::lunch(lunch_id).clear_dinner())
            }
            _ => Ok(DaySelectionPatch::lunch(lunch_id)),
        }
    }

    /// Under half board a dinner pick also clears that day's lunch
    pub fn dinner(board: Option<BoardType>, dinner_id: Option<MealId>) -> Result<DaySelectionPatch, SelectionError> {
        match board {
            Some(BoardType::NoBoard) => Err(SelectionError::MealsNotIncluded),
            Some(BoardType::HalfBoard) if dinner_id.is_some() => {
                Ok(DaySelectionPatch::dinner(dinner_id).clear_lunch())
            }
            _ => Ok(DaySelectionPatch::dinner(dinner_id)),
        }
    }

    /// Brings a free-form day patch in line with the board type.
    ///
    /// Under no board, meal picks are dropped (clears still apply). Under
    /// half board, a lunch pick clears dinner and a dinner pick clears
    /// lunch; when both are picked the lunch wins.
    pub fn constrain(board: Option<BoardType>, mut patch: DaySelectionPatch) -> DaySelectionPatch {
        let picks_lunch = matches!(patch.lunch_id, Some(Some(_)));
        let picks_dinner = matches!(patch.dinner_id, Some(Some(_)));

        match board {
            Some(BoardType::NoBoard) => {
                if picks_lunch {
                    patch.lunch_id = None;
                }
                if picks_dinner {
                    patch.dinner_id = None;
                }
            }
            Some(BoardType::HalfBoard) if picks_lunch => patch.dinner_id = Some(None),
            Some(BoardType::HalfBoard) if picks_dinner => patch.lunch_id = Some(None),
            _ => {}
        }
        patch
    }

    pub fn lunch_enabled(board: Option<BoardType>, selection: &DaySelection) -> bool {
        match board {
            Some(BoardType::NoBoard) => false,
            Some(BoardType::HalfBoard) => selection.dinner_id.is_none(),
            _ => true,
        }
    }

    pub fn dinner_enabled(board: Option<BoardType>, selection: &DaySelection) -> bool {
        match board {
            Some(BoardType::NoBoard) => false,
            Some(BoardType::HalfBoard) => selection.lunch_id.is_none(),
            _ => true,
        }
    }

    pub fn availability(board: Option<BoardType>, selections: &[DaySelection]) -> Vec<MealAvailability> {
        selections
            .iter()
            .map(|selection| MealAvailability {
                day: selection.day,
                lunch_enabled: Self::lunch_enabled(board, selection),
                dinner_enabled: Self::dinner_enabled(board, selection),
            })
            .collect()
    }
}

/// Which meal pickers presentation should offer for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealAvailability {
    pub day: u32,
    pub lunch_enabled: bool,
    pub dinner_enabled: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Meals are not included in the selected board type")]
    MealsNotIncluded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day_with(lunch: Option<u32>, dinner: Option<u32>) -> DaySelection {
        let mut selection = DaySelection::blank(1, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        selection.lunch_id = lunch.map(MealId);
        selection.dinner_id = dinner.map(MealId);
        selection
    }

    #[test]
    fn test_half_board_lunch_clears_dinner() {
        let patch = MealPolicy::lunch(Some(BoardType::HalfBoard), Some(MealId(4))).unwrap();

        let mut selection = day_with(None, Some(1));
        selection.merge(&patch);
        assert_eq!(selection.lunch_id, Some(MealId(4)));
        assert_eq!(selection.dinner_id, None);
    }

    #[test]
    fn test_half_board_dinner_clears_lunch() {
        let patch = MealPolicy::dinner(Some(BoardType::HalfBoard), Some(MealId(1))).unwrap();

        let mut selection = day_with(Some(4), None);
        selection.merge(&patch);
        assert_eq!(selection.dinner_id, Some(MealId(1)));
        assert_eq!(selection.lunch_id, None);
    }

    #[test]
    fn test_full_board_keeps_both_meals() {
        let patch = MealPolicy::lunch(Some(BoardType::FullBoard), Some(MealId(4))).unwrap();

        let mut selection = day_with(None, Some(1));
        selection.merge(&patch);
        assert_eq!(selection.lunch_id, Some(MealId(4)));
        assert_eq!(selection.dinner_id, Some(MealId(1)));
    }

    #[test]
    fn test_clearing_under_half_board_leaves_counterpart() {
        let patch = MealPolicy::lunch(Some(BoardType::HalfBoard), None).unwrap();
        assert_eq!(patch, DaySelectionPatch::lunch(None));
    }

    #[test]
    fn test_no_board_rejects_meals() {
        assert_eq!(
            MealPolicy::lunch(Some(BoardType::NoBoard), Some(MealId(4))),
            Err(SelectionError::MealsNotIncluded)
        );
        assert_eq!(
            MealPolicy::dinner(Some(BoardType::NoBoard), Some(MealId(1))),
            Err(SelectionError::MealsNotIncluded)
        );
    }

    fn both_meals() -> DaySelectionPatch {
        DaySelectionPatch {
            hotel_id: None,
            lunch_id: Some(Some(MealId(4))),
            dinner_id: Some(Some(MealId(1))),
        }
    }

    #[test]
    fn test_constrain_half_board_patch() {
        let half = Some(BoardType::HalfBoard);

        let both = both_meals();
        let mut selection = day_with(None, None);
        selection.merge(&MealPolicy::constrain(half, both));
        assert_eq!((selection.lunch_id, selection.dinner_id), (Some(MealId(4)), None));

        let mut selection = day_with(Some(4), None);
        selection.merge(&MealPolicy::constrain(half, DaySelectionPatch::dinner(Some(MealId(2)))));
        assert_eq!((selection.lunch_id, selection.dinner_id), (None, Some(MealId(2))));
    }

    #[test]
    fn test_constrain_no_board_keeps_hotel_and_clears() {
        let patch = DaySelectionPatch {
            hotel_id: Some(Some(HotelId(101))),
            lunch_id: Some(Some(MealId(4))),
            dinner_id: Some(None),
        };

        let constrained = MealPolicy::constrain(Some(BoardType::NoBoard), patch);
        assert_eq!(constrained.hotel_id, Some(Some(HotelId(101))));
        assert_eq!(constrained.lunch_id, None);
        assert_eq!(constrained.dinner_id, Some(None));
    }

    #[test]
    fn test_constrain_full_board_is_untouched() {
        let patch = both_meals();
        assert_eq!(MealPolicy::constrain(Some(BoardType::FullBoard), patch.clone()), patch);
        assert_eq!(MealPolicy::constrain(None, patch.clone()), patch);
    }

    #[test]
    fn test_availability_flags() {
        let half = Some(BoardType::HalfBoard);
        assert!(!MealPolicy::lunch_enabled(half, &day_with(None, Some(1))));
        assert!(MealPolicy::dinner_enabled(half, &day_with(None, Some(1))));
        assert!(MealPolicy::lunch_enabled(half, &day_with(None, None)));

        let none = Some(BoardType::NoBoard);
        assert!(!MealPolicy::lunch_enabled(none, &day_with(None, None)));
        assert!(!MealPolicy::dinner_enabled(none, &day_with(None, None)));

        let full = Some(BoardType::FullBoard);
        let flags = MealPolicy::availability(full, &[day_with(Some(4), Some(1))]);
        assert_eq!(
            flags,
            vec![MealAvailability { day: 1, lunch_enabled: true, dinner_enabled: true }]
        );
    }
}
