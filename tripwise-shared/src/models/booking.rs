use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{CitizenshipId, CountryId, HotelId, MealId};

/// Meal-inclusion plan for the whole stay
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BoardType {
    /// Lunch and dinner can both be selected
    #[serde(rename = "FB")]
    FullBoard,
    /// At most one of lunch or dinner per day
    #[serde(rename = "HB")]
    HalfBoard,
    /// No meals
    #[serde(rename = "NB")]
    NoBoard,
}

impl BoardType {
    pub const ALL: [BoardType; 3] = [BoardType::FullBoard, BoardType::HalfBoard, BoardType::NoBoard];

    pub fn code(self) -> &'static str {
        match self {
            BoardType::FullBoard => "FB",
            BoardType::HalfBoard => "HB",
            BoardType::NoBoard => "NB",
        }
    }

    pub fn parse_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|board| board.code().eq_ignore_ascii_case(code))
    }
}

/// One day of the itinerary and what was picked for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySelection {
    /// 1-based, matches the position in the itinerary
    pub day: u32,
    pub date: NaiveDate,
    pub hotel_id: Option<HotelId>,
    pub lunch_id: Option<MealId>,
    pub dinner_id: Option<MealId>,
}

impl DaySelection {
    /// Empty slot for a day
    pub fn blank(day: u32, date: NaiveDate) -> Self {
        Self {
            day,
            date,
            hotel_id: None,
            lunch_id: None,
            dinner_id: None,
        }
    }

    /// Blind merge of the fields present in `patch`
    pub fn merge(&mut self, patch: &DaySelectionPatch) {
        if let Some(hotel_id) = patch.hotel_id {
            self.hotel_id = hotel_id;
        }
        if let Some(lunch_id) = patch.lunch_id {
            self.lunch_id = lunch_id;
        }
        if let Some(dinner_id) = patch.dinner_id {
            self.dinner_id = dinner_id;
        }
    }
}

/// Partial update for a [`DaySelection`].
///
/// Each field has three states: `None` leaves the field alone, `Some(None)`
/// clears it and `Some(Some(id))` sets it. On the wire an absent key is
/// "leave alone" and an explicit `null` is "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySelectionPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<Option<HotelId>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub lunch_id: Option<Option<MealId>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dinner_id: Option<Option<MealId>>,
}

impl DaySelectionPatch {
    pub fn hotel(hotel_id: Option<HotelId>) -> Self {
        Self {
            hotel_id: Some(hotel_id),
            ..Default::default()
        }
    }

    pub fn lunch(lunch_id: Option<MealId>) -> Self {
        Self {
            lunch_id: Some(lunch_id),
            ..Default::default()
        }
    }

    pub fn dinner(dinner_id: Option<MealId>) -> Self {
        Self {
            dinner_id: Some(dinner_id),
            ..Default::default()
        }
    }

    pub fn clear_lunch(mut self) -> Self {
        self.lunch_id = Some(None);
        self
    }

    pub fn clear_dinner(mut self) -> Self {
        self.dinner_id = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.hotel_id.is_none() && self.lunch_id.is_none() && self.dinner_id.is_none()
    }
}

// A key that is present (even as null) deserializes to Some(..)
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The single authoritative booking aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingState {
    pub citizenship: Option<CitizenshipId>,
    /// Canonical `YYYY-MM-DD`, empty when unset
    pub start_date: String,
    /// 0 means not yet determined
    pub number_of_days: u32,
    pub number_of_guests: u32,
    pub destination_country: Option<CountryId>,
    pub board_type: Option<BoardType>,
    pub daily_selections: Vec<DaySelection>,
}

impl BookingState {
    pub fn new() -> Self {
        Self {
            citizenship: None,
            start_date: String::new(),
            number_of_days: 0,
            number_of_guests: 1,
            destination_country: None,
            board_type: None,
            daily_selections: Vec::new(),
        }
    }

    pub fn has_start_date(&self) -> bool {
        !self.start_date.trim().is_empty()
    }

    pub fn selection(&self, day: u32) -> Option<&DaySelection> {
        self.daily_selections.iter().find(|selection| selection.day == day)
    }
}

impl Default for BookingState {
    fn default() -> Self {
        Self::new()
    }
}
