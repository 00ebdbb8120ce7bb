use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tripwise_shared::dates;
use tripwise_shared::BookingState;

/// Booking fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    Citizenship,
    StartDate,
    NumberOfDays,
    DestinationCountry,
    BoardType,
    DailySelections,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Longest trip that can be configured
    #[serde(default = "default_max_days")]
    pub max_days: u32,
}

fn default_max_days() -> u32 {
    30
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
        }
    }
}

/// Field-level messages, holding only the fields that are currently invalid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<BookingField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Keeps only the fields accepted by `keep`, e.g. the ones a user
    /// has already touched
    pub fn retain(&mut self, mut keep: impl FnMut(BookingField) -> bool) {
        self.0.retain(|field, _| keep(*field));
    }

    fn add(&mut self, field: BookingField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// Maps a booking to its current validation messages.
///
/// `today` decides whether the start date lies in the past.
pub fn validate_booking(state: &BookingState, rules: &ValidationRules, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if state.citizenship.is_none() {
        errors.add(BookingField::Citizenship, "Citizenship is required");
    }

    if let Some(message) = start_date_error(&state.start_date, today) {
        errors.add(BookingField::StartDate, message);
    }

    if state.number_of_days < 1 {
        errors.add(BookingField::NumberOfDays, "Number of days must be at least 1");
    } else if state.number_of_days > rules.max_days {
        errors.add(
            BookingField::NumberOfDays,
            format!("Number of days cannot exceed {}", rules.max_days),
        );
    }

    if state.destination_country.is_none() {
        errors.add(BookingField::DestinationCountry, "Destination country is required");
    }

    if state.board_type.is_none() {
        errors.add(BookingField::BoardType, "Board type is required");
    }

    if state.daily_selections.is_empty() {
        errors.add(BookingField::DailySelections, "Please configure at least one day");
    }

    errors
}

pub fn is_booking_valid(state: &BookingState, rules: &ValidationRules, today: NaiveDate) -> bool {
    validate_booking(state, rules, today).is_empty()
}

fn start_date_error(start_date: &str, today: NaiveDate) -> Option<&'static str> {
    if start_date.trim().is_empty() {
        return Some("Start date is required");
    }

    let Some((year, month, day)) = dates::canonical_parts(start_date) else {
        return Some("Invalid date format");
    };
    let Some(start) = NaiveDate::from_ymd_opt(year, month, day) else {
        return Some("Invalid date");
    };

    if start < today {
        return Some("Start date cannot be in the past");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripwise_shared::{BoardType, CitizenshipId, CountryId, DaySelection};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn complete_state() -> BookingState {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        BookingState {
            citizenship: Some(CitizenshipId(1)),
            start_date: "2025-06-01".to_string(),
            number_of_days: 1,
            number_of_guests: 1,
            destination_country: Some(CountryId(1)),
            board_type: Some(BoardType::FullBoard),
            daily_selections: vec![DaySelection::blank(1, start)],
        }
    }

    fn check(state: &BookingState) -> ValidationErrors {
        validate_booking(state, &ValidationRules::default(), today())
    }

    #[test]
    fn test_complete_booking_is_valid() {
        assert!(check(&complete_state()).is_empty());
        assert!(is_booking_valid(&complete_state(), &ValidationRules::default(), today()));
    }

    #[test]
    fn test_empty_booking_flags_every_field() {
        let errors = check(&BookingState::new());

        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get(BookingField::Citizenship), Some("Citizenship is required"));
        assert_eq!(errors.get(BookingField::StartDate), Some("Start date is required"));
        assert_eq!(errors.get(BookingField::NumberOfDays), Some("Number of days must be at least 1"));
        assert_eq!(errors.get(BookingField::DestinationCountry), Some("Destination country is required"));
        assert_eq!(errors.get(BookingField::BoardType), Some("Board type is required"));
        assert_eq!(errors.get(BookingField::DailySelections), Some("Please configure at least one day"));
    }

    #[test]
    fn test_day_count_limits() {
        let mut state = complete_state();

        state.number_of_days = 31;
        let errors = check(&state);
        assert_eq!(errors.get(BookingField::NumberOfDays), Some("Number of days cannot exceed 30"));
        assert_eq!(errors.len(), 1);

        state.number_of_days = 30;
        assert!(!check(&state).contains(BookingField::NumberOfDays));

        state.number_of_days = 0;
        assert_eq!(
            check(&state).get(BookingField::NumberOfDays),
            Some("Number of days must be at least 1")
        );
    }

    #[test]
    fn test_custom_day_limit() {
        let mut state = complete_state();
        state.number_of_days = 15;

        let rules = ValidationRules { max_days: 14 };
        let errors = validate_booking(&state, &rules, today());
        assert_eq!(errors.get(BookingField::NumberOfDays), Some("Number of days cannot exceed 14"));
    }

    #[test]
    fn test_start_date_rules() {
        let mut state = complete_state();

        state.start_date = "2025-05-19".to_string();
        assert_eq!(check(&state).get(BookingField::StartDate), Some("Start date cannot be in the past"));

        // Today is allowed
        state.start_date = "2025-05-20".to_string();
        assert!(!check(&state).contains(BookingField::StartDate));

        state.start_date = "2025-02-30".to_string();
        assert_eq!(check(&state).get(BookingField::StartDate), Some("Invalid date"));

        state.start_date = "next-tuesday".to_string();
        assert_eq!(check(&state).get(BookingField::StartDate), Some("Invalid date format"));

        state.start_date = "262142-12-31".to_string();
        assert_eq!(check(&state).get(BookingField::StartDate), Some("Invalid date format"));
    }

    #[test]
    fn test_retain_filters_untouched_fields() {
        let mut errors = check(&BookingState::new());
        errors.retain(|field| field == BookingField::StartDate);

        assert_eq!(errors.len(), 1);
        assert!(errors.contains(BookingField::StartDate));
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut state = complete_state();
        state.board_type = None;

        let json = serde_json::to_value(check(&state)).unwrap();
        assert_eq!(json, serde_json::json!({"board_type": "Board type is required"}));
    }
}
