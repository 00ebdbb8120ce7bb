use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tripwise_shared::dates;
use tripwise_shared::{BookingState, CountryId, DaySelection};

use crate::inventory::Catalog;
use crate::product::priced_label;

/// Shown when a day has nothing (resolvable) selected
pub const PLACEHOLDER: &str = "—";

/// Price of a single itinerary day, per guest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPrice {
    pub day: u32,
    pub date: NaiveDate,
    /// e.g. `Sun, Jun 1, 2025`
    pub date_label: String,
    pub hotel_price: u32,
    pub lunch_price: u32,
    pub dinner_price: u32,
    pub day_total: u64,
    pub hotel_label: String,
    pub lunch_label: String,
    pub dinner_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceSummary {
    pub days: Vec<DayPrice>,
    pub subtotal_per_guest: u64,
    /// Effective multiplier, never below 1
    pub guests: u32,
    pub total: u64,
}

/// Turns sparse day selections into a price breakdown.
///
/// Unknown or missing references price at 0; pricing never fails.
pub struct PricingEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> PricingEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn price_day(&self, country: Option<CountryId>, selection: &DaySelection) -> DayPrice {
        let hotel = country
            .zip(selection.hotel_id)
            .and_then(|(country, id)| self.catalog.hotel(country, id));
        let lunch = country
            .zip(selection.lunch_id)
            .and_then(|(country, id)| self.catalog.lunch(country, id));
        let dinner = country
            .zip(selection.dinner_id)
            .and_then(|(country, id)| self.catalog.dinner(country, id));

        let hotel_price = hotel.map_or(0, |h| h.price);
        let lunch_price = lunch.map_or(0, |m| m.price);
        let dinner_price = dinner.map_or(0, |m| m.price);

        DayPrice {
            day: selection.day,
            date: selection.date,
            date_label: dates::long_display(selection.date),
            hotel_price,
            lunch_price,
            dinner_price,
            day_total: u64::from(hotel_price) + u64::from(lunch_price) + u64::from(dinner_price),
            hotel_label: label(hotel.map(|h| (h.name.as_str(), h.price))),
            lunch_label: label(lunch.map(|m| (m.name.as_str(), m.price))),
            dinner_label: label(dinner.map(|m| (m.name.as_str(), m.price))),
        }
    }

    pub fn summarize(&self, state: &BookingState) -> PriceSummary {
        let days: Vec<DayPrice> = state
            .daily_selections
            .iter()
            .map(|selection| self.price_day(state.destination_country, selection))
            .collect();

        let subtotal_per_guest: u64 = days.iter().map(|d| d.day_total).sum();
        let guests = state.number_of_guests.max(1);

        PriceSummary {
            days,
            subtotal_per_guest,
            guests,
            total: subtotal_per_guest * u64::from(guests),
        }
    }
}

fn label(item: Option<(&str, u32)>) -> String {
    match item {
        Some((name, price)) => priced_label(name, price),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripwise_shared::{HotelId, MealId};

    fn day(day: u32) -> DaySelection {
        let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        DaySelection::blank(day, date)
    }

    fn turkey_state(guests: u32, selections: Vec<DaySelection>) -> BookingState {
        BookingState {
            destination_country: Some(CountryId(1)),
            number_of_guests: guests,
            number_of_days: selections.len() as u32,
            daily_selections: selections,
            ..BookingState::new()
        }
    }

    #[test]
    fn test_day_total_with_partial_selection() {
        let catalog = Catalog::builtin();
        let engine = PricingEngine::new(&catalog);

        let mut first = day(1);
        first.hotel_id = Some(HotelId(101)); // 120
        first.lunch_id = Some(MealId(4)); // 10

        let summary = engine.summarize(&turkey_state(2, vec![first]));

        assert_eq!(summary.days[0].day_total, 130);
        assert_eq!(summary.days[0].dinner_price, 0);
        assert_eq!(summary.days[0].dinner_label, PLACEHOLDER);
        assert_eq!(summary.days[0].hotel_label, "Hilton Istanbul ($120)");
        assert_eq!(summary.days[0].date_label, "Sun, Jun 1, 2025");
        assert_eq!(summary.subtotal_per_guest, 130);
        assert_eq!(summary.total, 260);
    }

    #[test]
    fn test_sums_across_days() {
        let catalog = Catalog::builtin();
        let engine = PricingEngine::new(&catalog);

        let mut first = day(1);
        first.hotel_id = Some(HotelId(102)); // 90
        first.dinner_id = Some(MealId(3)); // 20
        let mut second = day(2);
        second.hotel_id = Some(HotelId(101)); // 120
        second.lunch_id = Some(MealId(5)); // 8
        second.dinner_id = Some(MealId(1)); // 15

        let summary = engine.summarize(&turkey_state(1, vec![first, second, day(3)]));

        let totals: Vec<u64> = summary.days.iter().map(|d| d.day_total).collect();
        assert_eq!(totals, vec![110, 143, 0]);
        assert_eq!(summary.subtotal_per_guest, 253);
        assert_eq!(summary.total, 253);
    }

    #[test]
    fn test_zero_guests_counts_as_one() {
        let catalog = Catalog::builtin();
        let engine = PricingEngine::new(&catalog);

        let mut first = day(1);
        first.hotel_id = Some(HotelId(101));

        let summary = engine.summarize(&turkey_state(0, vec![first]));
        assert_eq!(summary.guests, 1);
        assert_eq!(summary.total, 120);
    }

    #[test]
    fn test_stale_references_price_at_zero() {
        let catalog = Catalog::builtin();
        let engine = PricingEngine::new(&catalog);

        // Chosen in Turkey, then the destination switched to Italy
        let mut first = day(1);
        first.hotel_id = Some(HotelId(101));
        first.lunch_id = Some(MealId(4));
        let mut state = turkey_state(1, vec![first]);
        state.destination_country = Some(CountryId(3));

        let summary = engine.summarize(&state);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.days[0].hotel_label, PLACEHOLDER);
    }

    #[test]
    fn test_no_destination_prices_nothing() {
        let catalog = Catalog::builtin();
        let engine = PricingEngine::new(&catalog);

        let mut first = day(1);
        first.hotel_id = Some(HotelId(101));
        let mut state = turkey_state(1, vec![first]);
        state.destination_country = None;

        assert_eq!(engine.summarize(&state).total, 0);
    }

    #[test]
    fn test_lunch_id_is_not_resolved_as_dinner() {
        let catalog = Catalog::builtin();
        let engine = PricingEngine::new(&catalog);

        let mut first = day(1);
        first.dinner_id = Some(MealId(4)); // a lunch id

        let price = engine.price_day(Some(CountryId(1)), &first);
        assert_eq!(price.dinner_price, 0);
    }
}
