use tripwise_shared::dates;
use tripwise_shared::DaySelection;

/// Builds the blank per-day skeleton for a trip.
///
/// An unset or unparseable start date, zero days, more than `max_days`
/// days, or a trip running off the calendar yields no itinerary.
pub fn derive_selections(start_date: &str, number_of_days: u32, max_days: u32) -> Vec<DaySelection> {
    if number_of_days == 0 || number_of_days > max_days {
        return Vec::new();
    }
    let Some(start) = dates::parse_canonical(start_date) else {
        return Vec::new();
    };

    (0..number_of_days)
        .map(|offset| {
            dates::add_days(start, i64::from(offset)).map(|date| DaySelection::blank(offset + 1, date))
        })
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

/// True when `derived` differs structurally from `current`.
///
/// Only day numbers and dates are compared; hotel and meal choices are
/// ignored so that unrelated edits never wipe them.
pub fn needs_regeneration(current: &[DaySelection], derived: &[DaySelection]) -> bool {
    current.len() != derived.len()
        || current
            .iter()
            .zip(derived)
            .any(|(existing, fresh)| existing.day != fresh.day || existing.date != fresh.date)
}
