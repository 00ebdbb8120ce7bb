use serde::{Deserialize, Serialize};
use tripwise_shared::{BoardType, CitizenshipId, CountryId, DestinationId, HotelId, MealId};

/// Destination country
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citizenship {
    pub id: CitizenshipId,
    pub name: String,
    /// ISO 3166-1 alpha-2
    pub code: String,
}

/// Nightly hotel offering, price per guest in whole currency units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub price: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub price: u32,
}

/// Lunch and dinner options offered in one country
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealMenu {
    #[serde(default)]
    pub lunch: Vec<Meal>,
    #[serde(default)]
    pub dinner: Vec<Meal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardTypeInfo {
    pub code: BoardType,
    pub name: String,
    /// Icon identifier for presentation
    pub icon: String,
}

/// Popular-destination showcase entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub image: String,
}

/// Label shown next to a selected item, e.g. `Hilton Istanbul ($120)`
pub(crate) fn priced_label(name: &str, price: u32) -> String {
    format!("{} (${})", name, price)
}
