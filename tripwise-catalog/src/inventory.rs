use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tripwise_shared::{BoardType, CitizenshipId, CountryId, DestinationId, HotelId, MealId};

use crate::product::{BoardTypeInfo, Citizenship, Country, Destination, Hotel, Meal, MealMenu};

/// Read-only reference data: countries, hotels and menus per country,
/// citizenships, board types and the destination showcase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    pub countries: Vec<Country>,
    pub citizenships: Vec<Citizenship>,
    pub board_types: Vec<BoardTypeInfo>,
    #[serde(default)]
    pub hotels: BTreeMap<CountryId, Vec<Hotel>>,
    #[serde(default)]
    pub meals: BTreeMap<CountryId, MealMenu>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl Catalog {
    /// Parse a catalog from its JSON form and check it is self-consistent
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            countries = catalog.countries.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Every hotel and menu must belong to a known country
    pub fn validate(&self) -> Result<(), CatalogError> {
        let known: HashSet<CountryId> = self.countries.iter().map(|c| c.id).collect();

        for country_id in self.hotels.keys().chain(self.meals.keys()) {
            if !known.contains(country_id) {
                return Err(CatalogError::Invalid(format!(
                    "offerings listed for unknown country {}",
                    country_id
                )));
            }
        }

        let mut codes = HashSet::new();
        for citizenship in &self.citizenships {
            if !codes.insert(citizenship.code.to_ascii_uppercase()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate citizenship code {}",
                    citizenship.code
                )));
            }
        }

        Ok(())
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    pub fn citizenship(&self, id: CitizenshipId) -> Option<&Citizenship> {
        self.citizenships.iter().find(|c| c.id == id)
    }

    /// Case-insensitive match on the ISO country code
    pub fn citizenship_by_code(&self, code: &str) -> Option<&Citizenship> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.citizenships
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn board_type_name(&self, board: BoardType) -> Option<&str> {
        self.board_types
            .iter()
            .find(|b| b.code == board)
            .map(|b| b.name.as_str())
    }

    pub fn hotels_for(&self, country: CountryId) -> &[Hotel] {
        self.hotels.get(&country).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hotel(&self, country: CountryId, id: HotelId) -> Option<&Hotel> {
        self.hotels_for(country).iter().find(|h| h.id == id)
    }

    pub fn lunches_for(&self, country: CountryId) -> &[Meal] {
        self.meals
            .get(&country)
            .map(|menu| menu.lunch.as_slice())
            .unwrap_or(&[])
    }

    pub fn dinners_for(&self, country: CountryId) -> &[Meal] {
        self.meals
            .get(&country)
            .map(|menu| menu.dinner.as_slice())
            .unwrap_or(&[])
    }

    pub fn lunch(&self, country: CountryId, id: MealId) -> Option<&Meal> {
        self.lunches_for(country).iter().find(|m| m.id == id)
    }

    pub fn dinner(&self, country: CountryId, id: MealId) -> Option<&Meal> {
        self.dinners_for(country).iter().find(|m| m.id == id)
    }

    /// Built-in reference data
    pub fn builtin() -> Self {
        let turkey = CountryId(1);
        let uae = CountryId(2);
        let italy = CountryId(3);

        let hotels = BTreeMap::from([
            (
                turkey,
                vec![hotel(101, "Hilton Istanbul", 120), hotel(102, "Titanic Antalya", 90)],
            ),
            (
                uae,
                vec![
                    hotel(201, "Dubai Marina Hotel", 200),
                    hotel(202, "Palm Jumeirah Resort", 300),
                ],
            ),
            (italy, vec![hotel(301, "Rome Center Hotel", 150)]),
        ]);

        let meals = BTreeMap::from([
            (
                turkey,
                MealMenu {
                    dinner: vec![
                        meal(1, "Turkish Kebab", 15),
                        meal(2, "Istanbul Fish Plate", 18),
                        meal(3, "Traditional Meat Stew", 20),
                    ],
                    lunch: vec![
                        meal(4, "Chicken Pilaf", 10),
                        meal(5, "Lentil Soup Set", 8),
                        meal(6, "Veggie Plate", 9),
                    ],
                },
            ),
            (
                uae,
                MealMenu {
                    dinner: vec![meal(7, "Arabic Mixed Grill", 25), meal(8, "Dubai Seafood Dinner", 30)],
                    lunch: vec![meal(9, "Shawarma Plate", 12), meal(10, "Hummus & Falafel Set", 11)],
                },
            ),
            (
                italy,
                MealMenu {
                    dinner: vec![meal(11, "Pasta Carbonara", 20), meal(12, "Italian Seafood Dinner", 28)],
                    lunch: vec![meal(13, "Pizza Margherita", 12), meal(14, "Lasagna Lunch Set", 14)],
                },
            ),
        ]);

        Self {
            countries: vec![
                Country { id: turkey, name: "Turkey".to_string() },
                Country { id: uae, name: "UAE".to_string() },
                Country { id: italy, name: "Italy".to_string() },
            ],
            citizenships: vec![
                citizenship(1, "Turkey", "TR"),
                citizenship(2, "United Arab Emirates", "AE"),
                citizenship(3, "Italy", "IT"),
                citizenship(4, "Germany", "DE"),
                citizenship(5, "United Kingdom", "GB"),
                citizenship(6, "United States", "US"),
                citizenship(7, "France", "FR"),
            ],
            board_types: vec![
                board(BoardType::FullBoard, "Full Board", "Maximize2"),
                board(BoardType::HalfBoard, "Half Board", "Columns2"),
                board(BoardType::NoBoard, "No Board", "CircleOff"),
            ],
            hotels,
            meals,
            destinations: vec![
                destination(1, "Istanbul", "https://images.unsplash.com/photo-1636537511494-c3e558e0702b?w=600"),
                destination(2, "Trabzon", "https://images.unsplash.com/photo-1673521768190-7847013f1b9d?w=600"),
                destination(3, "Dubai", "https://images.unsplash.com/photo-1546412414-8035e1776c9a?w=600"),
                destination(4, "Sharjah", "https://images.unsplash.com/photo-1683471546843-3dd6eace89b5?w=600"),
                destination(5, "Rome", "https://images.unsplash.com/photo-1552832230-c0197dd311b5?w=600"),
                destination(6, "Venice", "https://images.unsplash.com/photo-1558271736-cd043ef2e855?w=600"),
            ],
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn hotel(id: u32, name: &str, price: u32) -> Hotel {
    Hotel { id: HotelId(id), name: name.to_string(), price }
}

fn meal(id: u32, name: &str, price: u32) -> Meal {
    Meal { id: MealId(id), name: name.to_string(), price }
}

fn citizenship(id: u32, name: &str, code: &str) -> Citizenship {
    Citizenship {
        id: CitizenshipId(id),
        name: name.to_string(),
        code: code.to_string(),
    }
}

fn board(code: BoardType, name: &str, icon: &str) -> BoardTypeInfo {
    BoardTypeInfo {
        code,
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn destination(id: u32, name: &str, image: &str) -> Destination {
    Destination {
        id: DestinationId(id),
        name: name.to_string(),
        image: image.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Inconsistent catalog: {0}")]
    Invalid(String),
}
