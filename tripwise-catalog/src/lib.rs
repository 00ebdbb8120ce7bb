pub mod product;
pub mod inventory;
pub mod pricing;

pub use product::{BoardTypeInfo, Citizenship, Country, Destination, Hotel, Meal, MealMenu};
pub use inventory::{Catalog, CatalogError};
pub use pricing::{DayPrice, PriceSummary, PricingEngine};
