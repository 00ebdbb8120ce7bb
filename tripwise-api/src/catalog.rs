use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tripwise_catalog::{BoardTypeInfo, Citizenship, Country, Destination, Hotel, Meal};
use tripwise_shared::CountryId;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/catalog", get(get_catalog))
        .route("/v1/catalog/countries/{id}", get(get_country))
}

/// Option lists for the booking form
#[derive(Debug, Serialize)]
pub struct CatalogOverview {
    pub countries: Vec<Country>,
    pub citizenships: Vec<Citizenship>,
    pub board_types: Vec<BoardTypeInfo>,
    pub destinations: Vec<Destination>,
}

/// What can be booked inside one destination country
#[derive(Debug, Serialize)]
pub struct CountryOfferings {
    pub country: Country,
    pub hotels: Vec<Hotel>,
    pub lunch: Vec<Meal>,
    pub dinner: Vec<Meal>,
}

async fn get_catalog(State(state): State<AppState>) -> Json<CatalogOverview> {
    let catalog = &state.catalog;
    Json(CatalogOverview {
        countries: catalog.countries.clone(),
        citizenships: catalog.citizenships.clone(),
        board_types: catalog.board_types.clone(),
        destinations: catalog.destinations.clone(),
    })
}

async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<CountryOfferings>, AppError> {
    let id = CountryId(id);
    let catalog = &state.catalog;
    let country = catalog
        .country(id)
        .ok_or_else(|| AppError::NotFoundError(format!("Country {} not found", id)))?;

    Ok(Json(CountryOfferings {
        country: country.clone(),
        hotels: catalog.hotels_for(id).to_vec(),
        lunch: catalog.lunches_for(id).to_vec(),
        dinner: catalog.dinners_for(id).to_vec(),
    }))
}
