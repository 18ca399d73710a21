use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::db::models::RemoteCategory;
use crate::error::AppError;
use crate::models::category::{filter_types, partner_property_types, FilterType, PartnerPropertyType};

/// Axum handler for `GET /api/categories/active`.
pub async fn active_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RemoteCategory>>, AppError> {
    Ok(Json(state.category_source.active_categories().await?))
}

/// Axum handler for `GET /api/property-types`.
///
/// Never fails: if the categories cannot be loaded the built-in list is served.
pub async fn filter_types_handler(State(state): State<AppState>) -> Json<Vec<FilterType>> {
    Json(filter_types(state.category_source.active_categories().await))
}

/// Axum handler for `GET /api/partner/property-types`.
pub async fn partner_types_handler(
    State(state): State<AppState>,
) -> Json<Vec<PartnerPropertyType>> {
    Json(partner_property_types(
        state.category_source.active_categories().await,
    ))
}
