use axum::extract::{Path, State};
use axum::Json;

use crate::app::AppState;
use crate::db::models::{Audience, InfoPage};
use crate::error::AppError;

fn parse_audience(raw: &str) -> Result<Audience, AppError> {
    Audience::from_str_ci(raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid audience '{}'. Expected: user, partner",
            raw
        ))
    })
}

/// Axum handler for `GET /api/info-pages/{audience}`.
pub async fn list_info_pages_handler(
    State(state): State<AppState>,
    Path(audience): Path<String>,
) -> Result<Json<Vec<InfoPage>>, AppError> {
    let audience = parse_audience(&audience)?;
    Ok(Json(state.info_page_repo.list(audience).await?))
}

/// Axum handler for `GET /api/info-pages/{audience}/{slug}`.
pub async fn get_info_page_handler(
    State(state): State<AppState>,
    Path((audience, slug)): Path<(String, String)>,
) -> Result<Json<InfoPage>, AppError> {
    let audience = parse_audience(&audience)?;

    state
        .info_page_repo
        .find(audience, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No {} page '{}'", audience, slug)))
}
