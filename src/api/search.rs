use axum::extract::RawQuery;
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::models::search::SearchParams;

/// Response for `GET /api/search/link`.
#[derive(Debug, Serialize)]
pub struct SearchLinkResponse {
    /// Canonical navigation target for the search results view.
    pub path: String,
    pub params: SearchParams,
}

/// Axum handler for `GET /api/search/link`.
///
/// Parses the search form's query string, fills defaults, validates the
/// occupancy and dates, and returns the canonical `/search?...` path.
pub async fn search_link_handler(
    RawQuery(query): RawQuery,
) -> Result<Json<SearchLinkResponse>, AppError> {
    let today = chrono::Local::now().date_naive();
    let params = SearchParams::from_query_str(query.as_deref().unwrap_or(""), today)?;
    params.validate(today)?;

    Ok(Json(SearchLinkResponse {
        path: params.search_path(),
        params,
    }))
}
