pub mod categories;
pub mod errors;
pub mod info_pages;
pub mod search;
pub mod upload;

/// Axum handler for `GET /api/health`.
pub async fn health_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
