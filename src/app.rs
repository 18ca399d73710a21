use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::db::category_repository::CategorySource;
use crate::db::info_page_repository::InfoPageRepository;
use crate::storage::media::MediaStore;
use crate::storage::staging::{UploadStaging, MAX_UPLOAD_BYTES};

/// Room for multipart boundaries and the small text fields next to the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub info_page_repo: Arc<dyn InfoPageRepository>,
    pub category_source: Arc<dyn CategorySource>,
    pub media: Arc<MediaStore>,
    pub staging: UploadStaging,
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health_handler))
        .route(
            "/api/info-pages/{audience}",
            get(api::info_pages::list_info_pages_handler),
        )
        .route(
            "/api/info-pages/{audience}/{slug}",
            get(api::info_pages::get_info_page_handler),
        )
        .route(
            "/api/categories/active",
            get(api::categories::active_categories_handler),
        )
        .route(
            "/api/property-types",
            get(api::categories::filter_types_handler),
        )
        .route(
            "/api/partner/property-types",
            get(api::categories::partner_types_handler),
        )
        .route("/api/search/link", get(api::search::search_link_handler))
        .route(
            "/api/uploads/image",
            post(api::upload::upload_image_handler),
        )
        .route(
            "/api/uploads/document",
            post(api::upload::upload_document_handler),
        )
        .route(
            "/api/uploads/base64",
            post(api::upload::upload_base64_handler),
        )
        .route(
            "/api/media/{*public_id}",
            delete(api::upload::delete_media_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES * 2 + MULTIPART_OVERHEAD))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
