pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod ui;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::services::{
    candidate_service::CandidateService, candidate_store::CandidateStore,
    upload_service::{UploadService, UPLOADS_URL_PREFIX},
};

#[derive(Clone)]
pub struct AppState {
    pub candidate_service: CandidateService,
    pub upload_service: UploadService,
}

impl AppState {
    pub fn new(store: Arc<dyn CandidateStore>, upload_service: UploadService) -> Self {
        let candidate_service = CandidateService::new(store, upload_service.clone());

        Self {
            candidate_service,
            upload_service,
        }
    }
}

/// Every route the API serves, with CORS, tracing and the upload size limit applied.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.upload_service.dir());

    Router::new()
        .route("/", get(routes::health::liveness))
        .route("/health", get(routes::health::health))
        .route("/openapi.json", get(routes::openapi::openapi_json))
        .route(
            "/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/candidates/:id/status",
            put(routes::candidate_routes::update_candidate_status),
        )
        .route(
            "/candidates/:id",
            axum::routing::delete(routes::candidate_routes::delete_candidate),
        )
        .nest_service(&format!("/{}", UPLOADS_URL_PREFIX), uploads)
        .with_state(state)
        .layer(middleware::cors::any_origin_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
