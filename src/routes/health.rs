use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const LIVENESS_MESSAGE: &str = "Candidate Referral API running";

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}

#[axum::debug_handler]
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}
