use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::{
    dto::candidate_dto::{DeleteCandidateResponse, UpdateStatusPayload},
    models::candidate::{Candidate, CandidateStatus},
    routes::candidate_routes,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        candidate_routes::create_candidate,
        candidate_routes::list_candidates,
        candidate_routes::update_candidate_status,
        candidate_routes::delete_candidate,
    ),
    components(schemas(Candidate, CandidateStatus, UpdateStatusPayload, DeleteCandidateResponse)),
    tags((name = "candidates", description = "Candidate referral records"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
