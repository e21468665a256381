use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::candidate_dto::{
        CreateCandidateForm, DeleteCandidateResponse, ResumeUpload, UpdateStatusPayload,
    },
    error::{Error, Result},
    models::candidate::Candidate,
    services::candidate_service::INVALID_STATUS,
    AppState,
};

/// Name of the single file field accepted on create.
pub const RESUME_FIELD: &str = "resume";
pub const DELETED_MESSAGE: &str = "Candidate deleted successfully";

#[utoipa::path(
    post,
    path = "/candidates",
    responses(
        (status = 201, description = "Candidate created", body = Candidate),
        (status = 400, description = "Invalid name, email, phone or job title"),
        (status = 500, description = "Server error")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart.map_err(|e| Error::BadRequest(e.body_text()))?;
    let form = read_create_form(&mut multipart).await?;

    let candidate = state.candidate_service.create_candidate(form).await?;
    tracing::info!(candidate_id = %candidate.id, resume = candidate.has_resume(), "candidate created");

    Ok((StatusCode::CREATED, Json(candidate)))
}

async fn read_create_form(multipart: &mut Multipart) -> Result<CreateCandidateForm> {
    let mut form = CreateCandidateForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => form.name = field.text().await?,
            "email" => form.email = field.text().await?,
            "phone" => form.phone = field.text().await?,
            "jobTitle" => form.job_title = field.text().await?,
            RESUME_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;

                // browsers send an empty part when no file was picked
                if data.is_empty() {
                    continue;
                }
                if form.resume.is_some() {
                    return Err(Error::BadRequest(
                        "Only one resume file may be uploaded".into(),
                    ));
                }
                form.resume = Some(ResumeUpload { file_name, data });
            }
            _ => {}
        }
    }

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/candidates",
    responses(
        (status = 200, description = "All candidates, newest first", body = [Candidate]),
        (status = 500, description = "Server error")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list_candidates().await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    put,
    path = "/candidates/{id}/status",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Candidate),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Candidate not found"),
        (status = 500, description = "Server error")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateStatusPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected status body: {}", e.body_text());
        Error::BadRequest(INVALID_STATUS.to_string())
    })?;

    let candidate = state
        .candidate_service
        .update_status(&id, payload.status.as_deref())
        .await?;
    tracing::info!(candidate_id = %candidate.id, status = %candidate.status, "candidate status updated");

    Ok(Json(candidate))
}

#[utoipa::path(
    delete,
    path = "/candidates/{id}",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate deleted", body = DeleteCandidateResponse),
        (status = 404, description = "Candidate not found"),
        (status = 500, description = "Server error")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.delete_candidate(&id).await?;
    tracing::info!(candidate_id = %candidate.id, "candidate deleted");

    Ok(Json(DeleteCandidateResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
