use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::candidate_dto::CreateCandidateForm;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus, NewCandidate};
use crate::services::candidate_store::CandidateStore;
use crate::services::upload_service::UploadService;

pub const CANDIDATE_NOT_FOUND: &str = "Candidate not found";
pub const INVALID_STATUS: &str = "Invalid status";

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn CandidateStore>,
    uploads: UploadService,
}

impl CandidateService {
    pub fn new(store: Arc<dyn CandidateStore>, uploads: UploadService) -> Self {
        Self { store, uploads }
    }

    /// Validates, stores the resume if one was sent, then inserts the record.
    pub async fn create_candidate(&self, form: CreateCandidateForm) -> Result<Candidate> {
        form.validate()?;

        let resume_url = match &form.resume {
            Some(resume) => {
                self.uploads
                    .save_resume(&resume.file_name, &resume.data)
                    .await?
            }
            None => String::new(),
        };

        let inserted = self
            .store
            .insert(NewCandidate {
                name: form.name,
                email: form.email,
                phone: form.phone,
                job_title: form.job_title,
                resume_url: resume_url.clone(),
            })
            .await;

        match inserted {
            Ok(candidate) => Ok(candidate),
            Err(e) => {
                if !resume_url.is_empty() {
                    self.uploads.remove_resume(&resume_url).await;
                }
                Err(e.into())
            }
        }
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self.store.list_all().await?)
    }

    /// The status is checked before the store is consulted.
    pub async fn update_status(&self, id: &str, status: Option<&str>) -> Result<Candidate> {
        let status: CandidateStatus = status
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::BadRequest(INVALID_STATUS.to_string()))?;

        let Some(id) = parse_id(id) else {
            return Err(not_found());
        };
        self.store
            .update_status(id, status)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete_candidate(&self, id: &str) -> Result<Candidate> {
        let Some(id) = parse_id(id) else {
            return Err(not_found());
        };
        self.store.delete_by_id(id).await?.ok_or_else(not_found)
    }
}

// A malformed id cannot name a record.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn not_found() -> Error {
    Error::NotFound(CANDIDATE_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::candidate_dto::ResumeUpload;
    use crate::services::candidate_store::MockCandidateStore;

    fn valid_form() -> CreateCandidateForm {
        CreateCandidateForm {
            name: "Jane Roe".into(),
            email: "jane@co.com".into(),
            phone: "9123456789".into(),
            job_title: "Engineer".into(),
            resume: None,
        }
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_store() {
        let mut store = MockCandidateStore::new();
        store.expect_insert().never();
        let dir = tempfile::tempdir().unwrap();
        let service = CandidateService::new(Arc::new(store), UploadService::new(dir.path()));

        let form = CreateCandidateForm {
            email: "not-an-email".into(),
            resume: Some(ResumeUpload {
                file_name: "cv.pdf".into(),
                data: bytes::Bytes::from_static(b"%PDF"),
            }),
            ..valid_form()
        };
        let err = service.create_candidate(form).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn failed_insert_removes_the_stored_resume() {
        let mut store = MockCandidateStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection reset")));
        let dir = tempfile::tempdir().unwrap();
        let service = CandidateService::new(Arc::new(store), UploadService::new(dir.path()));

        let form = CreateCandidateForm {
            resume: Some(ResumeUpload {
                file_name: "cv.pdf".into(),
                data: bytes::Bytes::from_static(b"%PDF"),
            }),
            ..valid_form()
        };
        let err = service.create_candidate(form).await.unwrap_err();

        assert!(matches!(err, Error::Anyhow(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn invalid_status_is_rejected_before_lookup() {
        let mut store = MockCandidateStore::new();
        store.expect_update_status().never();
        let service = CandidateService::new(Arc::new(store), UploadService::new("unused"));

        for status in [None, Some("Rejected"), Some("hired")] {
            let err = service
                .update_status(&Uuid::new_v4().to_string(), status)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::BadRequest(ref msg) if msg == INVALID_STATUS));
        }
    }

    #[tokio::test]
    async fn malformed_ids_are_not_found() {
        let mut store = MockCandidateStore::new();
        store.expect_delete_by_id().never();
        store.expect_update_status().never();
        let service = CandidateService::new(Arc::new(store), UploadService::new("unused"));

        assert!(matches!(
            service.delete_candidate("42").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            service.update_status("42", Some("Hired")).await,
            Err(Error::NotFound(_))
        ));
    }
}
