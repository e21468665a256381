use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::utils::validation::candidate_field_errors;

/// Multipart body of `POST /candidates`, fully buffered.
#[derive(Debug, Clone, Default)]
pub struct CreateCandidateForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub resume: Option<ResumeUpload>,
}

#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub data: bytes::Bytes,
}

impl Validate for CreateCandidateForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = candidate_field_errors(&self.name, &self.email, &self.phone, &self.job_title);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteCandidateResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_validation_uses_shared_rules() {
        let form = CreateCandidateForm {
            name: "Jane Roe".into(),
            email: "jane@co.com".into(),
            phone: "9123456789".into(),
            job_title: "Engineer".into(),
            resume: None,
        };
        assert!(form.validate().is_ok());

        let bad = CreateCandidateForm {
            phone: "12345".into(),
            ..form
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
        assert_eq!(errors.field_errors().len(), 1);
    }
}
