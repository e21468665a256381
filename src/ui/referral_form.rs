use std::collections::BTreeMap;
use std::time::Instant;

use crate::client::{ApiError, CandidateApi, CandidateSubmission, ResumeFile};
use crate::models::candidate::Candidate;
use crate::ui::flash::{visible, Flash, FORM_ERROR_TTL, FORM_SUCCESS_TTL};
use crate::utils::validation::{
    email_error, is_pdf_file_name, job_title_error, name_error, phone_error, RESUME_NOT_PDF,
};

pub const CANDIDATE_ADDED: &str = "Candidate added successfully!";
pub const CREATE_FAILED: &str = "Failed to add candidate. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Phone,
    JobTitle,
    Resume,
}

impl FormField {
    pub const TEXT_FIELDS: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::JobTitle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::JobTitle => "Job Title",
            FormField::Resume => "Resume (PDF)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Created; the parent should re-fetch the list.
    Created,
    Invalid,
    Failed,
    /// A submission is already in flight.
    Busy,
}

#[derive(Debug, Clone, Default)]
pub struct ReferralForm {
    name: String,
    email: String,
    phone: String,
    job_title: String,
    resume: Option<ResumeFile>,
    errors: BTreeMap<FormField, &'static str>,
    success: Option<Flash>,
    failure: Option<Flash>,
    loading: bool,
}

impl ReferralForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::JobTitle => &self.job_title,
            FormField::Resume => self
                .resume
                .as_ref()
                .map(|r| r.file_name.as_str())
                .unwrap_or_default(),
        }
    }

    /// Editing a field clears whatever error it was showing. Text fields only; the resume
    /// goes through [`choose_resume`](Self::choose_resume).
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        debug_assert_ne!(field, FormField::Resume, "use choose_resume for the resume field");
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
            FormField::JobTitle => self.job_title = value,
            FormField::Resume => return,
        }
        self.errors.remove(&field);
    }

    /// Accepts the file only if its name ends in `.pdf`; otherwise flags the picker.
    pub fn choose_resume(&mut self, file: ResumeFile) -> bool {
        if is_pdf_file_name(&file.file_name) {
            self.resume = Some(file);
            self.errors.remove(&FormField::Resume);
            true
        } else {
            self.resume = None;
            self.errors.insert(FormField::Resume, RESUME_NOT_PDF);
            false
        }
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn success_message(&self, now: Instant) -> Option<&str> {
        visible(&self.success, now)
    }

    pub fn error_message(&self, now: Instant) -> Option<&str> {
        visible(&self.failure, now)
    }

    /// Runs the shared field rules. Advisory only; the server checks again.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();
        let checks = [
            (FormField::Name, name_error(&self.name)),
            (FormField::Email, email_error(&self.email)),
            (FormField::Phone, phone_error(&self.phone)),
            (FormField::JobTitle, job_title_error(&self.job_title)),
        ];
        for (field, error) in checks {
            if let Some(error) = error {
                errors.insert(field, error);
            }
        }
        if let Some(resume) = &self.resume {
            if !is_pdf_file_name(&resume.file_name) {
                errors.insert(FormField::Resume, RESUME_NOT_PDF);
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    fn submission(&self) -> CandidateSubmission {
        CandidateSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            job_title: self.job_title.clone(),
            resume: self.resume.clone(),
        }
    }

    fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.job_title.clear();
        self.resume = None;
        self.errors.clear();
    }

    pub async fn submit<A: CandidateApi + ?Sized>(
        &mut self,
        api: &A,
        now: impl FnOnce() -> Instant,
    ) -> SubmitOutcome {
        if self.loading {
            return SubmitOutcome::Busy;
        }
        self.success = None;
        self.failure = None;

        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        self.loading = true;
        let result: Result<Candidate, ApiError> = api.create_candidate(self.submission()).await;
        self.loading = false;

        match result {
            Ok(candidate) => {
                tracing::debug!(candidate_id = %candidate.id, "referral submitted");
                self.reset_fields();
                self.success = Some(Flash::success(CANDIDATE_ADDED, now(), FORM_SUCCESS_TTL));
                SubmitOutcome::Created
            }
            Err(e) => {
                let text = if e.error.trim().is_empty() {
                    CREATE_FAILED.to_string()
                } else {
                    e.error
                };
                self.failure = Some(Flash::error(text, now(), FORM_ERROR_TTL));
                SubmitOutcome::Failed
            }
        }
    }

    pub fn render(&self, now: Instant) -> String {
        let mut lines = vec!["Add New Candidate".to_string()];
        if let Some(text) = self.success_message(now) {
            lines.push(format!("  + {}", text));
        }
        if let Some(text) = self.error_message(now) {
            lines.push(format!("  ! {}", text));
        }
        for field in FormField::TEXT_FIELDS.into_iter().chain([FormField::Resume]) {
            lines.push(format!("  {:<13} {}", format!("{}:", field.label()), self.value(field)));
            if let Some(error) = self.error(field) {
                lines.push(format!("  {:<13} ! {}", "", error));
            }
        }
        lines.join("\n")
    }
}
