use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub resume_url: String,
    pub status: CandidateStatus,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    pub fn has_resume(&self) -> bool {
        !self.resume_url.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "candidate_status")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Reviewed,
    Hired,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 3] = [
        CandidateStatus::Pending,
        CandidateStatus::Reviewed,
        CandidateStatus::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Pending => "Pending",
            CandidateStatus::Reviewed => "Reviewed",
            CandidateStatus::Hired => "Hired",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status")]
pub struct InvalidStatus;

impl FromStr for CandidateStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(InvalidStatus)
    }
}

/// Fields accepted at creation; everything else is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub resume_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_exact() {
        assert_eq!("Hired".parse::<CandidateStatus>(), Ok(CandidateStatus::Hired));
        assert_eq!("Reviewed".parse::<CandidateStatus>(), Ok(CandidateStatus::Reviewed));
        assert!("hired".parse::<CandidateStatus>().is_err());
        assert!("Rejected".parse::<CandidateStatus>().is_err());
        assert!("".parse::<CandidateStatus>().is_err());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let candidate = Candidate {
            id: Uuid::nil(),
            name: "Jane Roe".into(),
            email: "jane@co.com".into(),
            phone: "9123456789".into(),
            job_title: "Engineer".into(),
            resume_url: String::new(),
            status: CandidateStatus::default(),
            created_at: DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["jobTitle"], "Engineer");
        assert_eq!(value["resumeUrl"], "");
        assert_eq!(value["status"], "Pending");
        assert_eq!(value["createdAt"], "2026-01-02T03:04:05Z");
        assert!(value.get("job_title").is_none());
    }
}
