use async_trait::async_trait;
use uuid::Uuid;

use crate::models::candidate::{Candidate, CandidateStatus, NewCandidate};

/// Persistence seam for candidate records.
///
/// Every operation touches at most one record. `None` means no record carries the id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Stores a new record with a fresh id, the current time and `Pending` status.
    async fn insert(&self, candidate: NewCandidate) -> anyhow::Result<Candidate>;

    /// All records, newest first.
    async fn list_all(&self) -> anyhow::Result<Vec<Candidate>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Candidate>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: CandidateStatus,
    ) -> anyhow::Result<Option<Candidate>>;

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<Option<Candidate>>;
}
