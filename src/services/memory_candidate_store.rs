use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::candidate::{Candidate, CandidateStatus, NewCandidate};
use crate::services::candidate_store::CandidateStore;
use crate::utils::time::now;

/// In-process store used when no database is configured. Records live in insertion order.
#[derive(Default)]
pub struct MemoryCandidateStore {
    records: RwLock<Vec<Candidate>>,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate> {
        let record = Candidate {
            id: Uuid::new_v4(),
            name: candidate.name,
            email: candidate.email,
            phone: candidate.phone,
            job_title: candidate.job_title,
            resume_url: candidate.resume_url,
            status: CandidateStatus::Pending,
            created_at: now(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> = self.records.read().await.iter().rev().cloned().collect();
        // stable: equal timestamps stay newest-inserted first
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(candidates)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|c| c.id == id).cloned())
    }

    async fn update_status(&self, id: Uuid, status: CandidateStatus) -> Result<Option<Candidate>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|c| c.id == id).map(|candidate| {
            candidate.status = status;
            candidate.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Candidate>> {
        let mut records = self.records.write().await;
        let position = records.iter().position(|c| c.id == id);
        Ok(position.map(|index| records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_candidate(name: &str) -> NewCandidate {
        NewCandidate {
            name: name.to_string(),
            email: format!("{}@co.com", name.to_lowercase()),
            phone: "9123456789".to_string(),
            job_title: "Engineer".to_string(),
            resume_url: String::new(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_identity_and_pending_status() {
        let store = MemoryCandidateStore::new();
        let a = store.insert(new_candidate("Amy")).await.unwrap();
        let b = store.insert(new_candidate("Bob")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.status, CandidateStatus::Pending);
        assert_eq!(store.find_by_id(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryCandidateStore::new();
        for name in ["Amy", "Bob", "Cat"] {
            store.insert(new_candidate(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Cat", "Bob", "Amy"]);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() {
        let store = MemoryCandidateStore::new();
        let amy = store.insert(new_candidate("Amy")).await.unwrap();

        let updated = store
            .update_status(amy.id, CandidateStatus::Reviewed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, CandidateStatus::Reviewed);
        assert_eq!(updated.created_at, amy.created_at);

        assert!(store
            .update_status(Uuid::new_v4(), CandidateStatus::Hired)
            .await
            .unwrap()
            .is_none());

        assert_eq!(store.delete_by_id(amy.id).await.unwrap().map(|c| c.id), Some(amy.id));
        assert!(store.delete_by_id(amy.id).await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
