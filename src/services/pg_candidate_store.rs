use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::candidate::{Candidate, CandidateStatus, NewCandidate};
use crate::services::candidate_store::CandidateStore;

#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (id, name, email, phone, job_title, resume_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, phone, job_title, resume_url, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(candidate.name)
        .bind(candidate.email)
        .bind(candidate.phone)
        .bind(candidate.job_title)
        .bind(candidate.resume_url)
        .bind(CandidateStatus::Pending)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn list_all(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT id, name, email, phone, job_title, resume_url, status, created_at
            FROM candidates
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT id, name, email, phone, job_title, resume_url, status, created_at
            FROM candidates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn update_status(&self, id: Uuid, status: CandidateStatus) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET status = $1
            WHERE id = $2
            RETURNING id, name, email, phone, job_title, resume_url, status, created_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            DELETE FROM candidates
            WHERE id = $1
            RETURNING id, name, email, phone, job_title, resume_url, status, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }
}
