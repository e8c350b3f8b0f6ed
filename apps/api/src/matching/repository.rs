//! Storage seam for the matching run: résumé lookup, active job listing, and
//! score write-back.
//!
//! Carried in `AppState` as `Arc<dyn MatchRepository>`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::JobMatch;
use crate::models::job::{JobRow, ACTIVE_JOB_STATUSES};
use crate::models::resume::ResumeRow;

#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn find_resume(&self, resume_id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    /// Jobs in an active status, newest posting first.
    async fn active_jobs(&self) -> Result<Vec<JobRow>, AppError>;

    /// Writes score, matched keywords and missing skills back to each job.
    /// Matches without a `job_id` are skipped.
    async fn store_match_results(&self, matches: &[JobMatch]) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    async fn find_resume(&self, resume_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        let resume = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(resume_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(resume)
    }

    async fn active_jobs(&self) -> Result<Vec<JobRow>, AppError> {
        let statuses: Vec<String> = ACTIVE_JOB_STATUSES.iter().map(|s| s.to_string()).collect();
        let jobs = sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs WHERE status = ANY($1) ORDER BY date_posted DESC, id",
        )
        .bind(&statuses)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn store_match_results(&self, matches: &[JobMatch]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let mut updated = 0usize;

        for m in matches {
            let Some(job_id) = m.job_id else {
                continue;
            };
            sqlx::query(
                r#"
                UPDATE jobs
                SET match_score = $1,
                    matched_keywords = $2,
                    missing_skills = $3,
                    last_updated = NOW()
                WHERE id = $4
                "#,
            )
            .bind(m.score as i32)
            .bind(&m.matching_skills)
            .bind(&m.missing_skills)
            .bind(job_id)
            .execute(&mut *tx)
            .await?;
            updated += 1;
        }

        tx.commit().await?;
        info!("Stored match scores for {updated} jobs");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use chrono::{Duration, Utc};
    use serde_json::Value;

    use super::*;

    #[derive(Default)]
    pub struct MemoryMatchRepository {
        pub resumes: Mutex<Vec<ResumeRow>>,
        pub jobs: Mutex<Vec<JobRow>>,
        pub store_calls: Mutex<usize>,
    }

    impl MemoryMatchRepository {
        pub fn add_resume(&self, name: &str, data: Value) -> Uuid {
            let now = Utc::now();
            let id = Uuid::new_v4();
            self.resumes.lock().unwrap().push(ResumeRow {
                id,
                name: name.to_string(),
                data,
                created_at: now,
                updated_at: now,
            });
            id
        }

        /// Adds a job posted `age_days` ago.
        pub fn add_job(
            &self,
            title: &str,
            location: &str,
            description: &str,
            status: &str,
            age_days: i64,
        ) -> Uuid {
            let now = Utc::now();
            let id = Uuid::new_v4();
            self.jobs.lock().unwrap().push(JobRow {
                id,
                external_id: None,
                title: title.to_string(),
                company: "Acme".to_string(),
                location: location.to_string(),
                description: Some(description.to_string()),
                url: format!("https://www.linkedin.com/jobs/view/{id}"),
                date_posted: now - Duration::days(age_days),
                source: "linkedin".to_string(),
                status: status.to_string(),
                salary: None,
                benefits: vec![],
                is_remote: location.to_lowercase().contains("remote"),
                match_score: 0,
                matched_keywords: vec![],
                missing_skills: vec![],
                last_updated: now,
                created_at: now,
            });
            id
        }

        pub fn job(&self, id: Uuid) -> Option<JobRow> {
            self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned()
        }
    }

    #[async_trait]
    impl MatchRepository for MemoryMatchRepository {
        async fn find_resume(&self, resume_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
            Ok(self
                .resumes
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == resume_id)
                .cloned())
        }

        async fn active_jobs(&self) -> Result<Vec<JobRow>, AppError> {
            let mut jobs: Vec<JobRow> = self
                .jobs
                .lock()
                .unwrap()
                .iter()
                .filter(|j| ACTIVE_JOB_STATUSES.contains(&j.status.as_str()))
                .cloned()
                .collect();
            jobs.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));
            Ok(jobs)
        }

        async fn store_match_results(&self, matches: &[JobMatch]) -> Result<(), AppError> {
            *self.store_calls.lock().unwrap() += 1;
            let mut jobs = self.jobs.lock().unwrap();
            for m in matches {
                if let Some(job) = jobs.iter_mut().find(|j| Some(j.id) == m.job_id) {
                    job.match_score = m.score as i32;
                    job.matched_keywords = m.matching_skills.clone();
                    job.missing_skills = m.missing_skills.clone();
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_memory_active_jobs_filters_and_orders() {
        let repo = MemoryMatchRepository::default();
        let old = repo.add_job("Old", "Remote", "", "new", 10);
        let fresh = repo.add_job("Fresh", "Remote", "", "interview", 1);
        repo.add_job("Rejected", "Remote", "", "rejected", 0);
        repo.add_job("Skipped", "Remote", "", "not_applied", 0);

        let ids: Vec<Uuid> = repo.active_jobs().await.unwrap().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![fresh, old]);
    }
}
