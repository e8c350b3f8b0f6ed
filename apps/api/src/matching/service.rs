//! Stored-résumé matching run: load résumé and active jobs, score, persist.

use std::sync::Arc;

use anyhow::anyhow;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::{match_jobs_with_resume, MatchConfig, MatchReport};
use crate::matching::repository::MatchRepository;
use crate::matching::taxonomy::SkillTaxonomy;
use crate::models::job::JobPosting;

/// Matches the stored résumé `resume_id` against every active job and writes
/// the scores back to the jobs.
///
/// A missing résumé fails with `NotFound` before any job is read or scored.
pub async fn match_stored_resume(
    repo: &dyn MatchRepository,
    taxonomy: Arc<SkillTaxonomy>,
    config: MatchConfig,
    resume_id: Uuid,
) -> Result<MatchReport, AppError> {
    info!(%resume_id, "Starting job matching run");

    let resume = repo.find_resume(resume_id).await?.ok_or_else(|| {
        warn!(%resume_id, "Resume not found");
        AppError::NotFound(format!("Resume {resume_id} not found"))
    })?;

    let jobs: Vec<JobPosting> = repo
        .active_jobs()
        .await?
        .into_iter()
        .map(JobPosting::from)
        .collect();
    info!("Found {} active jobs to match", jobs.len());

    let resume_text = resume.text();
    let mut report = run_matching(resume_text, jobs, taxonomy, config).await?;
    report.resume_id = Some(resume_id);

    info!(
        skill_count = report.resume_skills.len(),
        skills = ?report.resume_skills,
        "Extracted weighted skills from resume"
    );

    repo.store_match_results(&report.matches).await?;

    info!(
        total_jobs = report.total_jobs,
        top_match = report.matches.first().map(|m| m.score).unwrap_or(0),
        average = report.stats.average_score,
        "Job matching completed"
    );

    Ok(report)
}

/// Runs the CPU-bound engine off the async worker threads.
pub async fn run_matching(
    resume_text: String,
    jobs: Vec<JobPosting>,
    taxonomy: Arc<SkillTaxonomy>,
    config: MatchConfig,
) -> Result<MatchReport, AppError> {
    tokio::task::spawn_blocking(move || {
        match_jobs_with_resume(&resume_text, &jobs, &taxonomy, &config)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("matching task failed: {e}")))
}
