//! Match engine: scores every job against one résumé, ranks them, and
//! summarizes the batch.
//!
//! Per-job scoring is independent and fans out over rayon; ranking and stats
//! fan back in on the calling thread.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::extractor::{extract_from_normalized, normalize};
use crate::matching::scorer::{
    calculate_weighted_match, composite_score, location_score_normalized, title_match_normalized,
    MatchThresholds, MatchWeights,
};
use crate::matching::taxonomy::SkillTaxonomy;
use crate::models::job::JobPosting;

/// Scoring weights and summary thresholds for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    pub thresholds: MatchThresholds,
}

/// Score and attribution for one (job, résumé) pair, plus the job fields the
/// UI needs to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub job_id: Option<Uuid>,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "matchScore")]
    pub score: u32,
    pub skill_score: u32,
    pub title_match: u32,
    pub location_score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub url: String,
    pub salary: Option<String>,
    pub benefits: Vec<String>,
    pub is_remote: bool,
    pub date_posted: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub average_score: u32,
    /// Jobs whose skill score reached the skill-match threshold.
    pub skill_matches: usize,
    /// Jobs whose composite score reached the high-match threshold.
    pub high_matches: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub resume_id: Option<Uuid>,
    pub total_jobs: usize,
    pub resume_skills: Vec<String>,
    /// Sorted by score, highest first; equal scores keep input order.
    pub matches: Vec<JobMatch>,
    pub stats: MatchStats,
}

/// Scores `jobs` against `resume_text` and ranks them.
pub fn match_jobs_with_resume(
    resume_text: &str,
    jobs: &[JobPosting],
    taxonomy: &SkillTaxonomy,
    config: &MatchConfig,
) -> MatchReport {
    debug_assert!(
        (config.weights.sum() - 1.0).abs() < 1e-6,
        "match weights must sum to 1, got {}",
        config.weights.sum()
    );

    let normalized_resume = normalize(resume_text);
    let resume_skills = extract_from_normalized(&normalized_resume, taxonomy).skills;

    let mut matches: Vec<JobMatch> = jobs
        .par_iter()
        .map(|job| score_job(job, &normalized_resume, &resume_skills, taxonomy, &config.weights))
        .collect();

    // slice::sort_by is stable
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    let stats = compute_stats(&matches, &config.thresholds);

    MatchReport {
        resume_id: None,
        total_jobs: jobs.len(),
        resume_skills,
        matches,
        stats,
    }
}

fn score_job(
    job: &JobPosting,
    normalized_resume: &str,
    resume_skills: &[String],
    taxonomy: &SkillTaxonomy,
    weights: &MatchWeights,
) -> JobMatch {
    let job_skills = extract_from_normalized(&normalize(&job.description), taxonomy).skills;
    let skills = calculate_weighted_match(&job_skills, resume_skills, taxonomy);
    let title_match = title_match_normalized(&normalize(&job.title), normalized_resume);
    let location_score = location_score_normalized(&normalize(&job.location), normalized_resume);
    let score = composite_score(skills.score, title_match, location_score, weights);

    JobMatch {
        job_id: job.id,
        title: job.title.clone(),
        company: job.company.clone(),
        location: job.location.clone(),
        score,
        skill_score: skills.score,
        title_match,
        location_score,
        matching_skills: skills.matches,
        missing_skills: skills.missing,
        url: job.url.clone(),
        salary: job.salary.clone(),
        benefits: job.benefits.clone(),
        is_remote: job.is_remote,
        date_posted: job.date_posted,
    }
}

/// Batch summary. An empty batch averages to 0.
pub fn compute_stats(matches: &[JobMatch], thresholds: &MatchThresholds) -> MatchStats {
    if matches.is_empty() {
        return MatchStats::default();
    }

    let total: u64 = matches.iter().map(|m| m.score as u64).sum();
    let average_score = (total as f64 / matches.len() as f64).round() as u32;

    MatchStats {
        average_score,
        skill_matches: matches
            .iter()
            .filter(|m| m.skill_score >= thresholds.skill_match)
            .count(),
        high_matches: matches
            .iter()
            .filter(|m| m.score >= thresholds.high_match)
            .count(),
    }
}
