//! Match scoring: skill overlap, title similarity and location similarity,
//! combined into one 0–100 percentage per (job, résumé) pair.
//!
//! Every ratio here guards its denominator and returns 0 instead of NaN.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::extractor::normalize;
use crate::matching::taxonomy::SkillTaxonomy;

/// Terms of this length or shorter never count as a title/location match.
const MIN_TERM_LEN: usize = 2;

/// Location score for a remote job whose résumé never mentions remote work.
pub const REMOTE_PARTIAL_SCORE: u32 = 80;

// ────────────────────────────────────────────────────────────────────────────
// Weights and thresholds
// ────────────────────────────────────────────────────────────────────────────

/// Contribution of each sub-score to the final composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skill: f64,
    pub title: f64,
    pub location: f64,
}

pub const DEFAULT_MATCH_WEIGHTS: MatchWeights = MatchWeights {
    skill: 0.5,
    title: 0.3,
    location: 0.2,
};

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.title + self.location
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_MATCH_WEIGHTS
    }
}

/// Cut-offs used when summarizing a batch of matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchThresholds {
    /// `skill_score` at or above this counts as a skill match.
    pub skill_match: u32,
    /// Composite `score` at or above this counts as a high match.
    pub high_match: u32,
}

pub const DEFAULT_MATCH_THRESHOLDS: MatchThresholds = MatchThresholds {
    skill_match: 70,
    high_match: 80,
};

impl Default for MatchThresholds {
    fn default() -> Self {
        DEFAULT_MATCH_THRESHOLDS
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill overlap
// ────────────────────────────────────────────────────────────────────────────

/// Weighted coverage of a job's skills by a résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedMatch {
    pub score: u32,
    pub matches: Vec<String>,
    pub missing: Vec<String>,
    pub weighted_matches: f64,
    pub total_weight: f64,
}

/// Fraction of the job's skill weight that the résumé covers, as a percentage.
///
/// `job_skills` is the universe to satisfy. An empty universe scores 0.
pub fn calculate_weighted_match(
    job_skills: &[String],
    resume_skills: &[String],
    taxonomy: &SkillTaxonomy,
) -> WeightedMatch {
    if job_skills.is_empty() {
        return WeightedMatch::default();
    }

    let resume_set: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(job_skills.len());
    let mut result = WeightedMatch::default();

    for skill in job_skills {
        if !seen.insert(skill.as_str()) {
            continue;
        }

        let weight = taxonomy.weight_or_basic(skill);
        result.total_weight += weight;

        if resume_set.contains(skill.as_str()) {
            result.weighted_matches += weight;
            result.matches.push(skill.clone());
        } else {
            result.missing.push(skill.clone());
        }
    }

    result.score = percentage(result.weighted_matches, result.total_weight);
    result
}

// ────────────────────────────────────────────────────────────────────────────
// Title and location heuristics
// ────────────────────────────────────────────────────────────────────────────

/// Share of job title terms that appear in the résumé text.
#[allow(dead_code)] // the engine calls the pre-normalized form
pub fn calculate_title_match(job_title: &str, resume_text: &str) -> u32 {
    let normalized_title = normalize(job_title);
    let normalized_resume = normalize(resume_text);
    title_match_normalized(&normalized_title, &normalized_resume)
}

pub(crate) fn title_match_normalized(normalized_title: &str, normalized_resume: &str) -> u32 {
    let terms: Vec<&str> = normalized_title.split_whitespace().collect();
    term_coverage(&terms, normalized_resume)
}

/// Location similarity between a job and the résumé text.
///
/// Remote jobs get 100 when the résumé mentions remote work and
/// [`REMOTE_PARTIAL_SCORE`] otherwise.
#[allow(dead_code)] // the engine calls the pre-normalized form
pub fn calculate_location_score(job_location: &str, resume_text: &str) -> u32 {
    let normalized_location = normalize(job_location);
    let normalized_resume = normalize(resume_text);
    location_score_normalized(&normalized_location, &normalized_resume)
}

pub(crate) fn location_score_normalized(normalized_location: &str, normalized_resume: &str) -> u32 {
    if normalized_location.trim().is_empty() {
        return 0;
    }

    if normalized_location.contains("remote") {
        return if normalized_resume.contains("remote") {
            100
        } else {
            REMOTE_PARTIAL_SCORE
        };
    }

    let parts: Vec<&str> = normalized_location
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    term_coverage(&parts, normalized_resume)
}

fn term_coverage(terms: &[&str], haystack: &str) -> u32 {
    let matching = terms
        .iter()
        .filter(|t| t.len() > MIN_TERM_LEN && haystack.contains(**t))
        .count();
    percentage(matching as f64, terms.len() as f64)
}

// ────────────────────────────────────────────────────────────────────────────
// Composite
// ────────────────────────────────────────────────────────────────────────────

/// `round(skill×w.skill + title×w.title + location×w.location)`, clamped to 100.
pub fn composite_score(
    skill_score: u32,
    title_match: u32,
    location_score: u32,
    weights: &MatchWeights,
) -> u32 {
    let combined = skill_score as f64 * weights.skill
        + title_match as f64 * weights.title
        + location_score as f64 * weights.location;
    combined.round().clamp(0.0, 100.0) as u32
}

fn percentage(numerator: f64, denominator: f64) -> u32 {
    if denominator <= 0.0 {
        return 0;
    }
    ((numerator / denominator) * 100.0).round().clamp(0.0, 100.0) as u32
}
