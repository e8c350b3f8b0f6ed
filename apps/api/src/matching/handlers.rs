//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::MatchReport;
use crate::matching::extractor::{extract_weighted_skills, ExtractionResult};
use crate::matching::service::{match_stored_resume, run_matching};
use crate::matching::taxonomy::{SkillEntry, SkillTier};
use crate::models::job::{text_or_empty, JobPosting};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `text` that is missing, `null` or not a string is read as empty.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub resume_text: String,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyCategoryView {
    pub name: String,
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub weights: Vec<(SkillTier, f64)>,
    pub categories: Vec<TaxonomyCategoryView>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/taxonomy
///
/// The active skill taxonomy grouped by category, for the UI skill legend.
pub async fn handle_get_taxonomy(State(state): State<AppState>) -> Json<TaxonomyResponse> {
    let categories = state
        .taxonomy
        .categories()
        .iter()
        .map(|category| TaxonomyCategoryView {
            name: category.name.clone(),
            skills: state
                .taxonomy
                .entries()
                .iter()
                .filter(|e| e.category == category.name)
                .cloned()
                .collect(),
        })
        .collect();

    Json(TaxonomyResponse {
        weights: SkillTier::ALL.iter().map(|t| (*t, t.weight())).collect(),
        categories,
    })
}

/// POST /api/v1/skills/extract
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractionResult> {
    Json(extract_weighted_skills(&request.text, &state.taxonomy))
}

/// POST /api/v1/match/preview
///
/// Scores the given jobs against résumé text without touching storage.
pub async fn handle_match_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let resume_text = request.resume_text;
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let report = run_matching(
        resume_text,
        request.jobs,
        state.taxonomy.clone(),
        state.match_config,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/resumes/:id/match
///
/// Matches a stored résumé against all active jobs and persists the scores.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<MatchReport>, AppError> {
    let report = match_stored_resume(
        state.repository.as_ref(),
        state.taxonomy.clone(),
        state.match_config,
        resume_id,
    )
    .await?;

    Ok(Json(report))
}
