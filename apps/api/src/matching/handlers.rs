//! Axum route handlers for the Skills API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::matcher::{build_match_report, MatchReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub jd_text: String,
    pub cv_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
///
/// Extracts the skill names from a single document.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let skills = state.extractor.extract_skill_names(&request.text).await?;

    Ok(Json(ExtractResponse { skills }))
}

/// POST /api/v1/skills/match
///
/// Extracts skills from the JD and then the CV, and compares them.
/// The two extractions run one after the other; either failing fails the request.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text cannot be empty".to_string()));
    }

    let jd_skills = state.extractor.extract_skill_names(&request.jd_text).await?;
    let cv_skills = state.extractor.extract_skill_names(&request.cv_text).await?;

    let report = build_match_report(jd_skills, cv_skills);

    info!(
        "Matched {} of {} JD skills ({})",
        report.matching_skills.len(),
        report.jd_skills.len(),
        report.match_rate_display
    );

    Ok(Json(report))
}
