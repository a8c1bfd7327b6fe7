//! Axum route handlers for the Assessment API.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assessment::careers::{lookup, lookup_str, CareerRecommendation};
use crate::assessment::classifier::{classify, classify_letters, PersonalityCode};
use crate::assessment::error::AssessmentError;
use crate::assessment::questionnaire::{Question, ResponseSequence, TraitLetter, QUESTIONS, QUESTION_COUNT};
use crate::assessment::roadmap::{build_roadmap, CareerRoadmap};
use crate::assessment::skills::{SkillCategory, SkillRatings, SKILL_TAXONOMY};
use crate::errors::AppError;
use crate::models::profile::ProfileUpdate;
use crate::state::AppState;
use crate::store::{save_best_effort, StoreError};

const TOP_SKILLS_LIMIT: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub responses: Vec<String>,
    /// Step back one question after replaying `responses`.
    #[serde(default)]
    pub undo: bool,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub answered: usize,
    pub total: usize,
    pub progress_percent: f64,
    pub complete: bool,
    pub next_question: Option<&'static Question>,
    /// Present once every question has been answered.
    pub personality_code: Option<PersonalityCode>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitMbtiRequest {
    pub user_key: Option<String>,
    pub responses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MbtiResultResponse {
    pub user_key: String,
    pub personality_code: PersonalityCode,
    pub recommendation: &'static CareerRecommendation,
    pub roadmap: CareerRoadmap,
    pub persisted: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSkillsRequest {
    pub user_key: Option<String>,
    pub ratings: HashMap<String, i64>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResultResponse {
    pub user_key: String,
    pub top_skills: Vec<String>,
    pub persisted: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserKeyQuery {
    pub user_key: String,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub personality_code: PersonalityCode,
    pub recommendation: &'static CareerRecommendation,
    pub roadmap: CareerRoadmap,
    pub top_skills: Vec<String>,
    pub skill_ratings: Option<SkillRatings>,
}

/// Uses the supplied key, or mints a guest key for anonymous users.
pub fn resolve_user_key(user_key: Option<String>) -> String {
    user_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| format!("guest-{}", Uuid::new_v4()))
}

/// Trims a key supplied by the client; blank keys are rejected.
pub fn require_user_key(user_key: &str) -> Result<&str, AppError> {
    let key = user_key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("user_key cannot be empty".to_string()));
    }
    Ok(key)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/assessment/questions
pub async fn handle_get_questions() -> Json<&'static [Question]> {
    Json(&QUESTIONS[..])
}

/// POST /api/v1/assessment/progress
///
/// Replays answers given so far against the questionnaire and reports the
/// next question. Each answer must belong to its own question's pair.
pub async fn handle_progress(
    Json(req): Json<ProgressRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    let mut sequence = ResponseSequence::new();
    for raw in &req.responses {
        let letter: TraitLetter = raw.parse()?;
        sequence.answer(letter)?;
    }
    if req.undo {
        sequence.undo();
    }

    let answered = sequence.len();
    let progress_percent = sequence.progress_percent();
    let next_question = sequence.current_question();
    let personality_code = if sequence.is_complete() {
        Some(classify_letters(&sequence.finish()?)?)
    } else {
        None
    };

    Ok(Json(ProgressResponse {
        answered,
        total: QUESTION_COUNT,
        progress_percent,
        complete: personality_code.is_some(),
        next_question,
        personality_code,
    }))
}

/// POST /api/v1/assessment/mbti
///
/// Classifies a complete response set and returns the recommendation.
/// The result is returned even when persisting it fails.
pub async fn handle_submit_mbti(
    State(state): State<AppState>,
    Json(req): Json<SubmitMbtiRequest>,
) -> Result<Json<MbtiResultResponse>, AppError> {
    let code = classify(&req.responses)?;
    let recommendation = lookup(code)?;
    let user_key = resolve_user_key(req.user_key);

    let response_sequence = req
        .responses
        .iter()
        .map(|r| r.parse::<TraitLetter>())
        .collect::<Result<Vec<_>, _>>()?;

    info!("Classified {user_key} as {code}");

    let persisted = save_best_effort(
        state.store.as_ref(),
        &user_key,
        ProfileUpdate {
            personality_code: Some(code),
            response_sequence: Some(response_sequence),
            completed_at: Some(Utc::now()),
            ..Default::default()
        },
    )
    .await;

    Ok(Json(MbtiResultResponse {
        user_key,
        personality_code: code,
        recommendation,
        roadmap: build_roadmap(&code),
        persisted,
    }))
}

/// GET /api/v1/assessment/skills
pub async fn handle_get_skill_taxonomy() -> Json<&'static [SkillCategory]> {
    Json(&SKILL_TAXONOMY[..])
}

/// POST /api/v1/assessment/skills
///
/// Every taxonomy skill must be rated 1–5.
pub async fn handle_submit_skills(
    State(state): State<AppState>,
    Json(req): Json<SubmitSkillsRequest>,
) -> Result<Json<SkillsResultResponse>, AppError> {
    let ratings = SkillRatings::try_from(req.ratings)?;

    if !ratings.is_complete() {
        let missing: Vec<&str> = SKILL_TAXONOMY
            .iter()
            .flat_map(|c| ratings.missing_in(c))
            .collect();
        return Err(AssessmentError::InvalidInput(format!(
            "Please rate all skills before continuing. Missing: {}",
            missing.join(", ")
        ))
        .into());
    }

    let user_key = resolve_user_key(req.user_key);
    let top_skills = ratings.top_skills(TOP_SKILLS_LIMIT);

    let persisted = save_best_effort(
        state.store.as_ref(),
        &user_key,
        ProfileUpdate {
            skill_ratings: Some(ratings),
            ..Default::default()
        },
    )
    .await;

    Ok(Json(SkillsResultResponse {
        user_key,
        top_skills,
        persisted,
    }))
}

/// GET /api/v1/careers/:code
pub async fn handle_get_career(
    Path(code): Path<String>,
) -> Result<Json<&'static CareerRecommendation>, AppError> {
    Ok(Json(lookup_str(&code)?))
}

/// GET /api/v1/results?user_key=
///
/// Rebuilds the results view from the stored profile. A missing profile or
/// one without a personality type means the assessment must be retaken.
pub async fn handle_get_results(
    State(state): State<AppState>,
    Query(params): Query<UserKeyQuery>,
) -> Result<Json<ResultsResponse>, AppError> {
    let retake = || {
        AppError::NotFound(
            "We couldn't find your assessment results. Please take the assessment again."
                .to_string(),
        )
    };

    let key = require_user_key(&params.user_key)?;
    let profile = match state.store.load(key).await {
        Ok(profile) => profile,
        Err(StoreError::NotFound(_)) => return Err(retake()),
        Err(e) => return Err(e.into()),
    };
    let code = profile.personality_code.ok_or_else(retake)?;

    Ok(Json(ResultsResponse {
        personality_code: code,
        recommendation: lookup(code)?,
        roadmap: build_roadmap(&code),
        top_skills: profile.top_skills(TOP_SKILLS_LIMIT),
        skill_ratings: profile.skill_ratings,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
