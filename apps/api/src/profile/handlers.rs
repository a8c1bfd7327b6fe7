//! Axum route handlers for profiles, saved careers and personal preferences.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::assessment::handlers::{require_user_key, UserKeyQuery};
use crate::assessment::preferences::{
    PersonalPreferences, INTEREST_OPTIONS, PHILOSOPHY_OPTIONS, VALUE_OPTIONS,
};
use crate::errors::AppError;
use crate::models::profile::{ProfileUpdate, UserProfile};
use crate::state::AppState;
use crate::store::{load_or_new, save_best_effort};

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub user_key: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SavedCareerRequest {
    pub user_key: String,
    pub career: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitPreferencesRequest {
    pub user_key: String,
    pub preferences: PersonalPreferences,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: PersonalPreferences,
    pub progress_percent: f64,
    /// Set on submission only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PreferenceOptions {
    pub interests: &'static [&'static str],
    pub values: &'static [&'static str],
    pub philosophies: &'static [&'static str],
}

/// GET /api/v1/profile?user_key=
///
/// A user with no stored profile gets a fresh one rather than an error.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserKeyQuery>,
) -> Result<Json<UserProfile>, AppError> {
    let key = require_user_key(&params.user_key)?;
    Ok(Json(load_or_new(state.store.as_ref(), key).await?))
}

/// POST /api/v1/profile
///
/// Records identity fields on first sign-in; later calls refresh them.
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    Json(req): Json<UpsertProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let key = require_user_key(&req.user_key)?;
    let profile = state
        .store
        .save(
            key,
            ProfileUpdate {
                name: req.name,
                email: req.email,
                image: req.image,
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(profile))
}

/// POST /api/v1/profile/careers
pub async fn handle_save_career(
    State(state): State<AppState>,
    Json(req): Json<SavedCareerRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let key = require_user_key(&req.user_key)?;
    if req.career.trim().is_empty() {
        return Err(AppError::Validation("career cannot be empty".to_string()));
    }
    let profile = state
        .store
        .save(
            key,
            ProfileUpdate {
                save_career: Some(req.career),
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/profile/careers
pub async fn handle_remove_career(
    State(state): State<AppState>,
    Json(req): Json<SavedCareerRequest>,
) -> Result<StatusCode, AppError> {
    let key = require_user_key(&req.user_key)?;
    // Loading first keeps a remove on an unknown user from creating a profile
    state.store.load(key).await?;
    state
        .store
        .save(
            key,
            ProfileUpdate {
                unsave_career: Some(req.career),
                ..Default::default()
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/preferences/options
pub async fn handle_preference_options() -> Json<PreferenceOptions> {
    Json(PreferenceOptions {
        interests: INTEREST_OPTIONS,
        values: VALUE_OPTIONS,
        philosophies: PHILOSOPHY_OPTIONS,
    })
}

/// GET /api/v1/preferences?user_key=
pub async fn handle_get_preferences(
    State(state): State<AppState>,
    Query(params): Query<UserKeyQuery>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let key = require_user_key(&params.user_key)?;
    let profile = load_or_new(state.store.as_ref(), key).await?;
    let preferences = profile.preferences.unwrap_or_default();
    Ok(Json(PreferencesResponse {
        progress_percent: preferences.progress_percent(),
        preferences,
        persisted: None,
    }))
}

/// POST /api/v1/preferences
///
/// Only accepted once the personality assessment has been completed and at
/// least half of the preference sections are filled.
pub async fn handle_submit_preferences(
    State(state): State<AppState>,
    Json(req): Json<SubmitPreferencesRequest>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let key = require_user_key(&req.user_key)?;
    let profile = load_or_new(state.store.as_ref(), key).await?;
    if profile.personality_code.is_none() {
        return Err(AppError::Validation(
            "Please complete the MBTI assessment first.".to_string(),
        ));
    }

    let preferences = req.preferences.normalized();
    if !preferences.ready_to_submit() {
        return Err(AppError::Validation(
            "Please complete at least half of the sections before submitting.".to_string(),
        ));
    }
    let preferences = PersonalPreferences {
        completed_at: Some(Utc::now()),
        ..preferences
    };

    let persisted = save_best_effort(
        state.store.as_ref(),
        key,
        ProfileUpdate {
            preferences: Some(preferences.clone()),
            ..Default::default()
        },
    )
    .await;

    Ok(Json(PreferencesResponse {
        progress_percent: preferences.progress_percent(),
        preferences,
        persisted: Some(persisted),
    }))
}
