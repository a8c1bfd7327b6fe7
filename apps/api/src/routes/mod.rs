pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route(
            "/api/v1/assessment/questions",
            get(assessment::handle_get_questions),
        )
        .route(
            "/api/v1/assessment/progress",
            post(assessment::handle_progress),
        )
        .route(
            "/api/v1/assessment/mbti",
            post(assessment::handle_submit_mbti),
        )
        .route(
            "/api/v1/assessment/skills",
            get(assessment::handle_get_skill_taxonomy).post(assessment::handle_submit_skills),
        )
        .route("/api/v1/careers/:code", get(assessment::handle_get_career))
        .route("/api/v1/results", get(assessment::handle_get_results))
        // Profile API
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).post(profile::handle_upsert_profile),
        )
        .route(
            "/api/v1/profile/careers",
            post(profile::handle_save_career).delete(profile::handle_remove_career),
        )
        .route(
            "/api/v1/preferences",
            get(profile::handle_get_preferences).post(profile::handle_submit_preferences),
        )
        .route(
            "/api/v1/preferences/options",
            get(profile::handle_preference_options),
        )
        .with_state(state)
}
