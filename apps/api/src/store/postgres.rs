use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{info, warn};

use crate::assessment::preferences::PersonalPreferences;
use crate::assessment::questionnaire::TraitLetter;
use crate::assessment::skills::SkillRatings;
use crate::models::profile::{ProfileUpdate, UserProfile};
use crate::store::{ProfileStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS user_profiles (
    user_key             TEXT PRIMARY KEY,
    name                 TEXT,
    email                TEXT,
    image                TEXT,
    personality_code     TEXT,
    response_sequence    JSONB,
    skill_ratings        JSONB,
    preferences          JSONB,
    saved_careers        TEXT[] NOT NULL DEFAULT '{}',
    assessment_completed BOOLEAN NOT NULL DEFAULT FALSE,
    completed_at         TIMESTAMPTZ,
    created_at           TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at           TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

#[derive(Debug, FromRow)]
struct UserProfileRow {
    user_key: String,
    name: Option<String>,
    email: Option<String>,
    image: Option<String>,
    personality_code: Option<String>,
    response_sequence: Option<Json<Vec<TraitLetter>>>,
    skill_ratings: Option<Json<SkillRatings>>,
    preferences: Option<Json<PersonalPreferences>>,
    saved_careers: Vec<String>,
    assessment_completed: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        let personality_code = row.personality_code.and_then(|c| match c.parse() {
            Ok(code) => Some(code),
            Err(e) => {
                warn!("Ignoring stored personality code for {}: {e}", row.user_key);
                None
            }
        });
        UserProfile {
            user_key: row.user_key,
            name: row.name,
            email: row.email,
            image: row.image,
            personality_code,
            response_sequence: row.response_sequence.map(|j| j.0),
            skill_ratings: row.skill_ratings.map(|j| j.0),
            preferences: row.preferences.map(|j| j.0),
            saved_careers: row.saved_careers,
            assessment_completed: row.assessment_completed,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Writes every column of `profile`, inserting or replacing its row.
async fn upsert(conn: &mut PgConnection, profile: &UserProfile) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles
            (user_key, name, email, image, personality_code, response_sequence,
             skill_ratings, preferences, saved_careers, assessment_completed,
             completed_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT (user_key) DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email,
            image = EXCLUDED.image,
            personality_code = EXCLUDED.personality_code,
            response_sequence = EXCLUDED.response_sequence,
            skill_ratings = EXCLUDED.skill_ratings,
            preferences = EXCLUDED.preferences,
            saved_careers = EXCLUDED.saved_careers,
            assessment_completed = EXCLUDED.assessment_completed,
            completed_at = EXCLUDED.completed_at,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(&profile.user_key)
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.image)
    .bind(profile.personality_code.map(|c| c.to_string()))
    .bind(profile.response_sequence.as_ref().map(Json))
    .bind(profile.skill_ratings.as_ref().map(Json))
    .bind(profile.preferences.as_ref().map(Json))
    .bind(&profile.saved_careers)
    .bind(profile.assessment_completed)
    .bind(profile.completed_at)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Remote tier: one row per user in `user_profiles`.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the profile table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("user_profiles table ready");
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn save(&self, user_key: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<UserProfileRow> =
            sqlx::query_as("SELECT * FROM user_profiles WHERE user_key = $1 FOR UPDATE")
                .bind(user_key)
                .fetch_optional(&mut *tx)
                .await?;

        let mut profile = existing
            .map(UserProfile::from)
            .unwrap_or_else(|| UserProfile::new(user_key));
        profile.apply(update);

        upsert(&mut *tx, &profile).await?;
        tx.commit().await?;
        Ok(profile)
    }

    async fn put(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        upsert(&mut *conn, profile).await
    }

    async fn load(&self, user_key: &str) -> Result<UserProfile, StoreError> {
        let row: Option<UserProfileRow> =
            sqlx::query_as("SELECT * FROM user_profiles WHERE user_key = $1")
                .bind(user_key)
                .fetch_optional(&self.pool)
                .await?;
        row.map(UserProfile::from)
            .ok_or_else(|| StoreError::NotFound(user_key.to_string()))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
