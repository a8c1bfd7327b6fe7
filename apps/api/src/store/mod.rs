//! Profile persistence.
//!
//! `TieredProfileStore` is what the service runs on: a local adapter is the
//! primary store, and an optional remote adapter (Postgres) is written after
//! it. Remote failures are logged and never surface to the caller.

pub mod file;
pub mod memory;
pub mod postgres;
pub mod tiered;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::profile::{ProfileUpdate, UserProfile};

pub use file::LocalFileProfileStore;
pub use memory::InMemoryProfileStore;
pub use postgres::PgProfileStore;
pub use tiered::TieredProfileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No profile for '{0}'")]
    NotFound(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage for user profiles, keyed by user identity.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Merges `update` into the profile for `user_key`, creating it if absent.
    /// Returns the stored profile.
    async fn save(&self, user_key: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError>;

    /// Stores `profile` as the complete record for its user, replacing any
    /// existing one.
    async fn put(&self, profile: &UserProfile) -> Result<(), StoreError>;

    /// Returns the profile, or `StoreError::NotFound`.
    async fn load(&self, user_key: &str) -> Result<UserProfile, StoreError>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Saves without letting a failure reach the caller. Returns whether the
/// save succeeded.
pub async fn save_best_effort(store: &dyn ProfileStore, user_key: &str, update: ProfileUpdate) -> bool {
    match store.save(user_key, update).await {
        Ok(_) => true,
        Err(e) => {
            warn!(
                "Failed to persist profile for {user_key} via {}: {e}",
                store.backend()
            );
            false
        }
    }
}

/// Loads a profile, treating a missing one as a new guest profile.
pub async fn load_or_new(store: &dyn ProfileStore, user_key: &str) -> Result<UserProfile, StoreError> {
    match store.load(user_key).await {
        Ok(profile) => Ok(profile),
        Err(StoreError::NotFound(_)) => Ok(UserProfile::new(user_key)),
        Err(e) => Err(e),
    }
}
