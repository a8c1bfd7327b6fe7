use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::profile::{ProfileUpdate, UserProfile};
use crate::store::{ProfileStore, StoreError};

/// Process-local store. Selected with `PROFILE_STORE_PATH=:memory:`.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn save(&self, user_key: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(user_key.to_string())
            .or_insert_with(|| UserProfile::new(user_key));
        profile.apply(update);
        Ok(profile.clone())
    }

    async fn put(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_key.clone(), profile.clone());
        Ok(())
    }

    async fn load(&self, user_key: &str) -> Result<UserProfile, StoreError> {
        self.profiles
            .read()
            .await
            .get(user_key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(user_key.to_string()))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::classifier::PersonalityCode;

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let store = InMemoryProfileStore::new();
        assert!(matches!(
            store.load("nobody").await,
            Err(StoreError::NotFound(key)) if key == "nobody"
        ));
    }

    #[tokio::test]
    async fn test_save_creates_then_merges() {
        let store = InMemoryProfileStore::new();
        let code: PersonalityCode = "ESFJ".parse().unwrap();
        let created = store
            .save(
                "sam@example.com",
                ProfileUpdate {
                    personality_code: Some(code),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(created.assessment_completed);

        store
            .save(
                "sam@example.com",
                ProfileUpdate {
                    name: Some("Sam".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let loaded = store.load("sam@example.com").await.unwrap();
        assert_eq!(loaded.personality_code, Some(code));
        assert_eq!(loaded.name.as_deref(), Some("Sam"));
        assert_eq!(loaded.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_put_replaces_whole_record() {
        let store = InMemoryProfileStore::new();
        store
            .save(
                "kai",
                ProfileUpdate {
                    name: Some("Kai".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let replacement = UserProfile::new("kai");
        store.put(&replacement).await.unwrap();
        let loaded = store.load("kai").await.unwrap();
        assert_eq!(loaded, replacement);
        assert!(loaded.name.is_none());
    }

    #[tokio::test]
    async fn test_profiles_are_keyed_independently() {
        let store = InMemoryProfileStore::new();
        store
            .save(
                "a",
                ProfileUpdate {
                    personality_code: Some("ENTJ".parse().unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store.save("b", ProfileUpdate::default()).await.unwrap();
        assert!(store.load("b").await.unwrap().personality_code.is_none());
    }
}
