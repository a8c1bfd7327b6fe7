use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::profile::{ProfileUpdate, UserProfile};
use crate::store::{ProfileStore, StoreError};

/// Local store first, remote store as an enhancement.
///
/// `save` is only an error when the local tier fails. The remote always
/// receives the full merged profile, never the update alone. `load` serves
/// whichever tier holds the most recently updated copy, preferring the remote
/// on equal timestamps.
pub struct TieredProfileStore {
    local: Arc<dyn ProfileStore>,
    remote: Option<Arc<dyn ProfileStore>>,
}

impl TieredProfileStore {
    pub fn new(local: Arc<dyn ProfileStore>, remote: Option<Arc<dyn ProfileStore>>) -> Self {
        Self { local, remote }
    }

    pub fn local_only(local: Arc<dyn ProfileStore>) -> Self {
        Self::new(local, None)
    }

    async fn sync_remote(&self, profile: &UserProfile) {
        let Some(remote) = &self.remote else {
            return;
        };
        match remote.put(profile).await {
            Ok(()) => debug!("Profile {} synced to {}", profile.user_key, remote.backend()),
            Err(e) => warn!(
                "Remote save via {} failed for {}, kept local copy: {e}",
                remote.backend(),
                profile.user_key
            ),
        }
    }
}

#[async_trait]
impl ProfileStore for TieredProfileStore {
    async fn save(&self, user_key: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError> {
        let saved = self.local.save(user_key, update).await?;
        self.sync_remote(&saved).await;
        Ok(saved)
    }

    async fn put(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.local.put(profile).await?;
        self.sync_remote(profile).await;
        Ok(())
    }

    async fn load(&self, user_key: &str) -> Result<UserProfile, StoreError> {
        let local = self.local.load(user_key).await;
        let Some(remote) = &self.remote else {
            return local;
        };

        let remote_copy = match remote.load(user_key).await {
            Ok(profile) => Some(profile),
            Err(StoreError::NotFound(_)) => {
                debug!("No remote profile for {user_key}, using local tier");
                None
            }
            Err(e) => {
                warn!(
                    "Remote load via {} failed for {user_key}, using local tier: {e}",
                    remote.backend()
                );
                None
            }
        };

        match (remote_copy, local) {
            (Some(remote_profile), Ok(local_profile))
                if local_profile.updated_at > remote_profile.updated_at =>
            {
                debug!("Local copy of {user_key} is newer than {}", remote.backend());
                Ok(local_profile)
            }
            (Some(remote_profile), Ok(_)) => Ok(remote_profile),
            (Some(remote_profile), Err(e)) => {
                if !matches!(e, StoreError::NotFound(_)) {
                    warn!("Local load failed for {user_key}, serving remote copy: {e}");
                }
                Ok(remote_profile)
            }
            (None, local) => local,
        }
    }

    fn backend(&self) -> &'static str {
        if self.remote.is_some() {
            "tiered"
        } else {
            "local"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use crate::store::InMemoryProfileStore;

    struct UnreachableStore;

    #[async_trait]
    impl ProfileStore for UnreachableStore {
        async fn save(&self, _: &str, _: ProfileUpdate) -> Result<UserProfile, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn put(&self, _: &UserProfile) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn load(&self, _: &str) -> Result<UserProfile, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        fn backend(&self) -> &'static str {
            "unreachable"
        }
    }

    /// Remote whose writes fail while `down` is set.
    #[derive(Default)]
    struct FlakyRemote {
        inner: InMemoryProfileStore,
        down: AtomicBool,
    }

    impl FlakyRemote {
        fn set_down(&self, down: bool) {
            self.down.store(down, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProfileStore for FlakyRemote {
        async fn save(&self, key: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError> {
            self.check()?;
            self.inner.save(key, update).await
        }

        async fn put(&self, profile: &UserProfile) -> Result<(), StoreError> {
            self.check()?;
            self.inner.put(profile).await
        }

        async fn load(&self, key: &str) -> Result<UserProfile, StoreError> {
            self.inner.load(key).await
        }

        fn backend(&self) -> &'static str {
            "flaky"
        }
    }

    fn name_update(name: &str) -> ProfileUpdate {
        ProfileUpdate {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn code_update(code: &str) -> ProfileUpdate {
        ProfileUpdate {
            personality_code: Some(code.parse().unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_remote_failure_does_not_fail_save() {
        let local = Arc::new(InMemoryProfileStore::new());
        let store = TieredProfileStore::new(local.clone(), Some(Arc::new(UnreachableStore)));

        let saved = store.save("guest-1", code_update("ISFP")).await.unwrap();
        assert_eq!(saved.personality_code.unwrap().to_string(), "ISFP");

        // Remote is unreachable on load as well, so the local copy is served
        let loaded = store.load("guest-1").await.unwrap();
        assert_eq!(loaded.personality_code.unwrap().to_string(), "ISFP");
        assert!(local.load("guest-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_save_writes_both_tiers() {
        let local = Arc::new(InMemoryProfileStore::new());
        let remote = Arc::new(InMemoryProfileStore::new());
        let store = TieredProfileStore::new(local.clone(), Some(remote.clone()));

        store.save("ana@example.com", code_update("ENTP")).await.unwrap();
        assert!(local.load("ana@example.com").await.is_ok());
        assert!(remote.load("ana@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_load_serves_most_recent_copy() {
        let local = Arc::new(InMemoryProfileStore::new());
        let remote = Arc::new(InMemoryProfileStore::new());
        local.save("ana", code_update("INTP")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        remote.save("ana", code_update("ENTJ")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        local.save("bo", code_update("ISFJ")).await.unwrap();
        remote.put(&UserProfile::new("bo")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        local.save("bo", code_update("ESFP")).await.unwrap();

        let store = TieredProfileStore::new(local, Some(remote));
        let ana = store.load("ana").await.unwrap();
        assert_eq!(ana.personality_code.unwrap().to_string(), "ENTJ");
        let bo = store.load("bo").await.unwrap();
        assert_eq!(bo.personality_code.unwrap().to_string(), "ESFP");
    }

    #[tokio::test]
    async fn test_missed_remote_save_is_repaired_by_next_sync() {
        let local = Arc::new(InMemoryProfileStore::new());
        let remote = Arc::new(FlakyRemote::default());
        let store = TieredProfileStore::new(local.clone(), Some(remote.clone()));

        remote.set_down(true);
        store.save("jo", code_update("ESTJ")).await.unwrap();
        remote.set_down(false);
        store.save("jo", name_update("Jo")).await.unwrap();

        let synced = remote.load("jo").await.unwrap();
        assert_eq!(synced.personality_code.unwrap().to_string(), "ESTJ");
        assert_eq!(synced.name.as_deref(), Some("Jo"));

        let loaded = store.load("jo").await.unwrap();
        assert_eq!(loaded.personality_code.unwrap().to_string(), "ESTJ");
        assert_eq!(loaded, local.load("jo").await.unwrap());
    }

    #[tokio::test]
    async fn test_stale_remote_does_not_hide_newer_local_result() {
        let local = Arc::new(InMemoryProfileStore::new());
        let remote = Arc::new(FlakyRemote::default());
        let store = TieredProfileStore::new(local, Some(remote.clone()));

        store.save("lin", name_update("Lin")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        remote.set_down(true);
        store.save("lin", code_update("INFJ")).await.unwrap();

        assert!(remote.load("lin").await.unwrap().personality_code.is_none());
        let loaded = store.load("lin").await.unwrap();
        assert_eq!(loaded.personality_code.unwrap().to_string(), "INFJ");
        assert_eq!(loaded.name.as_deref(), Some("Lin"));
    }

    #[tokio::test]
    async fn test_load_missing_everywhere_is_not_found() {
        let store = TieredProfileStore::new(
            Arc::new(InMemoryProfileStore::new()),
            Some(Arc::new(InMemoryProfileStore::new())),
        );
        assert!(matches!(
            store.load("ghost").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_only_backend_label() {
        let store = TieredProfileStore::local_only(Arc::new(InMemoryProfileStore::new()));
        assert_eq!(store.backend(), "local");
    }
}
