use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::profile::{ProfileUpdate, UserProfile};
use crate::store::{ProfileStore, StoreError};

/// Profiles kept in a single JSON document on local disk.
///
/// The whole map is held in memory and rewritten on every save. Writes go to
/// a sibling temp file first and are renamed into place.
pub struct LocalFileProfileStore {
    path: PathBuf,
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl LocalFileProfileStore {
    /// Opens the store, creating parent directories. A missing file is an
    /// empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let profiles = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!(
            "Opened local profile store at {} ({} profiles)",
            path.display(),
            profiles.len()
        );
        Ok(Self {
            path,
            profiles: Mutex::new(profiles),
        })
    }

    async fn flush(&self, profiles: &HashMap<String, UserProfile>) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(profiles)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Wrote {} profiles to {}", profiles.len(), self.path.display());
        Ok(())
    }

    /// Inserts `profile` and flushes. The map only keeps the change once the
    /// file write has gone through.
    async fn commit(
        &self,
        profiles: &mut HashMap<String, UserProfile>,
        profile: UserProfile,
    ) -> Result<(), StoreError> {
        let user_key = profile.user_key.clone();
        let previous = profiles.insert(user_key.clone(), profile);
        if let Err(e) = self.flush(profiles).await {
            match previous {
                Some(p) => profiles.insert(user_key, p),
                None => profiles.remove(&user_key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for LocalFileProfileStore {
    async fn save(&self, user_key: &str, update: ProfileUpdate) -> Result<UserProfile, StoreError> {
        let mut profiles = self.profiles.lock().await;
        let mut profile = profiles
            .get(user_key)
            .cloned()
            .unwrap_or_else(|| UserProfile::new(user_key));
        profile.apply(update);
        self.commit(&mut profiles, profile.clone()).await?;
        Ok(profile)
    }

    async fn put(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.lock().await;
        self.commit(&mut profiles, profile.clone()).await
    }

    async fn load(&self, user_key: &str) -> Result<UserProfile, StoreError> {
        self.profiles
            .lock()
            .await
            .get(user_key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(user_key.to_string()))
    }

    fn backend(&self) -> &'static str {
        "local-file"
    }
}
