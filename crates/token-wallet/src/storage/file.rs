//! File-backed token cache
//!
//! Stores the current token as a plain JSON file in the user's data
//! directory. Writes are atomic (temp file + rename); clearing removes the
//! file entirely.

use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use super::TokenCache;
use crate::error::{Result, WalletError};
use crate::token::AccessToken;

/// File format for the persisted token
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    token: AccessToken,
}

/// File-backed token cache
pub struct FileTokenCache {
    /// Directory for the cache file
    cache_dir: PathBuf,
}

impl FileTokenCache {
    /// Create a cache in the default data directory
    pub fn new() -> Result<Self> {
        Self::with_dir(Self::default_cache_dir()?)
    }

    /// Create a cache with a custom directory (for testing)
    pub fn with_dir(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;

        debug!("Token cache initialized at: {:?}", cache_dir);

        Ok(Self { cache_dir })
    }

    /// Get the default cache directory
    fn default_cache_dir() -> Result<PathBuf> {
        ProjectDirs::from("com", "symbia-labs", "token-wallet")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                WalletError::StorageError("Could not determine data directory".to_string())
            })
    }

    /// Get the path to the cache file
    fn cache_file_path(&self) -> PathBuf {
        self.cache_dir.join("current_token.json")
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }
}

#[async_trait]
impl TokenCache for FileTokenCache {
    async fn store(&self, token: Option<&AccessToken>) -> Result<()> {
        let path = self.cache_file_path();

        match token {
            Some(token) => {
                let file = CacheFile {
                    version: 1,
                    token: token.clone(),
                };
                let contents = serde_json::to_string_pretty(&file)?;

                // Write atomically using a temp file
                let temp_path = path.with_extension("tmp");
                tokio::fs::write(&temp_path, &contents).await?;
                tokio::fs::rename(&temp_path, &path).await?;

                debug!("Cached current token to {:?}", path);
            }
            None => {
                if path.exists() {
                    tokio::fs::remove_file(&path).await?;
                    debug!("Removed cached token at {:?}", path);
                }
            }
        }

        Ok(())
    }

    async fn load(&self) -> Result<Option<AccessToken>> {
        let path = self.cache_file_path();

        if !path.exists() {
            debug!("No cached token file found");
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let file: CacheFile = serde_json::from_str(&contents)?;

        debug!("Loaded cached token from {:?}", path);
        Ok(Some(file.token))
    }

    fn backend_name(&self) -> &'static str {
        "File Token Cache"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn token() -> AccessToken {
        AccessToken::new("abc123", "app-10", "user-1", Utc::now() + Duration::hours(1))
            .with_permissions(["email"])
    }

    #[tokio::test]
    async fn test_store_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileTokenCache::with_dir(temp_dir.path().to_path_buf()).unwrap();

        let token = token();
        cache.store(Some(&token)).await.unwrap();

        let loaded = cache.load().await.unwrap();
        assert_eq!(loaded, Some(token));
    }

    #[tokio::test]
    async fn test_load_without_cached_token() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileTokenCache::with_dir(temp_dir.path().to_path_buf()).unwrap();

        assert_eq!(cache.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_none_removes_cached_token() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileTokenCache::with_dir(temp_dir.path().to_path_buf()).unwrap();

        cache.store(Some(&token())).await.unwrap();
        cache.store(None).await.unwrap();

        assert_eq!(cache.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_none_on_empty_cache_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileTokenCache::with_dir(temp_dir.path().to_path_buf()).unwrap();

        cache.store(None).await.unwrap();
        cache.store(None).await.unwrap();

        assert_eq!(cache.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let token = token();

        {
            let cache = FileTokenCache::with_dir(temp_dir.path().to_path_buf()).unwrap();
            cache.store(Some(&token)).await.unwrap();
        }

        {
            let cache = FileTokenCache::with_dir(temp_dir.path().to_path_buf()).unwrap();
            assert_eq!(cache.load().await.unwrap(), Some(token));
        }
    }
}
