//! In-memory token cache
//!
//! Holds the cached token in process memory only. Useful in tests and for
//! applications that opt out of durable caching.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::TokenCache;
use crate::error::Result;
use crate::token::AccessToken;

/// In-memory token cache
#[derive(Default)]
pub struct MemoryTokenCache {
    slot: RwLock<Option<AccessToken>>,
}

impl MemoryTokenCache {
    /// Create an empty in-memory cache
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn store(&self, token: Option<&AccessToken>) -> Result<()> {
        let mut slot = self.slot.write().await;
        *slot = token.cloned();

        debug!("Cached current token in memory (held: {})", slot.is_some());
        Ok(())
    }

    async fn load(&self) -> Result<Option<AccessToken>> {
        Ok(self.slot.read().await.clone())
    }

    fn backend_name(&self) -> &'static str {
        "In-Memory Token Cache"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_store_and_load() {
        let cache = MemoryTokenCache::new();
        let token =
            AccessToken::new("abc123", "app-10", "user-1", Utc::now() + Duration::hours(1));

        cache.store(Some(&token)).await.unwrap();
        assert_eq!(cache.load().await.unwrap(), Some(token));

        cache.store(None).await.unwrap();
        assert_eq!(cache.load().await.unwrap(), None);
    }
}
