//! Cache trait definitions

use crate::error::Result;
use crate::token::AccessToken;
use async_trait::async_trait;

/// Trait for durable caches of the current access token
///
/// The wallet calls [`store`](Self::store) on every real transition and
/// treats failures as best-effort; [`load`](Self::load) is only consulted by
/// the owning application's startup sequence.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Persist the token, or clear the durable copy when `None`
    async fn store(&self, token: Option<&AccessToken>) -> Result<()>;

    /// Retrieve the persisted token, if any
    async fn load(&self) -> Result<Option<AccessToken>>;

    /// Get a human-readable name for this cache backend
    fn backend_name(&self) -> &'static str;
}
