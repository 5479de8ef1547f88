//! Current-token wallet orchestration

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cookies::{CookieClearer, FileCookieJar};
use crate::error::Result;
use crate::notify::{BroadcastNotifier, ChangeNotifier, TokenChange};
use crate::storage::{FileTokenCache, TokenCache};
use crate::token::AccessToken;

/// Single authoritative holder of the current access token
///
/// The wallet owns one mutable slot plus three collaborators: a durable
/// cache, a session cookie clearer, and a change notifier. All state changes
/// go through [`set_current`](Self::set_current), which compares old and new
/// by value, skips every side effect on a no-op, and otherwise caches,
/// clears cookies, and notifies before the held slot flips.
pub struct TokenWallet {
    /// Currently held token; the write guard spans entire transitions
    current: RwLock<Option<AccessToken>>,
    /// Durable cache for the current token
    cache: Arc<dyn TokenCache>,
    /// Clearer for ambient session artifacts
    cookies: Arc<dyn CookieClearer>,
    /// Publisher for change notifications
    notifier: Arc<dyn ChangeNotifier>,
}

impl TokenWallet {
    /// Create a wallet with explicit collaborators
    pub fn new(
        cache: Arc<dyn TokenCache>,
        cookies: Arc<dyn CookieClearer>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            current: RwLock::new(None),
            cache,
            cookies,
            notifier,
        }
    }

    /// Create a wallet backed by the default file cache and cookie jar
    ///
    /// Returns the wallet together with the broadcast notifier so callers
    /// can subscribe to change notifications.
    pub fn open() -> Result<(Self, Arc<BroadcastNotifier>)> {
        let cache = FileTokenCache::new()?;
        let storage_dir = cache.cache_dir().clone();
        Self::assemble(cache, &storage_dir)
    }

    /// Create a wallet storing its files in a custom directory (for testing)
    pub fn open_in(storage_dir: &Path) -> Result<(Self, Arc<BroadcastNotifier>)> {
        let cache = FileTokenCache::with_dir(storage_dir.to_path_buf())?;
        Self::assemble(cache, storage_dir)
    }

    fn assemble(
        cache: FileTokenCache,
        storage_dir: &Path,
    ) -> Result<(Self, Arc<BroadcastNotifier>)> {
        let cookies = FileCookieJar::new(storage_dir)?;
        let notifier = Arc::new(BroadcastNotifier::default());

        let wallet = Self::new(Arc::new(cache), Arc::new(cookies), notifier.clone());
        Ok((wallet, notifier))
    }

    /// Get the currently held token
    pub async fn current(&self) -> Option<AccessToken> {
        self.current.read().await.clone()
    }

    /// Check whether a token is held and not expired
    pub async fn is_current_active(&self) -> bool {
        self.current
            .read()
            .await
            .as_ref()
            .map(|token| !token.is_expired())
            .unwrap_or(false)
    }

    /// Replace the current token
    ///
    /// When `new` equals the held value (both absent, or both present and
    /// structurally equal) nothing happens: no cache write, no cookie
    /// clearing, no notification. Otherwise the transition is persisted to
    /// the cache, session cookies are cleared if the token went from present
    /// to absent, a [`TokenChange`] is published, and only then does the
    /// held slot flip.
    ///
    /// Collaborator failures are best-effort: they are logged and the
    /// in-memory state still updates.
    pub async fn set_current(&self, new: Option<AccessToken>) {
        let mut slot = self.current.write().await;

        if *slot == new {
            debug!("Ignoring no-op token update");
            return;
        }

        let old = slot.clone();

        if let Err(err) = self.cache.store(new.as_ref()).await {
            warn!("Failed to cache current token: {}", err);
        }

        if new.is_none() && old.is_some() {
            if let Err(err) = self.cookies.clear().await {
                warn!("Failed to clear session cookies: {}", err);
            }
        }

        // A session appearing or disappearing always counts as a user
        // change; between two held tokens the flag stays unset unless the
        // user id actually differs.
        let user_id_changed = match (old.as_ref(), new.as_ref()) {
            (Some(previous), Some(current)) => {
                (previous.user_id != current.user_id).then_some(true)
            }
            _ => Some(true),
        };

        self.notifier
            .publish(TokenChange {
                previous: old,
                current: new.clone(),
                user_id_changed,
            })
            .await;

        info!("Current token updated (held: {})", new.is_some());
        *slot = new;
    }

    /// Restore the held token from the durable cache
    ///
    /// Startup-only hook. Restoring is not a transition: nothing is written
    /// back, no cookies are touched, and no notification is published.
    pub async fn restore_from_cache(&self) -> Result<()> {
        let mut slot = self.current.write().await;
        *slot = self.cache.load().await?;

        debug!("Restored token from cache (held: {})", slot.is_some());
        Ok(())
    }
}
