//! Change notifications for wallet transitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::token::AccessToken;

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 16;

/// Describes a single wallet transition.
///
/// Published once per value-unequal replacement of the current token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenChange {
    /// Token held before the transition
    pub previous: Option<AccessToken>,

    /// Token held after the transition
    pub current: Option<AccessToken>,

    /// Whether the owning user changed.
    ///
    /// `Some(true)` when a session appears, disappears, or moves to a
    /// different user id. `None` when both tokens belong to the same user -
    /// the field is omitted rather than set to `false`, and observers may
    /// branch on its presence. `Some(false)` never occurs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id_changed: Option<bool>,
}

/// Trait for publishing wallet change notifications
///
/// Publishing is infallible from the wallet's point of view; a failing or
/// missing subscriber must not affect the transition or other subscribers.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// Deliver a change to all interested observers
    async fn publish(&self, change: TokenChange);
}

/// Broadcast-channel backed notifier
///
/// Observers call [`subscribe`](Self::subscribe) to obtain a receiver. Each
/// receiver gets its own queue, so a slow or dropped observer never blocks
/// the wallet or its peers.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<TokenChange>,
}

impl BroadcastNotifier {
    /// Create a notifier with the given per-subscriber queue capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new observer
    pub fn subscribe(&self) -> broadcast::Receiver<TokenChange> {
        self.sender.subscribe()
    }

    /// Number of currently registered observers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl ChangeNotifier for BroadcastNotifier {
    async fn publish(&self, change: TokenChange) {
        // send errors only when no receiver is subscribed
        let delivered = self.sender.send(change).unwrap_or(0);
        debug!("Published token change to {} subscribers", delivered);
    }
}
