//! Access token type definitions

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An access token and its metadata.
///
/// Immutable value object: constructed by the login flow, never mutated,
/// replaced wholesale through [`TokenWallet::set_current`]. Two tokens are
/// equal iff every field compares equal - the wallet's change detection
/// relies on this.
///
/// [`TokenWallet::set_current`]: crate::TokenWallet::set_current
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The raw token string
    pub token: String,

    /// Permissions the user granted
    pub permissions: HashSet<String>,

    /// Permissions the user declined
    pub declined_permissions: HashSet<String>,

    /// Application the token was issued to
    pub app_id: String,

    /// User the token was issued for
    pub user_id: String,

    /// When the token stops being usable
    pub expires_at: DateTime<Utc>,

    /// When the token was last refreshed by the platform
    pub refreshed_at: DateTime<Utc>,

    /// When data access through the token lapses
    pub data_access_expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a token with empty permission sets.
    ///
    /// Refresh defaults to now and data access expiry to the token expiry;
    /// use the `with_*` methods to fill in the remaining metadata.
    pub fn new(
        token: impl Into<String>,
        app_id: impl Into<String>,
        user_id: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token: token.into(),
            permissions: HashSet::new(),
            declined_permissions: HashSet::new(),
            app_id: app_id.into(),
            user_id: user_id.into(),
            expires_at,
            refreshed_at: Utc::now(),
            data_access_expires_at: expires_at,
        }
    }

    /// Replace the granted permission set.
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the declined permission set.
    pub fn with_declined_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declined_permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the refresh timestamp.
    pub fn with_refreshed_at(mut self, refreshed_at: DateTime<Utc>) -> Self {
        self.refreshed_at = refreshed_at;
        self
    }

    /// Set the data access expiration timestamp.
    pub fn with_data_access_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.data_access_expires_at = expires_at;
        self
    }

    /// Whether the token's expiration date has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whether data access through the token has lapsed.
    pub fn is_data_access_expired(&self) -> bool {
        self.data_access_expires_at <= Utc::now()
    }

    /// Whether the given permission was granted.
    pub fn has_granted(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Whether the given permission was declined.
    pub fn has_declined(&self, permission: &str) -> bool {
        self.declined_permissions.contains(permission)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("permissions", &self.permissions)
            .field("declined_permissions", &self.declined_permissions)
            .field("app_id", &self.app_id)
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .field("refreshed_at", &self.refreshed_at)
            .field("data_access_expires_at", &self.data_access_expires_at)
            .finish()
    }
}
