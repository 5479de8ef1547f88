//! # token-wallet
//!
//! Process-wide access token wallet including:
//! - Single authoritative holder of the current access token
//! - Value-equality change detection with a no-op short-circuit
//! - Durable token caching with a file-backed default
//! - Session cookie clearing on logout transitions
//! - Broadcast change notifications with a tri-state user-id flag

pub mod cookies;
pub mod error;
pub mod notify;
pub mod storage;
pub mod token;
mod wallet;

pub use cookies::{CookieClearer, FileCookieJar, SessionCookie};
pub use error::{Result, WalletError};
pub use notify::{BroadcastNotifier, ChangeNotifier, TokenChange};
pub use storage::{FileTokenCache, MemoryTokenCache, TokenCache};
pub use token::AccessToken;
pub use wallet::TokenWallet;
