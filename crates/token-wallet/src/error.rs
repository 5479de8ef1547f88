//! Error types for token-wallet

use thiserror::Error;

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet error types
///
/// Produced by collaborator implementations (cache, cookie jar). The wallet
/// itself never surfaces these from `set_current` - collaborator failures
/// during a transition are logged and swallowed.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
