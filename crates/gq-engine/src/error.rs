//! Error types for the persistence layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading or saving a ledger.
///
/// A session never propagates these. It logs them and carries on with the
/// in-memory ledger.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value is not a valid ledger.
    #[error("malformed ledger: {0}")]
    Serde(#[from] serde_json::Error),

    /// The session key cannot be used as a storage name.
    #[error("invalid session key: {0:?}")]
    InvalidKey(String),
}
