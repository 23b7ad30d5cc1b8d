//! Effect boundary error types.

use thiserror::Error;

/// Errors that can occur while an effect runs.
///
/// These never escape the effect boundary: a reducer cannot handle them, so
/// the store either routes them through a `catch` handler or drops the
/// effect's resolution after logging.
#[derive(Debug, Error)]
pub enum EffectError {
    /// Underlying I/O operation failed
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be decoded (or encoded)
    #[error("decode failure: {0}")]
    Decode(#[from] serde_json::Error),

    /// A lookup collaborator could not produce a value
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// A background task backing the effect panicked or was aborted
    #[error("background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
