//! Error types for the feed layer.

use crate::wire::WireError;
use thiserror::Error;

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur in feed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The listing source failed (network, backend outage).
    #[error("source error: {0}")]
    Source(String),

    /// A change payload could not be decoded.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),
}
