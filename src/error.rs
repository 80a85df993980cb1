//! Errors returned by versioned map operations.

use thiserror::Error;

/// Errors that can occur when managing a map's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `rollback` was called with no open transaction.
    #[error("no open transaction to roll back")]
    NothingToRollback,
    /// The checkpoint's revision is no longer retained by the map.
    #[error("checkpoint refers to a discarded revision")]
    StaleCheckpoint,
}
