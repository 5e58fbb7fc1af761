//! Error types for the engine surface.
//!
//! The transport layer is expected to validate requests before they
//! reach the engine, so [`RejectReason`] covers requests that arrive
//! malformed anyway, rather than being the primary validation. Queries
//! never fail for lack of data; an empty book or ledger is a valid
//! result, not an error.

use thiserror::Error;

/// Why an order was refused before entering the ingestion queue.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum RejectReason {
    /// Price was NaN or infinite.
    #[error("price must be a finite number")]
    NonFinitePrice,

    /// Price was below zero.
    #[error("price must be non-negative, got {0}")]
    NegativePrice(f64),

    /// Amount was zero; orders must carry at least one unit.
    #[error("amount must be at least 1")]
    ZeroAmount,
}

/// Failure modes of order submission.
///
/// Backpressure is intentionally absent here: a full ingestion queue is a
/// transient condition that submission waits out (logging each failed
/// attempt), not an error surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// The request failed boundary validation.
    #[error("order rejected: {0}")]
    Rejected(#[from] RejectReason),

    /// The engine has stopped accepting input.
    #[error("engine is shut down")]
    Shutdown,
}
