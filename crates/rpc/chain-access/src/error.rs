//! Error types for chain access operations.

use alloy_primitives::B256;
use thiserror::Error;

/// Errors surfaced by the on-demand retrieval collaborator.
///
/// Retrieval reaches the network, so every operation can time out or be
/// cancelled; `NotFound` means the peers answered and the data does not
/// exist (or is past their retention horizon).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetrievalError {
    /// The requested data is not available from any peer.
    #[error("data not available from peers")]
    NotFound,

    /// No peer answered within the retrieval deadline.
    #[error("retrieval timed out")]
    Timeout,

    /// The caller cancelled the request while it was in flight.
    #[error("retrieval cancelled")]
    Cancelled,

    /// Transport-level failure (connection loss, protocol error).
    #[error("retrieval transport failure: {0}")]
    Transport(String),
}

/// Errors from read-only contract execution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvmError {
    /// The contract call reverted.
    #[error("execution reverted: {0}")]
    Reverted(String),

    /// The call ran out of gas.
    #[error("out of gas")]
    OutOfGas,

    /// A lazy state read behind the call failed.
    #[error("state access failed: {0}")]
    State(#[from] RetrievalError),

    /// The call or its return data was malformed.
    #[error("invalid call: {0}")]
    InvalidCall(String),
}

/// Errors from the transaction pool collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// The pool rejected the transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The pool is shutting down.
    #[error("transaction pool closed")]
    Closed,
}

/// Errors from chain access configuration validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric field that must be positive was zero.
    #[error("{field} must be greater than zero")]
    MustBePositive {
        /// The offending field.
        field: &'static str,
    },

    /// A rate/multiplier field is outside its allowed range.
    #[error("{field} out of range: {message}")]
    OutOfRange {
        /// The offending field.
        field: &'static str,
        /// What the allowed range is.
        message: String,
    },
}

/// Errors returned by chain access operations.
#[derive(Debug, Error)]
pub enum ChainAccessError {
    /// The reference does not resolve to a known header or block.
    #[error("not found: {0}")]
    NotFound(String),

    /// The header is known but the block body could not be retrieved.
    ///
    /// Headers and bodies are fetched independently, so this is a distinct
    /// outcome from [`ChainAccessError::NotFound`].
    #[error("header found, but block body is missing: {0}")]
    BodyMissing(B256),

    /// A hash reference resolved, but the hash is not on the canonical chain.
    #[error("hash {hash} is not currently canonical (height {number})")]
    NonCanonical {
        /// The requested hash.
        hash: B256,
        /// The height the resolved header claims.
        number: u64,
    },

    /// Neither a block number nor a hash was supplied.
    #[error("invalid reference: neither block number nor hash specified")]
    InvalidReference,

    /// The retrieval collaborator failed (network, timeout).
    #[error("retrieval failed: {0}")]
    Retrieval(RetrievalError),

    /// Read-only contract execution failed.
    #[error("contract evaluation failed: {0}")]
    Evm(#[from] EvmError),

    /// A protocol parameter computation failed at a named stage.
    #[error("{stage} failed for block {reference}: {source}")]
    Evaluation {
        /// Which stage failed: header lookup, state lookup, or contract read.
        stage: &'static str,
        /// The reference the computation was running for.
        reference: String,
        /// The underlying failure.
        #[source]
        source: Box<ChainAccessError>,
    },

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

impl ChainAccessError {
    /// Wrap an error as a named evaluation stage failure.
    pub fn evaluation(
        stage: &'static str,
        reference: impl ToString,
        source: ChainAccessError,
    ) -> Self {
        ChainAccessError::Evaluation {
            stage,
            reference: reference.to_string(),
            source: Box::new(source),
        }
    }

    /// Map a retrieval failure, keeping not-found and cancellation distinct.
    pub fn from_retrieval(what: impl ToString, err: RetrievalError) -> Self {
        match err {
            RetrievalError::NotFound => ChainAccessError::NotFound(what.to_string()),
            RetrievalError::Cancelled => ChainAccessError::Cancelled,
            other => ChainAccessError::Retrieval(other),
        }
    }

    /// Whether this error (or its evaluation source) is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        match self {
            ChainAccessError::Cancelled => true,
            ChainAccessError::Retrieval(RetrievalError::Cancelled) => true,
            ChainAccessError::Evaluation { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}

/// Result type for chain access operations.
pub type ChainAccessResult<T> = Result<T, ChainAccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_not_found_maps_to_not_found() {
        let err = ChainAccessError::from_retrieval("header 0xabc", RetrievalError::NotFound);
        assert!(matches!(err, ChainAccessError::NotFound(what) if what == "header 0xabc"));
    }

    #[test]
    fn retrieval_cancellation_stays_distinct_from_not_found() {
        let err = ChainAccessError::from_retrieval("header 0xabc", RetrievalError::Cancelled);
        assert!(matches!(err, ChainAccessError::Cancelled));
        assert!(err.is_cancelled());
    }

    #[test]
    fn evaluation_display_names_the_failing_stage() {
        let err = ChainAccessError::evaluation(
            "state lookup",
            "12",
            ChainAccessError::Retrieval(RetrievalError::Timeout),
        );
        let message = err.to_string();
        assert!(message.contains("state lookup failed"), "got: {message}");
        assert!(message.contains("12"), "got: {message}");
    }
}
