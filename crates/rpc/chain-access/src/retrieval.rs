//! Collaborator interfaces for on-demand data retrieval.
//!
//! A stateless client keeps no chain data locally; everything beyond the
//! current header is fetched from peers when a call asks for it. The traits
//! here are what this layer consumes — implementations live with the
//! retrieval protocol, and any caching is theirs to do, not ours.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use wisp_chain_types::{Block, Header, Log, Receipt, Transaction};

use crate::error::RetrievalError;

/// Read-only, point-in-time projection of account and contract storage at a
/// given header.
///
/// Views may be lazy: a read can trigger a per-slot network fetch through
/// the retrieval protocol, which is why every accessor can fail with a
/// [`RetrievalError`]. Implementations capture the cancellation token of
/// the call that materialized them, so lazy fetches stay cancellable. The
/// view's lifetime is bounded to that call; it is never cached here.
pub trait StateView: Send + Sync {
    /// Account balance.
    fn balance(&self, address: Address) -> Result<U256, RetrievalError>;

    /// Account nonce.
    fn nonce(&self, address: Address) -> Result<u64, RetrievalError>;

    /// Contract code, empty for externally owned accounts.
    fn code(&self, address: Address) -> Result<Vec<u8>, RetrievalError>;

    /// A single storage slot.
    fn storage(&self, address: Address, slot: B256) -> Result<B256, RetrievalError>;
}

/// On-demand retrieval of chain data from peers.
///
/// Every operation may block on network round-trips and must honor the
/// cancellation token: a signalled token completes the call with
/// [`RetrievalError::Cancelled`] promptly instead of leaving it in flight.
#[async_trait]
pub trait OnDemandRetrieval: Send + Sync {
    /// Fetch a header by its sealed hash.
    async fn header_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Header, RetrievalError>;

    /// Fetch the canonical header at a height.
    async fn header_by_number(
        &self,
        cancel: &CancellationToken,
        number: u64,
    ) -> Result<Header, RetrievalError>;

    /// Fetch a full block (header and body) by hash.
    async fn block_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Block, RetrievalError>;

    /// Materialize a state view at the given header.
    async fn state_at(
        &self,
        cancel: &CancellationToken,
        header: &Header,
    ) -> Result<Box<dyn StateView>, RetrievalError>;

    /// Fetch the receipts of the block with the given hash.
    async fn receipts_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Vec<Receipt>, RetrievalError>;

    /// Fetch the logs of the block with the given hash, grouped per transaction.
    async fn logs_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Vec<Vec<Log>>, RetrievalError>;

    /// Look up a mined transaction and its inclusion position.
    async fn transaction_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<IncludedTransaction, RetrievalError>;

    /// Total difficulty of the chain up to the block with the given hash.
    async fn total_difficulty_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<U256, RetrievalError>;
}

/// A mined transaction together with where it was included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedTransaction {
    /// The transaction itself.
    pub transaction: Transaction,
    /// Hash of the including block.
    pub block_hash: B256,
    /// Number of the including block.
    pub block_number: u64,
    /// Index within the including block.
    pub index: u64,
}

/// Local chain knowledge: the head and the canonical number-to-hash mapping.
///
/// Unlike [`OnDemandRetrieval`] these answers come from the header chain the
/// client already synchronized, so they are synchronous and infallible.
pub trait ChainRegistry: Send + Sync {
    /// The current chain head.
    fn current_header(&self) -> Header;

    /// The canonical hash recorded at a height, if the height is known.
    fn canonical_hash_at(&self, number: u64) -> Option<B256>;

    /// Number of bloom-bit sections the chain has indexed.
    fn bloom_sections(&self) -> u64;
}
