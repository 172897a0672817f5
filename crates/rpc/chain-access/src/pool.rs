//! Transaction pool collaborator interface.
//!
//! The pool lives with the transaction relay; this layer only passes calls
//! through for RPC inspection and submission endpoints.

use std::collections::BTreeMap;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use wisp_chain_types::Transaction;

use crate::error::PoolError;

/// Pending/queued counts for pool inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Transactions ready for inclusion.
    pub pending: usize,
    /// Transactions waiting on a nonce gap.
    pub queued: usize,
}

/// Full pool contents keyed by sender.
#[derive(Debug, Clone, Default)]
pub struct PoolContent {
    /// Pending transactions per sender.
    pub pending: BTreeMap<Address, Vec<Transaction>>,
    /// Queued transactions per sender.
    pub queued: BTreeMap<Address, Vec<Transaction>>,
}

/// The transaction pool as seen by the RPC surface.
#[async_trait]
pub trait TransactionPool: Send + Sync {
    /// Submit a signed transaction. May validate against remote state, so it
    /// is cancellable.
    async fn add(&self, cancel: &CancellationToken, tx: Transaction) -> Result<(), PoolError>;

    /// Drop a transaction from the pool.
    fn remove(&self, hash: B256);

    /// All transactions currently in the pool.
    fn transactions(&self) -> Vec<Transaction>;

    /// A single pool transaction by hash.
    fn transaction(&self, hash: B256) -> Option<Transaction>;

    /// The next nonce the pool would accept for a sender. May consult remote
    /// state for the on-chain nonce, so it is cancellable.
    async fn nonce(&self, cancel: &CancellationToken, address: Address) -> Result<u64, PoolError>;

    /// Pending/queued counts.
    fn stats(&self) -> PoolStats;

    /// Full pool contents.
    fn content(&self) -> PoolContent;

    /// Pool contents for one sender: (pending, queued).
    fn content_from(&self, address: Address) -> (Vec<Transaction>, Vec<Transaction>);

    /// Subscribe to transactions newly admitted to the pool.
    fn subscribe_new_transactions(&self) -> broadcast::Receiver<Transaction>;
}
