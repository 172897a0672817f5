//! Core chain data types for the Wisp light client.
//!
//! This crate provides the header, block, transaction, receipt, and
//! block-reference types shared between the chain access layer and the
//! collaborators that feed it (on-demand retrieval, chain registry,
//! execution). Wire serialization for the RPC surface lives elsewhere;
//! the serde derives here exist so collaborators can persist or ship
//! these types without re-modelling them.

pub mod block;
pub mod receipt;
pub mod reference;
pub mod transaction;

pub use block::{Block, Body, Header};
pub use receipt::{Log, Receipt};
pub use reference::{BlockNumber, BlockRef, NumberOrHash};
pub use transaction::Transaction;

/// Chain-wide configuration shared with RPC consumers.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Chain identifier used for replay protection.
    pub chain_id: u64,
}
