//! Block and header types.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// A sealed block header.
///
/// The `hash` field carries the content hash assigned when the header was
/// sealed by its producer; this layer only reads it. A `gas_limit` of zero
/// means the limit was not embedded in the header and must be derived from
/// protocol parameters; a `base_fee` of `None` means the header predates
/// embedded base fees and the minimum gas price must be derived the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Block number/height.
    pub number: u64,
    /// Sealed block hash.
    pub hash: B256,
    /// Parent block hash.
    pub parent_hash: B256,
    /// State root after applying this block.
    pub state_root: B256,
    /// Transactions root.
    pub transactions_root: B256,
    /// Receipts root.
    pub receipts_root: B256,
    /// Validator/miner address.
    pub miner: Address,
    /// Gas limit for this block; zero when unset.
    pub gas_limit: u64,
    /// Total gas used in this block.
    pub gas_used: u64,
    /// Embedded base fee, when the header carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<U256>,
    /// Block timestamp (Unix seconds).
    pub timestamp: u64,
    /// Extra data (chain-specific).
    pub extra_data: Bytes,
}

impl Header {
    /// Whether the header embeds an explicit gas limit.
    pub fn has_gas_limit(&self) -> bool {
        self.gas_limit > 0
    }
}

/// Block body: the data fetched independently of the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Transactions included in the block.
    pub transactions: Vec<Transaction>,
}

/// A full block: sealed header plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// The sealed header.
    pub header: Header,
    /// The block body.
    pub body: Body,
}

impl Block {
    /// Build a block from a header and its body.
    pub fn new(header: Header, body: Body) -> Self {
        Self { header, body }
    }

    /// The block's sealed hash.
    pub fn hash(&self) -> B256 {
        self.header.hash
    }

    /// The block's number.
    pub fn number(&self) -> u64 {
        self.header.number
    }
}
