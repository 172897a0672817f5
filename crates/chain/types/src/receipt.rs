//! Receipt and log types.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// A log emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Contract address that emitted the log.
    pub address: Address,
    /// Indexed topics (up to 4).
    pub topics: Vec<B256>,
    /// Log data.
    pub data: Bytes,
    /// Number of the block this log was emitted in.
    pub block_number: u64,
    /// Hash of the transaction that emitted this log.
    pub transaction_hash: B256,
    /// Index of the log within the block.
    pub log_index: u64,
    /// Whether this log was removed by a chain reorganization.
    #[serde(default)]
    pub removed: bool,
}

/// A transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to.
    pub transaction_hash: B256,
    /// Index of the transaction within its block.
    pub transaction_index: u32,
    /// Execution status (1 = success, 0 = failure).
    pub status: u64,
    /// Gas used by this transaction.
    pub gas_used: u64,
    /// Cumulative gas used in the block up to this transaction.
    pub cumulative_gas_used: u64,
    /// Created contract address, for contract-creation transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    /// Logs emitted by this transaction.
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Status code for a successful transaction.
    pub const STATUS_SUCCESS: u64 = 1;
    /// Status code for a failed transaction.
    pub const STATUS_FAILURE: u64 = 0;

    /// Whether the transaction executed successfully.
    pub fn succeeded(&self) -> bool {
        self.status == Self::STATUS_SUCCESS
    }
}
