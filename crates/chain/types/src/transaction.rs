//! Transaction types.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// A chain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash.
    pub hash: B256,
    /// Sender nonce.
    pub nonce: u64,
    /// Recovered sender address.
    pub from: Address,
    /// Recipient address (None for contract creation).
    pub to: Option<Address>,
    /// Value transferred.
    pub value: U256,
    /// Gas limit.
    pub gas: u64,
    /// Gas price the sender is willing to pay.
    pub gas_price: U256,
    /// Currency the fee is denominated in; `None` means the native asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_currency: Option<Address>,
    /// Call data / init code.
    pub input: Bytes,
}

impl Transaction {
    /// Whether the fee is paid in a non-native currency.
    pub fn pays_fee_in_alternative_currency(&self) -> bool {
        self.fee_currency.is_some()
    }
}
