//! Collaborator interfaces for read-only EVM execution and fee suggestion.

use alloy_primitives::{Address, Bytes, U256};

use wisp_chain_types::Header;

use crate::error::EvmError;
use crate::retrieval::StateView;

/// A call message for an EVM execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMessage {
    /// Sender address.
    pub from: Address,
    /// Recipient address (None for contract creation).
    pub to: Option<Address>,
    /// Value transferred.
    pub value: U256,
    /// Gas limit for the call.
    pub gas: u64,
    /// Gas price the caller offers.
    pub gas_price: U256,
    /// Currency the fee is denominated in; `None` means the native asset.
    pub fee_currency: Option<Address>,
    /// Call data.
    pub input: Bytes,
}

/// Outcome of executing a call message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    /// Return data.
    pub output: Bytes,
    /// Gas consumed by the call.
    pub gas_used: u64,
}

/// Read-only contract-call runner bound to one (header, state) pair.
///
/// Calls are static: they cannot modify state or transfer value. Lazy state
/// reads behind a call surface as [`EvmError::State`].
pub trait EvmRunner: Send + Sync {
    /// Execute a read-only call against `to` with the given input.
    fn call(&self, to: Address, input: Bytes, gas: u64) -> Result<Bytes, EvmError>;
}

/// An EVM execution context prepared for a single call message.
pub trait EvmContext: Send {
    /// Run the message to completion.
    fn execute(self: Box<Self>) -> Result<CallOutcome, EvmError>;
}

/// Produces EVM execution machinery over a resolved (header, state) pair.
pub trait ExecutionFactory: Send + Sync {
    /// A read-only contract-call runner.
    fn runner(&self, header: &Header, state: Box<dyn StateView>) -> Box<dyn EvmRunner>;

    /// A full execution context for the given call message.
    fn context(
        &self,
        header: &Header,
        state: Box<dyn StateView>,
        message: CallMessage,
    ) -> Box<dyn EvmContext>;
}

/// Gas price suggestion algorithm.
///
/// Suggestions are computed from on-chain fee parameters read through the
/// supplied runner; the multiplier lets operators pad the suggestion for
/// faster inclusion.
pub trait GasPriceOracle: Send + Sync {
    /// Suggest a gas price for the given fee currency.
    ///
    /// `base_fee` is the current header's embedded base fee, when present;
    /// `multiplier_percent` scales the suggestion (100 = no padding).
    fn suggest_price(
        &self,
        runner: &dyn EvmRunner,
        fee_currency: Option<Address>,
        base_fee: Option<U256>,
        multiplier_percent: u64,
    ) -> Result<U256, EvmError>;

    /// Suggest a priority fee (tip cap) for the given fee currency.
    fn suggest_tip_cap(
        &self,
        runner: &dyn EvmRunner,
        fee_currency: Option<Address>,
    ) -> Result<U256, EvmError>;
}
