//! Protocol parameter evaluation.
//!
//! The gas limit and minimum gas price that govern a block live in contract
//! state, and the state that applies to block B is the one produced by B's
//! parent. Every operation here follows the same two-step shape: use the
//! header-embedded value when one exists, otherwise resolve the parent and
//! evaluate the parameter contract against the parent's state.
//!
//! Gas limit comes in a lenient and a strict variant. Estimation call
//! sites tolerate an approximate default when retrieval or evaluation
//! fails; fee-validation call sites need the exact value or a hard error.
//! These stay separate operations so callers pick the policy explicitly.

use alloy_primitives::{Address, U256};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use wisp_chain_types::{BlockRef, Header};

use crate::access::{ensure_live, ChainAccess};
use crate::contracts;
use crate::error::{ChainAccessError, ChainAccessResult};
use crate::execution::EvmRunner;

pub use crate::contracts::{
    DEFAULT_BLOCK_GAS_LIMIT, DEFAULT_INTRINSIC_GAS_FOR_ALTERNATIVE_CURRENCY,
};

impl ChainAccess {
    /// Gas limit of the referenced block, substituting
    /// [`DEFAULT_BLOCK_GAS_LIMIT`] when resolution or evaluation fails.
    pub async fn block_gas_limit(&self, cancel: &CancellationToken, reference: BlockRef) -> u64 {
        match self.evaluate_block_gas_limit(cancel, reference).await {
            Ok(limit) => limit,
            Err(err) => {
                warn!(%err, %reference, "cannot compute block gas limit, using default");
                DEFAULT_BLOCK_GAS_LIMIT
            }
        }
    }

    /// Gas limit of the referenced block, propagating failures with the
    /// failing stage named instead of substituting a default.
    pub async fn real_block_gas_limit(
        &self,
        cancel: &CancellationToken,
        reference: BlockRef,
    ) -> ChainAccessResult<u64> {
        self.evaluate_block_gas_limit(cancel, reference).await
    }

    async fn evaluate_block_gas_limit(
        &self,
        cancel: &CancellationToken,
        reference: BlockRef,
    ) -> ChainAccessResult<u64> {
        let header = self
            .header_by_ref(cancel, reference)
            .await
            .map_err(|err| ChainAccessError::evaluation("header lookup", reference, err))?;
        if header.has_gas_limit() {
            return Ok(header.gas_limit);
        }
        // The limit at the start of the block lives in the parent's
        // post-state; header.state_root is already past this block.
        let (state, parent) = self
            .parent_state_of(cancel, &header)
            .await
            .map_err(|err| ChainAccessError::evaluation("state lookup", reference, err))?;
        let runner = self.execution().runner(&parent, state);
        contracts::read_block_gas_limit(runner.as_ref()).map_err(|err| {
            ChainAccessError::evaluation("contract read", reference, ChainAccessError::Evm(err))
        })
    }

    /// Display minimum gas price for a currency at the given header.
    ///
    /// Fast path: a header-embedded base fee answers native-currency
    /// queries directly. Any currency override forces contract evaluation
    /// against the parent's state.
    pub async fn gas_price_minimum_for_header(
        &self,
        cancel: &CancellationToken,
        fee_currency: Option<Address>,
        header: &Header,
    ) -> ChainAccessResult<U256> {
        if let (Some(base_fee), None) = (header.base_fee, fee_currency) {
            return Ok(base_fee);
        }
        let (state, parent) = self.parent_state_of(cancel, header).await?;
        let runner = self.execution().runner(&parent, state);
        contracts::read_gas_price_minimum(runner.as_ref(), fee_currency)
            .map_err(ChainAccessError::Evm)
    }

    /// Raw (undiscounted) minimum gas price for a currency at the given
    /// header. Distinct from [`ChainAccess::gas_price_minimum_for_header`]:
    /// fee validation needs the raw value, fee display the rounded one.
    pub async fn real_gas_price_minimum_for_header(
        &self,
        cancel: &CancellationToken,
        fee_currency: Option<Address>,
        header: &Header,
    ) -> ChainAccessResult<U256> {
        if let (Some(base_fee), None) = (header.base_fee, fee_currency) {
            return Ok(base_fee);
        }
        let (state, parent) = self.parent_state_of(cancel, header).await?;
        let runner = self.execution().runner(&parent, state);
        contracts::read_real_gas_price_minimum(runner.as_ref(), fee_currency)
            .map_err(ChainAccessError::Evm)
    }

    /// Display minimum gas price for a currency at the current head.
    pub async fn current_gas_price_minimum(
        &self,
        cancel: &CancellationToken,
        fee_currency: Option<Address>,
    ) -> ChainAccessResult<U256> {
        let header = self.current_header();
        if let (Some(base_fee), None) = (header.base_fee, fee_currency) {
            return Ok(base_fee);
        }
        let runner = self.current_runner(cancel).await?;
        contracts::read_gas_price_minimum(runner.as_ref(), fee_currency)
            .map_err(ChainAccessError::Evm)
    }

    /// Intrinsic gas surcharge for transactions paying fees in a
    /// non-native currency.
    ///
    /// Informational only, so it never fails: this reads the current
    /// block's state (not a parent's — no consensus-critical ordering
    /// applies) and substitutes the protocol default on any failure.
    pub async fn intrinsic_gas_for_alternative_currency(
        &self,
        cancel: &CancellationToken,
    ) -> u64 {
        match self.current_runner(cancel).await {
            Ok(runner) => {
                contracts::read_intrinsic_gas_for_alternative_currency_or_default(runner.as_ref())
            }
            Err(err) => {
                warn!(%err, "cannot read intrinsic gas for alternative fee currency");
                DEFAULT_INTRINSIC_GAS_FOR_ALTERNATIVE_CURRENCY
            }
        }
    }

    /// Suggest a gas price for the given fee currency, scaled by the
    /// configured multiplier.
    pub async fn suggest_price(
        &self,
        cancel: &CancellationToken,
        fee_currency: Option<Address>,
    ) -> ChainAccessResult<U256> {
        let base_fee = self.current_header().base_fee;
        let runner = self.current_runner(cancel).await?;
        self.gas_price_oracle()
            .suggest_price(
                runner.as_ref(),
                fee_currency,
                base_fee,
                self.settings().gas_price_multiplier_percent,
            )
            .map_err(ChainAccessError::Evm)
    }

    /// Suggest a priority fee (tip cap) for the given fee currency.
    pub async fn suggest_gas_tip_cap(
        &self,
        cancel: &CancellationToken,
        fee_currency: Option<Address>,
    ) -> ChainAccessResult<U256> {
        let runner = self.current_runner(cancel).await?;
        self.gas_price_oracle()
            .suggest_tip_cap(runner.as_ref(), fee_currency)
            .map_err(ChainAccessError::Evm)
    }

    /// A contract-call runner over the current head and its state.
    async fn current_runner(
        &self,
        cancel: &CancellationToken,
    ) -> ChainAccessResult<Box<dyn EvmRunner>> {
        ensure_live(cancel)?;
        let header = self.current_header();
        let state = self.state_at(cancel, &header).await?;
        Ok(self.execution().runner(&header, state))
    }
}
