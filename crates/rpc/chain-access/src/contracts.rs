//! Read bindings for the on-chain protocol parameter contracts.
//!
//! Block gas limit, minimum gas price, and the intrinsic gas surcharge for
//! alternative fee currencies are governed by contracts deployed at fixed
//! protocol addresses. Reads go through an [`EvmRunner`] bound to the state
//! the caller picked; selector and ABI handling come from the `sol!`
//! bindings.
//!
//! Gas limit and intrinsic gas each come in a strict and an `_or_default`
//! form: estimation paths tolerate a stale default, fee-critical paths do
//! not.

use alloy_primitives::{address, Address, U256};
use alloy_sol_types::{sol, SolCall};
use tracing::warn;

use crate::error::EvmError;
use crate::execution::EvmRunner;

sol! {
    /// Protocol parameter registry.
    interface IBlockchainParameters {
        /// Governed block gas limit.
        function blockGasLimit() external view returns (uint256);

        /// Intrinsic gas surcharge for transactions paying fees in a
        /// non-native currency.
        function intrinsicGasForAlternativeFeeCurrency() external view returns (uint256);
    }

    /// Minimum gas price registry, one entry per fee currency.
    interface IGasPriceMinimum {
        /// Display value of the minimum gas price for a currency.
        function getGasPriceMinimum(address token) external view returns (uint256);

        /// Raw (undiscounted) minimum gas price for a currency.
        function getRealGasPriceMinimum(address token) external view returns (uint256);
    }
}

/// Address of the protocol parameter registry contract.
pub const BLOCKCHAIN_PARAMETERS_ADDRESS: Address =
    address!("00000000000000000000000000000000000000f1");

/// Address of the minimum gas price registry contract.
pub const GAS_PRICE_MINIMUM_ADDRESS: Address =
    address!("00000000000000000000000000000000000000f2");

/// Token address standing in for the native asset in registry lookups.
pub const NATIVE_TOKEN_ADDRESS: Address = Address::ZERO;

/// Gas allowance for protocol parameter reads.
pub const PARAMETER_READ_GAS: u64 = 2_000_000;

/// Block gas limit used when the registry cannot be read.
pub const DEFAULT_BLOCK_GAS_LIMIT: u64 = 20_000_000;

/// Intrinsic gas surcharge used when the registry cannot be read.
pub const DEFAULT_INTRINSIC_GAS_FOR_ALTERNATIVE_CURRENCY: u64 = 50_000;

fn decode_err(what: &'static str) -> impl FnOnce(alloy_sol_types::Error) -> EvmError {
    move |err| EvmError::InvalidCall(format!("decode {what}: {err}"))
}

fn into_u64(what: &'static str, value: U256) -> Result<u64, EvmError> {
    u64::try_from(value).map_err(|_| EvmError::InvalidCall(format!("{what} exceeds u64: {value}")))
}

/// Read the governed block gas limit.
pub fn read_block_gas_limit(runner: &dyn EvmRunner) -> Result<u64, EvmError> {
    let input = IBlockchainParameters::blockGasLimitCall {}.abi_encode();
    let output = runner.call(
        BLOCKCHAIN_PARAMETERS_ADDRESS,
        input.into(),
        PARAMETER_READ_GAS,
    )?;
    let decoded = IBlockchainParameters::blockGasLimitCall::abi_decode_returns(&output, true)
        .map_err(decode_err("block gas limit"))?;
    into_u64("block gas limit", decoded._0)
}

/// Read the governed block gas limit, substituting the protocol default on
/// failure.
pub fn read_block_gas_limit_or_default(runner: &dyn EvmRunner) -> u64 {
    match read_block_gas_limit(runner) {
        Ok(limit) => limit,
        Err(err) => {
            warn!(%err, "cannot read block gas limit, using default");
            DEFAULT_BLOCK_GAS_LIMIT
        }
    }
}

/// Read the intrinsic gas surcharge for alternative fee currencies.
pub fn read_intrinsic_gas_for_alternative_currency(
    runner: &dyn EvmRunner,
) -> Result<u64, EvmError> {
    let input = IBlockchainParameters::intrinsicGasForAlternativeFeeCurrencyCall {}.abi_encode();
    let output = runner.call(
        BLOCKCHAIN_PARAMETERS_ADDRESS,
        input.into(),
        PARAMETER_READ_GAS,
    )?;
    let decoded =
        IBlockchainParameters::intrinsicGasForAlternativeFeeCurrencyCall::abi_decode_returns(
            &output, true,
        )
        .map_err(decode_err("intrinsic gas"))?;
    into_u64("intrinsic gas", decoded._0)
}

/// Read the intrinsic gas surcharge, substituting the protocol default on
/// failure.
pub fn read_intrinsic_gas_for_alternative_currency_or_default(runner: &dyn EvmRunner) -> u64 {
    match read_intrinsic_gas_for_alternative_currency(runner) {
        Ok(gas) => gas,
        Err(err) => {
            warn!(%err, "cannot read intrinsic gas for alternative fee currency, using default");
            DEFAULT_INTRINSIC_GAS_FOR_ALTERNATIVE_CURRENCY
        }
    }
}

/// Read the display minimum gas price for a fee currency.
pub fn read_gas_price_minimum(
    runner: &dyn EvmRunner,
    fee_currency: Option<Address>,
) -> Result<U256, EvmError> {
    let token = fee_currency.unwrap_or(NATIVE_TOKEN_ADDRESS);
    let input = IGasPriceMinimum::getGasPriceMinimumCall { token }.abi_encode();
    let output = runner.call(GAS_PRICE_MINIMUM_ADDRESS, input.into(), PARAMETER_READ_GAS)?;
    let decoded = IGasPriceMinimum::getGasPriceMinimumCall::abi_decode_returns(&output, true)
        .map_err(decode_err("gas price minimum"))?;
    Ok(decoded._0)
}

/// Read the raw (undiscounted) minimum gas price for a fee currency.
pub fn read_real_gas_price_minimum(
    runner: &dyn EvmRunner,
    fee_currency: Option<Address>,
) -> Result<U256, EvmError> {
    let token = fee_currency.unwrap_or(NATIVE_TOKEN_ADDRESS);
    let input = IGasPriceMinimum::getRealGasPriceMinimumCall { token }.abi_encode();
    let output = runner.call(GAS_PRICE_MINIMUM_ADDRESS, input.into(), PARAMETER_READ_GAS)?;
    let decoded = IGasPriceMinimum::getRealGasPriceMinimumCall::abi_decode_returns(&output, true)
        .map_err(decode_err("real gas price minimum"))?;
    Ok(decoded._0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;
    use alloy_sol_types::SolValue;
    use parking_lot::Mutex;

    /// Runner that records the call and replays a fixed answer.
    struct RecordingRunner {
        calls: Mutex<Vec<(Address, Bytes)>>,
        response: Result<Bytes, EvmError>,
    }

    impl RecordingRunner {
        fn returning(value: U256) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                response: Ok(value.abi_encode().into()),
            }
        }

        fn failing(err: EvmError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                response: Err(err),
            }
        }
    }

    impl EvmRunner for RecordingRunner {
        fn call(&self, to: Address, input: Bytes, _gas: u64) -> Result<Bytes, EvmError> {
            self.calls.lock().push((to, input));
            self.response.clone()
        }
    }

    #[test]
    fn block_gas_limit_targets_the_parameter_registry() {
        let runner = RecordingRunner::returning(U256::from(30_000_000u64));

        let limit = read_block_gas_limit(&runner).expect("read should succeed");

        assert_eq!(limit, 30_000_000);
        let calls = runner.calls.lock();
        assert_eq!(calls.len(), 1);
        let (to, input) = &calls[0];
        assert_eq!(*to, BLOCKCHAIN_PARAMETERS_ADDRESS);
        assert_eq!(
            &input[..4],
            IBlockchainParameters::blockGasLimitCall::SELECTOR
        );
    }

    #[test]
    fn failed_read_falls_back_to_protocol_default() {
        let runner = RecordingRunner::failing(EvmError::Reverted("no registry".to_string()));

        assert_eq!(
            read_block_gas_limit_or_default(&runner),
            DEFAULT_BLOCK_GAS_LIMIT
        );
        assert_eq!(
            read_intrinsic_gas_for_alternative_currency_or_default(&runner),
            DEFAULT_INTRINSIC_GAS_FOR_ALTERNATIVE_CURRENCY
        );
    }

    #[test]
    fn gas_price_minimum_substitutes_native_token_for_no_currency() {
        let runner = RecordingRunner::returning(U256::from(100u64));

        let price =
            read_gas_price_minimum(&runner, None).expect("native currency read should succeed");

        assert_eq!(price, U256::from(100u64));
        let calls = runner.calls.lock();
        let (_, input) = &calls[0];
        let decoded = IGasPriceMinimum::getGasPriceMinimumCall::abi_decode(input, true)
            .expect("recorded input should decode");
        assert_eq!(decoded.token, NATIVE_TOKEN_ADDRESS);
    }

    #[test]
    fn real_gas_price_minimum_uses_a_distinct_selector() {
        assert_ne!(
            IGasPriceMinimum::getGasPriceMinimumCall::SELECTOR,
            IGasPriceMinimum::getRealGasPriceMinimumCall::SELECTOR,
        );
    }

    #[test]
    fn oversized_values_are_rejected_not_truncated() {
        let runner = RecordingRunner::returning(U256::MAX);

        let err = read_block_gas_limit(&runner).expect_err("u64 overflow should fail");

        assert!(matches!(err, EvmError::InvalidCall(message) if message.contains("exceeds u64")));
    }
}
