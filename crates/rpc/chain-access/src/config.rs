//! Chain access configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Worker pool settings for bloom filter servicing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of workers servicing one filtering session.
    pub workers: usize,
    /// Bloom retrieval requests pulled per batch.
    pub batch_size: usize,
    /// How long a worker waits to fill a batch before servicing a partial one,
    /// in milliseconds.
    pub wait_ms: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            batch_size: 16,
            wait_ms: 1,
        }
    }
}

impl FilterConfig {
    /// The batch wait interval as a [`Duration`].
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

/// Configuration for the chain access layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainAccessConfig {
    /// Gas cap applied to RPC-originated calls and estimations.
    pub rpc_gas_cap: u64,
    /// Fee cap (in native units) applied to RPC-submitted transactions.
    pub rpc_tx_fee_cap: f64,
    /// Inflation applied to RPC gas estimations to absorb parameter drift.
    pub gas_inflation_rate: f64,
    /// Multiplier applied to gas price suggestions, in percent (100 = none).
    pub gas_price_multiplier_percent: u64,
    /// Whether responses mimic upstream Ethereum field conventions.
    pub eth_compatibility: bool,
    /// Whether externally reachable RPC is enabled.
    pub ext_rpc_enabled: bool,
    /// Whether transactions without replay protection are accepted.
    pub allow_unprotected_txs: bool,
    /// Bloom filter servicing worker pool.
    pub filter: FilterConfig,
}

impl Default for ChainAccessConfig {
    fn default() -> Self {
        Self {
            rpc_gas_cap: 50_000_000,
            rpc_tx_fee_cap: 1.0,
            gas_inflation_rate: 1.3,
            gas_price_multiplier_percent: 100,
            eth_compatibility: true,
            ext_rpc_enabled: false,
            allow_unprotected_txs: false,
            filter: FilterConfig::default(),
        }
    }
}

impl ChainAccessConfig {
    /// Validate field ranges before wiring the layer up.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_gas_cap == 0 {
            return Err(ConfigError::MustBePositive {
                field: "rpc_gas_cap",
            });
        }
        if self.gas_price_multiplier_percent == 0 {
            return Err(ConfigError::MustBePositive {
                field: "gas_price_multiplier_percent",
            });
        }
        if self.filter.workers == 0 {
            return Err(ConfigError::MustBePositive {
                field: "filter.workers",
            });
        }
        if self.filter.batch_size == 0 {
            return Err(ConfigError::MustBePositive {
                field: "filter.batch_size",
            });
        }
        if !self.gas_inflation_rate.is_finite() || self.gas_inflation_rate < 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "gas_inflation_rate",
                message: "must be a finite value >= 1.0".to_string(),
            });
        }
        if !self.rpc_tx_fee_cap.is_finite() || self.rpc_tx_fee_cap < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "rpc_tx_fee_cap",
                message: "must be a finite value >= 0.0 (0 disables the cap)".to_string(),
            });
        }
        Ok(())
    }
}
