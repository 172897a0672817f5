//! Chain access layer for a stateless light client.
//!
//! This crate answers RPC-style chain queries — headers, blocks, state,
//! receipts, logs, transactions, and protocol-parameter-derived fee values —
//! without holding chain state locally. Anything beyond the current header
//! is fetched from peers on demand, and protocol parameters are computed by
//! read-only contract calls against the right state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    RPC handlers                     │
//! └──────────────────────────┬──────────────────────────┘
//!                            │
//!              ┌─────────────▼─────────────┐
//!              │        ChainAccess        │
//!              │  resolve → state → eval   │
//!              └─────────────┬─────────────┘
//!                            │
//!     ┌──────────────┬───────┼────────┬───────────────┐
//!     │              │       │        │               │
//!     ▼              ▼       ▼        ▼               ▼
//! ┌─────────┐ ┌──────────┐ ┌─────┐ ┌───────────┐ ┌────────┐
//! │Retrieval│ │ Registry │ │ EVM │ │ Gas price │ │  Pool  │
//! │ (peers) │ │  (head)  │ │     │ │  oracle   │ │        │
//! └─────────┘ └──────────┘ └─────┘ └───────────┘ └────────┘
//! ```
//!
//! Three responsibilities cooperate behind [`ChainAccess`]:
//!
//! - **reference resolution** turns a [`wisp_chain_types::BlockRef`]
//!   (number, `latest`, `pending`, hash, or number-or-hash) into a
//!   canonically-checked header or block;
//! - **state materialization** produces a read-only [`StateView`] for a
//!   resolved header, including the parent-state path that parameter
//!   evaluation depends on;
//! - **protocol parameter evaluation** computes block gas limit, minimum
//!   gas price per fee currency, and the intrinsic gas surcharge via
//!   read-only contract calls, each with a header-override fast path and
//!   lenient/strict failure policies.
//!
//! Every operation that can reach the network carries a
//! [`tokio_util::sync::CancellationToken`] and completes with
//! [`ChainAccessError::Cancelled`] promptly once it is signalled.

pub mod access;
pub mod config;
pub mod contracts;
pub mod error;
pub mod events;
pub mod execution;
pub mod filter;
pub mod mock;
pub mod params;
pub mod pool;
pub mod retrieval;

pub use access::ChainAccess;
pub use config::{ChainAccessConfig, FilterConfig};
pub use contracts::{DEFAULT_BLOCK_GAS_LIMIT, DEFAULT_INTRINSIC_GAS_FOR_ALTERNATIVE_CURRENCY};
pub use error::{
    ChainAccessError, ChainAccessResult, ConfigError, EvmError, PoolError, RetrievalError,
};
pub use events::ChainEvents;
pub use execution::{
    CallMessage, CallOutcome, EvmContext, EvmRunner, ExecutionFactory, GasPriceOracle,
};
pub use filter::{FilterSession, BLOOM_BITS_BLOCKS};
pub use pool::{PoolContent, PoolStats, TransactionPool};
pub use retrieval::{ChainRegistry, IncludedTransaction, OnDemandRetrieval, StateView};
