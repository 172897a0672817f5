//! The chain access layer: resolves block references, materializes state,
//! and passes pool and subscription traffic through.
//!
//! All chain data beyond the current header is fetched on demand through
//! the retrieval collaborator; nothing is cached here. Every operation that
//! can reach the network takes a cancellation token and checks it before
//! each retrieval boundary.

use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use wisp_chain_types::{
    Block, BlockNumber, BlockRef, Body, ChainConfig, Header, Log, NumberOrHash, Receipt,
    Transaction,
};

use crate::config::ChainAccessConfig;
use crate::error::{ChainAccessError, ChainAccessResult, PoolError};
use crate::events::ChainEvents;
use crate::execution::{CallMessage, EvmContext, EvmRunner, ExecutionFactory, GasPriceOracle};
use crate::pool::{PoolContent, PoolStats, TransactionPool};
use crate::retrieval::{ChainRegistry, IncludedTransaction, OnDemandRetrieval, StateView};

/// Capacity of the never-firing pending-logs channel.
const PENDING_LOGS_CHANNEL_CAPACITY: usize = 1;

/// Stateless chain access over constructor-injected collaborators.
///
/// Holds no chain data and no cache of its own: the registry knows the
/// current head and the canonical number-to-hash mapping, everything else
/// comes from on-demand retrieval per call. Concurrent calls are fully
/// independent.
pub struct ChainAccess {
    retrieval: Arc<dyn OnDemandRetrieval>,
    registry: Arc<dyn ChainRegistry>,
    execution: Arc<dyn ExecutionFactory>,
    gas_price_oracle: Arc<dyn GasPriceOracle>,
    pool: Arc<dyn TransactionPool>,
    events: Arc<dyn ChainEvents>,
    chain_config: ChainConfig,
    config: ChainAccessConfig,
    // Kept alive so pending-logs subscriptions stay open without ever firing.
    pending_logs: broadcast::Sender<Vec<Log>>,
}

impl ChainAccess {
    /// Wire up the access layer from its collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_config: ChainConfig,
        config: ChainAccessConfig,
        retrieval: Arc<dyn OnDemandRetrieval>,
        registry: Arc<dyn ChainRegistry>,
        execution: Arc<dyn ExecutionFactory>,
        gas_price_oracle: Arc<dyn GasPriceOracle>,
        pool: Arc<dyn TransactionPool>,
        events: Arc<dyn ChainEvents>,
    ) -> Self {
        let (pending_logs, _) = broadcast::channel(PENDING_LOGS_CHANNEL_CAPACITY);
        Self {
            retrieval,
            registry,
            execution,
            gas_price_oracle,
            pool,
            events,
            chain_config,
            config,
            pending_logs,
        }
    }

    /// The chain configuration.
    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain_config
    }

    /// Gas cap applied to RPC-originated calls.
    pub fn rpc_gas_cap(&self) -> u64 {
        self.config.rpc_gas_cap
    }

    /// Fee cap applied to RPC-submitted transactions, in native units.
    pub fn rpc_tx_fee_cap(&self) -> f64 {
        self.config.rpc_tx_fee_cap
    }

    /// Inflation applied to RPC gas estimations.
    pub fn gas_inflation_rate(&self) -> f64 {
        self.config.gas_inflation_rate
    }

    /// Whether externally reachable RPC is enabled.
    pub fn ext_rpc_enabled(&self) -> bool {
        self.config.ext_rpc_enabled
    }

    /// Whether transactions without replay protection are accepted.
    pub fn unprotected_allowed(&self) -> bool {
        self.config.allow_unprotected_txs
    }

    /// Whether responses mimic upstream Ethereum field conventions.
    pub fn eth_compatibility(&self) -> bool {
        self.config.eth_compatibility
    }

    pub(crate) fn settings(&self) -> &ChainAccessConfig {
        &self.config
    }

    pub(crate) fn registry(&self) -> &dyn ChainRegistry {
        self.registry.as_ref()
    }

    pub(crate) fn execution(&self) -> &dyn ExecutionFactory {
        self.execution.as_ref()
    }

    pub(crate) fn gas_price_oracle(&self) -> &dyn GasPriceOracle {
        self.gas_price_oracle.as_ref()
    }

    // ── Reference resolution ────────────────────────────────────────────

    /// The current chain head.
    pub fn current_header(&self) -> Header {
        self.registry.current_header()
    }

    /// The current chain head as a header-only block.
    ///
    /// A stateless client does not hold the head's body; callers needing
    /// transactions go through [`ChainAccess::block_by_hash`].
    pub fn current_block(&self) -> Block {
        Block::new(self.current_header(), Body::default())
    }

    /// Resolve a header by number or virtual tag.
    ///
    /// `Pending` resolves to the same header as `Latest`: a stateless
    /// client has no pending block to serve, so both alias the head.
    pub async fn header_by_number(
        &self,
        cancel: &CancellationToken,
        number: BlockNumber,
    ) -> ChainAccessResult<Header> {
        match number {
            BlockNumber::Latest | BlockNumber::Pending => Ok(self.registry.current_header()),
            BlockNumber::Height(height) => {
                ensure_live(cancel)?;
                self.retrieval
                    .header_by_number(cancel, height)
                    .await
                    .map_err(|err| {
                        ChainAccessError::from_retrieval(format!("header at height {height}"), err)
                    })
            }
        }
    }

    /// Resolve a header by its sealed hash.
    pub async fn header_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> ChainAccessResult<Header> {
        ensure_live(cancel)?;
        let header = self
            .retrieval
            .header_by_hash(cancel, hash)
            .await
            .map_err(|err| ChainAccessError::from_retrieval(format!("header {hash}"), err))?;
        debug_assert_eq!(header.hash, hash, "retrieval returned header for wrong hash");
        Ok(header)
    }

    /// Resolve a header from any reference shape.
    pub async fn header_by_ref(
        &self,
        cancel: &CancellationToken,
        reference: BlockRef,
    ) -> ChainAccessResult<Header> {
        match reference {
            BlockRef::Number(number) => self.header_by_number(cancel, number).await,
            BlockRef::Hash(hash) => self.header_by_hash(cancel, hash).await,
            BlockRef::NumberOrHash(combined) => {
                self.header_by_number_or_hash(cancel, combined).await
            }
        }
    }

    async fn header_by_number_or_hash(
        &self,
        cancel: &CancellationToken,
        reference: NumberOrHash,
    ) -> ChainAccessResult<Header> {
        if let Some(number) = reference.number {
            return self.header_by_number(cancel, number).await;
        }
        let Some(hash) = reference.hash else {
            return Err(ChainAccessError::InvalidReference);
        };
        let header = self.header_by_hash(cancel, hash).await?;
        if reference.require_canonical {
            self.check_canonical(&header)?;
        }
        Ok(header)
    }

    /// Resolve a full block by number or virtual tag.
    pub async fn block_by_number(
        &self,
        cancel: &CancellationToken,
        number: BlockNumber,
    ) -> ChainAccessResult<Block> {
        let header = self.header_by_number(cancel, number).await?;
        self.block_by_hash(cancel, header.hash).await
    }

    /// Resolve a full block by hash.
    ///
    /// Headers and bodies travel independently through retrieval, so a
    /// known header with an unavailable body fails with
    /// [`ChainAccessError::BodyMissing`] rather than `NotFound`.
    pub async fn block_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> ChainAccessResult<Block> {
        ensure_live(cancel)?;
        match self.retrieval.block_by_hash(cancel, hash).await {
            Ok(block) => Ok(block),
            Err(crate::error::RetrievalError::NotFound) => {
                match self.retrieval.header_by_hash(cancel, hash).await {
                    Ok(_) => Err(ChainAccessError::BodyMissing(hash)),
                    Err(err) => Err(ChainAccessError::from_retrieval(
                        format!("block {hash}"),
                        err,
                    )),
                }
            }
            Err(err) => Err(ChainAccessError::from_retrieval(
                format!("block {hash}"),
                err,
            )),
        }
    }

    /// Resolve a full block from any reference shape.
    pub async fn block_by_ref(
        &self,
        cancel: &CancellationToken,
        reference: BlockRef,
    ) -> ChainAccessResult<Block> {
        match reference {
            BlockRef::Number(number) => self.block_by_number(cancel, number).await,
            BlockRef::Hash(hash) => self.block_by_hash(cancel, hash).await,
            BlockRef::NumberOrHash(combined) => {
                if let Some(number) = combined.number {
                    return self.block_by_number(cancel, number).await;
                }
                let Some(hash) = combined.hash else {
                    return Err(ChainAccessError::InvalidReference);
                };
                let block = self.block_by_hash(cancel, hash).await?;
                if combined.require_canonical {
                    self.check_canonical(&block.header)?;
                }
                Ok(block)
            }
        }
    }

    /// A block resolved by hash is canonical iff the registry records that
    /// hash at the block's height.
    fn check_canonical(&self, header: &Header) -> ChainAccessResult<()> {
        if self.registry.canonical_hash_at(header.number) != Some(header.hash) {
            return Err(ChainAccessError::NonCanonical {
                hash: header.hash,
                number: header.number,
            });
        }
        Ok(())
    }

    // ── State materialization ───────────────────────────────────────────

    /// Materialize a state view at the given header.
    pub async fn state_at(
        &self,
        cancel: &CancellationToken,
        header: &Header,
    ) -> ChainAccessResult<Box<dyn StateView>> {
        ensure_live(cancel)?;
        self.retrieval
            .state_at(cancel, header)
            .await
            .map_err(|err| {
                ChainAccessError::from_retrieval(format!("state at {}", header.hash), err)
            })
    }

    /// Resolve a reference and materialize state at the resolved header.
    pub async fn state_and_header_at(
        &self,
        cancel: &CancellationToken,
        reference: BlockRef,
    ) -> ChainAccessResult<(Box<dyn StateView>, Header)> {
        let header = self.header_by_ref(cancel, reference).await?;
        let state = self.state_at(cancel, &header).await?;
        Ok((state, header))
    }

    /// Resolve the parent of `header` and materialize the parent's state.
    ///
    /// This is the single path every protocol parameter computation goes
    /// through: the parameters governing a block live in the state produced
    /// by its parent, so evaluation must never touch the block's own
    /// post-state.
    pub(crate) async fn parent_state_of(
        &self,
        cancel: &CancellationToken,
        header: &Header,
    ) -> ChainAccessResult<(Box<dyn StateView>, Header)> {
        let parent_ref = BlockRef::NumberOrHash(NumberOrHash::from_hash(header.parent_hash));
        self.state_and_header_at(cancel, parent_ref).await
    }

    // ── Chain data lookups ──────────────────────────────────────────────

    /// Receipts of the block with the given hash.
    pub async fn receipts_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> ChainAccessResult<Vec<Receipt>> {
        ensure_live(cancel)?;
        self.retrieval
            .receipts_by_hash(cancel, hash)
            .await
            .map_err(|err| ChainAccessError::from_retrieval(format!("receipts of {hash}"), err))
    }

    /// Logs of the block with the given hash, grouped per transaction.
    pub async fn logs_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> ChainAccessResult<Vec<Vec<Log>>> {
        ensure_live(cancel)?;
        self.retrieval
            .logs_by_hash(cancel, hash)
            .await
            .map_err(|err| ChainAccessError::from_retrieval(format!("logs of {hash}"), err))
    }

    /// A mined transaction and its inclusion position.
    pub async fn transaction_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> ChainAccessResult<IncludedTransaction> {
        ensure_live(cancel)?;
        self.retrieval
            .transaction_by_hash(cancel, hash)
            .await
            .map_err(|err| ChainAccessError::from_retrieval(format!("transaction {hash}"), err))
    }

    /// Total difficulty of the chain up to the block with the given hash.
    pub async fn total_difficulty_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> ChainAccessResult<U256> {
        ensure_live(cancel)?;
        self.retrieval
            .total_difficulty_by_hash(cancel, hash)
            .await
            .map_err(|err| {
                ChainAccessError::from_retrieval(format!("total difficulty of {hash}"), err)
            })
    }

    /// The pending block and its receipts.
    ///
    /// Always `None`: a stateless client builds no pending block.
    pub fn pending_block_and_receipts(&self) -> Option<(Block, Vec<Receipt>)> {
        None
    }

    // ── Execution pass-throughs ─────────────────────────────────────────

    /// An EVM execution context for a call message over the given
    /// header/state pair.
    pub fn evm_context(
        &self,
        header: &Header,
        state: Box<dyn StateView>,
        message: CallMessage,
    ) -> Box<dyn EvmContext> {
        self.execution.context(header, state, message)
    }

    /// A read-only contract-call runner over the given header/state pair.
    pub fn evm_runner(&self, header: &Header, state: Box<dyn StateView>) -> Box<dyn EvmRunner> {
        self.execution.runner(header, state)
    }

    // ── Transaction pool pass-throughs ──────────────────────────────────

    /// Submit a signed transaction to the pool.
    pub async fn send_transaction(
        &self,
        cancel: &CancellationToken,
        tx: Transaction,
    ) -> Result<(), PoolError> {
        self.pool.add(cancel, tx).await
    }

    /// Drop a transaction from the pool.
    pub fn remove_transaction(&self, hash: B256) {
        self.pool.remove(hash);
    }

    /// All transactions currently in the pool.
    pub fn pool_transactions(&self) -> Vec<Transaction> {
        self.pool.transactions()
    }

    /// A single pool transaction by hash.
    pub fn pool_transaction(&self, hash: B256) -> Option<Transaction> {
        self.pool.transaction(hash)
    }

    /// The next nonce the pool would accept for a sender.
    pub async fn pool_nonce(
        &self,
        cancel: &CancellationToken,
        address: Address,
    ) -> Result<u64, PoolError> {
        self.pool.nonce(cancel, address).await
    }

    /// Pending/queued pool counts.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Full pool contents keyed by sender.
    pub fn pool_content(&self) -> PoolContent {
        self.pool.content()
    }

    /// Pool contents for one sender: (pending, queued).
    pub fn pool_content_from(&self, address: Address) -> (Vec<Transaction>, Vec<Transaction>) {
        self.pool.content_from(address)
    }

    // ── Event subscription pass-throughs ────────────────────────────────

    /// Subscribe to new canonical chain heads.
    pub fn subscribe_chain_heads(&self) -> broadcast::Receiver<Header> {
        self.events.subscribe_heads()
    }

    /// Subscribe to logs confirmed by newly accepted blocks.
    pub fn subscribe_logs(&self) -> broadcast::Receiver<Vec<Log>> {
        self.events.subscribe_logs()
    }

    /// Subscribe to logs removed by chain reorganizations.
    pub fn subscribe_removed_logs(&self) -> broadcast::Receiver<Vec<Log>> {
        self.events.subscribe_removed_logs()
    }

    /// Subscribe to transactions newly admitted to the pool.
    pub fn subscribe_new_pool_transactions(&self) -> broadcast::Receiver<Transaction> {
        self.pool.subscribe_new_transactions()
    }

    /// Subscribe to pending logs.
    ///
    /// The subscription stays open but never fires: with no pending block
    /// there are no pending logs to publish.
    pub fn subscribe_pending_logs(&self) -> broadcast::Receiver<Vec<Log>> {
        self.pending_logs.subscribe()
    }
}

/// Fail fast with [`ChainAccessError::Cancelled`] when the token is already
/// signalled, so no retrieval round-trip is started for a dead caller.
pub(crate) fn ensure_live(cancel: &CancellationToken) -> ChainAccessResult<()> {
    if cancel.is_cancelled() {
        return Err(ChainAccessError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetrievalError;
    use crate::mock::{test_facade, test_hash, test_header, MockSet};
    use std::time::Duration;

    #[tokio::test]
    async fn pending_and_latest_both_resolve_to_the_current_header() {
        let (access, chain) = test_facade();
        let cancel = CancellationToken::new();

        let latest = access
            .header_by_number(&cancel, BlockNumber::Latest)
            .await
            .expect("latest should resolve");
        let pending = access
            .header_by_number(&cancel, BlockNumber::Pending)
            .await
            .expect("pending should resolve");

        assert_eq!(latest, chain.current_header());
        assert_eq!(pending, latest, "pending aliases latest on a light client");
    }

    #[tokio::test]
    async fn heights_resolve_through_retrieval() {
        let (access, _chain) = test_facade();
        let cancel = CancellationToken::new();

        let header = access
            .header_by_number(&cancel, BlockNumber::Height(2))
            .await
            .expect("known height should resolve");
        assert_eq!(header.number, 2);
        assert_eq!(header.hash, test_hash(2));

        let err = access
            .header_by_number(&cancel, BlockNumber::Height(99))
            .await
            .expect_err("unknown height should fail");
        assert!(matches!(err, ChainAccessError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_hash_fails_with_not_found() {
        let (access, _chain) = test_facade();
        let cancel = CancellationToken::new();

        let err = access
            .header_by_hash(&cancel, B256::repeat_byte(0xee))
            .await
            .expect_err("unknown hash should fail");

        assert!(matches!(err, ChainAccessError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_number_or_hash_is_an_invalid_reference() {
        let (access, _chain) = test_facade();
        let cancel = CancellationToken::new();

        let err = access
            .header_by_ref(&cancel, BlockRef::NumberOrHash(NumberOrHash::default()))
            .await
            .expect_err("empty reference should fail");

        assert!(matches!(err, ChainAccessError::InvalidReference));
    }

    #[tokio::test]
    async fn fork_hash_fails_canonical_check_only_when_required() {
        let (access, chain) = test_facade();
        let cancel = CancellationToken::new();
        // A fork block at height 2: retrievable by hash, but the registry
        // records a different canonical hash there.
        let fork_hash = B256::repeat_byte(0xfa);
        chain.insert_fork(test_header(2, fork_hash, test_hash(1)));

        let relaxed = access
            .header_by_ref(&cancel, BlockRef::hash(fork_hash))
            .await
            .expect("plain hash resolution should accept fork blocks");
        assert_eq!(relaxed.hash, fork_hash);

        let relaxed_combined = access
            .header_by_ref(
                &cancel,
                BlockRef::NumberOrHash(NumberOrHash::from_hash(fork_hash)),
            )
            .await
            .expect("require_canonical=false should accept fork blocks");
        assert_eq!(relaxed_combined.hash, fork_hash);

        let err = access
            .header_by_ref(&cancel, BlockRef::canonical_hash(fork_hash))
            .await
            .expect_err("require_canonical=true should reject fork blocks");
        assert!(
            matches!(err, ChainAccessError::NonCanonical { hash, number } if hash == fork_hash && number == 2)
        );
    }

    #[tokio::test]
    async fn canonical_hash_passes_the_canonical_check() {
        let (access, _chain) = test_facade();
        let cancel = CancellationToken::new();

        let header = access
            .header_by_ref(&cancel, BlockRef::canonical_hash(test_hash(2)))
            .await
            .expect("canonical hash should resolve under require_canonical");

        assert_eq!(header.number, 2);
    }

    #[tokio::test]
    async fn known_header_with_missing_body_is_body_missing_not_not_found() {
        let (access, chain) = test_facade();
        let cancel = CancellationToken::new();
        // Header known, body never registered.
        let headless = test_header(7, test_hash(7), test_hash(3));
        chain.insert_fork(headless);

        let err = access
            .block_by_hash(&cancel, test_hash(7))
            .await
            .expect_err("missing body should fail");
        assert!(matches!(err, ChainAccessError::BodyMissing(hash) if hash == test_hash(7)));

        let err = access
            .block_by_ref(
                &cancel,
                BlockRef::NumberOrHash(NumberOrHash::from_hash(test_hash(7))),
            )
            .await
            .expect_err("combined reference should see the same distinction");
        assert!(matches!(err, ChainAccessError::BodyMissing(_)));

        let err = access
            .block_by_hash(&cancel, B256::repeat_byte(0xee))
            .await
            .expect_err("missing header should fail differently");
        assert!(matches!(err, ChainAccessError::NotFound(_)));
    }

    #[tokio::test]
    async fn block_resolution_returns_header_and_body() {
        let (access, _chain) = test_facade();
        let cancel = CancellationToken::new();

        let block = access
            .block_by_ref(&cancel, BlockRef::height(1))
            .await
            .expect("block at height 1 should resolve");

        assert_eq!(block.number(), 1);
        assert_eq!(block.hash(), test_hash(1));
    }

    #[tokio::test]
    async fn resolution_is_idempotent_while_the_head_is_unchanged() {
        let (access, _chain) = test_facade();
        let cancel = CancellationToken::new();

        for reference in [
            BlockRef::latest(),
            BlockRef::height(2),
            BlockRef::hash(test_hash(1)),
        ] {
            let first = access
                .header_by_ref(&cancel, reference)
                .await
                .expect("first resolution should succeed");
            let second = access
                .header_by_ref(&cancel, reference)
                .await
                .expect("second resolution should succeed");
            assert_eq!(first, second, "same reference, same header");
        }
    }

    #[tokio::test]
    async fn state_and_header_at_materializes_the_resolved_header() {
        let (access, chain) = test_facade();
        let cancel = CancellationToken::new();

        let (_state, header) = access
            .state_and_header_at(&cancel, BlockRef::height(2))
            .await
            .expect("state at height 2 should materialize");

        assert_eq!(header.number, 2);
        assert_eq!(chain.materialized(), vec![test_hash(2)]);
    }

    #[tokio::test]
    async fn pre_cancelled_token_fails_fast_without_touching_retrieval() {
        let (access, _chain) = test_facade();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = access
            .header_by_number(&cancel, BlockNumber::Height(1))
            .await
            .expect_err("cancelled call should fail");

        assert!(matches!(err, ChainAccessError::Cancelled));
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn cancellation_aborts_an_inflight_retrieval_within_bounded_time() {
        let (access, chain) = test_facade();
        chain.hang_retrievals();
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(1),
            access.header_by_hash(&cancel, test_hash(1)),
        )
        .await
        .expect("cancelled retrieval must not hang");

        let err = result.expect_err("cancelled retrieval should fail");
        assert!(matches!(err, ChainAccessError::Cancelled));
    }

    #[tokio::test]
    async fn retrieval_timeouts_surface_as_retrieval_failures() {
        let (access, chain) = test_facade();
        chain.fail_headers_with(RetrievalError::Timeout);
        let cancel = CancellationToken::new();

        let err = access
            .header_by_number(&cancel, BlockNumber::Height(1))
            .await
            .expect_err("timed-out retrieval should fail");

        assert!(matches!(
            err,
            ChainAccessError::Retrieval(RetrievalError::Timeout)
        ));
    }

    #[tokio::test]
    async fn pending_block_and_receipts_is_always_empty() {
        let (access, _chain) = test_facade();
        assert!(access.pending_block_and_receipts().is_none());
    }

    #[tokio::test]
    async fn pending_logs_subscription_stays_open_but_never_fires() {
        let (access, _chain) = test_facade();
        let mut rx = access.subscribe_pending_logs();

        let outcome =
            tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;

        assert!(outcome.is_err(), "pending logs must not fire");
    }

    #[tokio::test]
    async fn pool_pass_throughs_reach_the_pool() {
        let mocks = MockSet::with_chain(3);
        let access = mocks.facade();
        let cancel = CancellationToken::new();
        let tx = wisp_chain_types::Transaction {
            hash: B256::repeat_byte(0x61),
            nonce: 0,
            from: Address::repeat_byte(0x31),
            to: Some(Address::repeat_byte(0x32)),
            value: U256::from(100u64),
            gas: 21_000,
            gas_price: U256::from(1u64),
            fee_currency: None,
            input: alloy_primitives::Bytes::new(),
        };

        let mut new_txs = access.subscribe_new_pool_transactions();
        access
            .send_transaction(&cancel, tx.clone())
            .await
            .expect("pool should accept the transaction");

        assert_eq!(access.pool_transactions(), vec![tx.clone()]);
        assert_eq!(access.pool_transaction(tx.hash), Some(tx.clone()));
        assert_eq!(access.pool_stats().pending, 1);
        assert_eq!(
            new_txs.recv().await.expect("new-tx event should fire").hash,
            tx.hash
        );

        access.remove_transaction(tx.hash);
        assert!(access.pool_transactions().is_empty());
    }
}
