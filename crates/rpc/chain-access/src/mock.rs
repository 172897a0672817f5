//! In-memory mock collaborators for tests.
//!
//! These mirror the collaborator traits with programmable data and failure
//! slots so the access layer can be exercised without a network, a state
//! trie, or an EVM. They are exported because downstream crates (RPC
//! handlers, fee estimation) test against the same seams.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use wisp_chain_types::{Block, Body, ChainConfig, Header, Log, Receipt, Transaction};

use crate::access::ChainAccess;
use crate::config::ChainAccessConfig;
use crate::error::{EvmError, PoolError, RetrievalError};
use crate::events::ChainEvents;
use crate::execution::{
    CallMessage, CallOutcome, EvmContext, EvmRunner, ExecutionFactory, GasPriceOracle,
};
use crate::filter::FilterSession;
use crate::pool::{PoolContent, PoolStats, TransactionPool};
use crate::retrieval::{ChainRegistry, IncludedTransaction, OnDemandRetrieval, StateView};

/// Deterministic hash for test headers.
pub fn test_hash(tag: u64) -> B256 {
    B256::from(U256::from(0x1000 + tag))
}

/// A fully populated test header at the given height.
pub fn test_header(number: u64, hash: B256, parent_hash: B256) -> Header {
    Header {
        number,
        hash,
        parent_hash,
        state_root: B256::repeat_byte(0x11),
        transactions_root: B256::repeat_byte(0x12),
        receipts_root: B256::repeat_byte(0x13),
        miner: Address::repeat_byte(0x22),
        gas_limit: 30_000_000,
        gas_used: 21_000,
        base_fee: None,
        timestamp: 1_700_000_000 + number,
        extra_data: Bytes::new(),
    }
}

/// State view over nothing; every read answers a zero value.
#[derive(Debug, Default)]
pub struct MockStateView;

impl StateView for MockStateView {
    fn balance(&self, _address: Address) -> Result<U256, RetrievalError> {
        Ok(U256::ZERO)
    }

    fn nonce(&self, _address: Address) -> Result<u64, RetrievalError> {
        Ok(0)
    }

    fn code(&self, _address: Address) -> Result<Vec<u8>, RetrievalError> {
        Ok(Vec::new())
    }

    fn storage(&self, _address: Address, _slot: B256) -> Result<B256, RetrievalError> {
        Ok(B256::ZERO)
    }
}

#[derive(Default)]
struct MockChainInner {
    current: Option<Header>,
    headers_by_hash: BTreeMap<B256, Header>,
    headers_by_number: BTreeMap<u64, Header>,
    bodies: BTreeMap<B256, Body>,
    canonical: BTreeMap<u64, B256>,
    receipts: BTreeMap<B256, Vec<Receipt>>,
    logs: BTreeMap<B256, Vec<Vec<Log>>>,
    transactions: BTreeMap<B256, IncludedTransaction>,
    total_difficulty: BTreeMap<B256, U256>,
    bloom_sections: u64,
    header_failure: Option<RetrievalError>,
    state_failure: Option<RetrievalError>,
    hang_retrievals: bool,
    materialized: Vec<B256>,
}

/// Mock of the retrieval protocol and the local header chain in one object.
///
/// Data is inserted through the builder-style methods; failure slots force
/// the next matching operations to fail; `hang_retrievals` parks every
/// retrieval until the caller's token cancels, for cancellation tests.
#[derive(Default)]
pub struct MockChain {
    inner: Mutex<MockChainInner>,
}

impl MockChain {
    /// An empty chain with no head. Most tests want [`MockChain::with_chain`].
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A canonical chain of `len` linked headers starting at genesis; the
    /// last header becomes the current head. Bodies are registered empty.
    pub fn with_chain(len: u64) -> Arc<Self> {
        let chain = Self::new();
        let mut parent = B256::ZERO;
        for number in 0..len {
            let hash = test_hash(number);
            let header = test_header(number, hash, parent);
            chain.insert_canonical(header.clone());
            chain.set_body(hash, Body::default());
            chain.set_current(header);
            parent = hash;
        }
        chain
    }

    /// Register a header as canonical at its height (and retrievable by
    /// number and hash).
    pub fn insert_canonical(&self, header: Header) {
        let mut inner = self.inner.lock();
        inner.canonical.insert(header.number, header.hash);
        inner.headers_by_number.insert(header.number, header.clone());
        inner.headers_by_hash.insert(header.hash, header);
    }

    /// Register a header retrievable by hash only — a fork block.
    pub fn insert_fork(&self, header: Header) {
        self.inner.lock().headers_by_hash.insert(header.hash, header);
    }

    /// Make the given header the current head.
    pub fn set_current(&self, header: Header) {
        self.inner.lock().current = Some(header);
    }

    /// Register a body for a header hash.
    pub fn set_body(&self, hash: B256, body: Body) {
        self.inner.lock().bodies.insert(hash, body);
    }

    /// Register receipts for a block hash.
    pub fn set_receipts(&self, hash: B256, receipts: Vec<Receipt>) {
        self.inner.lock().receipts.insert(hash, receipts);
    }

    /// Register per-transaction logs for a block hash.
    pub fn set_logs(&self, hash: B256, logs: Vec<Vec<Log>>) {
        self.inner.lock().logs.insert(hash, logs);
    }

    /// Register a mined transaction.
    pub fn set_transaction(&self, tx: IncludedTransaction) {
        self.inner.lock().transactions.insert(tx.transaction.hash, tx);
    }

    /// Register a total difficulty for a block hash.
    pub fn set_total_difficulty(&self, hash: B256, td: U256) {
        self.inner.lock().total_difficulty.insert(hash, td);
    }

    /// Number of bloom sections the registry reports.
    pub fn set_bloom_sections(&self, sections: u64) {
        self.inner.lock().bloom_sections = sections;
    }

    /// Force every subsequent header retrieval to fail.
    pub fn fail_headers_with(&self, err: RetrievalError) {
        self.inner.lock().header_failure = Some(err);
    }

    /// Force every subsequent state materialization to fail.
    pub fn fail_state_with(&self, err: RetrievalError) {
        self.inner.lock().state_failure = Some(err);
    }

    /// Park every retrieval until the caller's token cancels.
    pub fn hang_retrievals(&self) {
        self.inner.lock().hang_retrievals = true;
    }

    /// Header hashes state views were materialized at, in order.
    pub fn materialized(&self) -> Vec<B256> {
        self.inner.lock().materialized.clone()
    }

    async fn hang_if_requested(&self, cancel: &CancellationToken) -> Result<(), RetrievalError> {
        let hang = self.inner.lock().hang_retrievals;
        if hang {
            cancel.cancelled().await;
            return Err(RetrievalError::Cancelled);
        }
        Ok(())
    }
}

#[async_trait]
impl OnDemandRetrieval for MockChain {
    async fn header_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Header, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        let inner = self.inner.lock();
        if let Some(err) = inner.header_failure.clone() {
            return Err(err);
        }
        inner
            .headers_by_hash
            .get(&hash)
            .cloned()
            .ok_or(RetrievalError::NotFound)
    }

    async fn header_by_number(
        &self,
        cancel: &CancellationToken,
        number: u64,
    ) -> Result<Header, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        let inner = self.inner.lock();
        if let Some(err) = inner.header_failure.clone() {
            return Err(err);
        }
        inner
            .headers_by_number
            .get(&number)
            .cloned()
            .ok_or(RetrievalError::NotFound)
    }

    async fn block_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Block, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        let inner = self.inner.lock();
        let header = inner
            .headers_by_hash
            .get(&hash)
            .cloned()
            .ok_or(RetrievalError::NotFound)?;
        let body = inner
            .bodies
            .get(&hash)
            .cloned()
            .ok_or(RetrievalError::NotFound)?;
        Ok(Block::new(header, body))
    }

    async fn state_at(
        &self,
        cancel: &CancellationToken,
        header: &Header,
    ) -> Result<Box<dyn StateView>, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        let mut inner = self.inner.lock();
        if let Some(err) = inner.state_failure.clone() {
            return Err(err);
        }
        inner.materialized.push(header.hash);
        Ok(Box::new(MockStateView))
    }

    async fn receipts_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Vec<Receipt>, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        self.inner
            .lock()
            .receipts
            .get(&hash)
            .cloned()
            .ok_or(RetrievalError::NotFound)
    }

    async fn logs_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<Vec<Vec<Log>>, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        self.inner
            .lock()
            .logs
            .get(&hash)
            .cloned()
            .ok_or(RetrievalError::NotFound)
    }

    async fn transaction_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<IncludedTransaction, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        self.inner
            .lock()
            .transactions
            .get(&hash)
            .cloned()
            .ok_or(RetrievalError::NotFound)
    }

    async fn total_difficulty_by_hash(
        &self,
        cancel: &CancellationToken,
        hash: B256,
    ) -> Result<U256, RetrievalError> {
        self.hang_if_requested(cancel).await?;
        self.inner
            .lock()
            .total_difficulty
            .get(&hash)
            .copied()
            .ok_or(RetrievalError::NotFound)
    }
}

impl ChainRegistry for MockChain {
    fn current_header(&self) -> Header {
        self.inner
            .lock()
            .current
            .clone()
            .expect("mock chain has no head; seed it with with_chain or set_current")
    }

    fn canonical_hash_at(&self, number: u64) -> Option<B256> {
        self.inner.lock().canonical.get(&number).copied()
    }

    fn bloom_sections(&self) -> u64 {
        self.inner.lock().bloom_sections
    }
}

/// A contract call observed by [`MockExecution`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Hash of the header the runner was built over.
    pub header: B256,
    /// Call target.
    pub to: Address,
    /// Call data.
    pub input: Bytes,
}

#[derive(Default)]
struct ExecutionState {
    response: Mutex<Option<Result<Bytes, EvmError>>>,
    runner_headers: Mutex<Vec<B256>>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// Mock execution factory recording which headers runners are built over
/// and replaying a programmed contract-call response.
#[derive(Default)]
pub struct MockExecution {
    state: Arc<ExecutionState>,
}

impl MockExecution {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every contract call returns this value, ABI-encoded as one word.
    pub fn respond_with_word(&self, value: U256) {
        *self.state.response.lock() = Some(Ok(value.abi_encode().into()));
    }

    /// Every contract call fails with this error.
    pub fn respond_with_error(&self, err: EvmError) {
        *self.state.response.lock() = Some(Err(err));
    }

    /// Hashes of the headers runners were built over, in order.
    pub fn runner_headers(&self) -> Vec<B256> {
        self.state.runner_headers.lock().clone()
    }

    /// Contract calls observed, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().clone()
    }
}

struct MockEvmRunner {
    header: B256,
    state: Arc<ExecutionState>,
}

impl EvmRunner for MockEvmRunner {
    fn call(&self, to: Address, input: Bytes, _gas: u64) -> Result<Bytes, EvmError> {
        self.state.calls.lock().push(RecordedCall {
            header: self.header,
            to,
            input,
        });
        self.state
            .response
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(U256::ZERO.abi_encode().into()))
    }
}

struct MockEvmContext {
    output: Bytes,
}

impl EvmContext for MockEvmContext {
    fn execute(self: Box<Self>) -> Result<CallOutcome, EvmError> {
        Ok(CallOutcome {
            output: self.output,
            gas_used: 21_000,
        })
    }
}

impl ExecutionFactory for MockExecution {
    fn runner(&self, header: &Header, _state: Box<dyn StateView>) -> Box<dyn EvmRunner> {
        self.state.runner_headers.lock().push(header.hash);
        Box::new(MockEvmRunner {
            header: header.hash,
            state: Arc::clone(&self.state),
        })
    }

    fn context(
        &self,
        header: &Header,
        _state: Box<dyn StateView>,
        _message: CallMessage,
    ) -> Box<dyn EvmContext> {
        self.state.runner_headers.lock().push(header.hash);
        Box::new(MockEvmContext {
            output: Bytes::new(),
        })
    }
}

/// Arguments observed by [`MockGasPriceOracle::suggest_price`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSuggestion {
    pub fee_currency: Option<Address>,
    pub base_fee: Option<U256>,
    pub multiplier_percent: u64,
}

/// Mock fee-suggestion oracle replaying programmed values.
pub struct MockGasPriceOracle {
    price: U256,
    tip: U256,
    suggestions: Mutex<Vec<RecordedSuggestion>>,
}

impl MockGasPriceOracle {
    pub fn returning(price: U256, tip: U256) -> Arc<Self> {
        Arc::new(Self {
            price,
            tip,
            suggestions: Mutex::new(Vec::new()),
        })
    }

    /// Suggestion requests observed, in order.
    pub fn suggestions(&self) -> Vec<RecordedSuggestion> {
        self.suggestions.lock().clone()
    }
}

impl GasPriceOracle for MockGasPriceOracle {
    fn suggest_price(
        &self,
        _runner: &dyn EvmRunner,
        fee_currency: Option<Address>,
        base_fee: Option<U256>,
        multiplier_percent: u64,
    ) -> Result<U256, EvmError> {
        self.suggestions.lock().push(RecordedSuggestion {
            fee_currency,
            base_fee,
            multiplier_percent,
        });
        Ok(self.price)
    }

    fn suggest_tip_cap(
        &self,
        _runner: &dyn EvmRunner,
        _fee_currency: Option<Address>,
    ) -> Result<U256, EvmError> {
        Ok(self.tip)
    }
}

/// Mock transaction pool over a plain vector.
pub struct MockTransactionPool {
    transactions: Mutex<Vec<Transaction>>,
    nonces: Mutex<BTreeMap<Address, u64>>,
    new_tx: broadcast::Sender<Transaction>,
}

impl Default for MockTransactionPool {
    fn default() -> Self {
        let (new_tx, _) = broadcast::channel(16);
        Self {
            transactions: Mutex::new(Vec::new()),
            nonces: Mutex::new(BTreeMap::new()),
            new_tx,
        }
    }
}

impl MockTransactionPool {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Program the nonce answered for a sender.
    pub fn set_nonce(&self, address: Address, nonce: u64) {
        self.nonces.lock().insert(address, nonce);
    }
}

#[async_trait]
impl TransactionPool for MockTransactionPool {
    async fn add(&self, _cancel: &CancellationToken, tx: Transaction) -> Result<(), PoolError> {
        if self.transactions.lock().iter().any(|t| t.hash == tx.hash) {
            return Err(PoolError::Rejected("already in pool".to_string()));
        }
        self.transactions.lock().push(tx.clone());
        let _ = self.new_tx.send(tx);
        Ok(())
    }

    fn remove(&self, hash: B256) {
        self.transactions.lock().retain(|t| t.hash != hash);
    }

    fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().clone()
    }

    fn transaction(&self, hash: B256) -> Option<Transaction> {
        self.transactions.lock().iter().find(|t| t.hash == hash).cloned()
    }

    async fn nonce(
        &self,
        _cancel: &CancellationToken,
        address: Address,
    ) -> Result<u64, PoolError> {
        Ok(self.nonces.lock().get(&address).copied().unwrap_or(0))
    }

    fn stats(&self) -> PoolStats {
        PoolStats {
            pending: self.transactions.lock().len(),
            queued: 0,
        }
    }

    fn content(&self) -> PoolContent {
        let mut pending: BTreeMap<Address, Vec<Transaction>> = BTreeMap::new();
        for tx in self.transactions.lock().iter() {
            pending.entry(tx.from).or_default().push(tx.clone());
        }
        PoolContent {
            pending,
            queued: BTreeMap::new(),
        }
    }

    fn content_from(&self, address: Address) -> (Vec<Transaction>, Vec<Transaction>) {
        let pending = self
            .transactions
            .lock()
            .iter()
            .filter(|t| t.from == address)
            .cloned()
            .collect();
        (pending, Vec::new())
    }

    fn subscribe_new_transactions(&self) -> broadcast::Receiver<Transaction> {
        self.new_tx.subscribe()
    }
}

/// Mock chain event hub with publish helpers.
pub struct MockChainEvents {
    heads: broadcast::Sender<Header>,
    logs: broadcast::Sender<Vec<Log>>,
    removed: broadcast::Sender<Vec<Log>>,
}

impl Default for MockChainEvents {
    fn default() -> Self {
        let (heads, _) = broadcast::channel(16);
        let (logs, _) = broadcast::channel(16);
        let (removed, _) = broadcast::channel(16);
        Self {
            heads,
            logs,
            removed,
        }
    }
}

impl MockChainEvents {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn publish_head(&self, header: Header) {
        let _ = self.heads.send(header);
    }

    pub fn publish_logs(&self, logs: Vec<Log>) {
        let _ = self.logs.send(logs);
    }
}

impl ChainEvents for MockChainEvents {
    fn subscribe_heads(&self) -> broadcast::Receiver<Header> {
        self.heads.subscribe()
    }

    fn subscribe_logs(&self) -> broadcast::Receiver<Vec<Log>> {
        self.logs.subscribe()
    }

    fn subscribe_removed_logs(&self) -> broadcast::Receiver<Vec<Log>> {
        self.removed.subscribe()
    }
}

/// Filter session servicing a fixed number of batches, or endless.
pub struct MockFilterSession {
    remaining: Mutex<Option<usize>>,
    serviced: AtomicUsize,
}

impl MockFilterSession {
    /// Drains after `batches` batches.
    pub fn with_batches(batches: usize) -> Self {
        Self {
            remaining: Mutex::new(Some(batches)),
            serviced: AtomicUsize::new(0),
        }
    }

    /// Never drains; only cancellation stops the workers.
    pub fn endless() -> Self {
        Self {
            remaining: Mutex::new(None),
            serviced: AtomicUsize::new(0),
        }
    }

    /// Number of batches serviced so far.
    pub fn serviced(&self) -> usize {
        self.serviced.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilterSession for MockFilterSession {
    async fn service_batch(&self, _batch_size: usize, wait: Duration) -> bool {
        {
            let mut remaining = self.remaining.lock();
            match remaining.as_mut() {
                Some(0) => return false,
                Some(n) => *n -= 1,
                None => {}
            }
        }
        tokio::time::sleep(wait).await;
        self.serviced.fetch_add(1, Ordering::SeqCst);
        true
    }
}

/// Every collaborator mocked and a facade wired over them.
pub struct MockSet {
    pub chain: Arc<MockChain>,
    pub execution: Arc<MockExecution>,
    pub oracle: Arc<MockGasPriceOracle>,
    pub pool: Arc<MockTransactionPool>,
    pub events: Arc<MockChainEvents>,
}

impl MockSet {
    /// Fresh mocks over a canonical chain of `chain_len` headers.
    pub fn with_chain(chain_len: u64) -> Self {
        Self {
            chain: MockChain::with_chain(chain_len),
            execution: MockExecution::new(),
            oracle: MockGasPriceOracle::returning(U256::from(2_000_000_000u64), U256::from(2u64)),
            pool: MockTransactionPool::new(),
            events: MockChainEvents::new(),
        }
    }

    /// Assemble a facade over these mocks with the default configuration.
    pub fn facade(&self) -> ChainAccess {
        self.facade_with_config(ChainAccessConfig::default())
    }

    /// Assemble a facade over these mocks with the given configuration.
    pub fn facade_with_config(&self, config: ChainAccessConfig) -> ChainAccess {
        ChainAccess::new(
            ChainConfig { chain_id: 1 },
            config,
            self.chain.clone(),
            self.chain.clone(),
            self.execution.clone(),
            self.oracle.clone(),
            self.pool.clone(),
            self.events.clone(),
        )
    }
}

/// Shorthand for tests that only need a facade and the chain mock.
pub fn test_facade() -> (ChainAccess, Arc<MockChain>) {
    let mocks = MockSet::with_chain(4);
    let chain = mocks.chain.clone();
    (mocks.facade(), chain)
}
