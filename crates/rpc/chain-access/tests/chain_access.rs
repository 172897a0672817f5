//! End-to-end exercises of the chain access layer over mock collaborators.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};
use tokio_util::sync::CancellationToken;

use wisp_chain_access::mock::{test_hash, test_header, MockSet};
use wisp_chain_access::{
    ChainAccessError, IncludedTransaction, RetrievalError, BLOOM_BITS_BLOCKS,
    DEFAULT_BLOCK_GAS_LIMIT,
};
use wisp_chain_types::{BlockRef, Log, Receipt, Transaction};

fn sample_transaction(hash: B256) -> Transaction {
    Transaction {
        hash,
        nonce: 7,
        from: Address::repeat_byte(0x31),
        to: Some(Address::repeat_byte(0x32)),
        value: U256::from(100u64),
        gas: 21_000,
        gas_price: U256::from(1u64),
        fee_currency: None,
        input: Bytes::new(),
    }
}

fn sample_receipt(tx_hash: B256, block_number: u64) -> Receipt {
    Receipt {
        transaction_hash: tx_hash,
        transaction_index: 0,
        status: Receipt::STATUS_SUCCESS,
        gas_used: 21_000,
        cumulative_gas_used: 21_000,
        contract_address: None,
        logs: vec![Log {
            address: Address::repeat_byte(0x41),
            topics: vec![B256::repeat_byte(0x51)],
            data: Bytes::new(),
            block_number,
            transaction_hash: tx_hash,
            log_index: 0,
            removed: false,
        }],
    }
}

#[tokio::test]
async fn chain_data_lookups_round_trip_through_retrieval() {
    let mocks = MockSet::with_chain(4);
    let block_hash = test_hash(2);
    let tx_hash = B256::repeat_byte(0x61);
    let receipt = sample_receipt(tx_hash, 2);
    mocks.chain.set_receipts(block_hash, vec![receipt.clone()]);
    mocks
        .chain
        .set_logs(block_hash, vec![receipt.logs.clone()]);
    mocks.chain.set_transaction(IncludedTransaction {
        transaction: sample_transaction(tx_hash),
        block_hash,
        block_number: 2,
        index: 0,
    });
    mocks
        .chain
        .set_total_difficulty(block_hash, U256::from(12_345u64));
    let access = mocks.facade();
    let cancel = CancellationToken::new();

    let receipts = access
        .receipts_by_hash(&cancel, block_hash)
        .await
        .expect("receipts should resolve");
    assert_eq!(receipts, vec![receipt.clone()]);
    assert!(receipts[0].succeeded());

    let logs = access
        .logs_by_hash(&cancel, block_hash)
        .await
        .expect("logs should resolve");
    assert_eq!(logs, vec![receipt.logs]);

    let included = access
        .transaction_by_hash(&cancel, tx_hash)
        .await
        .expect("transaction should resolve");
    assert_eq!(included.block_number, 2);
    assert_eq!(included.transaction.hash, tx_hash);

    let td = access
        .total_difficulty_by_hash(&cancel, block_hash)
        .await
        .expect("total difficulty should resolve");
    assert_eq!(td, U256::from(12_345u64));

    let err = access
        .receipts_by_hash(&cancel, B256::repeat_byte(0xee))
        .await
        .expect_err("unknown block should have no receipts");
    assert!(matches!(err, ChainAccessError::NotFound(_)));
}

#[tokio::test]
async fn canonical_chain_walk_preserves_parent_links() {
    let mocks = MockSet::with_chain(5);
    let access = mocks.facade();
    let cancel = CancellationToken::new();

    let mut child_parent = None;
    for number in (0..5).rev() {
        let header = access
            .header_by_ref(&cancel, BlockRef::height(number))
            .await
            .expect("canonical height should resolve");
        if let Some(expected) = child_parent {
            assert_eq!(header.hash, expected, "child parent_hash must match");
        }
        child_parent = Some(header.parent_hash);
    }
}

#[tokio::test]
async fn gas_limit_story_from_resolution_to_contract_and_back() {
    // Tip with no embedded limit; the governed value lives in the parent's
    // state.
    let mocks = MockSet::with_chain(4);
    let mut tip = test_header(4, test_hash(4), test_hash(3));
    tip.gas_limit = 0;
    mocks.chain.insert_canonical(tip.clone());
    mocks.chain.set_current(tip.clone());
    mocks.execution.respond_with_word(U256::from(20_000_000u64));
    let access = mocks.facade();
    let cancel = CancellationToken::new();

    let limit = access.block_gas_limit(&cancel, BlockRef::latest()).await;
    assert_eq!(limit, 20_000_000);
    assert_eq!(mocks.execution.runner_headers(), vec![tip.parent_hash]);

    // Once retrieval degrades, the lenient path falls back while the strict
    // path reports exactly what broke.
    mocks.chain.fail_state_with(RetrievalError::Timeout);
    let degraded = access.block_gas_limit(&cancel, BlockRef::latest()).await;
    assert_eq!(degraded, DEFAULT_BLOCK_GAS_LIMIT);

    let err = access
        .real_block_gas_limit(&cancel, BlockRef::latest())
        .await
        .expect_err("strict variant must propagate");
    assert!(err.to_string().contains("state lookup failed"), "got: {err}");
}

#[tokio::test]
async fn head_subscriptions_deliver_published_headers() {
    let mocks = MockSet::with_chain(3);
    let access = mocks.facade();
    let mut heads = access.subscribe_chain_heads();
    let mut logs = access.subscribe_logs();

    let new_head = test_header(3, test_hash(3), test_hash(2));
    mocks.events.publish_head(new_head.clone());
    mocks.events.publish_logs(vec![Log {
        address: Address::repeat_byte(0x41),
        topics: vec![],
        data: Bytes::new(),
        block_number: 3,
        transaction_hash: B256::repeat_byte(0x61),
        log_index: 0,
        removed: false,
    }]);

    let received = tokio::time::timeout(Duration::from_secs(1), heads.recv())
        .await
        .expect("head event should arrive")
        .expect("channel should stay open");
    assert_eq!(received, new_head);

    let received_logs = tokio::time::timeout(Duration::from_secs(1), logs.recv())
        .await
        .expect("log event should arrive")
        .expect("channel should stay open");
    assert_eq!(received_logs.len(), 1);
}

#[tokio::test]
async fn bloom_status_reports_section_geometry() {
    let mocks = MockSet::with_chain(3);
    mocks.chain.set_bloom_sections(9);
    let access = mocks.facade();

    assert_eq!(access.bloom_status(), (BLOOM_BITS_BLOCKS, 9));
}

#[tokio::test]
async fn concurrent_resolutions_do_not_interfere() {
    let mocks = MockSet::with_chain(6);
    let access = std::sync::Arc::new(mocks.facade());
    let cancel = CancellationToken::new();

    let mut handles = Vec::new();
    for number in 0..6u64 {
        let access = access.clone();
        let cancel = cancel.clone();
        handles.push(tokio::spawn(async move {
            access
                .header_by_ref(&cancel, BlockRef::height(number))
                .await
                .expect("concurrent resolution should succeed")
        }));
    }

    for (number, handle) in (0..6u64).zip(handles) {
        let header = handle.await.expect("task should not panic");
        assert_eq!(header.number, number);
    }
}
