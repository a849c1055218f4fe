use proptest::prelude::*;
use qoinchain::chain::ledger::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use qoinchain::chain::Ledger;
use qoinchain::error::Error;
use qoinchain::tx::Amount;

/// Genesis invariants: a fresh ledger holds exactly one block with the fixed
/// proof, the sentinel previous hash, an empty own hash, and no transactions.
#[test]
fn test_genesis_invariants() {
    let ledger = Ledger::new();

    assert_eq!(ledger.len(), 1);
    assert!(ledger.pending().is_empty());

    let genesis = &ledger.chain()[0];
    assert_eq!(genesis.index, 1);
    assert_eq!(genesis.proof, GENESIS_PROOF);
    assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
    assert_eq!(genesis.hash, "");
    assert!(genesis.transactions.is_empty());
}

/// Happy path: queue one transaction, mine, and check the block contents,
/// the cleared pool, and the chain length.
#[test]
fn test_queue_then_create_block() {
    let mut ledger = Ledger::new();

    let receipt = ledger
        .queue_transaction("alice", "bob", Amount::from(10.0))
        .unwrap();
    assert_eq!(receipt.index, 0);
    assert_eq!(ledger.pending().len(), 1);

    let block = ledger.create_block(100, None).unwrap();

    assert_eq!(ledger.len(), 2);
    assert!(ledger.pending().is_empty());
    assert_eq!(block.index, 2);
    assert_eq!(block.transactions.len(), 1);
    assert_eq!(block.transactions[0].sender, "alice");
    assert_eq!(block.transactions[0].recipient, "bob");
    assert_eq!(block.transactions[0].amount, 10.0);
    assert_eq!(block.transactions[0].id, receipt.id);
}

/// A non-numeric amount is rejected and leaves the pool untouched.
#[test]
fn test_invalid_amount_leaves_pool_unchanged() {
    let mut ledger = Ledger::new();

    let err = ledger
        .queue_transaction("alice", "bob", Amount::from("not-a-number"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidAmount(_)));
    assert!(ledger.pending().is_empty());
}

/// Numeric strings are coerced the same way numbers are.
#[test]
fn test_string_amount_coercion() {
    let mut ledger = Ledger::new();

    ledger
        .queue_transaction("alice", "bob", Amount::from("10.5"))
        .unwrap();
    assert_eq!(ledger.pending()[0].amount, 10.5);
}

/// Positional receipts are advisory: they count up within one pool and reset
/// after a block creation clears it.
#[test]
fn test_receipt_positions_reset_after_mining() {
    let mut ledger = Ledger::new();

    let a = ledger
        .queue_transaction("alice", "bob", Amount::from(1.0))
        .unwrap();
    let b = ledger
        .queue_transaction("bob", "carol", Amount::from(2.0))
        .unwrap();
    assert_eq!(a.index, 0);
    assert_eq!(b.index, 1);

    ledger.create_block(7, None).unwrap();

    let c = ledger
        .queue_transaction("carol", "dave", Amount::from(3.0))
        .unwrap();
    assert_eq!(c.index, 0);
    assert_ne!(c.id, a.id);
}

/// Two sequential empty blocks: both carry no transactions and the second
/// links back to the canonical hash of the first.
#[test]
fn test_sequential_empty_blocks_link() {
    let mut ledger = Ledger::new();

    let first = ledger.create_block(100, None).unwrap();
    let second = ledger.create_block(200, None).unwrap();

    assert!(first.transactions.is_empty());
    assert!(second.transactions.is_empty());
    assert_eq!(second.previous_hash, first.compute_hash().unwrap());
}

/// Chain linkage and monotonic indices across a longer run, mixing supplied
/// and derived previous hashes.
#[test]
fn test_chain_linkage_and_indices() {
    let mut ledger = Ledger::new();

    for proof in [5u64, 17, 256, 4096] {
        ledger
            .queue_transaction("alice", "bob", Amount::from(1.0))
            .unwrap();
        ledger.create_block(proof, None).unwrap();
    }

    // Explicitly supplied previous hash takes precedence over the derived one.
    let supplied = ledger.last_block().unwrap().compute_hash().unwrap();
    ledger.create_block(9, Some(supplied.clone())).unwrap();

    let chain = ledger.chain();
    for i in 1..chain.len() {
        assert_eq!(chain[i].index, chain[i - 1].index + 1);
        assert_eq!(
            chain[i].previous_hash,
            chain[i - 1].compute_hash().unwrap()
        );
    }
    assert_eq!(chain.last().unwrap().previous_hash, supplied);
}

/// An empty caller-supplied previous hash falls back to the derived one.
#[test]
fn test_empty_previous_hash_falls_back() {
    let mut ledger = Ledger::new();

    let expected = ledger.last_block().unwrap().compute_hash().unwrap();
    let block = ledger.create_block(1, Some(String::new())).unwrap();
    assert_eq!(block.previous_hash, expected);
}

/// A block's own hash is the digest of the prior block's canonical form
/// concatenated with the decimal proof.
#[test]
fn test_block_hash_binds_previous_block_and_proof() {
    let mut ledger = Ledger::new();

    let genesis_string = ledger.last_block().unwrap().canonical_json().unwrap();
    let proof = 31337u64;
    let expected = qoinchain::sha256_hex(format!("{}{}", genesis_string, proof).as_bytes());

    let block = ledger.create_block(proof, None).unwrap();
    assert_eq!(block.hash, expected);
    assert_eq!(block.hash.len(), 64);
}

/// Every non-genesis block carries a 64-character lowercase hex digest.
#[test]
fn test_non_genesis_hashes_are_hex_digests() {
    let mut ledger = Ledger::new();
    ledger.create_block(1, None).unwrap();
    ledger.create_block(2, None).unwrap();

    for block in &ledger.chain()[1..] {
        assert_eq!(block.hash.len(), 64);
        assert!(block.hash.bytes().all(|b| b.is_ascii_hexdigit()));
    }
}

proptest! {
    /// Canonical hashing is deterministic for arbitrary transaction content,
    /// including a round trip through JSON with reordered keys.
    #[test]
    fn prop_canonical_hash_deterministic(
        sender in "[a-z]{1,12}",
        recipient in "[a-z]{1,12}",
        amount in 0.0f64..1e12,
        proof in any::<u64>(),
    ) {
        let mut ledger = Ledger::new();
        ledger.queue_transaction(&sender, &recipient, Amount::from(amount)).unwrap();
        let block = ledger.create_block(proof, None).unwrap();

        let first = block.compute_hash().unwrap();
        let second = block.compute_hash().unwrap();
        prop_assert_eq!(&first, &second);

        let reparsed: qoinchain::chain::Block =
            serde_json::from_str(&block.canonical_json().unwrap()).unwrap();
        prop_assert_eq!(reparsed.compute_hash().unwrap(), first);
    }
}
