use crate::chain::block::Block;
use crate::error::{Error, Result};
use crate::tx::{Amount, Transaction};

/// Proof stamped on the genesis block. Arbitrary fixed value.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel previous-hash marker for the genesis block; not a derived hash.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Position and stable identifier handed back when a transaction is queued.
///
/// `index` is the transaction's 0-based position in the pending pool at
/// insertion time. It is advisory only: the pool can grow or be cleared by a
/// block creation before the caller acts on it. `id` is the UUID clients
/// should hold on to.
#[derive(Debug, Clone, PartialEq)]
pub struct TxReceipt {
    pub index: usize,
    pub id: String,
}

/// The append-only chain of blocks plus the pending-transaction pool.
///
/// Constructed once per process and explicitly handed to whoever needs it;
/// callers that share it across tasks wrap it in a single lock guarding both
/// fields jointly, so no two block creations can interleave.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// Create a ledger holding only the genesis block: index 1, fixed proof,
    /// sentinel previous hash, empty own hash, no transactions.
    pub fn new() -> Ledger {
        let mut ledger = Ledger {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger
            .create_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()))
            .expect("genesis creation is infallible on an empty chain");
        ledger
    }

    /// Queue a transfer into the pending pool.
    ///
    /// The amount is coerced to a finite float; non-numeric input is rejected
    /// with `InvalidAmount` and leaves the pool untouched.
    pub fn queue_transaction(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: Amount,
    ) -> Result<TxReceipt> {
        let tx = Transaction::new(sender, recipient, amount.to_f64()?);
        let id = tx.id.clone();
        self.pending.push(tx);
        Ok(TxReceipt {
            index: self.pending.len() - 1,
            id,
        })
    }

    /// Create a new block from the current pending pool and append it.
    ///
    /// The new block's own `hash` is the digest of the *current* last block's
    /// canonical form concatenated with the decimal proof. `previous_hash`
    /// uses the caller-supplied value when present and non-empty, otherwise
    /// the plain canonical hash of the last block. The pool is cleared into
    /// the block, order preserved.
    ///
    /// The proof is accepted as-is: validity checking lives in
    /// [`crate::chain::ProofOfWork`] and is never a precondition here.
    pub fn create_block(&mut self, proof: u64, previous_hash: Option<String>) -> Result<Block> {
        let hash = match self.chain.last() {
            Some(last) => {
                let block_string = last.canonical_json()?;
                crate::sha256_hex(format!("{}{}", block_string, proof).as_bytes())
            }
            None => String::new(),
        };

        let previous_hash = match previous_hash {
            Some(h) if !h.is_empty() => h,
            _ => self.last_block()?.compute_hash()?,
        };

        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: crate::current_timestamp(),
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
            hash,
        };

        self.chain.push(block.clone());
        Ok(block)
    }

    /// The most recently appended block.
    pub fn last_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(Error::EmptyChain)
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}
