use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tx::Transaction;

/// A block in the chain. Never mutated after it is appended.
///
/// `previous_hash` is the canonical hash of the prior block (or the `"1"`
/// sentinel for genesis). `hash` is the digest of the prior block's canonical
/// form combined with this block's proof, set at creation time (empty for
/// genesis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Canonical serialization: JSON with map keys sorted lexicographically,
    /// so two in-memory representations of the same logical block always
    /// produce identical bytes. `serde_json::Value` maps are BTree-backed,
    /// which gives the sorted key order.
    pub fn canonical_json(&self) -> Result<String> {
        let value = serde_json::to_value(self)?;
        Ok(value.to_string())
    }

    /// Lowercase hex SHA256 digest of the canonical serialization.
    pub fn compute_hash(&self) -> Result<String> {
        Ok(crate::sha256_hex(self.canonical_json()?.as_bytes()))
    }
}
