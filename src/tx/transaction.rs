use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A single transfer queued into the pending pool.
///
/// Immutable once created; ends up embedded in exactly one block. `id` is a
/// random UUID and the stable reference for the transaction, independent of
/// its position in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub timestamp: f64,
    pub id: String,
}

impl Transaction {
    pub fn new(sender: &str, recipient: &str, amount: f64) -> Transaction {
        Transaction {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            timestamp: crate::current_timestamp(),
            id: Uuid::new_v4().to_string(),
        }
    }
}

/// A transfer amount as submitted by a client: either a JSON number or a
/// numeric string. Coerced to `f64` before entering the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Coerce to a finite float, rejecting anything else with `InvalidAmount`.
    pub fn to_f64(&self) -> Result<f64> {
        let value = match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidAmount(s.clone()))?,
        };
        if !value.is_finite() {
            return Err(Error::InvalidAmount(value.to_string()));
        }
        Ok(value)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}
