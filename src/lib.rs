pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod logger;
pub mod tx;

use sha2::{Digest, Sha256};

/// Get current Unix timestamp as fractional seconds
pub fn current_timestamp() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}

/// Calculate the lowercase hex SHA256 digest
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
