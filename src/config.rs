use std::env;

use crate::chain::proof::DEFAULT_DIFFICULTY;

/// Configuration for the qoinchain node
///
/// Single-node settings only: bind address, proof-of-work difficulty, and
/// whether the mine endpoint rejects invalid proofs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host (default: `0.0.0.0`)
    pub host: String,

    /// Bind port (default: 5000)
    pub port: u16,

    /// Number of leading zero hex characters a valid proof must produce
    pub difficulty: usize,

    /// Reject mine requests whose proof fails the difficulty predicate.
    /// Off by default: any integer proof is accepted.
    pub enforce_proof: bool,

    /// Log level: "info", "debug", "warn", "error" (default: "info")
    pub log_level: String,
}

impl Config {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            difficulty: DEFAULT_DIFFICULTY,
            enforce_proof: false,
            log_level: "info".to_string(),
        }
    }

    /// Load config from environment variables
    ///
    /// Environment variables:
    /// - `QOINCHAIN_HOST`: bind host
    /// - `QOINCHAIN_PORT`: bind port
    /// - `QOINCHAIN_DIFFICULTY`: leading-zero difficulty
    /// - `QOINCHAIN_ENFORCE_PROOF`: "1" or "true" to gate mining on the proof
    /// - `QOINCHAIN_LOG_LEVEL`: log level
    pub fn from_env() -> Self {
        let mut config = Config::new();

        if let Ok(host) = env::var("QOINCHAIN_HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("QOINCHAIN_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        if let Ok(difficulty) = env::var("QOINCHAIN_DIFFICULTY") {
            if let Ok(difficulty) = difficulty.parse() {
                config.difficulty = difficulty;
            }
        }

        if let Ok(enforce) = env::var("QOINCHAIN_ENFORCE_PROOF") {
            config.enforce_proof = enforce == "1" || enforce.eq_ignore_ascii_case("true");
        }

        if let Ok(level) = env::var("QOINCHAIN_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
