use crate::logger::Logger;

/// Default number of leading zero hex characters a valid proof must produce.
///
/// The difficulty is always an explicit parameter: the digest prefix checked
/// and the zero run compared are the same length by construction.
pub const DEFAULT_DIFFICULTY: usize = 4;

const MAX_PROOF: u64 = u64::MAX;

/// Leading-zero proof-of-work predicate. Stateless apart from the difficulty.
#[derive(Debug, Clone, Copy)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl ProofOfWork {
    pub fn new(difficulty: usize) -> Self {
        ProofOfWork { difficulty }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// True iff SHA256(block_string + decimal proof) starts with `difficulty`
    /// zero hex characters. Pure and total; never errors.
    pub fn valid_proof(&self, block_string: &str, proof: u64) -> bool {
        let guess = format!("{}{}", block_string, proof);
        let digest = crate::sha256_hex(guess.as_bytes());
        if self.difficulty > digest.len() {
            return false;
        }
        digest.bytes().take(self.difficulty).all(|b| b == b'0')
    }

    /// Linear search for a proof satisfying the predicate. Returns the proof
    /// and the digest it produces.
    pub fn run(&self, block_string: &str) -> (u64, String) {
        let mut proof = 0;
        Logger::info("Searching for a valid proof");
        while proof < MAX_PROOF {
            if self.valid_proof(block_string, proof) {
                break;
            }
            proof += 1;
        }
        let digest = crate::sha256_hex(format!("{}{}", block_string, proof).as_bytes());
        Logger::info(&digest);
        (proof, digest)
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        ProofOfWork::new(DEFAULT_DIFFICULTY)
    }
}
