use thiserror::Error;

use crate::constants::MAX_DIFFICULTY;

#[derive(Debug, Error)]
pub enum ChainError {
    /// The sealer handed back a block whose proof does not satisfy its own
    /// difficulty. A defect signal, not a runtime condition; the ledger
    /// refuses the block.
    #[error("invalid proof produced: nonce {nonce} gives hash {hash}, needs {difficulty} leading zeros")]
    InvalidProof {
        nonce: u64,
        hash: String,
        difficulty: u32,
    },

    #[error("difficulty {0} exceeds the {max} hex digits of a sha-256 hash", max = MAX_DIFFICULTY)]
    DifficultyOutOfRange(u32),

    #[error("nonce search cancelled")]
    SearchCancelled,
}
