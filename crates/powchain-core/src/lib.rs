use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub mod constants;
pub mod error;
pub mod ledger;
pub mod seal;

pub use error::ChainError;
pub use ledger::{BlockAnnouncement, Ledger};
pub use seal::CancelToken;

pub type Hash = [u8; 32];

/// A sealed unit of chain data. Sealed blocks are value data: clone freely,
/// never mutate one that has been appended.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    /// Unix seconds, captured once when the candidate was built and reused
    /// verbatim for every re-hash.
    pub timestamp: u64,
    /// Content hash of the predecessor. Empty for the genesis block.
    pub previous_hash: Vec<u8>,
    /// Required count of leading '0' hex digits in the content hash.
    pub difficulty: u32,
    /// Search variable fixed by the sealer.
    pub nonce: u64,
    pub payload: Vec<u8>,
}

impl Block {
    /// Serialize the hashed content in the fixed order
    /// `timestamp || previous_hash || payload || difficulty || nonce`.
    /// Integers are little-endian fixed width; the two variable-length
    /// fields carry a u64 length prefix so the encoding stays injective.
    pub fn content_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            8 + 8 + self.previous_hash.len() + 8 + self.payload.len() + 4 + 8,
        );
        bytes.extend_from_slice(&self.timestamp.to_le_bytes());
        bytes.extend_from_slice(&(self.previous_hash.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&self.previous_hash);
        bytes.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes.extend_from_slice(&self.difficulty.to_le_bytes());
        bytes.extend_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Content hash: a single SHA-256 pass over `content_bytes`. The same
    /// function the sealer drives during the nonce search.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.content_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; constants::HASH_SIZE];
        out.copy_from_slice(&digest[..]);
        out
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_empty()
    }
}
