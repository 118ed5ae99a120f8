//! Append-only chain of sealed blocks with a blocking observer hand-off.

use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;
use tracing::{error, info};

use crate::constants::{GENESIS_PAYLOAD, MAX_DIFFICULTY};
use crate::error::ChainError;
use crate::seal::{self, CancelToken};
use crate::Block;

/// Per-block notification delivered to observers, shaped for display.
#[derive(Clone, Debug, Serialize)]
pub struct BlockAnnouncement {
    pub hash: String,
    pub previous_hash: String,
    pub nonce: u64,
    pub payload: Vec<u8>,
    pub proof_valid: bool,
}

impl From<&Block> for BlockAnnouncement {
    fn from(block: &Block) -> Self {
        Self {
            hash: block.hash_hex(),
            previous_hash: hex::encode(&block.previous_hash),
            nonce: block.nonce,
            payload: block.payload.clone(),
            proof_valid: seal::verify(block),
        }
    }
}

/// Append-only sequence of sealed blocks, genesis first.
///
/// Single-writer by construction: `append` takes `&mut self`, so concurrent
/// appends against one ledger are a compile error and a `snapshot` borrow can
/// never observe a half-built block.
pub struct Ledger {
    blocks: Vec<Block>,
    difficulty: u32,
    observers: Vec<Sender<BlockAnnouncement>>,
}

impl Ledger {
    /// Create a ledger whose sole element is a freshly sealed genesis block
    /// (empty previous hash, fixed sentinel payload) at `difficulty`.
    /// Difficulty is fixed for the ledger's lifetime and rejected up front
    /// when no sha-256 hash could satisfy it.
    pub fn new(difficulty: u32) -> Result<Self, ChainError> {
        if difficulty > MAX_DIFFICULTY {
            return Err(ChainError::DifficultyOutOfRange(difficulty));
        }
        let genesis = seal::seal(GENESIS_PAYLOAD.to_vec(), Vec::new(), difficulty, unix_now());
        info!("chain initialized with genesis hash {}", genesis.hash_hex());
        Ok(Self {
            blocks: vec![genesis],
            difficulty,
            observers: Vec::new(),
        })
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn tip(&self) -> &Block {
        self.blocks.last().expect("ledger always holds genesis")
    }

    /// Current chain contents for read-only iteration, genesis first.
    pub fn snapshot(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Register an observer. The hand-off is a zero-capacity channel:
    /// `append` blocks until this receiver takes the announcement, matching
    /// an unbuffered rendezvous. Dropping the receiver unsubscribes on the
    /// next append.
    pub fn subscribe(&mut self) -> Receiver<BlockAnnouncement> {
        let (tx, rx) = bounded(0);
        self.observers.push(tx);
        rx
    }

    /// Seal a new block on top of the current tip and append it.
    ///
    /// The sealed block is independently re-verified before acceptance. A
    /// proof failing its own difficulty marks a defect in the sealer: the
    /// append is refused, the chain is left untouched, and the failure is
    /// surfaced as [`ChainError::InvalidProof`].
    pub fn append(&mut self, payload: Vec<u8>) -> Result<Block, ChainError> {
        self.append_cancellable(payload, &CancelToken::new())
    }

    /// Like [`Ledger::append`], but the nonce search honors `cancel`. A
    /// cancelled search appends nothing.
    pub fn append_cancellable(
        &mut self,
        payload: Vec<u8>,
        cancel: &CancelToken,
    ) -> Result<Block, ChainError> {
        let tip_hash = self.tip().hash();
        let block = seal::seal_cancellable(
            payload,
            tip_hash.to_vec(),
            self.difficulty,
            unix_now(),
            cancel,
        )?;
        if !seal::verify(&block) {
            let hash = block.hash_hex();
            error!("invalid proof produced: refusing nonce {} hash {}", block.nonce, hash);
            return Err(ChainError::InvalidProof {
                nonce: block.nonce,
                hash,
                difficulty: self.difficulty,
            });
        }
        self.blocks.push(block.clone());
        self.publish(&block);
        Ok(block)
    }

    /// Hand the announcement to every live subscriber, blocking until each
    /// receives. Subscribers whose receiver is gone are pruned.
    fn publish(&mut self, block: &Block) {
        let announcement = BlockAnnouncement::from(block);
        self.observers
            .retain(|tx| tx.send(announcement.clone()).is_ok());
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs()
}
