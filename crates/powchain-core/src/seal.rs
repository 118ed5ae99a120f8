//! Proof-of-work sealing: nonce search, proof verification, cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::ChainError;
use crate::{Block, Hash};

/// How many nonces to try between cancellation polls.
const CANCEL_POLL_INTERVAL: u64 = 1 << 10;

/// Cooperative cancellation flag for a pathologically long nonce search.
/// Clone it onto another thread and call `cancel` there.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Count the leading '0' digits of the hash's hex rendering without building
/// the string. Each byte holds two hex digits, high nibble first.
pub fn leading_zero_hex_digits(hash: &Hash) -> u32 {
    let mut total = 0u32;
    for b in hash {
        if *b == 0 {
            total += 2;
        } else {
            if *b >> 4 == 0 {
                total += 1;
            }
            break;
        }
    }
    total
}

/// True when the block's recomputed content hash satisfies its own
/// difficulty. Pure; safe to call repeatedly.
pub fn verify(block: &Block) -> bool {
    leading_zero_hex_digits(&block.hash()) >= block.difficulty
}

/// Seal a block: scan nonces from 0 upward, one at a time, until the content
/// hash carries at least `difficulty` leading zero hex digits. The first
/// qualifying nonce wins, so the result is a pure function of the inputs.
/// Difficulty 0 accepts the first candidate. Unbounded: with no qualifying
/// nonce in reach this spins until one turns up.
pub fn seal(payload: Vec<u8>, previous_hash: Vec<u8>, difficulty: u32, timestamp: u64) -> Block {
    seal_cancellable(
        payload,
        previous_hash,
        difficulty,
        timestamp,
        &CancelToken::new(),
    )
    .expect("search with a private token cannot be cancelled")
}

/// Like [`seal`], but aborts with [`ChainError::SearchCancelled`] once
/// `cancel` fires. The token is polled every `CANCEL_POLL_INTERVAL` nonces,
/// so cancellation lands within a bounded number of hashes.
pub fn seal_cancellable(
    payload: Vec<u8>,
    previous_hash: Vec<u8>,
    difficulty: u32,
    timestamp: u64,
    cancel: &CancelToken,
) -> Result<Block, ChainError> {
    let mut block = Block {
        timestamp,
        previous_hash,
        difficulty,
        nonce: 0,
        payload,
    };
    loop {
        if block.nonce % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
            debug!("nonce search cancelled at nonce {}", block.nonce);
            return Err(ChainError::SearchCancelled);
        }
        let hash = block.hash();
        if leading_zero_hex_digits(&hash) >= difficulty {
            info!(
                "sealed block with nonce {} and hash {}",
                block.nonce,
                hex::encode(hash)
            );
            return Ok(block);
        }
        block.nonce = block.nonce.wrapping_add(1);
    }
}
