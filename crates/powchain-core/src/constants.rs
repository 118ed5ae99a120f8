pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
/// A sha-256 digest renders to 64 hex digits; no hash satisfies more.
pub const MAX_DIFFICULTY: u32 = HASH_HEX_SIZE as u32;
pub const DEFAULT_DIFFICULTY: u32 = 4;
pub const GENESIS_PAYLOAD: &[u8] = b"I'm genesis block";
