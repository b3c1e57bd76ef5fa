//! State Hashing for Verification
//!
//! Deterministic hashing of puzzle state for:
//! - Replay validation (same seed + same moves => same hash)
//! - Cheap equality checks between two puzzle instances

use sha2::{Sha256, Digest};
use super::position::GridPos;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for puzzle state.
///
/// Wraps SHA-256 with helpers for lattice types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for puzzle state.
    pub fn for_puzzle_state() -> Self {
        Self::new(b"SLIDE_PUZZLE_STATE_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a lattice position.
    #[inline]
    pub fn update_pos(&mut self, value: GridPos) {
        self.update_i32(value.x);
        self.update_i32(value.y);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for puzzle verification.
///
/// Called by `PuzzleController::compute_hash()`.
/// The closure adds the puzzle-specific data.
pub fn compute_state_hash<F>(move_count: u32, rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_puzzle_state();

    // Always hash move count and seed first
    hasher.update_u32(move_count);
    hasher.update_u64(rng_seed);

    add_state(&mut hasher);

    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
