//! Core deterministic primitives.
//!
//! Everything the puzzle logic computes with lives here: lattice
//! coordinates, the seeded RNG and the state hasher.

pub mod position;
pub mod rng;
pub mod hash;

// Re-export core types
pub use position::GridPos;
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
