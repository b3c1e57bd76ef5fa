//! # Slide Puzzle Core
//!
//! Deterministic sliding-tile puzzle state machine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     SLIDE PUZZLE CORE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Deterministic primitives                │
//! │  ├── position.rs   - Integer lattice coordinates             │
//! │  ├── rng.rs        - Deterministic Xorshift128+ PRNG         │
//! │  └── hash.rs       - State hashing for replay verification   │
//! │                                                              │
//! │  puzzle/           - Puzzle logic (deterministic)            │
//! │  ├── grid.rs       - Tile positions, adjacency, swap         │
//! │  ├── controller.rs - Shuffle, moves, win detection, reset    │
//! │  ├── input.rs      - Commands pushed by the input layer      │
//! │  ├── events.rs     - Notifications for the render layer      │
//! │  └── error.rs      - Error taxonomy                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! - No floating-point arithmetic in puzzle logic (positions are `i32` lattice points)
//! - No HashMap (ordered collections only)
//! - No global state: callers own a [`PuzzleController`] explicitly
//! - All randomness from seeded Xorshift128+
//!
//! Given the same seed and the same move sequence, the puzzle reaches
//! **identical states** and produces **identical state hashes**.
//!
//! ## Example
//!
//! ```
//! use slide_puzzle::{PuzzleConfig, PuzzleController, MoveOutcome};
//!
//! let config = PuzzleConfig { shuffle_count: 0, ..PuzzleConfig::default() };
//! let mut puzzle = PuzzleController::new(&config).unwrap();
//! assert!(puzzle.is_solved());
//!
//! // Solved puzzles accept no moves until reset.
//! let tile = *puzzle.movable_tile_ids().iter().next().unwrap();
//! assert!(matches!(puzzle.request_move(tile), MoveOutcome::Rejected(_)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod puzzle;

// Re-export commonly used types
pub use crate::core::position::GridPos;
pub use crate::core::rng::DeterministicRng;
pub use crate::core::hash::StateHash;
pub use puzzle::controller::{
    replay_layout_moves, replay_moves, MoveOutcome, PuzzleConfig, PuzzleController, PuzzlePhase, RejectReason,
    ShufflePolicy,
};
pub use puzzle::error::{ConfigError, PuzzleError};
pub use puzzle::events::{dispatch_events, MoveCause, PuzzleEvent, PuzzleEventData, PuzzleListener};
pub use puzzle::grid::{GridModel, Tile, TileId, EMPTY_TILE};
pub use puzzle::input::{CommandResult, PuzzleCommand};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of random shuffle steps.
pub const DEFAULT_SHUFFLE_COUNT: u32 = 20;
