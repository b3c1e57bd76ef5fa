//! Puzzle Logic Module
//!
//! All puzzle state and rules. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `grid`: Tile positions, adjacency queries, swap primitive
//! - `controller`: Shuffle, move validation, win detection, reset
//! - `input`: Commands pushed in by the input layer
//! - `events`: Notifications for the render layer
//! - `error`: Error taxonomy

pub mod grid;
pub mod controller;
pub mod input;
pub mod events;
pub mod error;

// Re-export key types
pub use grid::{GridModel, Tile, TileId, EMPTY_TILE};
pub use controller::{MoveOutcome, PuzzleConfig, PuzzleController, PuzzlePhase};
pub use events::PuzzleEvent;
pub use error::{ConfigError, PuzzleError};
