//! Puzzle Errors
//!
//! Only integration bugs and broken configurations are errors.
//! A rejected player move is an ordinary outcome, see `MoveOutcome`.

use crate::core::position::GridPos;
use crate::puzzle::grid::TileId;

/// Errors raised by the grid model and controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// A tile id outside `0..tile_count` was referenced.
    #[error("Unknown tile {0}")]
    UnknownTile(TileId),

    /// Swap attempted with an unknown tile id.
    #[error("Invalid swap between {a} and {b}")]
    InvalidSwap {
        /// First tile of the swap
        a: TileId,
        /// Second tile of the swap
        b: TileId,
    },

    /// Puzzle could not be set up.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Fatal setup errors. Raised once, at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Fewer than two tiles (the empty slot plus at least one piece).
    #[error("Need at least 2 tiles, got {count}")]
    TooFewTiles {
        /// Tiles supplied
        count: usize,
    },

    /// Two tiles share a lattice cell.
    #[error("Tiles {first} and {second} both occupy {position}")]
    DuplicatePosition {
        /// Lower tile id
        first: TileId,
        /// Higher tile id
        second: TileId,
        /// Shared cell
        position: GridPos,
    },

    /// No tile is adjacent to the empty slot.
    #[error("Empty slot at {position} has no adjacent tile")]
    IsolatedEmptySlot {
        /// Empty slot cell
        position: GridPos,
    },

    /// A tile can never be reached by the empty slot.
    #[error("Tile {tile} at {position} is not connected to the empty slot")]
    DisconnectedLayout {
        /// Lowest unreachable tile id
        tile: TileId,
        /// Its home cell
        position: GridPos,
    },

    /// Rectangular layout with a zero or oversized side.
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Columns
        width: u32,
        /// Rows
        height: u32,
    },
}

impl PuzzleError {
    /// Whether this error came from puzzle setup.
    pub fn is_configuration(&self) -> bool {
        matches!(self, PuzzleError::Configuration(_))
    }
}
