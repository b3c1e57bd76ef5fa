//! Puzzle Events
//!
//! Notifications produced by the controller for the render layer.
//! The controller queues them; callers drain the queue after each
//! command and forward the batch, e.g. through [`dispatch_events`].

use serde::{Serialize, Deserialize};
use crate::core::position::GridPos;
use crate::puzzle::grid::TileId;

/// What caused a tile to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCause {
    /// Random walk step while shuffling
    Shuffle,
    /// Accepted player move
    Player,
    /// Restored from the start snapshot during reset
    Reset,
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleEventData {
    /// A tile changed cell.
    TileMoved {
        /// Visible tile that moved (never the empty slot)
        tile_id: TileId,
        /// Previous cell
        from: GridPos,
        /// New cell
        to: GridPos,
        /// Shuffle step, player move, or reset
        cause: MoveCause,
    },

    /// Shuffle loop completed.
    PuzzleShuffled {
        /// Random steps taken (may exceed the configured count under
        /// `ShufflePolicy::RequireUnsolved`)
        steps: u32,
        /// Whether the walk landed on the solved layout
        solved: bool,
    },

    /// Playing -> Solved transition.
    PuzzleSolved {
        /// Player moves it took
        moves: u32,
    },
}

/// A puzzle event stamped with a sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleEvent {
    /// Monotonic per-controller sequence number
    pub seq: u64,

    /// Event data
    pub data: PuzzleEventData,
}

impl PuzzleEvent {
    /// Create a new event.
    pub fn new(seq: u64, data: PuzzleEventData) -> Self {
        Self { seq, data }
    }

    /// Create tile moved event.
    pub fn tile_moved(seq: u64, tile_id: TileId, from: GridPos, to: GridPos, cause: MoveCause) -> Self {
        Self::new(
            seq,
            PuzzleEventData::TileMoved {
                tile_id,
                from,
                to,
                cause,
            },
        )
    }

    /// Create puzzle shuffled event.
    pub fn puzzle_shuffled(seq: u64, steps: u32, solved: bool) -> Self {
        Self::new(seq, PuzzleEventData::PuzzleShuffled { steps, solved })
    }

    /// Create puzzle solved event.
    pub fn puzzle_solved(seq: u64, moves: u32) -> Self {
        Self::new(seq, PuzzleEventData::PuzzleSolved { moves })
    }

    /// Tile involved, if any.
    pub fn tile_id(&self) -> Option<TileId> {
        match &self.data {
            PuzzleEventData::TileMoved { tile_id, .. } => Some(*tile_id),
            _ => None,
        }
    }

    /// Is this a puzzle solved event?
    pub fn is_solved(&self) -> bool {
        matches!(self.data, PuzzleEventData::PuzzleSolved { .. })
    }
}

/// Receiver side of the notification surface.
///
/// Every method has an empty default so a renderer only implements
/// what it cares about.
pub trait PuzzleListener {
    /// A tile moved to `to` (shuffle step, player move, or reset).
    fn on_tile_moved(&mut self, _tile_id: TileId, _to: GridPos, _cause: MoveCause) {}

    /// The puzzle was just solved.
    fn on_puzzle_solved(&mut self, _moves: u32) {}

    /// A shuffle finished.
    fn on_puzzle_shuffled(&mut self, _steps: u32) {}
}

/// Forward a drained event batch to a listener, in order.
pub fn dispatch_events<L: PuzzleListener + ?Sized>(events: &[PuzzleEvent], listener: &mut L) {
    for event in events {
        match &event.data {
            PuzzleEventData::TileMoved { tile_id, to, cause, .. } => {
                listener.on_tile_moved(*tile_id, *to, *cause)
            }
            PuzzleEventData::PuzzleShuffled { steps, .. } => listener.on_puzzle_shuffled(*steps),
            PuzzleEventData::PuzzleSolved { moves } => listener.on_puzzle_solved(*moves),
        }
    }
}
