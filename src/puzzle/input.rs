//! Input Commands
//!
//! The input layer pushes discrete commands; the core never polls.
//! A tap/click is resolved to a tile id outside the core (hit testing),
//! or through [`PuzzleCommand::from_world_point`] when the render layer
//! places tiles on the unit lattice.

use serde::{Serialize, Deserialize};
use crate::core::position::GridPos;
use crate::puzzle::controller::MoveOutcome;
use crate::puzzle::grid::{GridModel, TileId};

/// One discrete input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleCommand {
    /// Slide this tile into the empty slot.
    Move(TileId),
    /// Retry button: reset and reshuffle.
    Retry,
}

impl PuzzleCommand {
    /// Command for a hit-test result. A miss produces no command.
    #[inline]
    pub fn from_hit(hit: Option<TileId>) -> Option<Self> {
        hit.map(PuzzleCommand::Move)
    }

    /// Resolve a world-space point against the grid.
    ///
    /// The point is snapped to the lattice first, so render-side float
    /// drift cannot turn a hit into a miss.
    pub fn from_world_point(grid: &GridModel, x: f32, y: f32) -> Option<Self> {
        Self::from_hit(GridPos::snap(x, y).and_then(|pos| grid.tile_at(pos)))
    }
}

/// Result of handling a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// A move request was processed.
    Move(MoveOutcome),
    /// The puzzle was reset and reshuffled.
    Reset,
}
