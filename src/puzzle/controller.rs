//! Puzzle Controller
//!
//! Owns the grid and drives it through the puzzle lifecycle:
//!
//! ```text
//! Initializing -> Shuffling -> Playing <-> Solved
//!                     ^                      |
//!                     +------- reset --------+
//! ```
//!
//! Every operation runs to completion before returning. Events produced
//! along the way are queued and drained with [`PuzzleController::take_events`].

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, instrument, trace};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::position::GridPos;
use crate::core::rng::DeterministicRng;
use crate::puzzle::error::PuzzleError;
use crate::puzzle::events::{MoveCause, PuzzleEvent};
use crate::puzzle::grid::{GridModel, TileId};
use crate::puzzle::input::{CommandResult, PuzzleCommand};
use crate::DEFAULT_SHUFFLE_COUNT;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// What to do when a shuffle walk lands back on the solved layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShufflePolicy {
    /// Accept it; the puzzle starts out solved.
    #[default]
    AllowSolved,
    /// Take one extra random step. Any single move from the solved
    /// layout leaves it unsolved.
    RequireUnsolved,
}

/// Configuration for a puzzle instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Columns of the rectangular layout
    pub width: u32,
    /// Rows of the rectangular layout
    pub height: u32,
    /// Random walk steps per shuffle (0 leaves the puzzle solved)
    pub shuffle_count: u32,
    /// RNG seed for the shuffle walk
    pub seed: u64,
    /// Handling of walks that end solved
    pub shuffle_policy: ShufflePolicy,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            width: 3,
            height: 3,
            shuffle_count: DEFAULT_SHUFFLE_COUNT,
            seed: 12345,
            shuffle_policy: ShufflePolicy::AllowSolved,
        }
    }
}

// =============================================================================
// PHASE & OUTCOMES
// =============================================================================

/// Lifecycle phase of a puzzle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PuzzlePhase {
    /// Taking the start snapshot
    #[default]
    Initializing = 0,
    /// Random walk in progress
    Shuffling = 1,
    /// Accepting moves
    Playing = 2,
    /// Every tile home; moves rejected until reset
    Solved = 3,
}

/// Why a move request was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Id outside the tile range
    UnknownTile,
    /// The empty slot cannot move into itself
    EmptySlot,
    /// Tile does not share an edge with the empty slot
    NotAdjacent,
    /// Puzzle is not in the Playing phase
    NotPlaying,
}

/// Result of a move request.
///
/// Rejection is an ordinary outcome, not an error: players click
/// non-movable tiles all the time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Tile slid into the empty slot.
    Applied {
        /// Whether this move solved the puzzle
        solved: bool,
    },
    /// Nothing changed.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// Was the move applied?
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// A sliding-tile puzzle instance.
///
/// Exclusively owns the grid and the start snapshot. Callers get
/// read-only views and events; every mutation goes through
/// [`request_move`](Self::request_move) or [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct PuzzleController {
    /// Tile positions
    grid: GridModel,

    /// Positions captured at initialization, restored by reset
    start_positions: Vec<GridPos>,

    /// Current phase
    phase: PuzzlePhase,

    /// Walk steps per shuffle
    shuffle_count: u32,

    /// Handling of walks that end solved
    shuffle_policy: ShufflePolicy,

    /// RNG seed (for verification)
    seed: u64,

    /// Shuffle RNG
    rng: DeterministicRng,

    /// Accepted player moves since the last shuffle
    history: Vec<TileId>,

    /// Number of shuffles performed (1 after construction)
    rounds: u32,

    /// Next event sequence number
    next_seq: u64,

    /// Events not yet drained
    pending_events: Vec<PuzzleEvent>,
}

impl PuzzleController {
    /// Create a rectangular puzzle and shuffle it.
    #[instrument(level = "debug")]
    pub fn new(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        let grid = GridModel::rectangular(config.width, config.height)?;
        Ok(Self::with_grid(grid, config))
    }

    /// Create a puzzle from explicit home positions and shuffle it.
    ///
    /// `homes[0]` is the empty slot. `config.width`/`config.height` are
    /// ignored; the layout defines the shape.
    #[instrument(level = "debug", skip(homes), fields(tiles = homes.len()))]
    pub fn from_layout(homes: Vec<GridPos>, config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        let grid = GridModel::from_positions(homes)?;
        Ok(Self::with_grid(grid, config))
    }

    fn with_grid(grid: GridModel, config: &PuzzleConfig) -> Self {
        // Home == start: the solved layout is the layout before shuffling.
        let start_positions = grid.positions();
        let mut controller = Self {
            grid,
            start_positions,
            phase: PuzzlePhase::Initializing,
            shuffle_count: config.shuffle_count,
            shuffle_policy: config.shuffle_policy,
            seed: config.seed,
            rng: DeterministicRng::new(config.seed),
            history: Vec::new(),
            rounds: 0,
            next_seq: 0,
            pending_events: Vec::new(),
        };
        info!(
            tiles = controller.grid.tile_count(),
            shuffle_count = controller.shuffle_count,
            seed = controller.seed,
            "Puzzle initialized"
        );
        controller.shuffle();
        controller
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Slide `tile_id` into the empty slot if it is adjacent.
    ///
    /// Rejected requests change nothing and emit no events.
    #[instrument(level = "debug", skip(self), fields(phase = ?self.phase))]
    pub fn request_move(&mut self, tile_id: TileId) -> MoveOutcome {
        if let Err(reason) = self.check_move(tile_id) {
            debug!(?reason, "Move rejected");
            return MoveOutcome::Rejected(reason);
        }

        let Some((from, to)) = self.grid.slide_into_empty(tile_id) else {
            return MoveOutcome::Rejected(RejectReason::NotAdjacent);
        };
        self.history.push(tile_id);
        self.push_event(|seq| PuzzleEvent::tile_moved(seq, tile_id, from, to, MoveCause::Player));

        let solved = self.grid.is_solved();
        if solved {
            self.phase = PuzzlePhase::Solved;
            let moves = self.move_count();
            self.push_event(|seq| PuzzleEvent::puzzle_solved(seq, moves));
            info!(moves, "Puzzle solved");
        }

        MoveOutcome::Applied { solved }
    }

    /// Restore the start snapshot and reshuffle.
    #[instrument(level = "debug", skip(self), fields(phase = ?self.phase))]
    pub fn reset(&mut self) {
        // Report every tile the restore moves so the renderer can sync.
        for (tile, start) in self.grid.tiles().iter().zip(&self.start_positions) {
            if tile.position != *start && !tile.id.is_empty_slot() {
                let (id, from, to) = (tile.id, tile.position, *start);
                self.pending_events
                    .push(PuzzleEvent::tile_moved(self.next_seq, id, from, to, MoveCause::Reset));
                self.next_seq += 1;
            }
        }
        self.grid.restore(&self.start_positions);
        self.phase = PuzzlePhase::Initializing;
        self.history.clear();
        info!(round = self.rounds + 1, "Puzzle reset");
        self.shuffle();
    }

    /// Retry button handler.
    pub fn retry_requested(&mut self) {
        self.reset();
    }

    /// Apply one input command.
    pub fn handle(&mut self, command: PuzzleCommand) -> CommandResult {
        match command {
            PuzzleCommand::Move(tile_id) => CommandResult::Move(self.request_move(tile_id)),
            PuzzleCommand::Retry => {
                self.retry_requested();
                CommandResult::Reset
            }
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Read-only view of the grid.
    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> PuzzlePhase {
        self.phase
    }

    /// Every tile is on its home cell. Pure; repeated calls agree.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Tiles that may move right now (ignores phase).
    pub fn movable_tile_ids(&self) -> BTreeSet<TileId> {
        self.grid.movable_tile_ids()
    }

    /// Current position of a tile.
    pub fn position_of(&self, tile_id: TileId) -> Result<GridPos, PuzzleError> {
        self.grid.position_of(tile_id)
    }

    /// Positions recorded at initialization.
    #[inline]
    pub fn start_positions(&self) -> &[GridPos] {
        &self.start_positions
    }

    /// Accepted player moves since the last shuffle.
    #[inline]
    pub fn history(&self) -> &[TileId] {
        &self.history
    }

    /// Number of accepted player moves since the last shuffle.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.history.len() as u32
    }

    /// RNG seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Walk steps per shuffle.
    #[inline]
    pub fn shuffle_count(&self) -> u32 {
        self.shuffle_count
    }

    /// Shuffles performed so far.
    #[inline]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.move_count(), self.seed, |hasher| {
            hasher.update_u8(self.phase as u8);
            hasher.update_u32(self.rounds);
            self.grid.hash_into(hasher);
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn check_move(&self, tile_id: TileId) -> Result<(), RejectReason> {
        if self.phase != PuzzlePhase::Playing {
            return Err(RejectReason::NotPlaying);
        }
        if self.grid.tile(tile_id).is_none() {
            return Err(RejectReason::UnknownTile);
        }
        if tile_id.is_empty_slot() {
            return Err(RejectReason::EmptySlot);
        }
        if !self.grid.is_movable(tile_id) {
            return Err(RejectReason::NotAdjacent);
        }
        Ok(())
    }

    /// Random walk of the empty slot, starting from the current layout.
    ///
    /// Each step only ever swaps the empty slot with a neighbour, so the
    /// result is always reachable from (and solvable back to) the start.
    fn shuffle(&mut self) {
        self.phase = PuzzlePhase::Shuffling;

        let mut steps = 0u32;
        for _ in 0..self.shuffle_count {
            if self.shuffle_step() {
                steps += 1;
            }
        }
        if self.shuffle_policy == ShufflePolicy::RequireUnsolved
            && self.shuffle_count > 0
            && self.grid.is_solved()
            && self.shuffle_step()
        {
            steps += 1;
        }

        let solved = self.grid.is_solved();
        self.rounds += 1;
        self.push_event(|seq| PuzzleEvent::puzzle_shuffled(seq, steps, solved));
        self.phase = if solved {
            PuzzlePhase::Solved
        } else {
            PuzzlePhase::Playing
        };
        info!(steps, solved, misplaced = self.grid.misplaced_count(), "Puzzle shuffled");
    }

    /// One walk step. The movable set is never empty on a validated grid.
    fn shuffle_step(&mut self) -> bool {
        let movable: Vec<TileId> = self.grid.movable_tile_ids().into_iter().collect();
        let Some(&tile_id) = self.rng.choose(&movable) else {
            return false;
        };
        match self.grid.slide_into_empty(tile_id) {
            Some((from, to)) => {
                trace!(%tile_id, %from, %to, "Shuffle step");
                self.push_event(|seq| PuzzleEvent::tile_moved(seq, tile_id, from, to, MoveCause::Shuffle));
                true
            }
            None => false,
        }
    }

    fn push_event(&mut self, make: impl FnOnce(u64) -> PuzzleEvent) {
        let event = make(self.next_seq);
        self.next_seq += 1;
        self.pending_events.push(event);
    }
}

/// Replay a rectangular puzzle from its config and a recorded move list.
///
/// Returns the final controller and every event, shuffle included.
/// Rejected moves in the list are kept as no-ops.
pub fn replay_moves(
    config: &PuzzleConfig,
    moves: &[TileId],
) -> Result<(PuzzleController, Vec<PuzzleEvent>), PuzzleError> {
    Ok(replay_onto(PuzzleController::new(config)?, moves))
}

/// Replay a puzzle built with [`PuzzleController::from_layout`].
///
/// `homes` must be the layout the live puzzle was created from, e.g.
/// its `start_positions()`.
pub fn replay_layout_moves(
    homes: Vec<GridPos>,
    config: &PuzzleConfig,
    moves: &[TileId],
) -> Result<(PuzzleController, Vec<PuzzleEvent>), PuzzleError> {
    Ok(replay_onto(PuzzleController::from_layout(homes, config)?, moves))
}

fn replay_onto(mut puzzle: PuzzleController, moves: &[TileId]) -> (PuzzleController, Vec<PuzzleEvent>) {
    let mut all_events = puzzle.take_events();

    for tile_id in moves {
        puzzle.request_move(*tile_id);
        all_events.extend(puzzle.take_events());
    }

    (puzzle, all_events)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::events::PuzzleEventData;
    use crate::puzzle::grid::EMPTY_TILE;

    fn config(shuffle_count: u32, seed: u64) -> PuzzleConfig {
        PuzzleConfig {
            shuffle_count,
            seed,
            ..PuzzleConfig::default()
        }
    }

    /// Tile ids moved by shuffle steps, in order.
    fn shuffle_trail(events: &[PuzzleEvent]) -> Vec<TileId> {
        events
            .iter()
            .filter_map(|e| match &e.data {
                PuzzleEventData::TileMoved { tile_id, cause: MoveCause::Shuffle, .. } => Some(*tile_id),
                _ => None,
            })
            .collect()
    }

    fn visible_tiles_off_home(puzzle: &PuzzleController) -> usize {
        puzzle
            .grid()
            .tiles()
            .iter()
            .filter(|t| !t.id.is_empty_slot() && !t.is_home())
            .count()
    }

    #[test]
    fn test_single_step_shuffle() {
        let mut puzzle = PuzzleController::new(&config(1, 7)).unwrap();

        assert_eq!(puzzle.phase(), PuzzlePhase::Playing);
        assert!(!puzzle.is_solved());
        assert_eq!(visible_tiles_off_home(&puzzle), 1);

        // The moved tile was a neighbour of the empty slot's home (2, 2)
        let moved = shuffle_trail(&puzzle.take_events());
        assert_eq!(moved.len(), 1);
        let home = puzzle.grid().home_of(moved[0]).unwrap();
        assert!(home.is_adjacent(GridPos::new(2, 2)));
    }

    #[test]
    fn test_zero_shuffle_is_solved() {
        let mut puzzle = PuzzleController::new(&config(0, 7)).unwrap();

        assert!(puzzle.is_solved());
        assert_eq!(puzzle.phase(), PuzzlePhase::Solved);
        assert_eq!(puzzle.move_count(), 0);

        // Only the shuffled notification, no solved event
        let events = puzzle.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, PuzzleEventData::PuzzleShuffled { steps: 0, solved: true });
    }

    #[test]
    fn test_non_adjacent_move_rejected() {
        let mut puzzle = PuzzleController::new(&config(1, 3)).unwrap();
        puzzle.take_events();
        let before = puzzle.grid().clone();
        let hash = puzzle.compute_hash();

        let far = puzzle
            .grid()
            .tiles()
            .iter()
            .find(|t| !t.id.is_empty_slot() && !puzzle.grid().is_movable(t.id))
            .map(|t| t.id)
            .unwrap();

        assert_eq!(
            puzzle.request_move(far),
            MoveOutcome::Rejected(RejectReason::NotAdjacent)
        );
        assert_eq!(puzzle.grid(), &before);
        assert_eq!(puzzle.compute_hash(), hash);
        assert!(puzzle.take_events().is_empty());
    }

    #[test]
    fn test_invalid_requests_rejected() {
        let mut puzzle = PuzzleController::new(&config(5, 3)).unwrap();
        puzzle.take_events();

        assert_eq!(
            puzzle.request_move(TileId(9)),
            MoveOutcome::Rejected(RejectReason::UnknownTile)
        );
        assert_eq!(
            puzzle.request_move(EMPTY_TILE),
            MoveOutcome::Rejected(RejectReason::EmptySlot)
        );
        assert!(puzzle.take_events().is_empty());
        assert_eq!(puzzle.move_count(), 0);
    }

    #[test]
    fn test_full_solve_emits_one_solved_event() {
        let mut puzzle = PuzzleController::new(&config(31, 99)).unwrap();
        let trail = shuffle_trail(&puzzle.take_events());
        assert_eq!(trail.len(), 31);

        let mut events = Vec::new();
        for tile_id in trail.iter().rev() {
            puzzle.request_move(*tile_id);
            events.extend(puzzle.take_events());
        }

        assert!(puzzle.is_solved());
        assert_eq!(puzzle.phase(), PuzzlePhase::Solved);
        assert_eq!(events.iter().filter(|e| e.is_solved()).count(), 1);
        assert!(events.last().is_some_and(|e| e.is_solved()));
    }

    #[test]
    fn test_solved_rejects_moves() {
        let mut puzzle = PuzzleController::new(&config(1, 11)).unwrap();
        let trail = shuffle_trail(&puzzle.take_events());

        assert_eq!(puzzle.request_move(trail[0]), MoveOutcome::Applied { solved: true });
        assert_eq!(puzzle.phase(), PuzzlePhase::Solved);
        puzzle.take_events();

        for tile_id in puzzle.movable_tile_ids() {
            assert_eq!(
                puzzle.request_move(tile_id),
                MoveOutcome::Rejected(RejectReason::NotPlaying)
            );
        }
        assert!(puzzle.is_solved());
        assert!(puzzle.take_events().is_empty());
    }

    #[test]
    fn test_reset_from_solved_reshuffles() {
        let mut puzzle = PuzzleController::new(&config(1, 11)).unwrap();
        let trail = shuffle_trail(&puzzle.take_events());
        puzzle.request_move(trail[0]);
        assert_eq!(puzzle.phase(), PuzzlePhase::Solved);
        puzzle.take_events();

        puzzle.reset();

        assert_eq!(puzzle.phase(), PuzzlePhase::Playing);
        assert_eq!(puzzle.rounds(), 2);
        assert_eq!(puzzle.move_count(), 0);
        assert_eq!(visible_tiles_off_home(&puzzle), 1);

        let events = puzzle.take_events();
        assert_eq!(shuffle_trail(&events).len(), 1);
        assert!(matches!(
            events.last().map(|e| &e.data),
            Some(PuzzleEventData::PuzzleShuffled { steps: 1, solved: false })
        ));
    }

    #[test]
    fn test_reset_with_zero_shuffle_restores_start() {
        let mut puzzle = PuzzleController::new(&config(0, 1)).unwrap();
        let start = puzzle.start_positions().to_vec();

        puzzle.reset();

        assert_eq!(puzzle.grid().positions(), start);
        assert_eq!(puzzle.phase(), PuzzlePhase::Solved);
    }

    #[test]
    fn test_reset_from_playing_reports_restored_tiles() {
        let mut puzzle = PuzzleController::new(&config(12, 5)).unwrap();
        puzzle.take_events();
        let misplaced: BTreeSet<TileId> = puzzle
            .grid()
            .tiles()
            .iter()
            .filter(|t| !t.id.is_empty_slot() && !t.is_home())
            .map(|t| t.id)
            .collect();

        puzzle.reset();

        let restored: BTreeSet<TileId> = puzzle
            .take_events()
            .iter()
            .filter_map(|e| match &e.data {
                PuzzleEventData::TileMoved { tile_id, cause: MoveCause::Reset, .. } => Some(*tile_id),
                _ => None,
            })
            .collect();
        assert_eq!(restored, misplaced);
    }

    #[test]
    fn test_require_unsolved_policy() {
        // A 2x1 puzzle returns to solved after every even-length walk
        let allow = PuzzleConfig {
            width: 2,
            height: 1,
            shuffle_count: 2,
            seed: 1,
            shuffle_policy: ShufflePolicy::AllowSolved,
        };
        let puzzle = PuzzleController::new(&allow).unwrap();
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.phase(), PuzzlePhase::Solved);

        let require = PuzzleConfig {
            shuffle_policy: ShufflePolicy::RequireUnsolved,
            ..allow
        };
        let mut puzzle = PuzzleController::new(&require).unwrap();
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.phase(), PuzzlePhase::Playing);
        let events = puzzle.take_events();
        assert!(matches!(
            events.last().map(|e| &e.data),
            Some(PuzzleEventData::PuzzleShuffled { steps: 3, solved: false })
        ));
    }

    #[test]
    fn test_move_updates_history_and_events() {
        let mut puzzle = PuzzleController::new(&config(11, 21)).unwrap();
        puzzle.take_events();

        let tile_id = *puzzle.movable_tile_ids().iter().next().unwrap();
        let from = puzzle.position_of(tile_id).unwrap();
        let empty = puzzle.grid().empty_position();

        assert!(puzzle.request_move(tile_id).is_applied());
        assert_eq!(puzzle.history(), &[tile_id]);
        assert_eq!(puzzle.position_of(tile_id).unwrap(), empty);
        assert_eq!(puzzle.grid().empty_position(), from);

        let events = puzzle.take_events();
        assert!(matches!(
            events.first().map(|e| &e.data),
            Some(PuzzleEventData::TileMoved { cause: MoveCause::Player, .. })
        ));
    }

    #[test]
    fn test_event_sequence_numbers_increase() {
        let mut puzzle = PuzzleController::new(&config(15, 8)).unwrap();
        let tile_id = *puzzle.movable_tile_ids().iter().next().unwrap();
        puzzle.request_move(tile_id);
        puzzle.reset();

        let events = puzzle.take_events();
        assert!(events.windows(2).all(|w| w[0].seq < w[1].seq));
    }

    #[test]
    fn test_shuffle_determinism() {
        let a = PuzzleController::new(&config(50, 777)).unwrap();
        let b = PuzzleController::new(&config(50, 777)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.compute_hash(), b.compute_hash());

        let c = PuzzleController::new(&config(50, 778)).unwrap();
        assert_ne!(a.compute_hash(), c.compute_hash());
    }

    #[test]
    fn test_replay_matches_live_play() {
        let cfg = config(25, 4242);
        let mut live = PuzzleController::new(&cfg).unwrap();
        let mut live_events = live.take_events();

        // Always take the lowest movable tile
        for _ in 0..40 {
            let Some(tile_id) = live.movable_tile_ids().into_iter().next() else { break };
            live.request_move(tile_id);
            live_events.extend(live.take_events());
        }

        let (replayed, replay_events) = replay_moves(&cfg, live.history()).unwrap();
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert_eq!(replay_events, live_events);
    }

    #[test]
    fn test_replay_custom_layout() {
        // Ring around a missing centre cell
        let homes = vec![
            GridPos::new(2, 2),
            GridPos::new(0, 0),
            GridPos::new(1, 0),
            GridPos::new(2, 0),
            GridPos::new(0, 1),
            GridPos::new(2, 1),
            GridPos::new(0, 2),
            GridPos::new(1, 2),
        ];
        let cfg = config(13, 808);
        let mut live = PuzzleController::from_layout(homes, &cfg).unwrap();
        let mut live_events = live.take_events();

        for _ in 0..20 {
            let Some(tile_id) = live.movable_tile_ids().into_iter().last() else { break };
            live.request_move(tile_id);
            live_events.extend(live.take_events());
        }

        let (replayed, replay_events) =
            replay_layout_moves(live.start_positions().to_vec(), &cfg, live.history()).unwrap();
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert_eq!(replay_events, live_events);

        // The rectangular replay cannot reproduce a custom shape
        let (rect, _) = replay_moves(&cfg, live.history()).unwrap();
        assert_ne!(rect.compute_hash(), live.compute_hash());
    }

    #[test]
    fn test_from_layout_custom_shape() {
        // T-shaped board, empty slot in the stem
        let homes = vec![
            GridPos::new(1, 1),
            GridPos::new(0, 0),
            GridPos::new(1, 0),
            GridPos::new(2, 0),
        ];
        let puzzle = PuzzleController::from_layout(homes.clone(), &config(6, 2)).unwrap();
        assert_eq!(puzzle.start_positions(), homes.as_slice());
        assert_eq!(puzzle.rounds(), 1);

        let err = PuzzleController::from_layout(vec![GridPos::ZERO], &config(6, 2)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_handle_commands() {
        let mut puzzle = PuzzleController::new(&config(5, 6)).unwrap();
        let tile_id = *puzzle.movable_tile_ids().iter().next().unwrap();

        assert!(matches!(
            puzzle.handle(PuzzleCommand::Move(tile_id)),
            CommandResult::Move(MoveOutcome::Applied { .. })
        ));
        assert_eq!(puzzle.handle(PuzzleCommand::Retry), CommandResult::Reset);
        assert_eq!(puzzle.rounds(), 2);
        assert_eq!(puzzle.move_count(), 0);
    }

    #[test]
    fn test_config_json_defaults() {
        let cfg: PuzzleConfig = serde_json::from_str(r#"{"width": 4, "shuffle_policy": "RequireUnsolved"}"#).unwrap();
        assert_eq!(cfg.width, 4);
        assert_eq!(cfg.height, 3);
        assert_eq!(cfg.shuffle_count, DEFAULT_SHUFFLE_COUNT);
        assert_eq!(cfg.shuffle_policy, ShufflePolicy::RequireUnsolved);
    }
}
