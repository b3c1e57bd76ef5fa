//! Grid Model
//!
//! Tile positions, adjacency queries and the swap primitive.
//! Tiles are stored in id order, so a tile's id is its index.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::position::GridPos;
use crate::puzzle::error::{ConfigError, PuzzleError};

// =============================================================================
// TILE ID
// =============================================================================

/// Stable tile identifier, `0..tile_count`.
///
/// Id 0 is always the empty slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// The empty slot. Its position is the only legal move destination.
pub const EMPTY_TILE: TileId = TileId(0);

impl TileId {
    /// Index into the tile collection.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the empty slot.
    #[inline]
    pub fn is_empty_slot(self) -> bool {
        self == EMPTY_TILE
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TILE
// =============================================================================

/// One puzzle piece, including the empty slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable id
    pub id: TileId,

    /// Current cell (changes on every swap)
    pub position: GridPos,

    /// Cell this tile must occupy for the puzzle to be solved
    pub home: GridPos,
}

impl Tile {
    /// Create a tile sitting at its home cell.
    pub fn new(id: TileId, home: GridPos) -> Self {
        Self {
            id,
            position: home,
            home,
        }
    }

    /// Is this tile on its home cell?
    #[inline]
    pub fn is_home(&self) -> bool {
        self.position == self.home
    }
}

// =============================================================================
// GRID MODEL
// =============================================================================

/// All tiles of one puzzle.
///
/// Invariants, checked at construction and preserved by `swap`:
/// - at least two tiles
/// - positions pairwise distinct
/// - the empty slot has at least one adjacent tile
/// - every cell is edge-connected to the empty slot
///
/// Serializable for snapshots, but not deserializable: a grid only
/// comes into existence through the validating constructors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridModel {
    tiles: Vec<Tile>,
}

impl GridModel {
    /// Build a grid from home positions, in tile id order.
    ///
    /// `homes[0]` is the empty slot. Every tile starts at its home cell.
    pub fn from_positions(homes: Vec<GridPos>) -> Result<Self, PuzzleError> {
        if homes.len() < 2 {
            return Err(ConfigError::TooFewTiles { count: homes.len() }.into());
        }

        let mut occupied: BTreeMap<GridPos, TileId> = BTreeMap::new();
        let mut tiles = Vec::with_capacity(homes.len());
        for (index, home) in homes.into_iter().enumerate() {
            let id = TileId(index as u32);
            if let Some(first) = occupied.insert(home, id) {
                return Err(ConfigError::DuplicatePosition {
                    first,
                    second: id,
                    position: home,
                }
                .into());
            }
            tiles.push(Tile::new(id, home));
        }

        let grid = Self { tiles };
        if grid.movable_tile_ids().is_empty() {
            return Err(ConfigError::IsolatedEmptySlot {
                position: grid.empty_position(),
            }
            .into());
        }
        if let Some(tile) = grid.first_unreachable(&occupied) {
            return Err(ConfigError::DisconnectedLayout {
                tile,
                position: grid.tiles[tile.index()].home,
            }
            .into());
        }
        Ok(grid)
    }

    /// Flood fill from the empty slot; returns the lowest tile id it
    /// cannot reach, if any.
    fn first_unreachable(&self, occupied: &BTreeMap<GridPos, TileId>) -> Option<TileId> {
        let start = self.empty_position();
        let mut reached: BTreeSet<GridPos> = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            for next in cell.neighbors() {
                if occupied.contains_key(&next) && reached.insert(next) {
                    stack.push(next);
                }
            }
        }
        self.tiles
            .iter()
            .find(|tile| !reached.contains(&tile.home))
            .map(|tile| tile.id)
    }

    /// Build the canonical `width x height` layout.
    ///
    /// Tiles `1..N` fill the cells in reading order (left to right, top to
    /// bottom) and the empty slot takes the bottom-right cell.
    pub fn rectangular(width: u32, height: u32) -> Result<Self, PuzzleError> {
        let invalid = ConfigError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(invalid.into());
        }
        let cells = match width.checked_mul(height) {
            Some(cells) => cells,
            None => return Err(invalid.into()),
        };
        if cells < 2 {
            return Err(ConfigError::TooFewTiles { count: cells as usize }.into());
        }

        let cell = |index: u32| GridPos::new((index % width) as i32, (index / width) as i32);
        let mut homes = Vec::with_capacity(cells as usize);
        homes.push(cell(cells - 1));
        homes.extend((0..cells - 1).map(cell));
        Self::from_positions(homes)
    }

    /// Number of tiles, the empty slot included.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// All tiles in id order.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Look up a tile by id.
    #[inline]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Current position of a tile.
    pub fn position_of(&self, id: TileId) -> Result<GridPos, PuzzleError> {
        self.tile(id)
            .map(|t| t.position)
            .ok_or(PuzzleError::UnknownTile(id))
    }

    /// Home position of a tile.
    pub fn home_of(&self, id: TileId) -> Result<GridPos, PuzzleError> {
        self.tile(id)
            .map(|t| t.home)
            .ok_or(PuzzleError::UnknownTile(id))
    }

    /// Whether two cells share an edge (exact lattice test).
    #[inline]
    pub fn is_adjacent(a: GridPos, b: GridPos) -> bool {
        a.is_adjacent(b)
    }

    /// Id of the empty slot.
    #[inline]
    pub fn empty_tile_id(&self) -> TileId {
        EMPTY_TILE
    }

    /// Current cell of the empty slot.
    #[inline]
    pub fn empty_position(&self) -> GridPos {
        self.tiles[EMPTY_TILE.index()].position
    }

    /// Tiles adjacent to the empty slot, in id order.
    pub fn movable_tile_ids(&self) -> BTreeSet<TileId> {
        let empty = self.empty_position();
        self.tiles
            .iter()
            .filter(|t| !t.id.is_empty_slot() && t.position.is_adjacent(empty))
            .map(|t| t.id)
            .collect()
    }

    /// Whether a tile may slide into the empty slot right now.
    pub fn is_movable(&self, id: TileId) -> bool {
        if id.is_empty_slot() {
            return false;
        }
        self.tile(id)
            .is_some_and(|t| t.position.is_adjacent(self.empty_position()))
    }

    /// Tile occupying a cell, if any.
    ///
    /// Lets the input layer resolve a snapped hit point to a tile id.
    pub fn tile_at(&self, pos: GridPos) -> Option<TileId> {
        self.tiles.iter().find(|t| t.position == pos).map(|t| t.id)
    }

    /// Exchange the positions of two tiles.
    ///
    /// Unknown ids leave the grid untouched.
    pub fn swap(&mut self, a: TileId, b: TileId) -> Result<(), PuzzleError> {
        let (ia, ib) = (a.index(), b.index());
        if ia >= self.tiles.len() || ib >= self.tiles.len() {
            return Err(PuzzleError::InvalidSwap { a, b });
        }
        let pos_a = self.tiles[ia].position;
        self.tiles[ia].position = self.tiles[ib].position;
        self.tiles[ib].position = pos_a;
        Ok(())
    }

    /// Slide a movable tile into the empty slot.
    ///
    /// Returns the tile's (from, to) cells, or `None` without touching the
    /// grid when the tile is unknown, is the empty slot, or is not adjacent.
    pub(crate) fn slide_into_empty(&mut self, id: TileId) -> Option<(GridPos, GridPos)> {
        if !self.is_movable(id) {
            return None;
        }
        let from = self.tiles[id.index()].position;
        let to = self.empty_position();
        self.tiles[id.index()].position = to;
        self.tiles[EMPTY_TILE.index()].position = from;
        Some((from, to))
    }

    /// Every tile is on its home cell.
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(Tile::is_home)
    }

    /// Number of tiles (empty slot included) away from home.
    pub fn misplaced_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_home()).count()
    }

    /// Current positions in id order.
    pub fn positions(&self) -> Vec<GridPos> {
        self.tiles.iter().map(|t| t.position).collect()
    }

    /// Put every tile back on the given cells (id order).
    ///
    /// Callers pass a snapshot taken from this same grid.
    pub(crate) fn restore(&mut self, positions: &[GridPos]) {
        debug_assert_eq!(positions.len(), self.tiles.len());
        for (tile, pos) in self.tiles.iter_mut().zip(positions) {
            tile.position = *pos;
        }
    }

    /// Hash current tile positions in id order.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.tiles.len() as u32);
        for tile in &self.tiles {
            hasher.update_pos(tile.position);
        }
    }

    /// Bounding box of all cells: (min, max).
    pub fn bounds(&self) -> (GridPos, GridPos) {
        let mut min = self.tiles[0].position;
        let mut max = min;
        for tile in &self.tiles {
            min.x = min.x.min(tile.position.x);
            min.y = min.y.min(tile.position.y);
            max.x = max.x.max(tile.position.x);
            max.y = max.y.max(tile.position.y);
        }
        (min, max)
    }
}

impl fmt::Display for GridModel {
    /// Text board: tile ids, `.` for the empty slot, blank for holes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.bounds();
        let width = (self.tiles.len() - 1).to_string().len();
        let by_pos: BTreeMap<GridPos, TileId> =
            self.tiles.iter().map(|t| (t.position, t.id)).collect();

        for y in min.y..=max.y {
            for x in min.x..=max.x {
                if x > min.x {
                    write!(f, " ")?;
                }
                match by_pos.get(&GridPos::new(x, y)) {
                    Some(id) if id.is_empty_slot() => write!(f, "{:>width$}", ".")?,
                    Some(id) => write!(f, "{:>width$}", id.0)?,
                    None => write!(f, "{:>width$}", "")?,
                }
            }
            if y < max.y {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
