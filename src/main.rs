//! Slide Puzzle Demo
//!
//! Runs one puzzle end to end: shuffle, solve, verify by replay, retry.
//!
//! Usage: `slide-puzzle [config.json]`. Log level comes from `RUST_LOG`.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use slide_puzzle::{
    dispatch_events, replay_moves, GridPos, MoveCause, PuzzleConfig, PuzzleController,
    PuzzleEvent, PuzzleEventData, PuzzleListener, TileId, VERSION,
};

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Slide Puzzle v{}", VERSION);

    let config = load_config()?;
    info!(
        "Grid {}x{}, {} shuffle steps, seed {}",
        config.width, config.height, config.shuffle_count, config.seed
    );

    demo_puzzle(&config)
}

/// Read the config file named by the first argument, or use defaults.
fn load_config() -> Result<PuzzleConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path))
        }
        None => Ok(PuzzleConfig::default()),
    }
}

/// Stand-in for a renderer: tracks moves and logs notifications.
#[derive(Default)]
struct LogRenderer {
    tiles_moved: u32,
    solved_count: u32,
}

impl PuzzleListener for LogRenderer {
    fn on_tile_moved(&mut self, tile_id: TileId, to: GridPos, cause: MoveCause) {
        self.tiles_moved += 1;
        debug!("Tile {} -> {} ({:?})", tile_id, to, cause);
    }

    fn on_puzzle_solved(&mut self, moves: u32) {
        self.solved_count += 1;
        info!("Solved in {} moves", moves);
    }

    fn on_puzzle_shuffled(&mut self, steps: u32) {
        info!("Shuffled with {} steps", steps);
    }
}

/// Tiles moved by the shuffle walk, in order.
fn shuffle_trail(events: &[PuzzleEvent]) -> Vec<TileId> {
    events
        .iter()
        .filter_map(|e| match &e.data {
            PuzzleEventData::TileMoved { tile_id, cause: MoveCause::Shuffle, .. } => Some(*tile_id),
            _ => None,
        })
        .collect()
}

fn demo_puzzle(config: &PuzzleConfig) -> Result<()> {
    info!("=== Starting Demo Puzzle ===");

    let mut puzzle = PuzzleController::new(config).context("Failed to build puzzle")?;
    let mut renderer = LogRenderer::default();

    let events = puzzle.take_events();
    dispatch_events(&events, &mut renderer);
    info!("Shuffled board:\n{}", puzzle.grid());

    // Walking the shuffle back is always a valid solution
    let trail = shuffle_trail(&events);
    for tile_id in trail.iter().rev() {
        let outcome = puzzle.request_move(*tile_id);
        dispatch_events(&puzzle.take_events(), &mut renderer);
        if !outcome.is_applied() {
            debug!("Move {} skipped: {:?}", tile_id, outcome);
        }
    }

    info!("=== Puzzle Results ===");
    info!("Final board:\n{}", puzzle.grid());
    info!("Phase: {:?}, moves: {}", puzzle.phase(), puzzle.move_count());
    let hash = puzzle.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay_moves(config, puzzle.history()).context("Replay failed")?;
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    info!("=== Retry ===");
    puzzle.retry_requested();
    dispatch_events(&puzzle.take_events(), &mut renderer);
    info!("Reshuffled board:\n{}", puzzle.grid());
    info!(
        "Renderer saw {} tile moves and {} solves",
        renderer.tiles_moved, renderer.solved_count
    );

    Ok(())
}
