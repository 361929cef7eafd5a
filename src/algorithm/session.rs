//! Play session state machine
//!
//! ```text
//! Unloaded --load--> Loaded --first placement--> InProgress --solved check--> Solved
//!     ^                 ^                             |                          |
//!     +-----unload------+----build / clear / reset----+--------------------------+
//! ```
//!
//! Archive loads are sequenced: every load takes a ticket and only the result
//! for the latest ticket is applied, so a slow parse can never overwrite the
//! state of a newer one.

use crate::algorithm::leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardKey, Ranking, record_result};
use crate::algorithm::placement::{CellStatus, PlacementMode, PlacementOutcome, PlayArea};
use crate::algorithm::rewards::PointsLedger;
use crate::algorithm::scoring::{ScoreReport, score_board};
use crate::algorithm::solver::solve_layout;
use crate::algorithm::timer::{Clock, Stopwatch, duration_millis};
use crate::analysis::inference::GridSource;
use crate::analysis::pipeline::{IngestedPuzzle, ingest_archive_with};
use crate::io::archive::{ExtractionObserver, SilentObserver};
use crate::io::catalog::{ArchiveFetcher, PuzzleDescriptor};
use crate::io::configuration::{GameRules, MAX_BOARD_CELLS};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::io::preferences::player_name;
use crate::io::storage::KeyValueStore;
use crate::spatial::grid::{Board, GridDimensions, GridPosition};
use crate::spatial::palette::Palette;
use crate::spatial::tiles::{TileId, TileSet};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Lifecycle of a play session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No tile set
    Unloaded,
    /// Tiles loaded, board fresh, timer idle
    Loaded,
    /// At least one tile placed, timer running
    InProgress,
    /// Verified solve, timer stopped
    Solved,
}

/// Sequence number handed out when a load starts
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Raw sequence number
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Summary of an applied load
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadSummary {
    /// Board size
    pub dimensions: GridDimensions,
    /// Tiles retained
    pub tile_count: usize,
    /// Where the dimensions came from
    pub source: GridSource,
    /// Catalog puzzle id, if loaded from the catalog
    pub puzzle_id: Option<String>,
}

/// Result of finishing a load
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The load was the latest and is now active
    Applied(LoadSummary),
    /// A newer load started meanwhile; this result was discarded
    Superseded {
        /// Ticket of the discarded load
        ticket: LoadTicket,
        /// Latest ticket handed out
        latest: LoadTicket,
    },
}

/// A verified solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveReport {
    /// Final board score
    pub score: ScoreReport,
    /// Solve time
    pub elapsed: Duration,
    /// Leaderboard placement
    pub ranking: Ranking,
    /// Point balance after the reward
    pub points: u64,
}

/// Result of checking the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Not every cell is correct
    Partial(ScoreReport),
    /// This check completed the puzzle
    Solved(SolveReport),
    /// The puzzle had already been solved; nothing was awarded again
    AlreadySolved(ScoreReport),
}

/// Result of a paid auto-solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoSolveReport {
    /// Balance after paying
    pub points: u64,
    /// Tiles that did not fit on the board
    pub unplaced: usize,
}

/// One player's puzzle session
///
/// Owns the injected store and clock. All mutation is synchronous with the
/// call that triggers it.
pub struct Session<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    rules: GameRules,
    ledger: PointsLedger,
    player: String,
    rng: StdRng,
    state: SessionState,
    mode: PlacementMode,
    tiles: TileSet,
    dimensions: GridDimensions,
    puzzle_id: Option<String>,
    play: PlayArea,
    stopwatch: Stopwatch,
    latest_load: u64,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Start a session for the player stored in `store`
    ///
    /// Seeds the player's point balance if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub fn new(mut store: S, clock: C, rules: GameRules) -> Result<Self> {
        let player = player_name(&store)?;
        let ledger = PointsLedger::new(&player, rules.initial_points);
        ledger.ensure_seeded(&mut store)?;

        Ok(Self {
            store,
            clock,
            rules,
            ledger,
            player,
            rng: StdRng::seed_from_u64(rules.seed),
            state: SessionState::Unloaded,
            mode: PlacementMode::default(),
            tiles: TileSet::default(),
            dimensions: GridDimensions::default(),
            puzzle_id: None,
            play: PlayArea::default(),
            stopwatch: Stopwatch::default(),
            latest_load: 0,
        })
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Player this session plays as
    pub fn player_name(&self) -> &str {
        &self.player
    }

    /// Active tile set
    pub const fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Board dimensions
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Catalog id of the loaded puzzle, `None` for custom archives
    pub fn puzzle_id(&self) -> Option<&str> {
        self.puzzle_id.as_deref()
    }

    /// Current board
    pub const fn board(&self) -> &Board {
        self.play.board()
    }

    /// Tiles not yet placed
    pub const fn palette(&self) -> &Palette {
        self.play.palette()
    }

    /// Selected tile, if any
    pub const fn selection(&self) -> Option<TileId> {
        self.play.selection()
    }

    /// Placement policy
    pub const fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Change the placement policy
    pub fn set_mode(&mut self, mode: PlacementMode) {
        self.mode = mode;
    }

    /// Injected store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the injected store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Elapsed solve time, recomputed from the start reading
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed(self.clock.monotonic())
    }

    /// Current point balance
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub fn points(&self) -> Result<u64> {
        self.ledger.balance(&self.store)
    }

    /// Leaderboard key for the loaded puzzle at the current size
    pub fn leaderboard_key(&self) -> LeaderboardKey {
        LeaderboardKey::new(self.puzzle_id.as_deref(), self.dimensions)
    }

    /// Fastest entries of the current leaderboard
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let leaderboard = Leaderboard::load(&self.store, &self.leaderboard_key())?;
        Ok(leaderboard.top(limit).to_vec())
    }

    /// Display status of one cell
    pub fn cell_status(&self, position: GridPosition) -> CellStatus {
        self.play.cell_status(&self.tiles, position)
    }

    /// Start a load; results for older tickets will be discarded
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        LoadTicket(self.latest_load)
    }

    /// Test whether a ticket is still the latest
    pub const fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest_load
    }

    /// Apply the result of a load if it is still the latest
    ///
    /// Stale results are discarded whether they succeeded or failed.
    ///
    /// # Errors
    ///
    /// Returns the load's own error if it is the latest and failed; the
    /// session is left unchanged in that case
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<IngestedPuzzle>,
        puzzle_id: Option<String>,
    ) -> Result<LoadOutcome> {
        if !self.is_current(ticket) {
            let latest = LoadTicket(self.latest_load);
            log::debug!(
                "Discarding load {} superseded by load {}",
                ticket.sequence(),
                latest.sequence()
            );
            return Ok(LoadOutcome::Superseded { ticket, latest });
        }

        let puzzle = result?;
        let summary = LoadSummary {
            dimensions: puzzle.grid.dimensions,
            tile_count: puzzle.tiles.len(),
            source: puzzle.grid.source,
            puzzle_id: puzzle_id.clone(),
        };

        self.tiles = puzzle.tiles;
        self.dimensions = puzzle.grid.dimensions;
        self.puzzle_id = puzzle_id;
        self.play = PlayArea::new(self.dimensions, &self.tiles.ids(), self.tiles.len());
        self.stopwatch.reset();
        self.state = SessionState::Loaded;

        log::info!(
            "Loaded {} tiles on a {} board",
            summary.tile_count,
            summary.dimensions
        );
        Ok(LoadOutcome::Applied(summary))
    }

    /// Ingest archive bytes and load them
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read or holds no tiles
    pub fn load_archive(
        &mut self,
        archive_name: &str,
        bytes: &[u8],
        descriptor: Option<&PuzzleDescriptor>,
    ) -> Result<LoadOutcome> {
        self.load_archive_with(archive_name, bytes, descriptor, &mut SilentObserver)
    }

    /// Ingest archive bytes and load them, reporting extraction progress
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read or holds no tiles
    pub fn load_archive_with(
        &mut self,
        archive_name: &str,
        bytes: &[u8],
        descriptor: Option<&PuzzleDescriptor>,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let bounds = descriptor.and_then(PuzzleDescriptor::dimensions);
        let result = ingest_archive_with(archive_name, bytes, bounds, observer);
        self.finish_load(ticket, result, descriptor.map(|d| d.id.clone()))
    }

    /// Fetch a catalog puzzle's archive and load it
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails, or the archive cannot be read or
    /// holds no tiles
    pub fn load_from_catalog(
        &mut self,
        fetcher: &impl ArchiveFetcher,
        descriptor: &PuzzleDescriptor,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<LoadOutcome> {
        let bytes = fetcher.fetch_archive(&descriptor.archive_path)?;
        self.load_archive_with(descriptor.archive_name(), &bytes, Some(descriptor), observer)
    }

    fn require_tiles(&self) -> Result<()> {
        if self.state == SessionState::Unloaded || self.tiles.is_empty() {
            return Err(PuzzleError::NoTilesLoaded);
        }
        Ok(())
    }

    /// Fresh board, reshuffled palette, reset timer
    ///
    /// # Errors
    ///
    /// Returns an error if no tiles are loaded
    pub fn build_grid(&mut self) -> Result<()> {
        self.require_tiles()?;
        let mut play = PlayArea::new(self.dimensions, &self.tiles.ids(), self.tiles.len());
        play.palette_mut().shuffle(&mut self.rng);
        self.play = play;
        self.stopwatch.reset();
        self.state = SessionState::Loaded;
        Ok(())
    }

    /// Empty the board; same as rebuilding the grid
    ///
    /// # Errors
    ///
    /// Returns an error if no tiles are loaded
    pub fn clear_board(&mut self) -> Result<()> {
        self.build_grid()
    }

    /// Start the current puzzle over; same as rebuilding the grid
    ///
    /// # Errors
    ///
    /// Returns an error if no tiles are loaded
    pub fn reset_board(&mut self) -> Result<()> {
        self.build_grid()
    }

    /// Resize the board, for example to correct a fallback inference
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero, the board would be too
    /// large, or no tiles are loaded
    pub fn set_dimensions(&mut self, dimensions: GridDimensions) -> Result<()> {
        if dimensions.rows == 0 || dimensions.cols == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &dimensions,
                &"rows and columns must be positive",
            ));
        }
        if !dimensions.is_playable() {
            return Err(invalid_parameter(
                "dimensions",
                &dimensions,
                &format!("board may hold at most {MAX_BOARD_CELLS} cells"),
            ));
        }
        self.require_tiles()?;
        self.dimensions = dimensions;
        self.build_grid()
    }

    /// Drop the tile set and return to the unloaded state
    pub fn unload(&mut self) {
        self.tiles = TileSet::default();
        self.dimensions = GridDimensions::default();
        self.puzzle_id = None;
        self.play = PlayArea::default();
        self.stopwatch.reset();
        self.state = SessionState::Unloaded;
    }

    /// Reorder the palette randomly
    pub fn shuffle_palette(&mut self) {
        self.play.palette_mut().shuffle(&mut self.rng);
    }

    /// Select a tile for click-to-place
    ///
    /// # Errors
    ///
    /// Returns an error if the tile is not in the active set
    pub fn select(&mut self, tile: TileId) -> Result<()> {
        self.play.select(&self.tiles, tile)
    }

    fn after_placement(&mut self) {
        if self.state == SessionState::Loaded {
            self.stopwatch.start(self.clock.monotonic());
            self.state = SessionState::InProgress;
        }
    }

    /// Place a tile on a cell under the current policy
    ///
    /// The first successful placement starts the timer.
    ///
    /// # Errors
    ///
    /// Returns an error (leaving everything unchanged) if the tile is
    /// unknown, the cell is off the board, or assisted mode rejects the move
    pub fn place(&mut self, tile: TileId, position: GridPosition) -> Result<PlacementOutcome> {
        let outcome = self.play.place(&self.tiles, self.mode, tile, position)?;
        self.after_placement();
        Ok(outcome)
    }

    /// Place the selected tile on a cell
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or the placement is rejected
    pub fn place_selected(&mut self, position: GridPosition) -> Result<PlacementOutcome> {
        let outcome = self.play.place_selected(&self.tiles, self.mode, position)?;
        self.after_placement();
        Ok(outcome)
    }

    /// Score the board; a full score stops the timer, awards points and
    /// records the time on the leaderboard
    ///
    /// # Errors
    ///
    /// Returns an error if no tiles are loaded, some tiles lack coordinates,
    /// or the store fails
    pub fn check(&mut self) -> Result<CheckOutcome> {
        self.require_tiles()?;
        let score = score_board(&self.tiles, self.play.board())?;

        if self.state == SessionState::Solved {
            return Ok(CheckOutcome::AlreadySolved(score));
        }
        if !score.is_solved() {
            return Ok(CheckOutcome::Partial(score));
        }

        let mut stopwatch = self.stopwatch;
        stopwatch.stop(self.clock.monotonic());
        let elapsed = stopwatch.elapsed(self.clock.monotonic());

        let key = self.leaderboard_key();
        let storage_key = key.storage_key();
        let previous_board = self.store.get(&storage_key)?;
        let ranking = record_result(
            &mut self.store,
            &key,
            &self.player,
            duration_millis(elapsed),
            self.clock.now_utc(),
            self.rules.leaderboard_capacity,
        )?;

        let points = match self.ledger.award(&mut self.store, self.rules.solve_reward) {
            Ok(points) => points,
            Err(error) => {
                // A retried check must not record the time twice
                let restored = previous_board.unwrap_or_else(|| "[]".to_string());
                if let Err(restore_error) = self.store.set(&storage_key, restored) {
                    log::error!("Could not restore leaderboard '{storage_key}': {restore_error}");
                }
                return Err(error);
            }
        };

        self.stopwatch = stopwatch;
        self.state = SessionState::Solved;
        log::info!("'{}' solved the puzzle in {elapsed:?}", self.player);

        Ok(CheckOutcome::Solved(SolveReport {
            score,
            elapsed,
            ranking,
            points,
        }))
    }

    /// Pay for and apply the auto-solve layout
    ///
    /// # Errors
    ///
    /// Returns an error (leaving everything unchanged) if no tiles are loaded
    /// or the balance is below the cost
    pub fn auto_solve(&mut self) -> Result<AutoSolveReport> {
        self.require_tiles()?;
        let layout = solve_layout(&self.tiles, self.dimensions);
        let points = self.ledger.spend(&mut self.store, self.rules.auto_solve_cost)?;

        self.play.install(layout.board, &layout.unplaced, self.tiles.len());
        self.stopwatch.stop(self.clock.monotonic());
        log::info!(
            "Auto-solved for {} points, {points} left",
            self.rules.auto_solve_cost
        );

        Ok(AutoSolveReport {
            points,
            unplaced: layout.unplaced.len(),
        })
    }
}
