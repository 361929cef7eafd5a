//! Command-line interface for inspecting archives and playing puzzles

use crate::algorithm::leaderboard::{Leaderboard, LeaderboardKey};
use crate::algorithm::placement::{CellStatus, PlacementMode};
use crate::algorithm::rewards::PointsLedger;
use crate::algorithm::session::{CheckOutcome, LoadOutcome, Session};
use crate::algorithm::timer::{Clock, SystemClock, format_elapsed};
use crate::analysis::pipeline::ingest_archive_with;
use crate::io::catalog::{
    Difficulty, DirectoryCatalog, PuzzleCatalog, filter_by_difficulty, find_puzzle,
};
use crate::io::configuration::{DEFAULT_SEED, GameRules, INITIAL_POINTS, LEADERBOARD_DISPLAY_LIMIT};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::io::preferences::{player_name, set_player_name, theme, toggle_theme};
use crate::io::progress::ProgressManager;
use crate::io::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::spatial::grid::{GridDimensions, GridPosition};
use crate::spatial::tiles::Coordinates;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "tilepuzzle")]
#[command(
    author,
    version,
    about = "Assemble grid puzzles from archives of image tiles"
)]
/// Command-line arguments for the puzzle tool
pub struct Cli {
    /// Action to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and all but error logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Raise log verbosity (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Random seed for palette shuffles
    #[arg(short, long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Ingest an archive and report its tiles and inferred grid
    Inspect {
        /// Tile archive
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Known row count
        #[arg(long, requires = "cols")]
        rows: Option<usize>,

        /// Known column count
        #[arg(long, requires = "rows")]
        cols: Option<usize>,
    },

    /// List the puzzles of a catalog directory
    Catalog {
        /// Directory holding `catalog.json`
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Only list this difficulty (`custom` lists everything)
        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Load a puzzle, assemble it and record the result
    Solve(SolveArgs),

    /// Show a stored leaderboard
    Leaderboard {
        /// Preferences and scores file
        #[arg(long)]
        store: PathBuf,

        /// Catalog puzzle id; custom archives when omitted
        #[arg(long)]
        puzzle: Option<String>,

        /// Board rows
        #[arg(long)]
        rows: usize,

        /// Board columns
        #[arg(long)]
        cols: usize,

        /// Entries to show
        #[arg(short, long, default_value_t = LEADERBOARD_DISPLAY_LIMIT)]
        limit: usize,
    },

    /// Show a player's point balance
    Points {
        /// Preferences and scores file
        #[arg(long)]
        store: PathBuf,

        /// Player name; the stored name when omitted
        #[arg(long)]
        player: Option<String>,
    },

    /// Show the stored color theme
    Theme {
        /// Preferences and scores file
        #[arg(long)]
        store: PathBuf,

        /// Switch to the other theme first
        #[arg(long)]
        toggle: bool,
    },
}

/// Arguments of the `solve` subcommand
#[derive(Args)]
pub struct SolveArgs {
    /// Tile archive to load
    #[arg(value_name = "ARCHIVE", conflicts_with = "catalog")]
    pub archive: Option<PathBuf>,

    /// Catalog directory to load from
    #[arg(long, requires = "puzzle")]
    pub catalog: Option<PathBuf>,

    /// Catalog puzzle id
    #[arg(long)]
    pub puzzle: Option<String>,

    /// Preferences and scores file; scores are kept in memory when omitted
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Play as this player, remembering the name in the store
    #[arg(long)]
    pub player: Option<String>,

    /// Accept every placement instead of rejecting wrong ones
    #[arg(long)]
    pub free: bool,

    /// Spend points on an auto-solve instead of placing tiles one by one
    #[arg(long)]
    pub auto: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for the chosen verbosity
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Install the logger; `RUST_LOG` overrides the verbosity flags
pub fn init_logging(cli: &Cli) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();
}

/// Runs one parsed command line
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read, the archive holds no
    /// tiles, or the store cannot be read or written
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Inspect {
                archive,
                rows,
                cols,
            } => {
                let bounds = rows
                    .zip(*cols)
                    .filter(|&(r, c)| r > 0 && c > 0)
                    .map(|(r, c)| GridDimensions::new(r, c));
                self.inspect(archive, bounds)
            }
            Command::Catalog { dir, difficulty } => Self::catalog(dir, difficulty.as_deref()),
            Command::Solve(args) => match &args.store {
                Some(path) => self.solve(JsonFileStore::open(path)?, args),
                None => self.solve(MemoryStore::new(), args),
            },
            Command::Leaderboard {
                store,
                puzzle,
                rows,
                cols,
                limit,
            } => Self::leaderboard(
                store,
                &LeaderboardKey::new(puzzle.as_deref(), GridDimensions::new(*rows, *cols)),
                *limit,
            ),
            Command::Points { store, player } => Self::points(store, player.as_deref()),
            Command::Theme { store, toggle } => Self::theme(store, *toggle),
        }
    }

    fn progress(&self, archive_name: &str) -> ProgressManager {
        if self.cli.should_show_progress() {
            ProgressManager::new(archive_name)
        } else {
            ProgressManager::hidden(archive_name)
        }
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn inspect(&self, archive: &Path, bounds: Option<GridDimensions>) -> Result<()> {
        let bytes = read_archive(archive)?;
        let name = display_name(archive);
        let mut progress = self.progress(&name);
        let puzzle = ingest_archive_with(&name, &bytes, bounds, &mut progress)?;

        println!(
            "{name}: {} tiles on a {} board ({})",
            puzzle.tiles.len(),
            puzzle.grid.dimensions,
            puzzle.grid.source
        );
        println!(
            "indexed {}, duplicates {}, out of bounds {}, overflow {}, index base {:?}",
            puzzle.report.indexed,
            puzzle.report.duplicates,
            puzzle.report.out_of_bounds,
            puzzle.report.overflow,
            puzzle.index_base
        );
        for tile in &puzzle.tiles {
            match tile.coordinates {
                Coordinates::Known(position) => {
                    println!("  {} {} -> {position}", tile.id, tile.display_name);
                }
                Coordinates::Unknown => println!("  {} {} -> ?", tile.id, tile.display_name),
            }
        }
        Ok(())
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn catalog(dir: &Path, difficulty: Option<&str>) -> Result<()> {
        let catalog = DirectoryCatalog::new(dir);
        let puzzles = catalog.list_puzzles()?;
        let filter = Difficulty::from(difficulty.unwrap_or("custom").to_string());

        for puzzle in filter_by_difficulty(&puzzles, &filter) {
            let size = puzzle
                .dimensions()
                .map_or_else(|| "?".to_string(), |d| d.to_string());
            println!(
                "{:<20} {:<30} {:<8} {:<7} {}",
                puzzle.id, puzzle.name, puzzle.difficulty, size, puzzle.archive_path
            );
        }
        Ok(())
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn solve<S: KeyValueStore>(&self, mut store: S, args: &SolveArgs) -> Result<()> {
        if let Some(name) = &args.player {
            set_player_name(&mut store, name)?;
        }

        let rules = GameRules {
            seed: self.cli.seed,
            ..GameRules::default()
        };
        let mut session = Session::new(store, SystemClock::new(), rules)?;
        session.set_mode(if args.free {
            PlacementMode::Free
        } else {
            PlacementMode::Assisted
        });

        let outcome = match (&args.archive, &args.catalog, &args.puzzle) {
            (Some(path), _, _) => {
                let bytes = read_archive(path)?;
                let name = display_name(path);
                let mut progress = self.progress(&name);
                session.load_archive_with(&name, &bytes, None, &mut progress)?
            }
            (None, Some(dir), Some(id)) => {
                let catalog = DirectoryCatalog::new(dir);
                let puzzles = catalog.list_puzzles()?;
                let descriptor = find_puzzle(&puzzles, id).ok_or_else(|| {
                    invalid_parameter("puzzle", id, &"not listed in the catalog")
                })?;
                let mut progress = self.progress(descriptor.archive_name());
                session.load_from_catalog(&catalog, descriptor, &mut progress)?
            }
            _ => {
                return Err(invalid_parameter(
                    "archive",
                    &"none",
                    &"give an archive path, or --catalog with --puzzle",
                ));
            }
        };

        if let LoadOutcome::Applied(summary) = &outcome {
            println!(
                "Loaded {} tiles on a {} board ({})",
                summary.tile_count, summary.dimensions, summary.source
            );
        }

        if args.auto {
            let report = session.auto_solve()?;
            println!(
                "Auto-solved, {} points left, {} tiles did not fit",
                report.points, report.unplaced
            );
        } else {
            place_known_tiles(&mut session);
        }

        print_board(&session);

        if !session.tiles().all_indexed() {
            println!(
                "{} tiles carry no coordinates; the board cannot be verified",
                session.tiles().missing_count()
            );
            return Ok(());
        }

        match session.check()? {
            CheckOutcome::Partial(score) | CheckOutcome::AlreadySolved(score) => {
                println!("Score {score}");
            }
            CheckOutcome::Solved(report) => {
                let rank = report
                    .ranking
                    .rank
                    .map_or_else(|| "unranked".to_string(), |rank| format!("rank {rank}"));
                println!(
                    "Solved in {} by {}: {rank} of {}, {} points",
                    format_elapsed(report.elapsed),
                    session.player_name(),
                    report.ranking.total,
                    report.points
                );
            }
        }
        Ok(())
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn leaderboard(store: &Path, key: &LeaderboardKey, limit: usize) -> Result<()> {
        let store = JsonFileStore::open(store)?;
        let leaderboard = Leaderboard::load(&store, key)?;

        println!("{} ({} entries)", key.storage_key(), leaderboard.len());
        for (index, entry) in leaderboard.top(limit).iter().enumerate() {
            println!(
                "{:>3}. {:<20} {:>8}  {}",
                index + 1,
                entry.player_name,
                format_elapsed(Duration::from_millis(entry.elapsed_ms)),
                entry.timestamp.format("%Y-%m-%d %H:%M")
            );
        }
        Ok(())
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn points(store: &Path, player: Option<&str>) -> Result<()> {
        let store = JsonFileStore::open(store)?;
        let player = match player {
            Some(name) => name.to_string(),
            None => player_name(&store)?,
        };
        let balance = PointsLedger::new(&player, INITIAL_POINTS).balance(&store)?;
        println!("{player}: {balance} points");
        Ok(())
    }

    // Allow print for command output
    #[allow(clippy::print_stdout)]
    fn theme(store: &Path, toggle: bool) -> Result<()> {
        let mut store = JsonFileStore::open(store)?;
        let current = if toggle {
            toggle_theme(&mut store)?
        } else {
            theme(&store)?
        };
        println!("{current}");
        Ok(())
    }
}

fn read_archive(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| PuzzleError::FileSystem {
        path: path.to_path_buf(),
        operation: "read archive",
        source: e,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().to_string())
}

// Tiles whose placement is rejected stay in the palette
fn place_known_tiles<S: KeyValueStore, C: Clock>(session: &mut Session<S, C>) {
    let targets: Vec<_> = session
        .tiles()
        .iter()
        .filter_map(|tile| tile.coordinates.position().map(|position| (tile.id, position)))
        .collect();

    for (tile, position) in targets {
        if let Err(error) = session.place(tile, position) {
            log::warn!("Could not place {tile}: {error}");
        }
    }
}

// Allow print for command output
#[allow(clippy::print_stdout)]
fn print_board<S: KeyValueStore, C: Clock>(session: &Session<S, C>) {
    let dimensions = session.dimensions();
    for row in 0..dimensions.rows {
        let line: String = (0..dimensions.cols)
            .map(|col| match session.cell_status(GridPosition::new(row, col)) {
                CellStatus::Empty => '.',
                CellStatus::Correct => '#',
                CellStatus::Wrong => 'x',
                CellStatus::Unverifiable => '?',
            })
            .collect();
        println!("  {line}");
    }
}
