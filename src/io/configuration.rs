//! Game constants and runtime rule defaults

// Ingestion
/// Image extensions accepted from archives (lowercase, without the dot)
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

/// Base names skipped regardless of extension (compared case-insensitively)
pub const JUNK_FILE_NAMES: [&str; 3] = [".ds_store", "thumbs.db", "desktop.ini"];

/// File stems treated as archive metadata rather than tiles
pub const METADATA_STEMS: [&str; 3] = ["readme", "license", "licence"];

/// Folder created by macOS archivers for resource forks
pub const MACOS_METADATA_DIR: &str = "__MACOSX";

// Grid inference
/// Minimum share of indexed tiles (in percent) for index-based inference
pub const INDEXED_FRACTION_THRESHOLD_PERCENT: usize = 60;

/// Maximum distance (in percent of the tile count) between an archive name
/// hint `AxB` and the actual tile count
pub const FILENAME_HINT_TOLERANCE_PERCENT: usize = 10;

/// Most board cells an index-derived grid may have per tile; sparser index
/// sets fall through to the next inference tier
pub const MAX_CELLS_PER_TILE: usize = 4;

/// Largest board, in cells, the engine will allocate
pub const MAX_BOARD_CELLS: usize = 1 << 20;

// Points
/// Points granted for a verified solve
pub const SOLVE_REWARD: u64 = 1;

/// Points charged for an auto-solve
pub const AUTO_SOLVE_COST: u64 = 5;

/// Balance seeded for a player with no stored points
pub const INITIAL_POINTS: u64 = 5;

// Leaderboard
/// Maximum number of entries kept per leaderboard
pub const LEADERBOARD_CAPACITY: usize = 100;

/// Number of entries shown after a solve
pub const LEADERBOARD_DISPLAY_LIMIT: usize = 20;

/// Leaderboard namespace used for archives loaded outside the catalog
pub const CUSTOM_PUZZLE_ID: &str = "custom";

// Players
/// Name used when no player identity has been stored
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Fixed seed for reproducible palette shuffles
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Runtime rules for a play session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRules {
    /// Points granted for a verified solve
    pub solve_reward: u64,
    /// Points charged for an auto-solve
    pub auto_solve_cost: u64,
    /// Balance seeded for a new player
    pub initial_points: u64,
    /// Maximum number of leaderboard entries kept
    pub leaderboard_capacity: usize,
    /// Seed for palette shuffles
    pub seed: u64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            solve_reward: SOLVE_REWARD,
            auto_solve_cost: AUTO_SOLVE_COST,
            initial_points: INITIAL_POINTS,
            leaderboard_capacity: LEADERBOARD_CAPACITY,
            seed: DEFAULT_SEED,
        }
    }
}
