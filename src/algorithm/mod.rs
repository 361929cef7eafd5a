//! Puzzle play: placement rules, scoring, rewards and the session lifecycle

/// Ranked, capped solve-time leaderboards
pub mod leaderboard;
/// Placement validation under assisted and free policies
pub mod placement;
/// Per-player point balance
pub mod rewards;
/// Board scoring against known coordinates
pub mod scoring;
/// Session state machine tying ingestion, play and persistence together
pub mod session;
/// Auto-solve layout construction
pub mod solver;
/// Injectable clocks and the solve stopwatch
pub mod timer;
