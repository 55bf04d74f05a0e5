//! Recoverable error types
//!
//! Broken invariants inside the simulation (a missing ball, a bad paddle
//! handle) are bugs and panic. These types cover input that comes from
//! outside the crate: level text, settings JSON and menu selections.

use thiserror::Error;

/// Failure parsing a character-grid level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,
    #[error("level row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failure loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("arena must be at least {min}x{min} cells, got {width}x{height}")]
    ArenaTooSmall { width: i32, height: i32, min: i32 },
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("steps_per_tick of {steps} would carry the ball past one-cell walls (max {max})")]
    TooManySteps { steps: i32, max: i32 },
    #[error("paddle of length {length} does not fit in an arena {height} cells high")]
    PaddleTooLong { length: usize, height: i32 },
}

/// Invalid player configuration handed to the game context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("at most {max} {kind} players are supported, got {found}")]
    TooManyOfKind {
        kind: &'static str,
        found: u8,
        max: u8,
    },
    #[error("at most {max} paddles fit in the arena, got {found}")]
    TooManyPlayers { found: u8, max: u8 },
}
