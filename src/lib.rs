//! Grid Pong - a two-paddle ball game on an integer grid
//!
//! Core modules:
//! - `sim`: Simulation (actors, collision dispatch, world tick)
//! - `level`: Character-grid level layouts
//! - `player`, `input`: Turning keyboard state into paddle commands
//! - `clock`: Fixed-interval tick gating
//! - `game`: Menu/game context switching and the per-frame session loop
//! - `renderer`: Display collaborators (ASCII and 2D canvas)
//! - `settings`: Data-driven game configuration

pub mod clock;
pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod player;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{LevelError, SettingsError, SetupError};
pub use game::{Context, FrameOutcome, Game, MenuChoice, PlayerSetup, Session};
pub use settings::Settings;

use glam::IVec2;

/// A cell on the arena grid
pub type Point = IVec2;

/// Per-tick displacement of a moving actor
pub type Velocity = IVec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (cells)
    pub const ARENA_WIDTH: i32 = 100;
    pub const ARENA_HEIGHT: i32 = 50;

    /// Milliseconds between logical ticks
    pub const TICK_INTERVAL_MS: f64 = 200.0;
    /// Logical steps advanced per tick
    pub const STEPS_PER_TICK: i32 = 1;

    /// Number of segments in a paddle body
    pub const PADDLE_LENGTH: usize = 5;
    /// Column of the left paddle (slot 0)
    pub const PADDLE_INSET: i32 = 2;

    /// First side to reach this wins the match
    pub const MAX_SCORE: u32 = 10;

    /// Canvas pixels per grid cell
    pub const SCALING_FACTOR: u32 = 10;
}

/// Center cell of an arena, using integer halves (odd sizes round down)
#[inline]
pub fn arena_center(width: i32, height: i32) -> Point {
    IVec2::new(width / 2, height / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_center() {
        assert_eq!(arena_center(100, 50), IVec2::new(50, 25));
        assert_eq!(arena_center(50, 25), IVec2::new(25, 12));
        assert_eq!(arena_center(7, 7), IVec2::new(3, 3));
    }
}
