//! Paddle Pong - classic two-paddle Pong against a heuristic opponent
//!
//! Core modules:
//! - `sim`: Simulation step (entities, collisions, opponent, game state)
//! - `scheduler`: Fixed-timestep stepping with wall-clock freeze pauses
//! - `game`: Command interface and renderer snapshot
//! - `settings`: Tunable game constants

pub mod game;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use game::{Command, Game, Snapshot};
pub use settings::{GameConfig, OpponentTuning};

use std::f64::consts::{PI, TAU};

/// Default game configuration constants
pub mod consts {
    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: i32 = 500;
    pub const BOARD_HEIGHT: i32 = 500;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 15;
    pub const PADDLE_HEIGHT: i32 = 75;
    /// Paddle speed (pixels per tick)
    pub const PADDLE_SPEED: i32 = 5;

    /// Ball defaults
    pub const BALL_DIAMETER: i32 = 20;
    /// Ball speed (pixels per tick, along its heading)
    pub const BALL_SPEED: f64 = 5.0;

    /// Points needed to win a normal game
    pub const WINNING_SCORE: u32 = 5;

    /// Simulation rate (ticks per second)
    pub const TICK_RATE: f64 = 60.0;
    /// Maximum steps per host callback
    pub const MAX_SUBSTEPS: u32 = 1;
    /// Pause after a point or at the start of a game (seconds of wall clock)
    pub const FREEZE_SECS: f64 = 1.0;

    /// Random jitter added to every bounce (radians, ±)
    pub const ANGLE_JITTER: f64 = 0.2;
    /// Headings closer than this to straight up/down get corrected (radians)
    pub const VERTICAL_EXCLUSION: f64 = 0.5;
    /// Extra push past the exclusion band when correcting (radians)
    pub const EXCLUSION_MARGIN: f64 = 0.1;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
