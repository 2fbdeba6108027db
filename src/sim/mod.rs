//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per `step`
//! - Seeded RNG only
//! - Host time only enters through the `now` argument
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod opponent;
pub mod state;
pub mod tick;

pub use bounds::Bounds;
pub use collision::{Contact, correct_heading, detect_contact};
pub use state::{Ball, Banner, Direction, GameEvent, GameState, Mode, Paddle, Phase, Scores, Side};
pub use tick::{format_elapsed, step};
