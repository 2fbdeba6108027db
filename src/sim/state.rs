//! Game state and core simulation types
//!
//! Everything the simulation step mutates lives in [`GameState`].

use std::f64::consts::PI;

use glam::{DVec2, IVec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::settings::GameConfig;

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// First to the winning score
    #[default]
    Normal,
    /// Survive as long as possible against a sharper opponent
    Challenge,
}

/// Menu text shown on the home and game-over screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub title: String,
    /// Label of the primary (normal game) button
    pub button: String,
    /// Empty when there is none
    pub subtitle: String,
}

impl Banner {
    pub fn new(title: impl Into<String>, button: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            button: button.into(),
            subtitle: String::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Title screen shown at startup
    pub fn title_screen() -> Self {
        Self::new("PONG!", "Start Game")
    }
}

/// Current phase of the game flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen; `instructions` while the challenge rules are shown
    Home { instructions: bool },
    /// Ball in play
    Playing,
    /// Freeze after a point or at game start, ball waiting at center
    RoundTransition,
    /// Game over screen; accepts the same menu commands as `Home`
    Terminal { banner: Banner, instructions: bool },
}

impl Phase {
    /// True on the home or game-over screen
    pub fn is_menu(&self) -> bool {
        matches!(self, Phase::Home { .. } | Phase::Terminal { .. })
    }

    /// True while the challenge rules are displayed
    pub fn showing_instructions(&self) -> bool {
        matches!(
            self,
            Phase::Home { instructions: true } | Phase::Terminal { instructions: true, .. }
        )
    }
}

/// Vertical input for a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    /// Signed y velocity for this direction (screen y grows downward)
    pub fn velocity(self, speed: i32) -> i32 {
        match self {
            Direction::Up => -speed,
            Direction::Down => speed,
            Direction::Stop => 0,
        }
    }
}

/// The ball
///
/// `pos` is the top-left of its bounding square and is always derived from
/// the sub-pixel accumulator `precise`, so slow components still add up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub precise: DVec2,
    /// Heading in radians, 0 = right, π/2 = down
    pub angle: f64,
    /// Pixels per tick
    pub speed: f64,
    pub diameter: i32,
    pub moving: bool,
}

impl Ball {
    /// Create an idle ball at the reset point with a random serve angle
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut ball = Self {
            pos: IVec2::ZERO,
            precise: DVec2::ZERO,
            angle: 0.0,
            speed: config.ball_speed,
            diameter: config.ball_diameter,
            moving: false,
        };
        ball.reset(config, rng);
        ball
    }

    /// Where the ball waits between rounds
    pub fn home(config: &GameConfig) -> IVec2 {
        IVec2::new(config.board_width / 2, config.board_height / 2)
    }

    /// Stop the ball at the reset point and pick a new serve angle
    ///
    /// The angle is drawn from [π/2, 3π/2) so the serve heads toward the
    /// player. It is left unnormalized; the next step normalizes it.
    pub fn reset(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        self.moving = false;
        self.pos = Self::home(config);
        self.precise = self.pos.as_dvec2();
        self.angle = rng.random_range(PI / 2.0..3.0 * PI / 2.0);
    }

    pub fn start(&mut self) {
        self.moving = true;
    }

    /// Advance one tick along the current heading
    pub fn integrate(&mut self) {
        if self.moving {
            self.precise += DVec2::new(self.angle.cos(), self.angle.sin()) * self.speed;
            self.pos = self.precise.floor().as_ivec2();
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, IVec2::splat(self.diameter))
    }

    pub fn center(&self) -> IVec2 {
        self.bounds().center()
    }

    /// Horizontal direction of travel is toward +x
    pub fn heading_right(&self) -> bool {
        self.angle.cos() > 0.0
    }

    /// Horizontal direction of travel is toward -x
    pub fn heading_left(&self) -> bool {
        self.angle.cos() < 0.0
    }

    /// Place the ball at an exact position (tests and hosts)
    pub fn place(&mut self, pos: IVec2) {
        self.pos = pos;
        self.precise = pos.as_dvec2();
    }
}

/// A paddle. Only its y changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: IVec2,
    pub size: IVec2,
    pub y_velocity: i32,
    /// Magnitude of a moving paddle's velocity
    pub speed: i32,
    /// Largest legal y (board height minus paddle height)
    pub max_y: i32,
}

impl Paddle {
    /// Paddle on the left edge, vertically centered
    pub fn player(config: &GameConfig) -> Self {
        Self::at_x(0, config)
    }

    /// Paddle on the right edge, vertically centered
    pub fn opponent(config: &GameConfig) -> Self {
        Self::at_x(config.board_width - config.paddle_width, config)
    }

    fn at_x(x: i32, config: &GameConfig) -> Self {
        Self {
            pos: IVec2::new(x, config.board_height / 2 - config.paddle_height / 2),
            size: IVec2::new(config.paddle_width, config.paddle_height),
            y_velocity: 0,
            speed: config.paddle_speed,
            max_y: config.paddle_y_max(),
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.y_velocity = direction.velocity(self.speed);
    }

    /// Move by the current velocity and clamp to the board
    pub fn integrate(&mut self) {
        self.pos.y = (self.pos.y + self.y_velocity).clamp(0, self.max_y);
    }

    /// Set y directly, clamped to the board
    pub fn place_y(&mut self, y: i32) {
        self.pos.y = y.clamp(0, self.max_y);
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }

    pub fn center(&self) -> IVec2 {
        self.bounds().center()
    }
}

/// Points won by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub opponent: u32,
}

/// Something notable that happened during a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerPaddleHit,
    OpponentPaddleHit,
    WallBounce,
    PlayerScored { score: u32 },
    OpponentScored { score: u32 },
    /// Challenge ball slipped past the opponent; play continues
    OpponentMissed,
    /// Normal game decided
    GameWon { winner: Side },
    /// Challenge game over after surviving `elapsed_secs`
    ChallengeOver { elapsed_secs: f64 },
}

/// A side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub scores: Scores,
    pub mode: Mode,
    pub phase: Phase,
    /// Host time (seconds) the current challenge started
    pub challenge_started_at: Option<f64>,
    /// Simulation steps run since creation
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game state with the given seed, sitting on the title screen
    ///
    /// The config is passed through [`GameConfig::sanitized`] first.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&config, &mut rng);
        Self {
            player: Paddle::player(&config),
            opponent: Paddle::opponent(&config),
            ball,
            rng,
            seed,
            scores: Scores::default(),
            mode: Mode::Normal,
            phase: Phase::Home {
                instructions: false,
            },
            challenge_started_at: None,
            time_ticks: 0,
            config,
        }
    }

    /// Re-center the ball with a fresh serve angle
    pub fn reset_ball(&mut self) {
        self.ball.reset(&self.config, &mut self.rng);
    }

    /// Uniform bounce jitter in [-angle_jitter, angle_jitter]
    pub fn jitter(&mut self) -> f64 {
        let j = self.config.angle_jitter;
        if j > 0.0 {
            self.rng.random_range(-j..=j)
        } else {
            0.0
        }
    }

    /// Seconds survived in the current challenge
    pub fn challenge_elapsed(&self, now: f64) -> f64 {
        self.challenge_started_at
            .map(|start| (now - start).max(0.0))
            .unwrap_or(0.0)
    }
}
