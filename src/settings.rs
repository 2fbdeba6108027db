//! Game configuration
//!
//! Every gameplay constant is a named field so tests and hosts can override
//! it. Stored as JSON when persisted by a host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Mode;

/// How the computer paddle behaves in one game mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentTuning {
    /// Opponent reacts once the ball passes `board_width / activation_divisor`
    pub activation_divisor: i32,
    /// Extra slack (pixels) on top of half the paddle height before it turns
    pub error: i32,
}

impl OpponentTuning {
    /// Lenient tracking used in normal games
    pub const NORMAL: Self = Self {
        activation_divisor: 2,
        error: 20,
    };

    /// Near-perfect tracking used in challenge games
    pub const CHALLENGE: Self = Self {
        activation_divisor: 3,
        error: 0,
    };
}

/// Game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    pub board_width: i32,
    pub board_height: i32,

    // === Paddles ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Pixels per tick
    pub paddle_speed: i32,

    // === Ball ===
    pub ball_diameter: i32,
    /// Pixels per tick
    pub ball_speed: f64,

    // === Rules ===
    /// Points needed to win a normal game
    pub winning_score: u32,

    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: f64,
    /// Maximum simulation steps run by a single host callback
    pub max_substeps: u32,
    /// Length of a freeze pause in host seconds
    pub freeze_secs: f64,

    // === Bounce heuristics ===
    /// Uniform jitter (±radians) added to each bounce
    pub angle_jitter: f64,
    /// Half-width of the band around ±π/2 that headings are pushed out of
    pub vertical_exclusion: f64,
    /// How far past the band a corrected heading lands
    pub exclusion_margin: f64,

    // === Opponent ===
    pub normal_opponent: OpponentTuning,
    pub challenge_opponent: OpponentTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            ball_diameter: BALL_DIAMETER,
            ball_speed: BALL_SPEED,

            winning_score: WINNING_SCORE,

            tick_rate: TICK_RATE,
            max_substeps: MAX_SUBSTEPS,
            freeze_secs: FREEZE_SECS,

            angle_jitter: ANGLE_JITTER,
            vertical_exclusion: VERTICAL_EXCLUSION,
            exclusion_margin: EXCLUSION_MARGIN,

            normal_opponent: OpponentTuning::NORMAL,
            challenge_opponent: OpponentTuning::CHALLENGE,
        }
    }
}

impl GameConfig {
    /// Seconds per simulation tick
    pub fn tick_period(&self) -> f64 {
        1.0 / self.tick_rate
    }

    /// Lowest legal paddle y (always 0) and highest legal paddle y
    pub fn paddle_y_max(&self) -> i32 {
        self.board_height - self.paddle_height
    }

    /// Opponent tuning for a game mode
    pub fn opponent(&self, mode: Mode) -> OpponentTuning {
        match mode {
            Mode::Normal => self.normal_opponent,
            Mode::Challenge => self.challenge_opponent,
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load config from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config.sanitized();
                }
                Err(e) => log::warn!("Invalid config {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read config {}: {}", path.display(), e),
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Clamp values that would break the simulation invariants
    ///
    /// Non-finite floats fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        self.board_width = self.board_width.max(1);
        self.board_height = self.board_height.max(1);
        self.paddle_height = self.paddle_height.clamp(1, self.board_height);
        self.paddle_width = self.paddle_width.clamp(1, self.board_width);
        self.paddle_speed = self.paddle_speed.max(0);
        self.ball_diameter = self
            .ball_diameter
            .clamp(1, self.board_width.min(self.board_height));
        if !self.ball_speed.is_finite() || self.ball_speed < 0.0 {
            self.ball_speed = BALL_SPEED;
        }
        self.winning_score = self.winning_score.max(1);
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            self.tick_rate = TICK_RATE;
        }
        self.max_substeps = self.max_substeps.max(1);
        if !self.freeze_secs.is_finite() || self.freeze_secs < 0.0 {
            self.freeze_secs = FREEZE_SECS;
        }
        self.angle_jitter = finite_or(self.angle_jitter, ANGLE_JITTER).abs();
        self.vertical_exclusion = finite_or(self.vertical_exclusion, VERTICAL_EXCLUSION).abs();
        self.exclusion_margin = finite_or(self.exclusion_margin, EXCLUSION_MARGIN).abs();
        self.normal_opponent.activation_divisor = self.normal_opponent.activation_divisor.max(1);
        self.challenge_opponent.activation_divisor =
            self.challenge_opponent.activation_divisor.max(1);
        self
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 500);
        assert_eq!(config.paddle_y_max(), 425);
        assert!((config.tick_period() - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(config.opponent(Mode::Normal).error, 20);
        assert_eq!(config.opponent(Mode::Challenge).activation_divisor, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "winning_score": 3, "angle_jitter": 0.0 }"#)
            .unwrap();
        assert_eq!(config.winning_score, 3);
        assert_eq!(config.angle_jitter, 0.0);
        assert_eq!(config.board_height, 500);
        assert_eq!(config.normal_opponent, OpponentTuning::NORMAL);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig {
            freeze_secs: 0.5,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
        assert!(GameConfig::from_json(r#"{ "board_width": "wide" }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = GameConfig::load(Path::new("/nonexistent/paddle-pong.json"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_sanitized_clamps() {
        let config = GameConfig {
            tick_rate: 0.0,
            max_substeps: 0,
            paddle_height: 900,
            angle_jitter: -0.3,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.tick_rate, TICK_RATE);
        assert_eq!(config.max_substeps, 1);
        assert_eq!(config.paddle_height, config.board_height);
        assert!((config.angle_jitter - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_sanitized_rejects_non_finite_and_zero() {
        let config = GameConfig {
            angle_jitter: f64::NAN,
            ball_speed: f64::INFINITY,
            freeze_secs: f64::NEG_INFINITY,
            winning_score: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.angle_jitter, ANGLE_JITTER);
        assert_eq!(config.ball_speed, BALL_SPEED);
        assert_eq!(config.freeze_secs, FREEZE_SECS);
        assert_eq!(config.winning_score, 1);
    }

    #[test]
    fn test_sanitized_is_idempotent() {
        let config = GameConfig {
            paddle_height: 600,
            ball_diameter: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.clone().sanitized(), config);
    }
}
