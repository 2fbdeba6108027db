//! Game facade driven by the host
//!
//! The host calls [`Game::tick`] from its frame callback with a monotonic
//! time in seconds, forwards input through the command methods, and draws
//! from [`Game::snapshot`]. Everything runs on the caller's thread.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::normalize_angle;
use crate::scheduler::{Pulse, Scheduler};
use crate::settings::GameConfig;
use crate::sim::{
    Banner, Direction, GameEvent, GameState, Mode, Phase, Scores, format_elapsed, step,
};

/// Input from the host, applied immediately (last write wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move/stop the player paddle
    Player(Direction),
    /// Primary menu button
    StartNormal,
    /// Challenge button on the menu; shows the rules first
    StartChallenge,
    /// Confirm the challenge rules and begin
    AcknowledgeInstructions,
}

/// Read-only view for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub ball_pos: IVec2,
    /// Heading in (-π, π]
    pub ball_angle: f64,
    pub ball_moving: bool,
    pub player_paddle: IVec2,
    pub opponent_paddle: IVec2,
    pub scores: Scores,
    pub mode: Mode,
    pub phase: Phase,
    /// Banner text when a menu is visible
    pub banner: Option<Banner>,
    /// Challenge clock as `mm:ss` (challenge mode only)
    pub elapsed: Option<String>,
    pub frozen: bool,
    /// Show the "arrow keys" hint
    pub controls_hint: bool,
}

/// One game session
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    scheduler: Scheduler,
    /// Latest host time, used to stamp commands
    clock: f64,
    /// Events from the most recent `tick`
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let scheduler =
            Scheduler::new(config.tick_period(), config.max_substeps, config.freeze_secs);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(config, seed),
            scheduler,
            clock: 0.0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts that script positions (demos, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Events produced by the last call to [`Game::tick`]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Host frame callback. Returns the number of simulation steps run.
    pub fn tick(&mut self, now: f64) -> u32 {
        self.clock = now;
        self.events.clear();

        match self.scheduler.advance(now) {
            Pulse::Idle | Pulse::Frozen => 0,
            Pulse::Thawed => {
                if self.state.phase == Phase::RoundTransition {
                    self.state.phase = Phase::Playing;
                }
                0
            }
            Pulse::Step(owed) => {
                let mut ran = 0;
                while ran < owed {
                    self.scheduler.consume();
                    let events = step(&mut self.state, now);
                    ran += 1;
                    self.log_events(&events);
                    self.events.extend(events);

                    if self.state.phase == Phase::RoundTransition {
                        self.scheduler.engage_freeze();
                        break;
                    }
                }
                ran
            }
        }
    }

    fn log_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::PlayerScored { .. } | GameEvent::OpponentScored { .. } => {
                    log::info!(
                        "Score {} - {}",
                        self.state.scores.player,
                        self.state.scores.opponent
                    );
                }
                GameEvent::GameWon { winner } => log::info!("Game over, {:?} wins", winner),
                GameEvent::ChallengeOver { elapsed_secs } => {
                    log::info!("Challenge over after {}", format_elapsed(*elapsed_secs))
                }
                GameEvent::OpponentMissed => log::debug!("Opponent missed, serving again"),
                _ => {}
            }
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Player(direction) => self.set_player_velocity(direction),
            Command::StartNormal => self.start_normal_mode(),
            Command::StartChallenge => self.start_challenge_mode(),
            Command::AcknowledgeInstructions => self.acknowledge_instructions(),
        }
    }

    /// Steer the player paddle. Presses are ignored while frozen; releases
    /// always stop the paddle.
    pub fn set_player_velocity(&mut self, direction: Direction) {
        if self.scheduler.is_frozen() && direction != Direction::Stop {
            log::debug!("Ignoring {:?} while frozen", direction);
            return;
        }
        self.state.player.set_direction(direction);
    }

    /// Begin a normal game from a menu
    pub fn start_normal_mode(&mut self) {
        if !self.state.phase.is_menu() || self.state.phase.showing_instructions() {
            log::debug!("Ignoring start from {:?}", self.state.phase);
            return;
        }
        self.state.mode = Mode::Normal;
        self.state.scores = Scores::default();
        self.state.challenge_started_at = None;
        self.serve();
        log::info!("Normal game started");
    }

    /// Open the challenge rules from a menu
    pub fn start_challenge_mode(&mut self) {
        match &mut self.state.phase {
            Phase::Home { instructions } | Phase::Terminal { instructions, .. } => {
                *instructions = true;
            }
            other => log::debug!("Ignoring challenge request from {:?}", other),
        }
    }

    /// Leave the rules screen and start the challenge clock
    pub fn acknowledge_instructions(&mut self) {
        if !self.state.phase.showing_instructions() {
            log::debug!("Ignoring acknowledge from {:?}", self.state.phase);
            return;
        }
        self.state.mode = Mode::Challenge;
        self.state.scores = Scores::default();
        self.state.challenge_started_at = Some(self.clock);
        self.serve();
        log::info!("Challenge started");
    }

    /// Center the ball, launch it, and freeze before play
    fn serve(&mut self) {
        self.state.reset_ball();
        self.state.ball.start();
        self.state.phase = Phase::RoundTransition;
        self.scheduler.engage_freeze();
    }

    /// Challenge clock at host time `now`
    pub fn elapsed(&self, now: f64) -> Option<String> {
        match (self.state.mode, self.state.challenge_started_at) {
            (Mode::Challenge, Some(_)) => Some(format_elapsed(self.state.challenge_elapsed(now))),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let banner = match &state.phase {
            Phase::Home { .. } => Some(Banner::title_screen()),
            Phase::Terminal { banner, .. } => Some(banner.clone()),
            Phase::Playing | Phase::RoundTransition => None,
        };
        // Menus carry the final time in their banner
        let elapsed = if state.phase.is_menu() {
            None
        } else {
            self.elapsed(self.clock)
        };
        let opening_freeze = state.phase == Phase::RoundTransition
            && match state.mode {
                Mode::Normal => state.scores == Scores::default(),
                Mode::Challenge => elapsed.as_deref() == Some("00:00"),
            };

        Snapshot {
            ball_pos: state.ball.pos,
            ball_angle: normalize_angle(state.ball.angle),
            ball_moving: state.ball.moving,
            player_paddle: state.player.pos,
            opponent_paddle: state.opponent.pos,
            scores: state.scores,
            mode: state.mode,
            phase: state.phase.clone(),
            banner,
            elapsed,
            frozen: self.scheduler.is_frozen(),
            controls_hint: state.phase.showing_instructions() || opening_freeze,
        }
    }
}
