//! Fixed timestep simulation step
//!
//! One call advances the game by exactly one tick. Wall-clock concerns
//! (freeze pauses, catch-up) belong to the scheduler; this module only sees
//! the host time so it can stamp challenge results.

use super::collision::{
    Contact, correct_heading, detect_contact, reflect_horizontal, reflect_vertical,
};
use super::opponent;
use super::state::{Banner, GameEvent, GameState, Mode, Phase, Side};

/// Advance the game state by one tick
///
/// Order: ball, paddles, opponent steering, contacts, heading correction.
/// Returns what happened so the caller can react (freeze, logging).
pub fn step(state: &mut GameState, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    state.ball.integrate();
    state.player.integrate();
    state.opponent.integrate();

    let tuning = state.config.opponent(state.mode);
    opponent::update(&state.ball, &mut state.opponent, tuning, state.config.board_width);

    let contact = detect_contact(
        state.ball.bounds(),
        state.ball.angle,
        state.player.bounds(),
        state.opponent.bounds(),
        state.config.board_width,
        state.config.board_height,
    );

    match contact {
        Some(Contact::PlayerPaddle) => {
            // Only bounce while still heading into the paddle
            if state.ball.heading_left() {
                let jitter = state.jitter();
                state.ball.angle = reflect_horizontal(state.ball.angle) + jitter;
                events.push(GameEvent::PlayerPaddleHit);
            }
        }
        Some(Contact::OpponentPaddle) => {
            if state.ball.heading_right() {
                let jitter = state.jitter();
                state.ball.angle = reflect_horizontal(state.ball.angle) + jitter;
                events.push(GameEvent::OpponentPaddleHit);
            }
        }
        Some(Contact::Wall) => {
            let jitter = state.jitter();
            state.ball.angle = reflect_vertical(state.ball.angle) + jitter;
            events.push(GameEvent::WallBounce);
        }
        Some(Contact::LeftEdge) if state.phase == Phase::Playing => {
            left_edge_reached(state, now, &mut events);
        }
        Some(Contact::RightEdge) if state.phase == Phase::Playing => {
            right_edge_reached(state, &mut events);
        }
        Some(Contact::LeftEdge | Contact::RightEdge) | None => {}
    }

    state.ball.angle = correct_heading(
        state.ball.angle,
        state.config.vertical_exclusion,
        state.config.exclusion_margin,
    );

    debug_assert!(state.ball.angle > -std::f64::consts::PI);
    debug_assert!(state.ball.angle <= std::f64::consts::PI);
    debug_assert!((0..=state.config.paddle_y_max()).contains(&state.player.pos.y));
    debug_assert!((0..=state.config.paddle_y_max()).contains(&state.opponent.pos.y));

    events
}

/// The player missed: opponent point, or end of a challenge
fn left_edge_reached(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    match state.mode {
        Mode::Normal => {
            state.scores.opponent += 1;
            let score = state.scores.opponent;
            state.reset_ball();
            events.push(GameEvent::OpponentScored { score });

            if score >= state.config.winning_score {
                state.phase = Phase::Terminal {
                    banner: Banner::new("Computer wins!", "Play again?"),
                    instructions: false,
                };
                events.push(GameEvent::GameWon {
                    winner: Side::Opponent,
                });
            } else {
                begin_round_transition(state);
            }
        }
        Mode::Challenge => {
            let elapsed_secs = state.challenge_elapsed(now);
            state.phase = Phase::Terminal {
                banner: Banner::new(
                    format!("You survived for {}!", format_elapsed(elapsed_secs)),
                    "Normal mode",
                )
                .with_subtitle("Play again?"),
                instructions: false,
            };
            state.reset_ball();
            events.push(GameEvent::ChallengeOver { elapsed_secs });
        }
    }
}

/// The opponent missed: player point in normal games, a fresh serve in challenges
fn right_edge_reached(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.reset_ball();
    match state.mode {
        Mode::Normal => {
            state.scores.player += 1;
            let score = state.scores.player;
            events.push(GameEvent::PlayerScored { score });

            if score >= state.config.winning_score {
                state.phase = Phase::Terminal {
                    banner: Banner::new("Player wins!", "Play again?"),
                    instructions: false,
                };
                events.push(GameEvent::GameWon {
                    winner: Side::Player,
                });
                return;
            }
        }
        Mode::Challenge => events.push(GameEvent::OpponentMissed),
    }
    begin_round_transition(state);
}

/// Serve from center once the freeze ends
fn begin_round_transition(state: &mut GameState) {
    state.phase = Phase::RoundTransition;
    state.ball.start();
}

/// Format seconds as `mm:ss`
pub fn format_elapsed(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
