//! Computer paddle controller
//!
//! Purely reactive: every step it looks at where the ball is and which way
//! it is heading, and sets the paddle velocity. No prediction.

use super::state::{Ball, Direction, Paddle};
use crate::settings::OpponentTuning;

/// Decide the opponent paddle's direction for this step
///
/// Returns `None` when the ball is inside the deadband and the paddle should
/// keep whatever velocity it already has.
///
/// Note the downward branch compares paddle and ball top edges instead of
/// centers. This asymmetry changes how often the paddle turns around and is
/// kept as-is.
pub fn steer(
    ball: &Ball,
    paddle: &Paddle,
    tuning: OpponentTuning,
    board_width: i32,
) -> Option<Direction> {
    let activation_x = board_width / tuning.activation_divisor;
    if !(ball.heading_right() && ball.pos.x > activation_x) {
        return Some(Direction::Stop);
    }

    let paddle_cy = paddle.center().y;
    let ball_cy = ball.center().y;
    let deadband = paddle.size.y / 2 + tuning.error;

    if (paddle_cy - ball_cy).abs() <= deadband {
        return None;
    }

    if paddle_cy < ball_cy {
        Some(Direction::Down)
    } else if paddle.pos.y > ball.pos.y {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Apply [`steer`] to the paddle
pub fn update(ball: &Ball, paddle: &mut Paddle, tuning: OpponentTuning, board_width: i32) {
    if let Some(direction) = steer(ball, paddle, tuning, board_width) {
        paddle.set_direction(direction);
    }
}
