//! Collision detection and bounce response
//!
//! Bounces are expressed as changes to the ball heading. Each check works on
//! bounding boxes passed by value; none of them move the ball.

use std::f64::consts::{FRAC_PI_2, PI};

use super::bounds::Bounds;
use crate::normalize_angle;

/// What the ball touched this step, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    PlayerPaddle,
    OpponentPaddle,
    /// Top or bottom wall while travelling into it
    Wall,
    /// Ball reached the player's (left) edge
    LeftEdge,
    /// Ball reached the opponent's (right) edge
    RightEdge,
}

/// Find the first contact for a ball, or `None`
///
/// The checks are mutually exclusive: the first that matches wins. Paddle
/// overlaps are reported regardless of heading; whether to reflect is up to
/// the caller.
pub fn detect_contact(
    ball: Bounds,
    angle: f64,
    player: Bounds,
    opponent: Bounds,
    board_width: i32,
    board_height: i32,
) -> Option<Contact> {
    if ball.overlaps(player) {
        return Some(Contact::PlayerPaddle);
    }
    if ball.overlaps(opponent) {
        return Some(Contact::OpponentPaddle);
    }

    let (sin, diameter) = (angle.sin(), ball.size.y);
    let hits_top = ball.min.y <= 0 && sin < 0.0;
    let hits_bottom = ball.min.y >= board_height - diameter && sin > 0.0;
    if hits_top || hits_bottom {
        return Some(Contact::Wall);
    }

    if ball.min.x <= 0 {
        return Some(Contact::LeftEdge);
    }
    if ball.min.x >= board_width - ball.size.x {
        return Some(Contact::RightEdge);
    }

    None
}

/// Mirror a heading off a vertical surface (paddle face)
#[inline]
pub fn reflect_horizontal(angle: f64) -> f64 {
    PI - angle
}

/// Mirror a heading off a horizontal surface (top/bottom wall)
#[inline]
pub fn reflect_vertical(angle: f64) -> f64 {
    -angle
}

/// Normalize a heading and push it out of the near-vertical band
///
/// Headings within `exclusion` of ±π/2 would bounce between the top and
/// bottom walls with almost no horizontal progress. They are moved to
/// `exclusion + margin` from the vertical, on the same side they started.
/// Applying this twice gives the same result as applying it once.
pub fn correct_heading(angle: f64, exclusion: f64, margin: f64) -> f64 {
    let angle = normalize_angle(angle);
    let push = exclusion + margin;

    if (angle - FRAC_PI_2).abs() < exclusion {
        if angle < FRAC_PI_2 {
            FRAC_PI_2 - push
        } else {
            FRAC_PI_2 + push
        }
    } else if (angle + FRAC_PI_2).abs() < exclusion {
        if angle < -FRAC_PI_2 {
            -FRAC_PI_2 - push
        } else {
            -FRAC_PI_2 + push
        }
    } else {
        angle
    }
}

/// Distance from a heading to the nearest vertical (±π/2)
pub fn distance_from_vertical(angle: f64) -> f64 {
    (angle - FRAC_PI_2).abs().min((angle + FRAC_PI_2).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    const W: i32 = 500;
    const H: i32 = 500;

    fn ball_at(x: i32, y: i32) -> Bounds {
        Bounds::new(IVec2::new(x, y), IVec2::splat(20))
    }

    fn paddles() -> (Bounds, Bounds) {
        let size = IVec2::new(15, 75);
        (
            Bounds::new(IVec2::new(0, 213), size),
            Bounds::new(IVec2::new(485, 213), size),
        )
    }

    #[test]
    fn test_paddle_contacts_take_priority() {
        let (player, opponent) = paddles();
        // Overlapping the player paddle while also at the left edge
        assert_eq!(
            detect_contact(ball_at(0, 240), PI, player, opponent, W, H),
            Some(Contact::PlayerPaddle)
        );
        assert_eq!(
            detect_contact(ball_at(470, 240), 0.0, player, opponent, W, H),
            Some(Contact::OpponentPaddle)
        );
    }

    #[test]
    fn test_walls_need_inward_heading() {
        let (player, opponent) = paddles();
        // Moving up at the top wall
        assert_eq!(
            detect_contact(ball_at(250, 0), -0.8, player, opponent, W, H),
            Some(Contact::Wall)
        );
        // Moving down at the top wall: no bounce
        assert_eq!(detect_contact(ball_at(250, 0), 0.8, player, opponent, W, H), None);
        assert_eq!(
            detect_contact(ball_at(250, 480), 0.8, player, opponent, W, H),
            Some(Contact::Wall)
        );
        assert_eq!(detect_contact(ball_at(250, 479), 0.8, player, opponent, W, H), None);
    }

    #[test]
    fn test_edges() {
        let (player, opponent) = paddles();
        assert_eq!(
            detect_contact(ball_at(0, 20), PI, player, opponent, W, H),
            Some(Contact::LeftEdge)
        );
        assert_eq!(
            detect_contact(ball_at(-3, 20), PI, player, opponent, W, H),
            Some(Contact::LeftEdge)
        );
        assert_eq!(
            detect_contact(ball_at(480, 20), 0.0, player, opponent, W, H),
            Some(Contact::RightEdge)
        );
        assert_eq!(detect_contact(ball_at(250, 250), 0.0, player, opponent, W, H), None);
    }

    #[test]
    fn test_reflections() {
        assert!((reflect_horizontal(PI) - 0.0).abs() < 1e-12);
        assert!((reflect_horizontal(0.3) - (PI - 0.3)).abs() < 1e-12);
        assert_eq!(reflect_vertical(0.7), -0.7);
    }

    #[test]
    fn test_correct_heading_pushes_out_of_band() {
        assert!((correct_heading(FRAC_PI_2 - 0.1, 0.5, 0.1) - (FRAC_PI_2 - 0.6)).abs() < 1e-12);
        assert!((correct_heading(FRAC_PI_2 + 0.1, 0.5, 0.1) - (FRAC_PI_2 + 0.6)).abs() < 1e-12);
        assert!((correct_heading(FRAC_PI_2, 0.5, 0.1) - (FRAC_PI_2 + 0.6)).abs() < 1e-12);
        assert!((correct_heading(-FRAC_PI_2 - 0.2, 0.5, 0.1) - (-FRAC_PI_2 - 0.6)).abs() < 1e-12);
        assert!((correct_heading(-FRAC_PI_2 + 0.2, 0.5, 0.1) - (-FRAC_PI_2 + 0.6)).abs() < 1e-12);
        // Unnormalized serve angle just past π (heading down-left)
        let corrected = correct_heading(3.0 * PI / 2.0 - 0.1, 0.5, 0.1);
        assert!((corrected - (-FRAC_PI_2 - 0.6)).abs() < 1e-9);
    }

    #[test]
    fn test_correct_heading_leaves_good_angles() {
        for angle in [0.0, 0.5, -0.9, 2.2, -2.5, PI] {
            assert_eq!(correct_heading(angle, 0.5, 0.1), angle);
        }
    }

    #[test]
    fn test_correct_heading_idempotent() {
        let mut angle = -4.0;
        while angle < 4.0 {
            let once = correct_heading(angle, 0.5, 0.1);
            assert_eq!(correct_heading(once, 0.5, 0.1), once);
            assert!(distance_from_vertical(once) >= 0.5);
            angle += 0.01;
        }
    }
}
