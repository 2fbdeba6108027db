//! Axis-aligned bounding boxes for the ball and paddles
//!
//! Boxes are plain values in screen pixels (y grows downward). Entities
//! produce one on demand; collision checks take them by value.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left corner
    pub min: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Bounds {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    /// Center point (integer division, rounds toward the top-left)
    #[inline]
    pub fn center(&self) -> IVec2 {
        self.min + self.size / 2
    }

    /// Closed-interval overlap test: touching edges count as overlapping
    pub fn overlaps(self, other: Bounds) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        a_max.x >= other.min.x
            && self.min.x <= b_max.x
            && a_max.y >= other.min.y
            && self.min.y <= b_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32, side: i32) -> Bounds {
        Bounds::new(IVec2::new(x, y), IVec2::splat(side))
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = square(0, 0, 10);
        assert!(a.overlaps(square(5, 5, 10)));
        // Shared edge counts
        assert!(a.overlaps(square(10, 0, 10)));
        assert!(a.overlaps(square(0, 10, 10)));
        // One pixel gap does not
        assert!(!a.overlaps(square(11, 0, 10)));
        assert!(!a.overlaps(square(0, -11, 10)));
    }

    #[test]
    fn test_overlap_symmetric() {
        let paddle = Bounds::new(IVec2::new(0, 200), IVec2::new(15, 75));
        let ball = square(12, 270, 20);
        assert!(paddle.overlaps(ball));
        assert!(ball.overlaps(paddle));
    }

    #[test]
    fn test_center() {
        let paddle = Bounds::new(IVec2::new(485, 213), IVec2::new(15, 75));
        assert_eq!(paddle.center(), IVec2::new(492, 250));
    }
}
