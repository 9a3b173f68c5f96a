//! Axis-aligned bounding-box collision
//!
//! Everything in the game is an upright rectangle, so a strict interval
//! overlap test on both axes is all the collision the game needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in surface pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Right edge (x + width)
    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    /// Bottom edge (y + height)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x() < other.right()
            && self.right() > other.x()
            && self.y() < other.bottom()
            && self.bottom() > other.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_collide() {
        let player = Rect::new(50.0, 350.0, 50.0, 50.0);
        let obstacle = Rect::new(80.0, 360.0, 30.0, 40.0);
        assert!(player.overlaps(&obstacle));
        assert!(obstacle.overlaps(&player));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let player = Rect::new(50.0, 350.0, 50.0, 50.0);

        // Obstacle starts exactly at the player's right edge
        let right = Rect::new(100.0, 350.0, 20.0, 50.0);
        assert!(!player.overlaps(&right));

        // Obstacle ends exactly at the player's left edge
        let left = Rect::new(30.0, 350.0, 20.0, 50.0);
        assert!(!player.overlaps(&left));

        // Player bottom resting exactly on obstacle top
        let below = Rect::new(60.0, 400.0, 20.0, 30.0);
        assert!(!player.overlaps(&below));
    }

    #[test]
    fn test_player_above_obstacle_misses() {
        // Mid-jump: horizontally aligned, vertically clear
        let player = Rect::new(50.0, 200.0, 50.0, 50.0);
        let obstacle = Rect::new(60.0, 340.0, 40.0, 60.0);
        assert!(!player.overlaps(&obstacle));
    }

    #[test]
    fn test_contained_rect_collides() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
