//! Obstacle generation
//!
//! One obstacle per call, sized by the seeded RNG. The score at spawn time
//! decides the speed and whether a hazard can roll.

use glam::Vec2;
use rand::Rng;

use super::state::{Extent, Obstacle, ObstacleKind};
use crate::consts::*;
use crate::settings::Difficulty;

/// Build a new obstacle at the right edge of the surface, standing on the floor
pub fn spawn_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    score: u32,
    extent: Extent,
    difficulty: &Difficulty,
) -> Obstacle {
    let width = rng.random_range(OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH);
    let kind = determine_kind(rng, score, difficulty);
    let height = match kind {
        ObstacleKind::Hazard => rng.random_range(HAZARD_MIN_HEIGHT..HAZARD_MAX_HEIGHT),
        ObstacleKind::Normal => rng.random_range(OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT),
    };

    Obstacle {
        pos: Vec2::new(extent.width, extent.height - height),
        size: Vec2::new(width, height),
        kind,
        speed: difficulty.obstacle_speed(score),
    }
}

fn determine_kind<R: Rng + ?Sized>(
    rng: &mut R,
    score: u32,
    difficulty: &Difficulty,
) -> ObstacleKind {
    // Gate first so low scores never consume a roll
    if !difficulty.hazards || score <= difficulty.hazard_min_score {
        return ObstacleKind::Normal;
    }
    if rng.random_bool(difficulty.hazard_chance.clamp(0.0, 1.0)) {
        ObstacleKind::Hazard
    } else {
        ObstacleKind::Normal
    }
}
