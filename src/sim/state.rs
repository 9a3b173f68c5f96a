//! Game state and core simulation types
//!
//! Entities are plain data. Behavior that needs difficulty tuning takes it as
//! an argument so the same records serve every preset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::highscores::HighScores;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Freshly loaded, start screen showing
    #[default]
    Idle,
    /// Active run
    Running,
    /// Run ended by a collision
    GameOver,
}

/// Size of the render surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides finite and above zero
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(SURFACE_WIDTH, SURFACE_HEIGHT)
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels per step, positive is down)
    pub vel_y: f32,
    /// Jumps spent since last touching the floor
    pub jumps_used: u8,
    pub airborne: bool,
}

impl Player {
    /// Player as first loaded: hovering slightly above the floor
    pub fn new(extent: Extent) -> Self {
        Self {
            pos: Vec2::new(
                PLAYER_X,
                extent.height - PLAYER_SIZE - PLAYER_DROP_HEIGHT,
            ),
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            jumps_used: 0,
            airborne: false,
        }
    }

    /// Put the player back on the floor at rest
    pub fn reset(&mut self, extent: Extent) {
        self.pos = Vec2::new(PLAYER_X, extent.height - self.size.y);
        self.vel_y = 0.0;
        self.jumps_used = 0;
        self.airborne = false;
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// Whether the player is standing on the floor of the given surface
    pub fn is_grounded(&self, floor: f32) -> bool {
        !self.airborne && self.pos.y + self.size.y >= floor
    }

    /// Apply gravity and land on the floor
    pub fn update(&mut self, gravity: f32, floor: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        if self.pos.y + self.size.y > floor {
            self.land(floor);
        }
    }

    /// Clamp onto the floor and restore the jump allowance
    pub fn land(&mut self, floor: f32) {
        self.pos.y = floor - self.size.y;
        self.vel_y = 0.0;
        self.jumps_used = 0;
        self.airborne = false;
    }

    /// Try to jump. Returns false when the jump allowance is spent.
    pub fn jump(&mut self, max_jumps: u8, impulse: f32) -> bool {
        if self.jumps_used >= max_jumps {
            return false;
        }
        self.vel_y = impulse;
        self.jumps_used += 1;
        self.airborne = true;
        true
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Normal,
    /// Taller obstacle, only rolled once the score is high enough
    Hazard,
}

/// A floor-aligned block scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    /// Pixels per step, fixed at spawn
    pub speed: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    /// True once the right edge has left the surface on the left side
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    /// Keep the obstacle standing on the floor
    pub fn align_to_floor(&mut self, floor: f32) {
        self.pos.y = floor - self.size.y;
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Spawned { kind: ObstacleKind, speed: f32 },
    Cleared { score: u32 },
    GameOver { score: u32, rank: Option<usize> },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Obstacles cleared this run
    pub score: u32,
    /// Best runs this session (never persisted)
    pub high_scores: HighScores,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub extent: Extent,
    /// Simulation clock for the current run
    pub time_ms: f64,
    /// Sim time of the last spawn (None until the first spawn of a run)
    pub last_spawn_ms: Option<f64>,
    /// Runs started this session
    pub runs: u32,
}

impl GameState {
    pub fn new(extent: Extent) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            high_scores: HighScores::new(),
            player: Player::new(extent),
            obstacles: Vec::new(),
            extent,
            time_ms: 0.0,
            last_spawn_ms: None,
            runs: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Highest score reached this session
    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    /// Reset everything but the high score table and start running
    pub fn start_run(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.obstacles.clear();
        self.player.reset(self.extent);
        self.time_ms = 0.0;
        self.last_spawn_ms = None;
        self.runs += 1;
    }

    /// End the current run and record its score
    pub fn end_run(&mut self) -> GameEvent {
        self.phase = GamePhase::GameOver;
        let rank = self.high_scores.record(self.score, self.runs);
        GameEvent::GameOver {
            score: self.score,
            rank,
        }
    }

    /// Adopt a new surface size, keeping entities on the floor
    pub fn resize(&mut self, extent: Extent) {
        let floor = extent.height;
        let was_grounded = self.player.is_grounded(self.extent.height);
        self.extent = extent;

        if was_grounded || self.player.pos.y + self.player.size.y > floor {
            self.player.land(floor);
        }
        for obstacle in &mut self.obstacles {
            obstacle.align_to_floor(floor);
        }
    }
}
