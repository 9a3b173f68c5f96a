//! Platform abstraction layer
//!
//! The game never schedules itself. A host driver calls `Game::frame` with
//! its own timestamps: `requestAnimationFrame` in the browser, or
//! `ManualStepper` for headless runs and tests.

use crate::consts::*;
use crate::game::Game;
use crate::renderer::Surface;

/// Converts host timestamps into a whole number of fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp (start of a run)
    pub fn reset(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Feed a host timestamp, returning how many steps to simulate.
    /// The first frame after a reset always runs exactly one step.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => STEP_MS,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator + STEP_EPSILON_MS >= STEP_MS && steps < MAX_SUBSTEPS {
            self.accumulator -= STEP_MS;
            steps += 1;
        }
        steps
    }
}

/// Drives a game with synthetic 60 Hz timestamps
#[derive(Debug, Clone, Default)]
pub struct ManualStepper {
    frames: u64,
}

impl ManualStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the next frame
    pub fn now_ms(&self) -> f64 {
        self.frames as f64 * STEP_MS
    }

    /// Run one host frame. Returns whether the game asked for another.
    pub fn step(&mut self, game: &mut Game, surface: &mut dyn Surface) -> bool {
        let now = self.now_ms();
        self.frames += 1;
        game.frame(now, surface)
    }

    /// Step until the game stops scheduling or `max_frames` have run.
    /// Returns the number of frames run.
    pub fn run(&mut self, game: &mut Game, surface: &mut dyn Surface, max_frames: u64) -> u64 {
        let mut ran = 0;
        while ran < max_frames {
            ran += 1;
            if !self.step(game, surface) {
                break;
            }
        }
        ran
    }
}
