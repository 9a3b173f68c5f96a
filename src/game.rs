//! Game controller
//!
//! Owns the state, RNG and frame clock. The host calls `frame` once per
//! display refresh while it returns true, `activate` on Space/tap, and
//! `resize` when the viewport changes.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::FrameClock;
use crate::renderer::{Palette, Surface, draw_frame};
use crate::settings::{Difficulty, Settings};
use crate::sim::{Extent, GameEvent, GameState, ObstacleKind, tick};

/// What an activate input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A new run began; the host must start scheduling frames
    Started,
    Jumped,
    /// Jump allowance spent
    Ignored,
}

pub struct Game {
    state: GameState,
    settings: Settings,
    difficulty: Difficulty,
    palette: Palette,
    rng: Pcg32,
    clock: FrameClock,
}

impl Game {
    /// Create a game in the Idle phase. `seed` is used unless the settings
    /// pin one.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        let extent = settings.extent();
        let difficulty = settings.difficulty();
        log::info!(
            "Game created ({} mode, seed {}, {}x{})",
            settings.preset.as_str(),
            seed,
            extent.width,
            extent.height
        );

        Self {
            state: GameState::new(extent),
            settings,
            difficulty,
            palette: Palette::default(),
            rng: Pcg32::seed_from_u64(seed),
            clock: FrameClock::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Run one host frame at `now_ms` (host clock, any origin).
    ///
    /// Does nothing and returns false unless a run is in progress. Otherwise
    /// simulates the steps that fit in the elapsed time, redraws the surface
    /// and returns whether the host should schedule another frame.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let steps = self.clock.advance(now_ms);
        for _ in 0..steps {
            let events = tick(&mut self.state, &self.difficulty, &mut self.rng);
            self.log_events(&events);
            if !self.state.is_running() {
                break;
            }
        }

        self.render(surface);
        self.state.is_running()
    }

    /// Handle the single game input: start a run, or jump during one
    pub fn activate(&mut self) -> Activation {
        if self.state.is_running() {
            let jumped = self
                .state
                .player
                .jump(self.difficulty.max_jumps, self.difficulty.jump_impulse);
            return if jumped {
                Activation::Jumped
            } else {
                Activation::Ignored
            };
        }

        self.state.start_run();
        self.clock.reset();
        log::info!(
            "Run {} started (high score {})",
            self.state.runs,
            self.state.high_score()
        );
        Activation::Started
    }

    /// Adopt a new surface size. Redraws the overlay when no run is active,
    /// since no frames are being scheduled to do it. Resizing a canvas wipes
    /// it, so the redraw happens even when the size is unchanged.
    pub fn resize(&mut self, extent: Extent, surface: &mut dyn Surface) {
        if !extent.is_positive() {
            log::warn!("Ignoring resize to {}x{}", extent.width, extent.height);
        } else if extent != self.state.extent {
            log::info!("Surface resized to {}x{}", extent.width, extent.height);
            self.state.resize(extent);
        }

        if !self.state.is_running() {
            self.render(surface);
        }
    }

    /// Draw the current state
    pub fn render(&self, surface: &mut dyn Surface) {
        draw_frame(surface, &self.state, &self.palette);
    }

    fn log_events(&self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Spawned { kind, speed } => {
                    if kind == ObstacleKind::Hazard {
                        log::debug!("Hazard spawned (speed {:.2})", speed);
                    } else {
                        log::trace!("Obstacle spawned (speed {:.2})", speed);
                    }
                }
                GameEvent::Cleared { score } => log::debug!("Score {}", score),
                GameEvent::GameOver { score, rank } => {
                    log::info!("Run {} over with score {}", self.state.runs, score);
                    if rank == Some(1) {
                        log::info!("New high score: {}", score);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualStepper;
    use crate::renderer::{DrawCall, RecordingSurface};
    use crate::settings::DifficultyPreset;
    use crate::sim::{GamePhase, Obstacle};
    use glam::Vec2;

    fn setup() -> (Game, RecordingSurface, ManualStepper) {
        let settings = Settings::default();
        let surface = RecordingSurface::new(Extent::new(settings.width, settings.height));
        (Game::new(settings, 12345), surface, ManualStepper::new())
    }

    /// Put an obstacle right in front of a grounded player
    fn block_player(game: &mut Game) {
        game.state.obstacles.push(Obstacle {
            pos: Vec2::new(100.0, 360.0),
            size: Vec2::new(30.0, 40.0),
            kind: ObstacleKind::Normal,
            speed: 5.0,
        });
    }

    #[test]
    fn test_fresh_load_shows_start_screen() {
        let (mut game, mut surface, mut stepper) = setup();
        game.render(&mut surface);

        assert_eq!(game.state().phase, GamePhase::Idle);
        assert!(surface.texts().contains(&"Dodge Jump"));
        assert!(
            !surface
                .frame_calls()
                .iter()
                .any(|c| matches!(c, DrawCall::Sprite { .. } | DrawCall::FillRect { .. }))
        );

        // Frames while idle are no-ops
        assert!(!stepper.step(&mut game, &mut surface));
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_activate_while_idle_starts_run() {
        let (mut game, mut surface, mut stepper) = setup();

        assert_eq!(game.activate(), Activation::Started);
        let state = game.state();
        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos.y + state.player.size.y, 400.0);

        assert!(stepper.step(&mut game, &mut surface));
        assert!(surface.texts().contains(&"Score: 0"));
    }

    #[test]
    fn test_activate_while_running_jumps() {
        let (mut game, _, _) = setup();
        game.activate();

        assert_eq!(game.activate(), Activation::Jumped);
        assert_eq!(game.state().player.vel_y, -12.0);
        assert_eq!(game.activate(), Activation::Ignored);
    }

    #[test]
    fn test_arcade_allows_double_jump() {
        let settings = Settings::from_preset(DifficultyPreset::Arcade);
        let mut game = Game::new(settings, 1);
        game.activate();

        assert_eq!(game.activate(), Activation::Jumped);
        assert_eq!(game.activate(), Activation::Jumped);
        assert_eq!(game.activate(), Activation::Ignored);
    }

    #[test]
    fn test_collision_stops_scheduling_and_shows_game_over() {
        let (mut game, mut surface, mut stepper) = setup();
        game.activate();
        block_player(&mut game);

        assert!(!stepper.step(&mut game, &mut surface));
        assert!(game.state().is_game_over());
        let texts = surface.texts();
        assert!(texts.contains(&"GAME OVER"));
        assert!(!texts.iter().any(|t| t.starts_with("Score")));

        // Loop is dead until the next activate
        let frames = surface.frames();
        assert!(!stepper.step(&mut game, &mut surface));
        assert_eq!(surface.frames(), frames);
    }

    #[test]
    fn test_restart_resets_run_but_keeps_high_score() {
        let (mut game, mut surface, mut stepper) = setup();
        game.activate();
        game.state.score = 6;
        block_player(&mut game);
        stepper.step(&mut game, &mut surface);
        assert_eq!(game.state().high_score(), 6);

        assert_eq!(game.activate(), Activation::Started);
        assert!(game.state().is_running());
        assert_eq!(game.state().score, 0);
        assert!(game.state().obstacles.is_empty());
        assert_eq!(game.state().high_score(), 6);
    }

    #[test]
    fn test_idle_run_collides_eventually() {
        // Never jumping: the first obstacle ends the run
        let (mut game, mut surface, mut stepper) = setup();
        game.activate();

        let frames = stepper.run(&mut game, &mut surface, 10_000);
        assert!(frames < 10_000);
        assert!(game.state().is_game_over());
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_resize_rerenders_overlay_when_idle() {
        let (mut game, mut surface, _) = setup();
        game.render(&mut surface);
        let frames = surface.frames();

        let extent = Extent::new(1024.0, 600.0);
        surface.set_extent(extent);
        game.resize(extent, &mut surface);

        assert_eq!(surface.frames(), frames + 1);
        match &surface.frame_calls()[0] {
            DrawCall::Text { x, .. } => assert_eq!(*x, 512.0),
            other => panic!("unexpected draw call {:?}", other),
        }
    }

    #[test]
    fn test_resize_rerenders_game_over_overlay() {
        let (mut game, mut surface, mut stepper) = setup();
        game.activate();
        block_player(&mut game);
        stepper.step(&mut game, &mut surface);
        let frames = surface.frames();

        let extent = Extent::new(640.0, 480.0);
        surface.set_extent(extent);
        game.resize(extent, &mut surface);

        assert_eq!(surface.frames(), frames + 1);
        assert_eq!(game.state().extent, extent);
        let texts = surface.texts();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"Press Space or Tap to Restart"));
        assert!(!texts.contains(&"Dodge Jump"));
    }

    #[test]
    fn test_resize_to_same_size_still_redraws_overlay() {
        let (mut game, mut surface, _) = setup();
        game.render(&mut surface);
        let frames = surface.frames();

        game.resize(Extent::new(800.0, 400.0), &mut surface);
        assert_eq!(surface.frames(), frames + 1);
        assert!(surface.texts().contains(&"Dodge Jump"));
    }

    #[test]
    fn test_resize_to_empty_surface_is_ignored() {
        let (mut game, mut surface, _) = setup();
        game.resize(Extent::new(0.0, 0.0), &mut surface);
        assert_eq!(game.state().extent, Extent::new(800.0, 400.0));
    }

    #[test]
    fn test_negative_speed_config_still_ends_run() {
        let settings = Settings::from_json(
            r#"{ "preset": "arcade", "seed": 1, "difficulty": { "base_speed": -3.0 } }"#,
        )
        .unwrap();
        let mut surface = RecordingSurface::new(settings.extent());
        let mut stepper = ManualStepper::new();
        let mut game = Game::new(settings, 0);
        assert_eq!(*game.difficulty(), DifficultyPreset::Arcade.difficulty());

        game.activate();
        let frames = stepper.run(&mut game, &mut surface, 18_000);
        assert!(frames < 18_000);
        assert!(game.state().is_game_over());
        assert!(game.state().obstacles.len() < 10);
        for obstacle in &game.state().obstacles {
            assert!(obstacle.speed > 0.0);
            assert!(obstacle.pos.x < 800.0);
        }
    }

    #[test]
    fn test_resize_while_running_waits_for_next_frame() {
        let (mut game, mut surface, mut stepper) = setup();
        game.activate();
        stepper.step(&mut game, &mut surface);
        let frames = surface.frames();

        game.resize(Extent::new(800.0, 300.0), &mut surface);
        assert_eq!(surface.frames(), frames);
        let state = game.state();
        assert_eq!(state.player.pos.y + state.player.size.y, 300.0);
        for obstacle in &state.obstacles {
            assert!((obstacle.pos.y + obstacle.size.y - 300.0).abs() < 1e-3);
        }
    }
}
