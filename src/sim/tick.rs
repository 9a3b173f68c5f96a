//! Fixed timestep simulation tick
//!
//! One call advances the run by one display frame's worth of time.

use rand::Rng;

use super::spawn::spawn_obstacle;
use super::state::{GameEvent, GameState};
use crate::consts::STEP_MS;
use crate::settings::Difficulty;

/// Advance the game state by one fixed timestep.
///
/// Order within a step: player physics, spawn timer, then each obstacle is
/// moved, collision-tested and culled in spawn order. A collision ends the
/// run on the spot; obstacles after the colliding one are left untouched.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    difficulty: &Difficulty,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.is_running() {
        return events;
    }

    state.time_ms += STEP_MS;

    state.player.update(difficulty.gravity, state.extent.height);

    let spawn_due = state
        .last_spawn_ms
        .is_none_or(|last| state.time_ms - last > difficulty.spawn_interval_ms);
    if spawn_due {
        let obstacle = spawn_obstacle(rng, state.score, state.extent, difficulty);
        events.push(GameEvent::Spawned {
            kind: obstacle.kind,
            speed: obstacle.speed,
        });
        state.obstacles.push(obstacle);
        state.last_spawn_ms = Some(state.time_ms);
    }

    let player = state.player.rect();
    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.advance();

        if obstacle.rect().overlaps(&player) {
            events.push(state.end_run());
            return events;
        }

        if obstacle.is_offscreen() {
            // Removal shifts the next obstacle into slot i
            state.obstacles.remove(i);
            state.score += 1;
            events.push(GameEvent::Cleared { score: state.score });
            continue;
        }

        i += 1;
    }

    events
}
