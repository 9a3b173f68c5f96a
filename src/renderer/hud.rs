//! HUD and overlays
//!
//! Each function draws only in its own phase and is a no-op otherwise, so the
//! frame renderer can call all of them unconditionally.

use super::{Surface, TextAlign, TextStyle};
use crate::sim::{GamePhase, GameState};

pub const TITLE: &str = "Dodge Jump";

const TITLE_STYLE: TextStyle = TextStyle {
    font: "40px Arial",
    color: "black",
    align: TextAlign::Center,
};

const PROMPT_STYLE: TextStyle = TextStyle {
    font: "20px Arial",
    color: "black",
    align: TextAlign::Center,
};

const SCORE_STYLE: TextStyle = TextStyle {
    font: "20px Arial",
    color: "black",
    align: TextAlign::Left,
};

/// Title and start prompt (Idle only)
pub fn draw_start_screen(surface: &mut dyn Surface, state: &GameState) {
    if state.phase != GamePhase::Idle {
        return;
    }
    draw_banner(surface, state, TITLE, "Press Space or Tap to Start");
}

/// Score and high score in the top-left corner (Running only)
pub fn draw_score(surface: &mut dyn Surface, state: &GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    surface.fill_text(&format!("Score: {}", state.score), 10.0, 25.0, &SCORE_STYLE);
    surface.fill_text(
        &format!("High Score: {}", state.high_score()),
        10.0,
        50.0,
        &SCORE_STYLE,
    );
}

/// Game over banner and restart prompt (GameOver only)
pub fn draw_game_over(surface: &mut dyn Surface, state: &GameState) {
    if state.phase != GamePhase::GameOver {
        return;
    }
    draw_banner(surface, state, "GAME OVER", "Press Space or Tap to Restart");
}

fn draw_banner(surface: &mut dyn Surface, state: &GameState, title: &str, prompt: &str) {
    let cx = state.extent.width / 2.0;
    let cy = state.extent.height / 2.0;
    surface.fill_text(title, cx, cy - 20.0, &TITLE_STYLE);
    surface.fill_text(prompt, cx, cy + 20.0, &PROMPT_STYLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingSurface};
    use crate::sim::Extent;

    #[test]
    fn test_overlays_are_exclusive() {
        let mut state = GameState::new(Extent::default());
        let mut surface = RecordingSurface::new(Extent::default());

        for phase in [GamePhase::Idle, GamePhase::Running, GamePhase::GameOver] {
            state.phase = phase;
            surface.clear();
            draw_start_screen(&mut surface, &state);
            draw_score(&mut surface, &state);
            draw_game_over(&mut surface, &state);

            let texts = surface.texts();
            assert_eq!(texts.len(), 2, "{:?}", phase);
            assert_eq!(texts.contains(&TITLE), phase == GamePhase::Idle);
            assert_eq!(texts.contains(&"GAME OVER"), phase == GamePhase::GameOver);
        }
    }

    #[test]
    fn test_banner_is_centered() {
        let mut state = GameState::new(Extent::new(600.0, 300.0));
        state.phase = GamePhase::GameOver;
        let mut surface = RecordingSurface::new(Extent::new(600.0, 300.0));

        draw_game_over(&mut surface, &state);

        match &surface.frame_calls()[0] {
            DrawCall::Text { x, y, align, .. } => {
                assert_eq!((*x, *y), (300.0, 130.0));
                assert_eq!(*align, TextAlign::Center);
            }
            other => panic!("unexpected draw call {:?}", other),
        }
    }

    #[test]
    fn test_score_shows_session_best() {
        let mut state = GameState::new(Extent::default());
        state.start_run();
        state.score = 3;
        state.end_run();
        state.start_run();
        state.score = 1;
        let mut surface = RecordingSurface::new(Extent::default());

        draw_score(&mut surface, &state);
        assert_eq!(surface.texts(), vec!["Score: 1", "High Score: 3"]);
    }
}
