//! Rendering module
//!
//! The game draws through the small `Surface` trait so the same frame code
//! runs against the browser canvas and a headless recorder.

pub mod hud;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};

use crate::sim::{Extent, GameState, Obstacle, ObstacleKind, Player, Rect};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Font, color and alignment for a line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: &'static str,
    pub color: &'static str,
    pub align: TextAlign,
}

/// A 2D drawing target
pub trait Surface {
    /// Current size in pixels
    fn extent(&self) -> Extent;
    /// Clear the whole surface
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    /// Draw the player sprite scaled into `rect`. Draws nothing until the
    /// image has loaded.
    fn draw_sprite(&mut self, rect: Rect);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

/// Obstacle fill colors (CSS values)
#[derive(Debug, Clone)]
pub struct Palette {
    pub obstacle: String,
    pub hazard: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            obstacle: "red".to_string(),
            hazard: "purple".to_string(),
        }
    }
}

impl Palette {
    pub fn obstacle_color(&self, kind: ObstacleKind) -> &str {
        match kind {
            ObstacleKind::Normal => &self.obstacle,
            ObstacleKind::Hazard => &self.hazard,
        }
    }
}

/// Something that knows how to draw itself
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface, palette: &Palette);
}

impl Drawable for Player {
    fn draw(&self, surface: &mut dyn Surface, _palette: &Palette) {
        surface.draw_sprite(self.rect());
    }
}

impl Drawable for Obstacle {
    fn draw(&self, surface: &mut dyn Surface, palette: &Palette) {
        surface.fill_rect(self.rect(), palette.obstacle_color(self.kind));
    }
}

/// Draw a complete frame for the current phase
pub fn draw_frame(surface: &mut dyn Surface, state: &GameState, palette: &Palette) {
    surface.clear();

    // Gameplay entities stay visible under the game over overlay
    if state.is_running() || state.is_game_over() {
        state.player.draw(surface, palette);
        for obstacle in &state.obstacles {
            obstacle.draw(surface, palette);
        }
    }

    hud::draw_start_screen(surface, state);
    hud::draw_score(surface, state);
    hud::draw_game_over(surface, state);
}
