//! Headless surface that records draw calls
//!
//! Used by tests and the native build in place of a canvas.

use super::{Surface, TextAlign, TextStyle};
use crate::sim::{Extent, Rect};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    FillRect { rect: Rect, color: String },
    Sprite { rect: Rect },
    Text {
        text: String,
        x: f32,
        y: f32,
        font: String,
        align: TextAlign,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    extent: Extent,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            calls: Vec::new(),
        }
    }

    /// Simulate a viewport resize
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent;
    }

    /// Calls since the most recent clear, i.e. what is currently visible
    pub fn frame_calls(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.calls[start..]
    }

    /// Number of clears, one per rendered frame
    pub fn frames(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Clear).count()
    }

    /// Visible text lines, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.frame_calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.calls.push(DrawCall::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn draw_sprite(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Sprite { rect });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            font: style.font.to_string(),
            align: style.align,
        });
    }
}
