//! Surface that records primitives instead of drawing them (tests only).

use super::surface::{Style, StyleStack, Surface};

/// Width of one glyph in the recorder's fake monospace font.
pub const GLYPH_WIDTH: f32 = 7.0;

/// A recorded primitive together with the style it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        style: Style,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        corner_radius: f32,
        style: Style,
    },
    Ellipse {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        style: Style,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: Style,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    styles: StyleStack,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn styles(&self) -> &StyleStack {
        &self.styles
    }

    fn styles_mut(&mut self) -> &mut StyleStack {
        &mut self.styles
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.calls.push(DrawCall::Line {
            from: (x1, y1),
            to: (x2, y2),
            style: *self.style(),
        });
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, corner_radius: f32) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            w,
            h,
            corner_radius,
            style: *self.style(),
        });
    }

    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::Ellipse {
            x,
            y,
            w,
            h,
            style: *self.style(),
        });
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * GLYPH_WIDTH
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            style: *self.style(),
        });
    }
}
