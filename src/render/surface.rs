//! Abstract 2D drawing context used by markers.
//!
//! Markers only ever talk to a [`Surface`]. The host decides what sits
//! behind it (an egui painter in the viewer, a recorder in tests).

use eframe::egui::Color32;
use std::ops::{Deref, DerefMut};

/// How `rect` interprets its first two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectMode {
    /// (x, y) is the top-left corner.
    #[default]
    Corner,
    /// (x, y) is the center.
    Center,
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    Center,
    #[default]
    Baseline,
    Bottom,
}

/// Drawing style applied to subsequent primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Fill color (None = no fill)
    pub fill: Option<Color32>,
    /// Outline color (None = no outline)
    pub stroke: Option<Color32>,
    /// Outline and line width in pixels
    pub stroke_weight: f32,
    pub rect_mode: RectMode,
    pub text_align: (HAlign, VAlign),
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color32::WHITE),
            stroke: Some(Color32::BLACK),
            stroke_weight: 1.0,
            rect_mode: RectMode::Corner,
            text_align: (HAlign::Left, VAlign::Baseline),
        }
    }
}

/// Current style plus the saved styles beneath it.
#[derive(Debug, Clone, Default)]
pub struct StyleStack {
    current: Style,
    saved: Vec<Style>,
}

impl StyleStack {
    pub fn new(initial: Style) -> Self {
        Self {
            current: initial,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> &Style {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Style {
        &mut self.current
    }

    /// Number of saved styles.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(style) => self.current = style,
            None => log::warn!("pop_style called without a matching push_style"),
        }
    }
}

/// A 2D drawing context.
///
/// Implementors provide the primitives and the style stack; the style
/// setters are derived from the stack.
pub trait Surface {
    fn styles(&self) -> &StyleStack;
    fn styles_mut(&mut self) -> &mut StyleStack;

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Rectangle positioned according to the current [`RectMode`].
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, corner_radius: f32);
    /// Ellipse centered on (x, y).
    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn text_width(&self, text: &str) -> f32;
    /// Text anchored at (x, y) according to the current alignment.
    fn text(&mut self, text: &str, x: f32, y: f32);

    fn style(&self) -> &Style {
        self.styles().current()
    }

    fn push_style(&mut self) {
        self.styles_mut().push();
    }

    fn pop_style(&mut self) {
        self.styles_mut().pop();
    }

    fn fill(&mut self, color: Color32) {
        self.styles_mut().current_mut().fill = Some(color);
    }

    fn no_fill(&mut self) {
        self.styles_mut().current_mut().fill = None;
    }

    fn stroke(&mut self, color: Color32) {
        self.styles_mut().current_mut().stroke = Some(color);
    }

    fn no_stroke(&mut self) {
        self.styles_mut().current_mut().stroke = None;
    }

    fn stroke_weight(&mut self, weight: f32) {
        self.styles_mut().current_mut().stroke_weight = weight;
    }

    fn rect_mode(&mut self, mode: RectMode) {
        self.styles_mut().current_mut().rect_mode = mode;
    }

    fn text_align(&mut self, horizontal: HAlign, vertical: VAlign) {
        self.styles_mut().current_mut().text_align = (horizontal, vertical);
    }
}

/// Saves the surface style on creation and restores it when dropped.
///
/// Dereferences to the surface so drawing goes through the guard.
pub struct StyleGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> StyleGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.push_style();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for StyleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for StyleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for StyleGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.pop_style();
    }
}
