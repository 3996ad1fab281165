//! Drawing surfaces for markers.
//!
//! The [`Surface`] trait is the only thing markers need from the host
//! toolkit. [`PainterSurface`] adapts an egui painter to it.

mod painter;
#[cfg(test)]
pub(crate) mod recording;
mod surface;

pub use painter::PainterSurface;
pub use surface::{HAlign, RectMode, Style, StyleGuard, StyleStack, Surface, VAlign};
