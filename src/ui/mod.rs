//! UI modules for the quake-map viewer.
//!
//! - Side panel: layer controls, legend and event list
//! - Central canvas: the map with country outlines and markers

mod canvas;
mod colors;
mod projection;
mod side_panel;

pub use canvas::render_canvas;
pub use side_panel::render_side_panel;
