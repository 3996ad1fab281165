//! Centralized color constants for the viewer.

use eframe::egui::Color32;

/// Colors for the map canvas.
pub mod canvas {
    use super::Color32;

    /// Ocean background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 28, 45);
    /// Country outlines.
    pub const COASTLINE: Color32 = Color32::from_rgb(110, 130, 110);
    /// Overlay text.
    pub const OVERLAY_TEXT: Color32 = Color32::from_rgb(200, 200, 220);
    /// Error text.
    pub const ERROR: Color32 = Color32::from_rgb(255, 80, 80);
}

/// Colors for the side panel.
pub mod panel {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
}
