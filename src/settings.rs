//! Display settings for the earthquake layer.
//!
//! Settings are persisted as JSON so they survive viewer restarts.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Earthquake layer display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSettings {
    /// Draw the threat circle around each marker.
    pub show_threat_circles: bool,
    /// Markers below this magnitude are not drawn.
    pub min_magnitude: f32,
    /// Show the title tooltip of the selected marker.
    pub show_titles: bool,
    /// Map scale used to convert threat circle kilometers to pixels.
    pub pixels_per_km: f32,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self {
            show_threat_circles: false,
            min_magnitude: 0.0,
            show_titles: true,
            pixels_per_km: 0.05,
        }
    }
}

impl LayerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a JSON file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to read layer settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded layer settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse layer settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Saved layer settings to {}", path.display());
        Ok(())
    }

    /// Threat circle radius in pixels for a radius in kilometers.
    pub fn km_to_pixels(&self, km: f64) -> f32 {
        (km * f64::from(self.pixels_per_km)) as f32
    }
}
