//! Depth bands and magnitude classes.

use eframe::egui::Color32;

/// At or above this magnitude an earthquake is moderate.
pub const THRESHOLD_MODERATE: f32 = 5.0;
/// At or above this magnitude an earthquake is light.
pub const THRESHOLD_LIGHT: f32 = 4.0;

/// At or above this depth (km) an earthquake is intermediate.
pub const THRESHOLD_INTERMEDIATE: f32 = 70.0;
/// At or above this depth (km) an earthquake is deep.
pub const THRESHOLD_DEEP: f32 = 300.0;

/// Depth classification used for marker fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepthBand {
    /// Shallower than 70 km
    Shallow,
    /// 70 km up to 300 km
    Intermediate,
    /// 300 km and deeper
    Deep,
}

impl DepthBand {
    pub const ALL: [DepthBand; 3] = [Self::Shallow, Self::Intermediate, Self::Deep];

    /// Classifies a depth in kilometers. Lower bounds are inclusive.
    pub fn classify(depth: f32) -> Self {
        if depth < THRESHOLD_INTERMEDIATE {
            Self::Shallow
        } else if depth < THRESHOLD_DEEP {
            Self::Intermediate
        } else {
            Self::Deep
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Shallow => "Shallow",
            Self::Intermediate => "Intermediate",
            Self::Deep => "Deep",
        }
    }

    /// Marker fill color for this band.
    pub fn color(&self) -> Color32 {
        match self {
            Self::Shallow => Color32::from_rgb(255, 255, 0),
            Self::Intermediate => Color32::from_rgb(0, 0, 255),
            Self::Deep => Color32::from_rgb(255, 0, 0),
        }
    }
}

/// Magnitude classification used by the legend and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MagnitudeClass {
    /// Below 4.0
    Minor,
    /// 4.0 up to 5.0
    Light,
    /// 5.0 and above
    Moderate,
}

impl MagnitudeClass {
    pub const ALL: [MagnitudeClass; 3] = [Self::Minor, Self::Light, Self::Moderate];

    pub fn classify(magnitude: f32) -> Self {
        if magnitude < THRESHOLD_LIGHT {
            Self::Minor
        } else if magnitude < THRESHOLD_MODERATE {
            Self::Light
        } else {
            Self::Moderate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Light => "Light",
            Self::Moderate => "Moderate",
        }
    }
}
