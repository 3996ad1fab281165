//! Earthquake marker layer.

use super::band::{DepthBand, MagnitudeClass};
use super::feature::PointFeature;
use super::marker::{EarthquakeMarker, MarkerKind};
use crate::error::MarkerError;
use crate::land::LandClassifier;
use crate::render::{StyleGuard, Surface};
use crate::settings::LayerSettings;
use eframe::egui::Color32;
use geo_types::Coord;
use std::collections::BTreeMap;

/// Markers of one feed, kept in severity order (strongest first).
#[derive(Debug, Default)]
pub struct QuakeLayer {
    markers: Vec<EarthquakeMarker>,
    selected: Option<usize>,
    /// Number of features rejected while building the layer
    skipped: usize,
}

impl QuakeLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds markers from features, classifying each epicenter with
    /// `classifier`. Malformed features are logged and skipped.
    pub fn from_features(
        features: impl IntoIterator<Item = PointFeature>,
        classifier: &dyn LandClassifier,
    ) -> Self {
        let mut layer = Self::new();
        for feature in features {
            let on_land = classifier.is_on_land(feature.location);
            match EarthquakeMarker::new(feature, MarkerKind::for_location(on_land)) {
                Ok(marker) => layer.markers.push(marker),
                Err(e) => {
                    log::warn!("Skipping earthquake feature: {}", e);
                    layer.skipped += 1;
                }
            }
        }
        layer.markers.sort();

        log::info!(
            "Built earthquake layer: {} markers, {} skipped",
            layer.markers.len(),
            layer.skipped
        );
        layer
    }

    /// Adds a marker, keeping severity order. Clears the selection.
    pub fn insert(&mut self, marker: EarthquakeMarker) {
        let idx = self.markers.partition_point(|m| m <= &marker);
        self.markers.insert(idx, marker);
        self.selected = None;
    }

    /// Markers, strongest first.
    pub fn markers(&self) -> &[EarthquakeMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The `n` strongest markers.
    pub fn strongest(&self, n: usize) -> &[EarthquakeMarker] {
        &self.markers[..n.min(self.markers.len())]
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.markers.len());
    }

    pub fn selected(&self) -> Option<&EarthquakeMarker> {
        self.selected.and_then(|i| self.markers.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn summary(&self) -> LayerSummary {
        let mut summary = LayerSummary::default();
        for marker in &self.markers {
            *summary.by_depth.entry(marker.depth_band()).or_default() += 1;
            *summary
                .by_magnitude
                .entry(MagnitudeClass::classify(marker.magnitude()))
                .or_default() += 1;
            if marker.is_on_land() {
                summary.on_land += 1;
            } else {
                summary.at_sea += 1;
            }
        }
        summary
    }

    /// Draws the layer. `project` maps a location to screen pixels and
    /// returns None for locations outside the view.
    ///
    /// Markers are drawn weakest first so the strongest end up on top.
    /// The selected marker's title is shown when it has one. Returns the
    /// number of markers drawn.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        project: impl Fn(Coord<f64>) -> Option<(f32, f32)>,
        settings: &LayerSettings,
    ) -> Result<usize, MarkerError> {
        let mut drawn = 0;
        for marker in self.markers.iter().rev() {
            if marker.magnitude() < settings.min_magnitude {
                continue;
            }
            let Some((x, y)) = project(marker.location()) else {
                continue;
            };

            if settings.show_threat_circles {
                draw_threat_circle(surface, marker, x, y, settings);
            }
            marker.draw_marker(surface, x, y)?;
            drawn += 1;
        }

        if settings.show_titles {
            if let Some(marker) = self.selected().filter(|m| m.title().is_ok()) {
                if let Some((x, y)) = project(marker.location()) {
                    marker.show_title(surface, x, y)?;
                }
            }
        }

        Ok(drawn)
    }
}

/// Outlines the threat circle of a marker in its depth color.
fn draw_threat_circle(
    surface: &mut dyn Surface,
    marker: &EarthquakeMarker,
    x: f32,
    y: f32,
    settings: &LayerSettings,
) {
    let [r, g, b, _] = marker.depth_band().color().to_array();
    let radius = settings.km_to_pixels(marker.threat_circle());
    if !radius.is_finite() {
        return;
    }

    let mut pg = StyleGuard::new(surface);
    pg.no_fill();
    pg.stroke(Color32::from_rgba_unmultiplied(r, g, b, 120));
    pg.stroke_weight(1.0);
    pg.ellipse(x, y, 2.0 * radius, 2.0 * radius);
}

/// Marker counts by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSummary {
    pub by_depth: BTreeMap<DepthBand, usize>,
    pub by_magnitude: BTreeMap<MagnitudeClass, usize>,
    pub on_land: usize,
    pub at_sea: usize,
}

impl LayerSummary {
    pub fn total(&self) -> usize {
        self.on_land + self.at_sea
    }
}
