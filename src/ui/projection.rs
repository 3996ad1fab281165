//! World map projection for the viewer canvas.
//!
//! Plain equirectangular (plate carrée): longitude and latitude map
//! linearly to x and y.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

/// Kilometers per degree of latitude.
const KM_PER_DEGREE: f64 = 111.32;

#[derive(Debug, Clone)]
pub struct MapProjection {
    pub center_lat: f64,
    pub center_lon: f64,
    /// Degrees of longitude from the center to the nearest canvas edge at zoom 1
    pub range_deg: f64,
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: Vec2,
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            center_lat: 0.0,
            center_lon: 0.0,
            range_deg: 90.0,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    pub fn update(&mut self, zoom: f32, pan_offset: Vec2, screen_rect: Rect) {
        self.zoom = zoom;
        self.pan_offset = pan_offset;
        self.screen_rect = screen_rect;
    }

    /// Screen pixels per degree at the current zoom.
    fn pixels_per_degree(&self) -> f64 {
        let half_size = f64::from(self.screen_rect.size().min_elem() / 2.0);
        half_size * f64::from(self.zoom) / self.range_deg
    }

    pub fn pixels_per_km(&self) -> f32 {
        (self.pixels_per_degree() / KM_PER_DEGREE) as f32
    }

    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let scale = self.pixels_per_degree();
        let center = self.screen_rect.center() + self.pan_offset;
        Pos2::new(
            center.x + ((coord.x - self.center_lon) * scale) as f32,
            center.y - ((coord.y - self.center_lat) * scale) as f32,
        )
    }

    /// Screen position of a coordinate, or None when it falls off the canvas
    /// by more than `margin` pixels.
    pub fn project_visible(&self, coord: Coord<f64>, margin: f32) -> Option<Pos2> {
        let pos = self.geo_to_screen(coord);
        self.screen_rect.expand(margin).contains(pos).then_some(pos)
    }
}
