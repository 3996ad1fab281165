//! Earthquake map marker.
//!
//! A marker derives its display attributes from the event's properties once,
//! at construction, and draws itself onto a [`Surface`]. The concrete shape
//! is picked by [`MarkerKind`].

use super::band::DepthBand;
use super::feature::{keys, AgeCategory, PointFeature, QuakeProperties};
use crate::error::{MalformedFeatureError, MarkerError, MissingPropertyError};
use crate::render::{HAlign, RectMode, StyleGuard, Surface, VAlign};
use eframe::egui::Color32;
use geo_types::Coord;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// Kilometers per mile, as used by the threat circle model.
pub const KM_PER_MILE: f32 = 1.6;

/// Draw radius per unit of magnitude.
const DRAW_RADIUS_SCALE: f32 = 1.75;
/// Gap between the marker and the recent-event cross, in pixels.
const CROSS_BUFFER: f32 = 2.0;

/// Shape drawing for marker variants beyond the built-in ones.
pub trait QuakeShape: fmt::Debug {
    /// Draws the marker body centered on (x, y). Fill is already set.
    fn draw(
        &self,
        marker: &EarthquakeMarker,
        surface: &mut dyn Surface,
        x: f32,
        y: f32,
    ) -> Result<(), MarkerError>;
}

/// Which shape a marker is drawn with.
#[derive(Debug)]
pub enum MarkerKind {
    /// Epicenter on land: circle
    Land,
    /// Epicenter at sea: square
    Ocean,
    Custom(Box<dyn QuakeShape>),
}

impl MarkerKind {
    pub fn for_location(on_land: bool) -> Self {
        if on_land {
            Self::Land
        } else {
            Self::Ocean
        }
    }
}

/// One earthquake event as a map marker.
#[derive(Debug)]
pub struct EarthquakeMarker {
    location: Coord<f64>,
    properties: Map<String, Value>,
    record: QuakeProperties,
    /// Draw radius in pixels, 1.75 x magnitude
    radius: f32,
    is_on_land: bool,
    kind: MarkerKind,
}

impl EarthquakeMarker {
    /// Builds a marker from a point feature.
    ///
    /// Fails when `magnitude` or `depth` is missing or not a finite number.
    /// The feature's property map is kept and gains a `radius` entry of
    /// 2 x magnitude.
    pub fn new(feature: PointFeature, kind: MarkerKind) -> Result<Self, MalformedFeatureError> {
        let PointFeature {
            location,
            mut properties,
        } = feature;
        let record = QuakeProperties::from_properties(&properties)?;
        properties.insert(keys::RADIUS.to_string(), Value::from(record.radius));

        let radius = DRAW_RADIUS_SCALE * record.magnitude;
        let is_on_land = matches!(kind, MarkerKind::Land);

        Ok(Self {
            location,
            properties,
            record,
            radius,
            is_on_land,
            kind,
        })
    }

    pub fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Raw property map, including the derived `radius` entry.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn kind(&self) -> &MarkerKind {
        &self.kind
    }

    pub fn is_on_land(&self) -> bool {
        self.is_on_land
    }

    /// Records the land classification and switches to the matching
    /// built-in shape. Custom shapes are left alone.
    pub fn set_on_land(&mut self, on_land: bool) {
        self.is_on_land = on_land;
        if !matches!(self.kind, MarkerKind::Custom(_)) {
            self.kind = MarkerKind::for_location(on_land);
        }
    }

    pub fn magnitude(&self) -> f32 {
        self.record.magnitude
    }

    /// Depth in kilometers.
    pub fn depth(&self) -> f32 {
        self.record.depth
    }

    pub fn title(&self) -> Result<&str, MissingPropertyError> {
        self.record
            .title
            .as_deref()
            .ok_or_else(|| MissingPropertyError::string(keys::TITLE))
    }

    pub fn age(&self) -> Option<&AgeCategory> {
        self.record.age.as_ref()
    }

    /// Stored radius property (2 x magnitude).
    pub fn radius(&self) -> Result<f32, MissingPropertyError> {
        self.properties
            .get(keys::RADIUS)
            .and_then(Value::as_f64)
            .map(|r| r as f32)
            .ok_or_else(|| MissingPropertyError::number(keys::RADIUS))
    }

    /// Draw radius in pixels (1.75 x magnitude).
    pub fn draw_radius(&self) -> f32 {
        self.radius
    }

    pub fn depth_band(&self) -> DepthBand {
        DepthBand::classify(self.depth())
    }

    /// Estimated felt-impact radius in kilometers.
    pub fn threat_circle(&self) -> f64 {
        let miles = 20.0_f64 * 1.8_f64.powf(f64::from(2.0 * self.magnitude() - 5.0));
        miles * f64::from(KM_PER_MILE)
    }

    /// Severity ordering: larger magnitude first.
    pub fn compare(&self, other: &Self) -> Ordering {
        other.magnitude().total_cmp(&self.magnitude())
    }

    /// Sets the fill color from the depth band.
    pub fn color_determine(&self, surface: &mut dyn Surface) -> Color32 {
        let color = self.depth_band().color();
        surface.fill(color);
        color
    }

    /// Draws the variant-specific body of the marker.
    pub fn draw_earthquake(
        &self,
        surface: &mut dyn Surface,
        x: f32,
        y: f32,
    ) -> Result<(), MarkerError> {
        let r = self.radius;
        match &self.kind {
            MarkerKind::Land => surface.ellipse(x, y, 2.0 * r, 2.0 * r),
            MarkerKind::Ocean => surface.rect(x - r, y - r, 2.0 * r, 2.0 * r, 0.0),
            MarkerKind::Custom(shape) => shape.draw(self, surface, x, y)?,
        }
        Ok(())
    }

    /// Draws the full marker: depth color, shape and, for recent events,
    /// a cross. The surface style is restored on every exit path.
    pub fn draw_marker(
        &self,
        surface: &mut dyn Surface,
        x: f32,
        y: f32,
    ) -> Result<(), MarkerError> {
        let mut pg = StyleGuard::new(surface);

        self.color_determine(&mut *pg);
        self.draw_earthquake(&mut *pg, x, y)?;

        if self.age().is_some_and(AgeCategory::is_recent) {
            let reach = self.radius + CROSS_BUFFER;
            pg.stroke_weight(2.0);
            pg.line(x - reach, y - reach, x + reach, y + reach);
            pg.line(x - reach, y + reach, x + reach, y - reach);
        }

        Ok(())
    }

    /// Draws the title tooltip below-right of (x, y).
    pub fn show_title(&self, surface: &mut dyn Surface, x: f32, y: f32) -> Result<(), MarkerError> {
        let title = self.title()?;
        let mut pg = StyleGuard::new(surface);

        pg.rect_mode(RectMode::Corner);
        pg.stroke(Color32::from_gray(110));
        pg.fill(Color32::WHITE);
        let width = pg.text_width(title) + 6.0;
        pg.rect(x, y + 15.0, width, 18.0, 5.0);

        pg.text_align(HAlign::Left, VAlign::Top);
        pg.fill(Color32::BLACK);
        pg.text(title, x + 3.0, y + 18.0);

        Ok(())
    }
}

impl PartialEq for EarthquakeMarker {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for EarthquakeMarker {}

impl PartialOrd for EarthquakeMarker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EarthquakeMarker {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for EarthquakeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record.title.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawCall, RecordingSurface, GLYPH_WIDTH};
    use serde_json::json;

    fn feature(properties: Value) -> PointFeature {
        PointFeature::new(
            Coord { x: -122.0, y: 37.5 },
            properties.as_object().cloned().unwrap(),
        )
    }

    fn marker(magnitude: f32, depth: f32, age: &str) -> EarthquakeMarker {
        EarthquakeMarker::new(
            feature(json!({
                "magnitude": magnitude,
                "depth": depth,
                "title": "M test quake",
                "age": age,
            })),
            MarkerKind::Land,
        )
        .unwrap()
    }

    #[derive(Debug)]
    struct FailingShape;

    impl QuakeShape for FailingShape {
        fn draw(
            &self,
            _marker: &EarthquakeMarker,
            surface: &mut dyn Surface,
            _x: f32,
            _y: f32,
        ) -> Result<(), MarkerError> {
            surface.stroke_weight(9.0);
            Err(MarkerError::Shape("no ink".to_string()))
        }
    }

    #[derive(Debug)]
    struct PanickingShape;

    impl QuakeShape for PanickingShape {
        fn draw(
            &self,
            _marker: &EarthquakeMarker,
            surface: &mut dyn Surface,
            _x: f32,
            _y: f32,
        ) -> Result<(), MarkerError> {
            surface.no_stroke();
            panic!("shape panicked");
        }
    }

    #[test]
    fn test_radius_derivation() {
        for m in [0.0_f32, 2.5, 4.0, 6.2, 9.1] {
            let marker = marker(m, 10.0, "Past Week");
            assert_eq!(marker.draw_radius(), 1.75 * m);
            assert!((marker.radius().unwrap() - 2.0 * m).abs() < 1e-5);
        }
    }

    #[test]
    fn test_radius_property_is_stored() {
        let marker = marker(5.0, 10.0, "Past Week");
        assert_eq!(marker.properties().get("radius"), Some(&json!(10.0)));
    }

    #[test]
    fn test_string_magnitude() {
        let marker = EarthquakeMarker::new(
            feature(json!({ "magnitude": "6.2", "depth": "12" })),
            MarkerKind::Ocean,
        )
        .unwrap();
        assert!((marker.magnitude() - 6.2).abs() < 1e-6);
        assert_eq!(marker.depth(), 12.0);
        assert!(!marker.is_on_land());
    }

    #[test]
    fn test_missing_magnitude_fails() {
        let err = EarthquakeMarker::new(feature(json!({ "depth": 5.0 })), MarkerKind::Land)
            .unwrap_err();
        assert_eq!(err.key, "magnitude");
    }

    #[test]
    fn test_missing_depth_fails() {
        let err = EarthquakeMarker::new(feature(json!({ "magnitude": 4.5 })), MarkerKind::Land)
            .unwrap_err();
        assert_eq!(err, MalformedFeatureError::missing("depth"));

        let err = EarthquakeMarker::new(
            feature(json!({ "magnitude": 4.5, "depth": "NaN" })),
            MarkerKind::Land,
        )
        .unwrap_err();
        assert_eq!(err.key, "depth");
    }

    #[test]
    fn test_overflowing_magnitude_fails() {
        let err = EarthquakeMarker::new(
            feature(json!({ "magnitude": "3e38", "depth": 10.0 })),
            MarkerKind::Ocean,
        )
        .unwrap_err();
        assert_eq!(err.key, "magnitude");
    }

    #[test]
    fn test_missing_getters() {
        let marker = EarthquakeMarker::new(
            feature(json!({ "magnitude": 4.5, "depth": 20.0 })),
            MarkerKind::Land,
        )
        .unwrap();
        assert_eq!(marker.title(), Err(MissingPropertyError::string("title")));
        assert!(marker.age().is_none());
        assert_eq!(marker.to_string(), "");
    }

    #[test]
    fn test_threat_circle() {
        let marker = marker(5.0, 10.0, "Past Week");
        let expected = 20.0 * 1.8_f64.powi(5) * 1.6;
        assert!((marker.threat_circle() - expected).abs() / expected < 1e-6);

        let weaker = marker_with_magnitude(3.0);
        assert!(weaker.threat_circle() < marker.threat_circle());
    }

    fn marker_with_magnitude(m: f32) -> EarthquakeMarker {
        marker(m, 10.0, "Past Week")
    }

    #[test]
    fn test_ordering_descending_magnitude() {
        let a = marker_with_magnitude(6.0);
        let b = marker_with_magnitude(4.0);
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);

        let c = marker_with_magnitude(5.0);
        let d = marker_with_magnitude(5.0);
        assert_eq!(c.cmp(&d), Ordering::Equal);
        assert_eq!(c, d);

        let mut markers = vec![b, c, a];
        markers.sort();
        let mags: Vec<f32> = markers.iter().map(|m| m.magnitude()).collect();
        assert_eq!(mags, vec![6.0, 5.0, 4.0]);
    }

    #[test]
    fn test_color_by_depth() {
        let cases = [
            (69.9, Color32::from_rgb(255, 255, 0)),
            (70.0, Color32::from_rgb(0, 0, 255)),
            (299.9, Color32::from_rgb(0, 0, 255)),
            (300.0, Color32::from_rgb(255, 0, 0)),
        ];
        for (depth, color) in cases {
            let mut surface = RecordingSurface::new();
            let marker = marker(5.0, depth, "Past Week");
            assert_eq!(marker.color_determine(&mut surface), color);
            assert_eq!(surface.style().fill, Some(color));
        }
    }

    #[test]
    fn test_recent_event_draws_cross() {
        let mut surface = RecordingSurface::new();
        let marker = marker(4.0, 10.0, "Past Hour");
        marker.draw_marker(&mut surface, 100.0, 50.0).unwrap();

        let reach = 1.75 * 4.0 + 2.0;
        let lines = surface.lines();
        assert_eq!(lines.len(), 2);
        match lines[0] {
            DrawCall::Line { from, to, style } => {
                assert_eq!(*from, (100.0 - reach, 50.0 - reach));
                assert_eq!(*to, (100.0 + reach, 50.0 + reach));
                assert_eq!(style.stroke_weight, 2.0);
            }
            _ => unreachable!(),
        }
        match lines[1] {
            DrawCall::Line { from, to, .. } => {
                assert_eq!(*from, (100.0 - reach, 50.0 + reach));
                assert_eq!(*to, (100.0 + reach, 50.0 - reach));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_past_day_draws_cross_past_week_does_not() {
        let mut surface = RecordingSurface::new();
        marker(4.0, 10.0, "Past Day")
            .draw_marker(&mut surface, 0.0, 0.0)
            .unwrap();
        assert_eq!(surface.lines().len(), 2);

        let mut surface = RecordingSurface::new();
        marker(4.0, 10.0, "Past Week")
            .draw_marker(&mut surface, 0.0, 0.0)
            .unwrap();
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn test_land_and_ocean_shapes() {
        let mut surface = RecordingSurface::new();
        let land = marker(4.0, 100.0, "Past Week");
        land.draw_marker(&mut surface, 10.0, 20.0).unwrap();
        assert_eq!(
            surface.calls,
            vec![DrawCall::Ellipse {
                x: 10.0,
                y: 20.0,
                w: 14.0,
                h: 14.0,
                style: crate::render::Style {
                    fill: Some(Color32::from_rgb(0, 0, 255)),
                    ..Default::default()
                },
            }]
        );

        let mut surface = RecordingSurface::new();
        let mut ocean = marker(4.0, 100.0, "Past Week");
        ocean.set_on_land(false);
        ocean.draw_marker(&mut surface, 10.0, 20.0).unwrap();
        match &surface.calls[0] {
            DrawCall::Rect { x, y, w, h, .. } => {
                assert_eq!((*x, *y, *w, *h), (3.0, 13.0, 14.0, 14.0));
            }
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_style_restored_after_draw() {
        let mut surface = RecordingSurface::new();
        let before = *surface.style();
        marker(6.0, 400.0, "Past Hour")
            .draw_marker(&mut surface, 0.0, 0.0)
            .unwrap();
        assert_eq!(*surface.style(), before);
        assert_eq!(surface.styles().depth(), 0);
    }

    #[test]
    fn test_style_restored_when_shape_fails() {
        let mut surface = RecordingSurface::new();
        let before = *surface.style();
        let marker = EarthquakeMarker::new(
            feature(json!({ "magnitude": 5.0, "depth": 10.0, "age": "Past Hour" })),
            MarkerKind::Custom(Box::new(FailingShape)),
        )
        .unwrap();

        let err = marker.draw_marker(&mut surface, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, MarkerError::Shape(_)));
        assert!(surface.lines().is_empty());
        assert_eq!(*surface.style(), before);
        assert_eq!(surface.styles().depth(), 0);
    }

    #[test]
    fn test_style_restored_when_shape_panics() {
        let mut surface = RecordingSurface::new();
        let before = *surface.style();
        let marker = EarthquakeMarker::new(
            feature(json!({ "magnitude": 5.0, "depth": 10.0 })),
            MarkerKind::Custom(Box::new(PanickingShape)),
        )
        .unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = marker.draw_marker(&mut surface, 0.0, 0.0);
        }));
        assert!(result.is_err());
        assert_eq!(*surface.style(), before);
    }

    #[test]
    fn test_show_title_layout() {
        let mut surface = RecordingSurface::new();
        let marker = marker(5.0, 10.0, "Past Week");
        marker.show_title(&mut surface, 40.0, 60.0).unwrap();

        let title = "M test quake";
        let width = title.len() as f32 * GLYPH_WIDTH + 6.0;
        assert_eq!(surface.calls.len(), 2);
        match &surface.calls[0] {
            DrawCall::Rect {
                x,
                y,
                w,
                h,
                corner_radius,
                style,
            } => {
                assert_eq!((*x, *y, *w, *h, *corner_radius), (40.0, 75.0, width, 18.0, 5.0));
                assert_eq!(style.fill, Some(Color32::WHITE));
                assert_eq!(style.stroke, Some(Color32::from_gray(110)));
                assert_eq!(style.rect_mode, RectMode::Corner);
            }
            other => panic!("expected rect, got {:?}", other),
        }
        match &surface.calls[1] {
            DrawCall::Text { text, x, y, style } => {
                assert_eq!(text, title);
                assert_eq!((*x, *y), (43.0, 78.0));
                assert_eq!(style.fill, Some(Color32::BLACK));
                assert_eq!(style.text_align, (HAlign::Left, VAlign::Top));
            }
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(surface.styles().depth(), 0);
    }

    #[test]
    fn test_show_title_without_title() {
        let mut surface = RecordingSurface::new();
        let marker = EarthquakeMarker::new(
            feature(json!({ "magnitude": 5.0, "depth": 10.0 })),
            MarkerKind::Land,
        )
        .unwrap();
        let err = marker.show_title(&mut surface, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, MarkerError::MissingProperty(_)));
        assert!(surface.calls.is_empty());
    }
}
