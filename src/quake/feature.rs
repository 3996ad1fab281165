//! Point features and the validated earthquake property record.

use crate::error::MalformedFeatureError;
use geo_types::Coord;
use geojson::Feature;
use serde_json::{Map, Value};

/// Property keys read from a point feature.
pub mod keys {
    pub const MAGNITUDE: &str = "magnitude";
    pub const DEPTH: &str = "depth";
    pub const TITLE: &str = "title";
    pub const AGE: &str = "age";
    pub const RADIUS: &str = "radius";
}

/// A coordinate plus free-form properties, as handed over by a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    /// Longitude in x, latitude in y
    pub location: Coord<f64>,
    pub properties: Map<String, Value>,
}

impl PointFeature {
    pub fn new(location: Coord<f64>, properties: Map<String, Value>) -> Self {
        Self {
            location,
            properties,
        }
    }

    /// Converts a GeoJSON feature. Returns None unless the geometry is a point.
    pub fn from_geojson_feature(feature: &Feature) -> Option<Self> {
        let geometry = feature.geometry.as_ref()?;
        let geojson::Value::Point(coords) = &geometry.value else {
            return None;
        };
        if coords.len() < 2 {
            return None;
        }
        Some(Self {
            location: Coord {
                x: coords[0],
                y: coords[1],
            },
            properties: feature.properties.clone().unwrap_or_default(),
        })
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// How long ago an event happened, as labelled by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeCategory {
    PastHour,
    PastDay,
    PastWeek,
    PastMonth,
    /// Any label the categories above do not cover
    Other(String),
}

impl AgeCategory {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Past Hour" => Self::PastHour,
            "Past Day" => Self::PastDay,
            "Past Week" => Self::PastWeek,
            "Past Month" => Self::PastMonth,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::PastHour => "Past Hour",
            Self::PastDay => "Past Day",
            Self::PastWeek => "Past Week",
            Self::PastMonth => "Past Month",
            Self::Other(label) => label,
        }
    }

    /// Recent events get a cross drawn over their marker.
    pub fn is_recent(&self) -> bool {
        matches!(self, Self::PastHour | Self::PastDay)
    }
}

/// Reads a numeric property that may arrive as a JSON number or a string.
pub(crate) fn parse_number(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}

/// Earthquake properties, type-checked once when a marker is built.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeProperties {
    pub magnitude: f32,
    /// Depth in kilometers
    pub depth: f32,
    pub title: Option<String>,
    pub age: Option<AgeCategory>,
    /// Stored radius, 2 x magnitude
    pub radius: f32,
}

impl QuakeProperties {
    /// Validates a raw property map.
    ///
    /// `magnitude` and `depth` are required and must be finite numbers, or
    /// strings that parse to one. `title` and `age` are optional.
    pub fn from_properties(
        properties: &Map<String, Value>,
    ) -> Result<Self, MalformedFeatureError> {
        let magnitude = required_number(properties, keys::MAGNITUDE)?;
        let depth = required_number(properties, keys::DEPTH)?;

        // A huge magnitude can overflow the stored radius
        let radius = 2.0 * magnitude;
        if !radius.is_finite() {
            let raw = properties
                .get(keys::MAGNITUDE)
                .map(Value::to_string)
                .unwrap_or_default();
            return Err(MalformedFeatureError::unparsable(keys::MAGNITUDE, &raw));
        }

        let title = properties
            .get(keys::TITLE)
            .and_then(Value::as_str)
            .map(str::to_string);

        let age = properties
            .get(keys::AGE)
            .and_then(Value::as_str)
            .map(AgeCategory::from_label);

        Ok(Self {
            magnitude,
            depth,
            title,
            age,
            radius,
        })
    }
}

fn required_number(
    properties: &Map<String, Value>,
    key: &'static str,
) -> Result<f32, MalformedFeatureError> {
    match properties.get(key) {
        None | Some(Value::Null) => Err(MalformedFeatureError::missing(key)),
        Some(value) => parse_number(value)
            .filter(|v| v.is_finite())
            .ok_or_else(|| MalformedFeatureError::unparsable(key, &value.to_string())),
    }
}
