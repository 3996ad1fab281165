//! Error types for marker construction, property access and data loading.

use thiserror::Error;

/// A point feature could not be turned into a marker.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed feature: property `{key}` {reason}")]
pub struct MalformedFeatureError {
    /// Property key that failed validation.
    pub key: String,
    /// What was wrong with it.
    pub reason: String,
}

impl MalformedFeatureError {
    pub fn missing(key: &str) -> Self {
        Self {
            key: key.to_string(),
            reason: "is missing".to_string(),
        }
    }

    pub fn unparsable(key: &str, raw: &str) -> Self {
        Self {
            key: key.to_string(),
            reason: format!("is not a number: {:?}", raw),
        }
    }
}

/// A queried marker property is absent or of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("property `{key}` is missing or not a {expected}")]
pub struct MissingPropertyError {
    pub key: &'static str,
    pub expected: &'static str,
}

impl MissingPropertyError {
    pub fn number(key: &'static str) -> Self {
        Self {
            key,
            expected: "number",
        }
    }

    pub fn string(key: &'static str) -> Self {
        Self {
            key,
            expected: "string",
        }
    }
}

/// Failure while drawing a marker.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error(transparent)]
    MissingProperty(#[from] MissingPropertyError),
    /// A custom shape refused to draw.
    #[error("shape drawing failed: {0}")]
    Shape(String),
}

/// Failure while reading an earthquake feed document.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to parse GeoJSON: {0}")]
    Parse(#[from] geojson::Error),
    #[error("expected a FeatureCollection, got a {0}")]
    NotACollection(&'static str),
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while loading land boundaries.
#[derive(Debug, Error)]
pub enum LandError {
    #[error("failed to parse GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("failed to read shapefile: {0}")]
    Shapefile(#[from] shapefile::Error),
    #[error("failed to read boundaries: {0}")]
    Io(#[from] std::io::Error),
}
