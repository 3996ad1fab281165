#![warn(clippy::all)]

//! Earthquake event markers for an egui map.
//!
//! Markers are colored by depth, sized by magnitude, ordered by severity and
//! crossed out when the event is recent. Drawing goes through the
//! [`render::Surface`] trait so any host toolkit can display them.

pub mod error;
pub mod land;
pub mod quake;
pub mod render;
pub mod settings;

pub use error::{FeedError, LandError, MalformedFeatureError, MarkerError, MissingPropertyError};
pub use land::{CountryBoundaries, LandClassifier, OceanOnly};
pub use quake::{EarthquakeMarker, MarkerKind, PointFeature, QuakeLayer};
pub use settings::LayerSettings;
