//! Earthquake markers and the data they are built from.
//!
//! Features come in through [`feed`], are validated into
//! [`EarthquakeMarker`]s and collected into a [`QuakeLayer`].

pub mod band;
pub mod feature;
pub mod feed;
mod layer;
mod marker;

pub use band::{DepthBand, MagnitudeClass};
pub use feature::{AgeCategory, PointFeature, QuakeProperties};
pub use layer::{LayerSummary, QuakeLayer};
pub use marker::{EarthquakeMarker, MarkerKind, QuakeShape, KM_PER_MILE};
