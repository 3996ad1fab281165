//! USGS GeoJSON earthquake feed loader.
//!
//! The USGS summary feeds carry `mag`, `place`, `time` and `title`
//! properties and put the depth in the third point coordinate. This module
//! normalizes them into the `magnitude`/`depth`/`title`/`age` keys markers
//! read.

use super::feature::{keys, AgeCategory, PointFeature};
use crate::error::FeedError;
use chrono::{DateTime, TimeDelta, Utc};
use geojson::{Feature, GeoJson};
use serde_json::Value;
use std::path::Path;

/// Buckets an event time relative to `now`.
pub fn age_category(event_time: DateTime<Utc>, now: DateTime<Utc>) -> AgeCategory {
    let elapsed = now.signed_duration_since(event_time);
    if elapsed <= TimeDelta::hours(1) {
        AgeCategory::PastHour
    } else if elapsed <= TimeDelta::days(1) {
        AgeCategory::PastDay
    } else if elapsed <= TimeDelta::weeks(1) {
        AgeCategory::PastWeek
    } else if elapsed <= TimeDelta::days(31) {
        AgeCategory::PastMonth
    } else {
        AgeCategory::Other("Older".to_string())
    }
}

/// Parses a feed document into point features.
///
/// Non-point features are skipped. Features already carrying a
/// `magnitude` key are passed through unchanged.
pub fn parse_usgs_feed(json: &str, now: DateTime<Utc>) -> Result<Vec<PointFeature>, FeedError> {
    let collection = match json.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(_) => return Err(FeedError::NotACollection("Feature")),
        GeoJson::Geometry(_) => return Err(FeedError::NotACollection("Geometry")),
    };

    let total = collection.features.len();
    let features: Vec<PointFeature> = collection
        .features
        .iter()
        .filter_map(|feature| normalize_feature(feature, now))
        .collect();

    log::info!(
        "Parsed {} of {} feed features as point features",
        features.len(),
        total
    );
    Ok(features)
}

/// Reads and parses a feed document from disk.
pub fn load_usgs_feed(path: &Path, now: DateTime<Utc>) -> Result<Vec<PointFeature>, FeedError> {
    let json = std::fs::read_to_string(path)?;
    parse_usgs_feed(&json, now)
}

fn normalize_feature(feature: &Feature, now: DateTime<Utc>) -> Option<PointFeature> {
    let Some(mut point) = PointFeature::from_geojson_feature(feature) else {
        log::debug!("Skipping non-point feed feature {:?}", feature.id);
        return None;
    };

    if point.properties.contains_key(keys::MAGNITUDE) {
        return Some(point);
    }

    let props = &mut point.properties;

    if let Some(mag) = props.get("mag").cloned() {
        props.insert(keys::MAGNITUDE.to_string(), mag);
    }

    if !props.contains_key(keys::DEPTH) {
        if let Some(geojson::Value::Point(coords)) = feature.geometry.as_ref().map(|g| &g.value) {
            if let Some(depth) = coords.get(2) {
                props.insert(keys::DEPTH.to_string(), Value::from(*depth));
            }
        }
    }

    if !props.contains_key(keys::TITLE) {
        if let Some(place) = props.get("place").cloned() {
            props.insert(keys::TITLE.to_string(), place);
        }
    }

    if !props.contains_key(keys::AGE) {
        let event_time = props
            .get("time")
            .and_then(Value::as_i64)
            .and_then(DateTime::from_timestamp_millis);
        if let Some(event_time) = event_time {
            let age = age_category(event_time, now);
            props.insert(keys::AGE.to_string(), Value::from(age.label()));
        }
    }

    Some(point)
}
