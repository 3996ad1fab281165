//! Land/ocean classification of epicenters.
//!
//! Country boundaries can come from GeoJSON (e.g. a countries.geo.json) or
//! from a Natural Earth style shapefile.

use crate::error::LandError;
use geo::Contains;
use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon};
use geojson::{Feature, GeoJson, Geometry, Value};
use shapefile::dbase::FieldValue;
use std::io::Cursor;

/// Decides whether a coordinate lies on land.
pub trait LandClassifier {
    fn is_on_land(&self, location: Coord<f64>) -> bool;
}

/// Classifies every location as ocean. Used when no boundaries are loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct OceanOnly;

impl LandClassifier for OceanOnly {
    fn is_on_land(&self, _location: Coord<f64>) -> bool {
        false
    }
}

/// One country outline.
#[derive(Debug, Clone)]
pub struct Country {
    pub name: Option<String>,
    pub shape: MultiPolygon<f64>,
}

/// A set of country polygons.
#[derive(Debug, Clone, Default)]
pub struct CountryBoundaries {
    countries: Vec<Country>,
}

impl CountryBoundaries {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Name of the country containing the location, if any.
    pub fn country_of(&self, location: Coord<f64>) -> Option<&str> {
        let point = Point::from(location);
        self.countries
            .iter()
            .find(|c| c.shape.contains(&point))
            .and_then(|c| c.name.as_deref())
    }

    /// Loads boundaries from a GeoJSON document.
    pub fn from_geojson(geojson_str: &str) -> Result<Self, LandError> {
        let geojson: GeoJson = geojson_str.parse()?;
        let countries: Vec<Country> = match geojson {
            GeoJson::FeatureCollection(fc) => {
                fc.features.iter().filter_map(convert_feature).collect()
            }
            GeoJson::Feature(f) => convert_feature(&f).into_iter().collect(),
            GeoJson::Geometry(g) => convert_geometry(&g)
                .map(|shape| Country { name: None, shape })
                .into_iter()
                .collect(),
        };
        log::info!("Loaded {} country boundaries from GeoJSON", countries.len());
        Ok(Self::new(countries))
    }

    /// Loads boundaries from shapefile bytes, with names from the .dbf when given.
    pub fn from_shapefile(shp_bytes: &[u8], dbf_bytes: Option<&[u8]>) -> Result<Self, LandError> {
        let mut shape_reader = shapefile::ShapeReader::new(Cursor::new(shp_bytes))?;

        let dbf_records: Option<Vec<shapefile::dbase::Record>> = dbf_bytes.and_then(|bytes| {
            shapefile::dbase::Reader::new(Cursor::new(bytes))
                .ok()
                .and_then(|mut r: shapefile::dbase::Reader<Cursor<&[u8]>>| r.read().ok())
        });

        let mut countries = Vec::new();
        for (idx, result) in shape_reader.iter_shapes().enumerate() {
            let shape = result?;
            let name = dbf_records
                .as_ref()
                .and_then(|records| records.get(idx))
                .and_then(record_name);

            if let shapefile::Shape::Polygon(poly) = shape {
                let shape = polygon_from_rings(poly.rings());
                if !shape.0.is_empty() {
                    countries.push(Country { name, shape });
                }
            }
        }

        log::info!("Loaded {} country boundaries from shapefile", countries.len());
        Ok(Self::new(countries))
    }
}

impl LandClassifier for CountryBoundaries {
    fn is_on_land(&self, location: Coord<f64>) -> bool {
        let point = Point::from(location);
        self.countries.iter().any(|c| c.shape.contains(&point))
    }
}

fn record_name(record: &shapefile::dbase::Record) -> Option<String> {
    for field_name in ["NAME", "name", "ADMIN", "NAME_LONG"] {
        if let Some(FieldValue::Character(Some(s))) = record.get(field_name) {
            return Some(s.trim().to_string());
        }
    }
    None
}

/// Groups shapefile rings into polygons: each outer ring starts a polygon,
/// inner rings attach to the most recent outer ring.
fn polygon_from_rings(rings: &[shapefile::PolygonRing<shapefile::Point>]) -> MultiPolygon<f64> {
    use shapefile::PolygonRing;

    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    for ring in rings {
        let line: LineString<f64> = ring
            .points()
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        match ring {
            PolygonRing::Outer(_) => polygons.push(Polygon::new(line, Vec::new())),
            PolygonRing::Inner(_) => {
                if let Some(last) = polygons.last_mut() {
                    last.interiors_push(line);
                }
            }
        }
    }
    MultiPolygon(polygons)
}

fn convert_feature(feature: &Feature) -> Option<Country> {
    let name = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("name").or_else(|| p.get("NAME")).or_else(|| p.get("ADMIN")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let shape = feature.geometry.as_ref().and_then(convert_geometry)?;
    Some(Country { name, shape })
}

fn ring(coords: &[Vec<f64>]) -> LineString<f64> {
    coords.iter().map(|c| Coord { x: c[0], y: c[1] }).collect()
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let (exterior, holes) = rings.split_first()?;
    Some(Polygon::new(
        ring(exterior),
        holes.iter().map(|h| ring(h)).collect(),
    ))
}

fn convert_geometry(geometry: &Geometry) -> Option<MultiPolygon<f64>> {
    match &geometry.value {
        Value::Polygon(rings) => polygon(rings).map(|p| MultiPolygon(vec![p])),
        Value::MultiPolygon(polygons) => {
            let polygons: Vec<Polygon<f64>> = polygons.iter().filter_map(|p| polygon(p)).collect();
            (!polygons.is_empty()).then_some(MultiPolygon(polygons))
        }
        Value::GeometryCollection(geometries) => {
            let polygons: Vec<Polygon<f64>> = geometries
                .iter()
                .filter_map(convert_geometry)
                .flat_map(|mp| mp.0)
                .collect();
            (!polygons.is_empty()).then_some(MultiPolygon(polygons))
        }
        _ => None,
    }
}
