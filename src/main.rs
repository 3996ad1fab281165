#![warn(clippy::all)]

//! quake-map viewer.
//!
//! Loads an earthquake feed (USGS GeoJSON) and optional country boundaries,
//! then shows the markers on a pannable world map.

mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use quake_map::quake::feed;
use quake_map::{CountryBoundaries, LandClassifier, LayerSettings, OceanOnly, QuakeLayer};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "quake-map", about = "Show earthquake events on a world map")]
struct Args {
    /// Earthquake feed in GeoJSON (USGS summary format or pre-normalized features)
    #[arg(short, long)]
    feed: PathBuf,

    /// Country boundaries as GeoJSON or shapefile (.shp, names from the sibling .dbf)
    #[arg(short, long)]
    countries: Option<PathBuf>,

    /// Layer settings JSON file
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let boundaries = args
        .countries
        .as_deref()
        .map(load_boundaries)
        .transpose()?;

    let features = feed::load_usgs_feed(&args.feed, chrono::Utc::now())
        .with_context(|| format!("loading feed {}", args.feed.display()))?;

    let classifier: &dyn LandClassifier = match &boundaries {
        Some(b) => b,
        None => &OceanOnly,
    };
    let layer = QuakeLayer::from_features(features, classifier);

    let settings = args
        .settings
        .as_deref()
        .map(LayerSettings::load)
        .unwrap_or_default();

    let state = ViewerState {
        layer,
        boundaries,
        settings,
        settings_path: args.settings,
        zoom: 1.0,
        pan_offset: egui::Vec2::ZERO,
        drawn: 0,
        draw_error: None,
    };

    eframe::run_native(
        "quake-map",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(QuakeMapApp { state }))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}

fn load_boundaries(path: &Path) -> Result<CountryBoundaries> {
    let is_shapefile = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"));

    let boundaries = if is_shapefile {
        let shp = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let dbf = std::fs::read(path.with_extension("dbf")).ok();
        CountryBoundaries::from_shapefile(&shp, dbf.as_deref())
    } else {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        CountryBoundaries::from_geojson(&json)
    };

    boundaries.with_context(|| format!("loading boundaries {}", path.display()))
}

/// Everything the viewer panels read and mutate.
pub struct ViewerState {
    pub layer: QuakeLayer,
    pub boundaries: Option<CountryBoundaries>,
    pub settings: LayerSettings,
    pub settings_path: Option<PathBuf>,
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: egui::Vec2,
    /// Markers drawn in the last frame
    pub drawn: usize,
    /// Last draw failure, shown on the canvas
    pub draw_error: Option<String>,
}

struct QuakeMapApp {
    state: ViewerState,
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::render_side_panel(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state);
    }
}
