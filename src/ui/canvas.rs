//! Central canvas: country outlines and earthquake markers.

use super::colors;
use super::projection::MapProjection;
use crate::ViewerState;
use eframe::egui::{self, Painter, Pos2, Rect, RichText, Sense, Stroke, Vec2};
use geo_types::LineString;
use quake_map::render::PainterSurface;
use quake_map::{CountryBoundaries, LayerSettings};

/// Marker margin outside the canvas before culling, in pixels.
const CULL_MARGIN: f32 = 20.0;

pub fn render_canvas(ctx: &egui::Context, state: &mut ViewerState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, colors::canvas::BACKGROUND);

        let mut projection = MapProjection::default();
        projection.update(state.zoom, state.pan_offset, rect);

        if let Some(boundaries) = &state.boundaries {
            render_boundaries(&painter, &projection, boundaries);
        }

        render_markers(&painter, &projection, state);
        draw_overlay_info(ui, &rect, state);
        handle_canvas_interaction(&response, &rect, state);
    });
}

fn render_boundaries(
    painter: &Painter,
    projection: &MapProjection,
    boundaries: &CountryBoundaries,
) {
    let stroke = Stroke::new(0.8, colors::canvas::COASTLINE);
    for country in boundaries.countries() {
        for polygon in &country.shape {
            render_ring(painter, projection, polygon.exterior(), stroke);
        }
    }
}

fn render_ring(
    painter: &Painter,
    projection: &MapProjection,
    ring: &LineString<f64>,
    stroke: Stroke,
) {
    let points: Vec<Pos2> = ring.coords().map(|c| projection.geo_to_screen(*c)).collect();
    for window in points.windows(2) {
        if let [p1, p2] = window {
            // Skip sub-pixel segments
            if p1.distance_sq(*p2) > 0.5 {
                painter.line_segment([*p1, *p2], stroke);
            }
        }
    }
}

fn render_markers(painter: &Painter, projection: &MapProjection, state: &mut ViewerState) {
    let settings = LayerSettings {
        pixels_per_km: projection.pixels_per_km(),
        ..state.settings.clone()
    };
    let mut surface = PainterSurface::new(painter);
    let project = |coord| {
        projection
            .project_visible(coord, CULL_MARGIN)
            .map(|pos| (pos.x, pos.y))
    };

    match state.layer.draw(&mut surface, project, &settings) {
        Ok(drawn) => {
            state.drawn = drawn;
            state.draw_error = None;
        }
        Err(e) => {
            let message = e.to_string();
            if state.draw_error.as_deref() != Some(message.as_str()) {
                log::error!("Failed to draw earthquake layer: {}", message);
            }
            state.draw_error = Some(message);
        }
    }
}

fn draw_overlay_info(ui: &mut egui::Ui, rect: &Rect, state: &ViewerState) {
    let overlay_rect = Rect::from_min_size(
        rect.left_top() + Vec2::new(10.0, 10.0),
        Vec2::new(260.0, 60.0),
    );

    ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(format!("Markers: {} of {}", state.drawn, state.layer.len()))
                    .monospace()
                    .size(12.0)
                    .color(colors::canvas::OVERLAY_TEXT),
            );
            ui.label(
                RichText::new(format!("Zoom: {:.2}x", state.zoom))
                    .monospace()
                    .size(12.0)
                    .color(colors::canvas::OVERLAY_TEXT),
            );
            if let Some(error) = &state.draw_error {
                ui.label(
                    RichText::new(error)
                        .monospace()
                        .size(12.0)
                        .color(colors::canvas::ERROR),
                );
            }
        });
    });
}

fn handle_canvas_interaction(response: &egui::Response, rect: &Rect, state: &mut ViewerState) {
    if response.dragged() {
        state.pan_offset += response.drag_delta();
    }

    // Zoom relative to the cursor position
    if response.hovered() {
        let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            let zoom_factor = 1.0 + scroll_delta.y * 0.001;
            let old_zoom = state.zoom;
            let new_zoom = (old_zoom * zoom_factor).clamp(0.5, 40.0);

            if let Some(cursor_pos) = response.hover_pos() {
                let cursor_rel = cursor_pos - rect.center();
                let ratio = new_zoom / old_zoom;
                state.pan_offset = cursor_rel * (1.0 - ratio) + state.pan_offset * ratio;
            }

            state.zoom = new_zoom;
        }
    }

    if response.double_clicked() {
        state.zoom = 1.0;
        state.pan_offset = Vec2::ZERO;
    }
}
