//! Side panel: layer controls, legend and the strongest events.

use super::colors;
use crate::ViewerState;
use eframe::egui::{self, RichText, ScrollArea};
use quake_map::quake::{DepthBand, MagnitudeClass};

/// Number of events listed in the panel.
const LISTED_EVENTS: usize = 25;

pub fn render_side_panel(ctx: &egui::Context, state: &mut ViewerState) {
    egui::SidePanel::left("side_panel")
        .resizable(true)
        .default_width(260.0)
        .min_width(200.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Earthquakes");
                ui.separator();

                render_controls_section(ui, state);
                ui.add_space(5.0);

                render_legend_section(ui, state);
                ui.add_space(5.0);

                render_events_section(ui, state);
            });
        });
}

fn render_controls_section(ui: &mut egui::Ui, state: &mut ViewerState) {
    egui::CollapsingHeader::new(RichText::new("Layer").strong())
        .default_open(true)
        .show(ui, |ui| {
            let settings = &mut state.settings;
            ui.checkbox(&mut settings.show_threat_circles, "Threat circles");
            ui.checkbox(&mut settings.show_titles, "Title of selected event");
            ui.add(egui::Slider::new(&mut settings.min_magnitude, 0.0..=9.0).text("Min magnitude"));

            if let Some(path) = &state.settings_path {
                if ui.button("Save settings").clicked() {
                    if let Err(e) = state.settings.save(path) {
                        log::warn!("Failed to save layer settings: {}", e);
                    }
                }
            }
        });
}

fn stat_row(ui: &mut egui::Ui, label: &str, value: usize) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).color(colors::panel::LABEL));
        ui.label(RichText::new(value.to_string()).color(colors::panel::VALUE));
    });
}

fn render_legend_section(ui: &mut egui::Ui, state: &ViewerState) {
    let summary = state.layer.summary();

    egui::CollapsingHeader::new(RichText::new("Legend").strong())
        .default_open(true)
        .show(ui, |ui| {
            for band in DepthBand::ALL {
                let count = summary.by_depth.get(&band).copied().unwrap_or(0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("●").color(band.color()));
                    ui.label(RichText::new(band.label()).color(colors::panel::LABEL));
                    ui.label(RichText::new(count.to_string()).color(colors::panel::VALUE));
                });
            }
            ui.separator();
            for class in MagnitudeClass::ALL {
                stat_row(ui, class.label(), summary.by_magnitude.get(&class).copied().unwrap_or(0));
            }
            ui.separator();
            stat_row(ui, "On land (circle)", summary.on_land);
            stat_row(ui, "At sea (square)", summary.at_sea);
            stat_row(ui, "Skipped features", state.layer.skipped());
        });
}

fn render_events_section(ui: &mut egui::Ui, state: &mut ViewerState) {
    egui::CollapsingHeader::new(RichText::new("Strongest events").strong())
        .default_open(true)
        .show(ui, |ui| {
            let mut clicked = None;
            for (idx, marker) in state.layer.strongest(LISTED_EVENTS).iter().enumerate() {
                let selected = state.layer.selected_index() == Some(idx);
                let text = format!(
                    "M{:.1}  {:>6.0} km  {}",
                    marker.magnitude(),
                    marker.threat_circle(),
                    marker
                );
                if ui.selectable_label(selected, text).clicked() {
                    clicked = Some(if selected { None } else { Some(idx) });
                }
            }
            if let Some(selection) = clicked {
                state.layer.select(selection);
            }
        });
}
