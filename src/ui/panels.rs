use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::format;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let attributes = state.dataset.schema().attribute_names.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for attribute in &attributes {
                let Ok(all_values) = state.dataset.distinct_values(attribute) else {
                    continue;
                };
                let all_values = all_values.clone();

                // Show count of selected / total in the header
                let n_selected = state.selections.get(attribute).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{attribute}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(attribute)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(attribute);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(attribute);
                            }
                        });

                        for value in &all_values {
                            let mut checked = state
                                .selections
                                .get(attribute)
                                .is_some_and(|s| s.contains(value));
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.toggle_value(attribute, value);
                            }
                        }
                    });
            }

            ui.separator();
            range_sliders(ui, state);
        });
}

/// Min/max slider pair for the range metric.
fn range_sliders(ui: &mut Ui, state: &mut AppState) {
    ui.strong(format!("{} range", state.config.range_metric));

    let (Some((lo, hi)), Some(range)) = (state.range_bounds, state.range) else {
        ui.label("No known values to filter on.");
        return;
    };

    let mut min = range.min;
    let mut max = range.max;
    let min_changed = ui
        .add(
            egui::Slider::new(&mut min, lo..=hi)
                .logarithmic(lo > 0.0)
                .text("min"),
        )
        .changed();
    let max_changed = ui
        .add(
            egui::Slider::new(&mut max, lo..=hi)
                .logarithmic(lo > 0.0)
                .text("max"),
        )
        .changed();
    ui.label(format!("{} – {}", format::usd(min), format::usd(max)));

    if min_changed || max_changed {
        // Dragging one handle past the other pushes it along.
        if min_changed && min > max {
            max = min;
        }
        state.set_range(min, max);
    }

    if ui.small_button("Reset range").clicked() {
        state.set_range(lo, hi);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered CSV…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} companies loaded, {} visible",
            state.dataset.len(),
            state.result.aggregates.count
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Overview metrics
// ---------------------------------------------------------------------------

/// `(label, value)` of the four overview cards, labelled after the configured metrics.
fn overview_cards(state: &AppState) -> [(String, String); 4] {
    let agg = &state.result.aggregates;
    let summary = &state.config.summary_metric;
    [
        (format!("Total {summary}"), format::usd(agg.sum)),
        (format!("Average {summary}"), format::usd_or_placeholder(&agg.mean)),
        (
            format!("Median {}", state.config.median_metric),
            format::year_or_placeholder(&agg.median),
        ),
        ("Number of Companies".to_string(), agg.count.to_string()),
    ]
}

/// Four metric cards: total, average, median, count.
pub fn overview(ui: &mut Ui, state: &AppState) {
    let cards = overview_cards(state);

    ui.columns(cards.len(), |columns| {
        for (col, (label, value)) in columns.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.label(label);
                ui.heading(value);
            });
        }
    });

    let empty = state.empty_selections();
    if !empty.is_empty() {
        ui.label(
            RichText::new(format!("Nothing selected for: {}", empty.join(", ")))
                .color(Color32::YELLOW),
        );
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_visible(&path) {
            Ok(()) => {
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
