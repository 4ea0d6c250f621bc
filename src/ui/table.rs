use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use super::format;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Data table of the visible companies, one column per schema column.
pub fn companies_table(ui: &mut Ui, state: &AppState) {
    let schema = state.dataset.schema();
    let labels = schema.column_labels();
    // The founded-year column reads better without digit grouping.
    let grouped: Vec<bool> = schema
        .metric_names
        .iter()
        .map(|m| *m != state.config.median_metric)
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(40.0), labels.len())
        .header(ROW_HEIGHT, |mut header| {
            for label in &labels {
                header.col(|ui| {
                    ui.strong(*label);
                });
            }
        })
        .body(|mut body| {
            for record in state.visible_records() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(record.id.to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.name.as_str());
                    });
                    for (metric, grouped) in schema.metric_names.iter().zip(&grouped) {
                        row.col(|ui| {
                            ui.label(format::metric_cell(record.metric(metric), *grouped));
                        });
                    }
                    for attribute in &schema.attribute_names {
                        row.col(|ui| {
                            ui.label(record.attribute(attribute).unwrap_or_default());
                        });
                    }
                });
            }
        });
}
