use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: overview, table, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let state = &self.state;
                    ui.heading(state.config.page_title.as_str());
                    ui.add_space(8.0);

                    ui.strong("Dashboard Overview");
                    panels::overview(ui, state);
                    ui.add_space(12.0);

                    ui.strong("Companies Data");
                    table::companies_table(ui, state);
                    ui.add_space(12.0);

                    ui.strong("Market Cap Distribution");
                    plot::bar_chart(ui, state);
                    ui.add_space(12.0);

                    for x_metric in &state.config.scatter_metrics {
                        ui.strong(format!("{x_metric} vs. {}", state.config.summary_metric));
                        plot::scatter(ui, state, x_metric);
                        ui.add_space(12.0);
                    }
                });
        });
    }
}
