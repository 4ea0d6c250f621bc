use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use super::format;
use crate::data::Record;
use crate::state::AppState;

/// Marker radius range (points) for size-scaled scatter plots.
const MIN_RADIUS: f32 = 3.0;
const MAX_RADIUS: f32 = 18.0;

// ---------------------------------------------------------------------------
// Market cap distribution (horizontal bars)
// ---------------------------------------------------------------------------

/// One horizontal bar per visible company, in table order from the top.
pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let metric = state.config.summary_metric.as_str();
    let records: Vec<&Record> = state.visible_records().collect();
    let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
    let n = records.len();

    let bars: Vec<Bar> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let value = r.metric(metric).known()?;
            // First record on top.
            let y = (n - 1 - i) as f64;
            Some(
                Bar::new(y, value)
                    .name(&r.name)
                    .fill(Color32::LIGHT_BLUE)
                    .width(0.7),
            )
        })
        .collect();

    Plot::new("market_cap_bars")
        .height(600.0)
        .x_axis_label(metric)
        .x_axis_formatter(|mark, _range| format::thousands(mark.value))
        .y_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 {
                return String::new();
            }
            let idx = v as usize;
            if idx >= n {
                return String::new();
            }
            names[n - 1 - idx].clone()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name(metric));
        });
}

// ---------------------------------------------------------------------------
// Scatter: x metric vs summary metric
// ---------------------------------------------------------------------------

/// Scatter of `x_metric` against the summary metric, one colour per company and
/// marker size growing with the summary metric. Records with an unknown value on either
/// axis are left out.
pub fn scatter(ui: &mut Ui, state: &AppState, x_metric: &str) {
    let y_metric = state.config.summary_metric.as_str();
    let points: Vec<(&Record, f64, f64)> = state
        .visible_records()
        .filter_map(|r| Some((r, r.metric(x_metric).known()?, r.metric(y_metric).known()?)))
        .collect();
    let max_y = points
        .iter()
        .map(|&(_, _, y)| y)
        .fold(0.0_f64, f64::max);

    let omitted = state.result.aggregates.count - points.len();

    Plot::new(format!("scatter_{x_metric}"))
        .height(400.0)
        .legend(Legend::default())
        .x_axis_label(x_metric)
        .y_axis_label(y_metric)
        .y_axis_formatter(|mark, _range| format::thousands(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (record, x, y) in points {
                let marker = Points::new(PlotPoints::new(vec![[x, y]]))
                    .name(&record.name)
                    .color(state.color_map.color_for(&record.name))
                    .radius(marker_radius(y, max_y))
                    .filled(true);
                plot_ui.points(marker);
            }
        });

    if omitted > 0 {
        ui.small(format!(
            "{omitted} compan{} with unknown {x_metric} not shown",
            if omitted == 1 { "y" } else { "ies" }
        ));
    }
}

/// Square-root scaling keeps small caps visible next to the largest one.
fn marker_radius(value: f64, max_value: f64) -> f32 {
    if max_value <= 0.0 || value <= 0.0 {
        return MIN_RADIUS;
    }
    let t = (value / max_value).sqrt() as f32;
    MIN_RADIUS + t * (MAX_RADIUS - MIN_RADIUS)
}
