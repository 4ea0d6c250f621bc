use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Result;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::export::export_to_path;
use crate::data::{query, Dataset, FilterCriteria, NumericRange, QueryResult, Record};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// The immutable company table.
    pub dataset: Dataset,

    /// Per-attribute multi-select state: attribute → selected categories.
    pub selections: BTreeMap<String, BTreeSet<String>>,

    /// Global `(min, max)` of the range metric; None when it has no known values.
    pub range_bounds: Option<(f64, f64)>,

    /// Currently selected range for the range metric.
    pub range: Option<NumericRange>,

    /// Result of the last query (recomputed on every filter change).
    pub result: QueryResult,

    /// One colour per company for the scatter plots.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Initialise filters with everything selected and run the first query.
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let selections = FilterCriteria::select_all(&dataset).categories;
        let range_bounds = match dataset.bounds(&config.range_metric) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                log::warn!("Range filter disabled: {e}");
                None
            }
        };
        let color_map = ColorMap::new(dataset.all_records().iter().map(|r| r.name.as_str()));
        let result = QueryResult::empty(&config.query_spec());

        let mut state = Self {
            config,
            dataset,
            selections,
            range_bounds,
            range: range_bounds.map(NumericRange::from),
            result,
            color_map,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Criteria derived from the current widget selections.
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria {
            categories: self.selections.clone(),
            ranges: BTreeMap::new(),
        };
        if let Some(range) = self.range {
            criteria
                .ranges
                .insert(self.config.range_metric.clone(), range);
        }
        criteria
    }

    /// Recompute `result` after a filter change.
    pub fn refilter(&mut self) {
        let criteria = self.criteria();
        for attribute in criteria.empty_selections() {
            log::warn!("No values selected for '{attribute}'; nothing will match");
        }
        match query(&self.dataset, &criteria, &self.config.query_spec()) {
            Ok(result) => {
                self.result = result;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Query failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Records matching the current filters, in original order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        self.result.rows(&self.dataset)
    }

    /// Attributes with nothing selected, for the "nothing matches" hint.
    pub fn empty_selections(&self) -> Vec<String> {
        self.criteria()
            .empty_selections()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Toggle a single category in an attribute's selection.
    pub fn toggle_value(&mut self, attribute: &str, value: &str) {
        let selected = self.selections.entry(attribute.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all values of an attribute.
    pub fn select_all(&mut self, attribute: &str) {
        if let Ok(all_vals) = self.dataset.distinct_values(attribute) {
            self.selections
                .insert(attribute.to_string(), all_vals.clone());
            self.refilter();
        }
    }

    /// Deselect all values of an attribute.
    pub fn select_none(&mut self, attribute: &str) {
        self.selections
            .insert(attribute.to_string(), BTreeSet::new());
        self.refilter();
    }

    /// Set the range, clamped to the global bounds and kept ordered.
    /// Non-finite input is ignored.
    pub fn set_range(&mut self, min: f64, max: f64) {
        let Some((lo, hi)) = self.range_bounds else {
            return;
        };
        if !min.is_finite() || !max.is_finite() {
            log::warn!("Ignoring non-finite range [{min}, {max}]");
            return;
        }
        let min = min.clamp(lo, hi);
        let max = max.clamp(min, hi);
        self.range = Some(NumericRange::new(min, max));
        self.refilter();
    }

    /// Write the visible records to `path` in the export format.
    pub fn export_visible(&self, path: &Path) -> Result<()> {
        export_to_path(path, self.dataset.schema(), self.visible_records())
    }
}
