use crate::data::loader::{FOUNDED_YEAR, MARKET_CAP, TOTAL_EMPLOYEES};
use crate::data::QuerySpec;

/// Dashboard settings. Everything has a compiled-in default; there is no config file.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Native window title.
    pub window_title: String,
    /// Heading shown above the overview metrics.
    pub page_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    pub dark_mode: bool,
    /// Metric summed/averaged in the overview and plotted on the bar chart.
    pub summary_metric: String,
    /// Metric whose median is shown in the overview.
    pub median_metric: String,
    /// Metric filtered by the range sliders.
    pub range_metric: String,
    /// X axes of the scatter plots (Y is always `summary_metric`).
    pub scatter_metrics: Vec<String>,
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_title: "Women's Health Market Dashboard".to_string(),
            page_title: "Top 20 Women Health-Focused Companies".to_string(),
            inner_size: [1280.0, 900.0],
            min_inner_size: [720.0, 480.0],
            dark_mode: true,
            summary_metric: MARKET_CAP.to_string(),
            median_metric: FOUNDED_YEAR.to_string(),
            range_metric: MARKET_CAP.to_string(),
            scatter_metrics: vec![FOUNDED_YEAR.to_string(), TOTAL_EMPLOYEES.to_string()],
            export_file_name: "filtered_companies.csv".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn query_spec(&self) -> QuerySpec {
        QuerySpec::new(&self.summary_metric, &self.median_metric)
    }
}
