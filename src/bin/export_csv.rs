//! Write the built-in company table in the dashboard's CSV export format.
//!
//! Usage: `export_csv [OUTPUT]` (stdout when OUTPUT is omitted).

use std::path::PathBuf;

use anyhow::{Context, Result};

use wh_market_dashboard::config::DashboardConfig;
use wh_market_dashboard::data::export::{export_to_path, write_csv};
use wh_market_dashboard::data::loader::load_builtin;
use wh_market_dashboard::data::{query, FilterCriteria};
use wh_market_dashboard::ui::format;

fn main() -> Result<()> {
    env_logger::init();

    let dataset = load_builtin()?;
    let config = DashboardConfig::default();

    let result = query(&dataset, &FilterCriteria::select_all(&dataset), &config.query_spec())?;
    let agg = &result.aggregates;
    log::info!(
        "{} companies, total {}, average {}, median {} {}",
        agg.count,
        format::usd(agg.sum),
        format::usd_or_placeholder(&agg.mean),
        config.median_metric,
        format::year_or_placeholder(&agg.median)
    );

    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => export_to_path(&path, dataset.schema(), result.rows(&dataset))?,
        None => {
            let stdout = std::io::stdout();
            write_csv(stdout.lock(), dataset.schema(), result.rows(&dataset))
                .context("writing CSV to stdout")?;
        }
    }

    Ok(())
}
