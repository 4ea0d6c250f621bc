use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{Dataset, MetricValue, Record, Schema, UNKNOWN_MARKER};

pub const RANK: &str = "Rank";
pub const COMPANY: &str = "Company";
pub const MARKET_CAP: &str = "Market Cap (USD)";
pub const FOUNDED_YEAR: &str = "Founded Year";
pub const TOTAL_EMPLOYEES: &str = "Total Employees";
pub const HEADQUARTERS: &str = "Headquarters";
pub const STOCK_EXCHANGE: &str = "Stock Exchange";

/// Records-oriented JSON (the `df.to_json(orient='records')` shape), embedded at build time.
const BUILTIN_JSON: &str = include_str!("../../assets/companies.json");

/// Column layout of the built-in company table.
pub fn builtin_schema() -> Schema {
    Schema::new(
        [MARKET_CAP, FOUNDED_YEAR, TOTAL_EMPLOYEES],
        [HEADQUARTERS, STOCK_EXCHANGE],
    )
    .with_labels(RANK, COMPANY)
}

/// Load the top-20 women's health company table.
pub fn load_builtin() -> Result<Dataset> {
    load_json_str(BUILTIN_JSON).context("parsing built-in company table")
}

// ---------------------------------------------------------------------------
// JSON rows
// ---------------------------------------------------------------------------

/// A numeric cell as it appears in the source: a number, or the `"N/A"` marker.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Number(f64),
    Text(String),
}

impl RawMetric {
    fn into_metric(self, row: usize, column: &str) -> Result<MetricValue> {
        match self {
            RawMetric::Number(v) => Ok(MetricValue::Known(v)),
            RawMetric::Text(s) if s == UNKNOWN_MARKER => Ok(MetricValue::Unknown),
            RawMetric::Text(s) => bail!("Row {row}: '{column}' has non-numeric value '{s}'"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    #[serde(rename = "Rank")]
    rank: u32,
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Market Cap (USD)")]
    market_cap: RawMetric,
    #[serde(rename = "Founded Year")]
    founded_year: RawMetric,
    #[serde(rename = "Total Employees")]
    total_employees: RawMetric,
    #[serde(rename = "Headquarters")]
    headquarters: String,
    #[serde(rename = "Stock Exchange")]
    stock_exchange: String,
}

impl CompanyRow {
    fn into_record(self, row: usize) -> Result<Record> {
        Ok(Record::new(self.rank, self.company)
            .with_metric(MARKET_CAP, self.market_cap.into_metric(row, MARKET_CAP)?)
            .with_metric(FOUNDED_YEAR, self.founded_year.into_metric(row, FOUNDED_YEAR)?)
            .with_metric(
                TOTAL_EMPLOYEES,
                self.total_employees.into_metric(row, TOTAL_EMPLOYEES)?,
            )
            .with_attribute(HEADQUARTERS, self.headquarters)
            .with_attribute(STOCK_EXCHANGE, self.stock_exchange))
    }
}

/// Parse a JSON array of company rows into a [`Dataset`] with [`builtin_schema`].
pub fn load_json_str(text: &str) -> Result<Dataset> {
    let rows: Vec<CompanyRow> = serde_json::from_str(text).context("parsing JSON")?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_record(i))
        .collect::<Result<Vec<_>>>()?;
    let dataset = Dataset::new(builtin_schema(), records)?;
    log::info!(
        "Loaded {} companies with metrics {:?}",
        dataset.len(),
        dataset.schema().metric_names
    );
    Ok(dataset)
}
