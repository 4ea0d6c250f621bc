use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Dataset, MetricValue, Record, Schema, UNKNOWN_MARKER};
use crate::error::ExportError;

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Layout:
///
/// ```text
/// Rank,Company,Market Cap (USD),Founded Year,Total Employees,Headquarters,Stock Exchange
/// 18,Bonzun,339000,2012,50,"Stockholm, Sweden",STO
/// 20,Callitas Therapeutics,3300,2003,N/A,"British Columbia, Canada",OTCMKTS
/// ```
///
/// Unknown metrics are written as the literal `N/A`, never as an empty field.
pub fn write_csv<'a, W, I>(writer: W, schema: &Schema, records: I) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    schema.check_unique()?;
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(schema.column_labels())?;

    for record in records {
        let mut row: Vec<String> =
            Vec::with_capacity(2 + schema.metric_names.len() + schema.attribute_names.len());
        row.push(record.id.to_string());
        row.push(record.name.clone());
        for metric in &schema.metric_names {
            row.push(record.metric(metric).to_string());
        }
        for attribute in &schema.attribute_names {
            row.push(record.attribute(attribute).unwrap_or_default().to_string());
        }
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}

/// Serialize `records` to an in-memory CSV string.
pub fn to_csv_string<'a, I>(schema: &Schema, records: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, schema, records)?;
    // csv only writes the UTF-8 it was given.
    String::from_utf8(buf).map_err(|e| ExportError::Io(std::io::Error::other(e)))
}

/// Write `records` to a file at `path`.
pub fn export_to_path<'a, I>(path: &Path, schema: &Schema, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(std::io::BufWriter::new(file), schema, records)
        .with_context(|| format!("writing CSV to {}", path.display()))?;
    log::info!("Exported CSV to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Parse the export format back into a [`Dataset`] with the given schema.
pub fn read_csv<R: Read>(reader: R, schema: &Schema) -> Result<Dataset, ExportError> {
    schema.check_unique()?;
    let mut reader = csv::Reader::from_reader(reader);

    let expected = schema.column_labels();
    let headers = reader.headers()?.clone();
    let found: Vec<&str> = headers.iter().collect();
    if found != expected {
        return Err(ExportError::Header {
            expected: expected.join(","),
            found: found.join(","),
        });
    }

    let n_metrics = schema.metric_names.len();
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let raw_id = cell(0);
        let id = raw_id.trim().parse::<u32>().map_err(|_| ExportError::Parse {
            row: row_no,
            column: schema.id_label.clone(),
            raw: raw_id.to_string(),
        })?;

        let mut metrics = BTreeMap::new();
        for (i, metric) in schema.metric_names.iter().enumerate() {
            let raw = cell(2 + i);
            let value = parse_metric(raw).ok_or_else(|| ExportError::Parse {
                row: row_no,
                column: metric.clone(),
                raw: raw.to_string(),
            })?;
            metrics.insert(metric.clone(), value);
        }

        let attributes = schema
            .attribute_names
            .iter()
            .enumerate()
            .map(|(i, attribute)| (attribute.clone(), cell(2 + n_metrics + i).to_string()))
            .collect();

        records.push(Record {
            id,
            name: cell(1).to_string(),
            metrics,
            attributes,
        });
    }

    Ok(Dataset::new(schema.clone(), records)?)
}

pub fn from_csv_str(text: &str, schema: &Schema) -> Result<Dataset, ExportError> {
    read_csv(text.as_bytes(), schema)
}

/// `N/A` → unknown, a finite number → known, anything else is rejected.
fn parse_metric(raw: &str) -> Option<MetricValue> {
    let s = raw.trim();
    if s == UNKNOWN_MARKER {
        return Some(MetricValue::Unknown);
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(MetricValue::Known)
}
