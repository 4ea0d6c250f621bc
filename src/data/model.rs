use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{DataError, DataResult};

/// Literal written in place of an unknown metric value (matches the source data).
pub const UNKNOWN_MARKER: &str = "N/A";

// ---------------------------------------------------------------------------
// MetricValue – a single cell in a numeric column
// ---------------------------------------------------------------------------

/// A numeric cell that is either known or explicitly marked missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Known(f64),
    Unknown,
}

impl MetricValue {
    /// The numeric value, if known.
    pub fn known(&self) -> Option<f64> {
        match self {
            MetricValue::Known(v) => Some(*v),
            MetricValue::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, MetricValue::Known(_))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Known(v)
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(MetricValue::Unknown, MetricValue::Known)
    }
}

// Shortest round-trip float formatting: integral values print without a decimal point.
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Known(v) => write!(f, "{v}"),
            MetricValue::Unknown => f.write_str(UNKNOWN_MARKER),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one company
// ---------------------------------------------------------------------------

/// One row of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Rank in the source listing.
    pub id: u32,
    /// Display key; not required to be unique.
    pub name: String,
    /// Numeric columns: metric name → value.
    pub metrics: BTreeMap<String, MetricValue>,
    /// Categorical columns: attribute name → category.
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            metrics: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, metric: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(metric.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(attribute.into(), value.into());
        self
    }

    /// Value of `metric`; a metric the record does not carry reads as unknown.
    pub fn metric(&self, metric: &str) -> MetricValue {
        self.metrics
            .get(metric)
            .copied()
            .unwrap_or(MetricValue::Unknown)
    }

    pub fn attribute(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Schema – column layout shared by every record
// ---------------------------------------------------------------------------

/// Ordered column layout. Also fixes the CSV column order:
/// id, name, metrics…, attributes….
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub id_label: String,
    pub name_label: String,
    pub metric_names: Vec<String>,
    pub attribute_names: Vec<String>,
}

impl Schema {
    pub fn new<M, A>(metric_names: M, attribute_names: A) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            id_label: "Rank".to_string(),
            name_label: "Company".to_string(),
            metric_names: metric_names.into_iter().map(Into::into).collect(),
            attribute_names: attribute_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_labels(mut self, id_label: impl Into<String>, name_label: impl Into<String>) -> Self {
        self.id_label = id_label.into();
        self.name_label = name_label.into();
        self
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metric_names.iter().any(|m| m == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute_names.iter().any(|a| a == name)
    }

    /// Header row, in column order.
    pub fn column_labels(&self) -> Vec<&str> {
        let mut labels = Vec::with_capacity(2 + self.metric_names.len() + self.attribute_names.len());
        labels.push(self.id_label.as_str());
        labels.push(self.name_label.as_str());
        labels.extend(self.metric_names.iter().map(String::as_str));
        labels.extend(self.attribute_names.iter().map(String::as_str));
        labels
    }

    /// Fails with [`DataError::DuplicateColumn`] if two columns share a label.
    pub fn check_unique(&self) -> DataResult<()> {
        let mut seen = BTreeSet::new();
        for label in self.column_labels() {
            if !seen.insert(label) {
                return Err(DataError::DuplicateColumn {
                    name: label.to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn require_metric(&self, name: &str) -> DataResult<()> {
        if self.has_metric(name) {
            Ok(())
        } else {
            Err(DataError::UnknownColumn {
                name: name.to_string(),
            })
        }
    }

    pub(crate) fn require_attribute(&self, name: &str) -> DataResult<()> {
        if self.has_attribute(name) {
            Ok(())
        } else {
            Err(DataError::UnknownColumn {
                name: name.to_string(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete, immutable table
// ---------------------------------------------------------------------------

/// The full table with pre-computed category indices.
///
/// Built once and never mutated; every accessor is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Record>,
    /// For each attribute the sorted set of unique values.
    unique_values: BTreeMap<String, BTreeSet<String>>,
}

impl Dataset {
    /// Validate schema uniformity and build the category index.
    pub fn new(schema: Schema, records: Vec<Record>) -> DataResult<Self> {
        schema.check_unique()?;
        for (row, record) in records.iter().enumerate() {
            check_columns(
                row,
                "metrics",
                &schema.metric_names,
                record.metrics.keys(),
            )?;
            check_columns(
                row,
                "attributes",
                &schema.attribute_names,
                record.attributes.keys(),
            )?;
            for (metric, value) in &record.metrics {
                if let MetricValue::Known(v) = value {
                    if !v.is_finite() {
                        return Err(DataError::NonFiniteMetric {
                            row,
                            metric: metric.clone(),
                        });
                    }
                }
            }
        }

        let mut unique_values: BTreeMap<String, BTreeSet<String>> = schema
            .attribute_names
            .iter()
            .map(|a| (a.clone(), BTreeSet::new()))
            .collect();
        for record in &records {
            for (attribute, value) in &record.attributes {
                unique_values
                    .entry(attribute.clone())
                    .or_default()
                    .insert(value.clone());
            }
        }

        Ok(Self {
            schema,
            records,
            unique_values,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Every record in original order.
    pub fn all_records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique category values of `attribute`, used to populate option lists.
    pub fn distinct_values(&self, attribute: &str) -> DataResult<&BTreeSet<String>> {
        self.unique_values
            .get(attribute)
            .ok_or_else(|| DataError::UnknownColumn {
                name: attribute.to_string(),
            })
    }

    /// `(min, max)` over the known values of `metric`.
    pub fn bounds(&self, metric: &str) -> DataResult<(f64, f64)> {
        self.schema.require_metric(metric)?;
        self.records
            .iter()
            .filter_map(|r| r.metric(metric).known())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .ok_or_else(|| DataError::EmptyDataset {
                metric: metric.to_string(),
            })
    }
}

fn check_columns<'a>(
    row: usize,
    kind: &str,
    expected: &[String],
    found: impl Iterator<Item = &'a String>,
) -> DataResult<()> {
    let expected_set: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
    let found_set: BTreeSet<&str> = found.map(String::as_str).collect();
    if expected_set == found_set {
        return Ok(());
    }
    let missing: Vec<&str> = expected_set.difference(&found_set).copied().collect();
    let extra: Vec<&str> = found_set.difference(&expected_set).copied().collect();
    Err(DataError::SchemaMismatch {
        row,
        message: format!("{kind} missing {missing:?}, unexpected {extra:?}"),
    })
}
