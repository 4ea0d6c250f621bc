use super::filter::{filtered_indices, FilterCriteria};
use super::model::{Dataset, Record};
use crate::error::{DataError, DataResult};

// ---------------------------------------------------------------------------
// Summary over a filtered set of records
// ---------------------------------------------------------------------------

/// Aggregates of one metric over a set of records.
#[derive(Debug, Clone)]
pub struct Summary<'a> {
    pub metric: String,
    /// Sum of known values (0 when there are none).
    pub sum: f64,
    /// Number of records, known or not.
    pub count: usize,
    /// Number of records with a known value for `metric`.
    pub known: usize,
    records: Vec<&'a Record>,
}

impl<'a> Summary<'a> {
    /// `sum / known`.
    pub fn mean(&self) -> DataResult<f64> {
        if self.known == 0 {
            return Err(DataError::NoData {
                metric: self.metric.clone(),
            });
        }
        Ok(self.sum / self.known as f64)
    }

    /// Median of the known values of another metric over the same records.
    pub fn median_of(&self, other_metric: &str) -> DataResult<f64> {
        median_of(self.records.iter().copied(), other_metric)
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }
}

/// Summarize `metric` over `records`. A record lacking the metric counts as unknown.
pub fn summarize<'a, I>(records: I, metric: &str) -> Summary<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&'a Record> = records.into_iter().collect();
    let (sum, known) = records
        .iter()
        .filter_map(|r| r.metric(metric).known())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    Summary {
        metric: metric.to_string(),
        sum,
        count: records.len(),
        known,
        records,
    }
}

/// Standard median of the known values of `metric`: the middle value for an odd count,
/// the mean of the two middle values for an even count.
pub fn median_of<'a, I>(records: I, metric: &str) -> DataResult<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut values: Vec<f64> = records
        .into_iter()
        .filter_map(|r| r.metric(metric).known())
        .collect();
    if values.is_empty() {
        return Err(DataError::NoData {
            metric: metric.to_string(),
        });
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Ok((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Ok(values[mid])
    }
}

// ---------------------------------------------------------------------------
// query: criteria → (rows, aggregates)
// ---------------------------------------------------------------------------

/// Which metrics a query aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Metric for sum and mean.
    pub summary_metric: String,
    /// Metric for the median.
    pub median_metric: String,
}

impl QuerySpec {
    pub fn new(summary_metric: impl Into<String>, median_metric: impl Into<String>) -> Self {
        Self {
            summary_metric: summary_metric.into(),
            median_metric: median_metric.into(),
        }
    }
}

/// Owned snapshot of the aggregates for display. Mean and median carry their
/// [`DataError::NoData`] so the host can render a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub count: usize,
    pub sum: f64,
    pub mean: DataResult<f64>,
    pub median: DataResult<f64>,
}

/// Result of one query: matching row positions plus aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub indices: Vec<usize>,
    pub aggregates: Aggregates,
}

impl QueryResult {
    /// No rows; mean and median report [`DataError::NoData`].
    pub fn empty(spec: &QuerySpec) -> Self {
        Self {
            indices: Vec::new(),
            aggregates: Aggregates {
                count: 0,
                sum: 0.0,
                mean: Err(DataError::NoData {
                    metric: spec.summary_metric.clone(),
                }),
                median: Err(DataError::NoData {
                    metric: spec.median_metric.clone(),
                }),
            },
        }
    }

    /// Matching records in original order.
    pub fn rows<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().filter_map(move |&i| dataset.get(i))
    }
}

/// Filter `dataset` with `criteria` and aggregate the result. Recomputed from scratch on
/// every call.
pub fn query(dataset: &Dataset, criteria: &FilterCriteria, spec: &QuerySpec) -> DataResult<QueryResult> {
    let schema = dataset.schema();
    criteria.validate(schema)?;
    schema.require_metric(&spec.summary_metric)?;
    schema.require_metric(&spec.median_metric)?;

    let indices = filtered_indices(dataset, criteria);
    let summary = summarize(
        indices.iter().filter_map(|&i| dataset.get(i)),
        &spec.summary_metric,
    );
    let aggregates = Aggregates {
        count: summary.count,
        sum: summary.sum,
        mean: summary.mean(),
        median: summary.median_of(&spec.median_metric),
    };
    log::debug!(
        "query matched {} of {} records",
        aggregates.count,
        dataset.len()
    );
    Ok(QueryResult {
        indices,
        aggregates,
    })
}
