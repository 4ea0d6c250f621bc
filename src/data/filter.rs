use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, Record, Schema};
use crate::error::{DataError, DataResult};

// ---------------------------------------------------------------------------
// Filter criteria: allowed categories per attribute, ranges per metric
// ---------------------------------------------------------------------------

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

impl From<(f64, f64)> for NumericRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// User-selected constraints for one query.
///
/// * An attribute absent from `categories` is unconstrained.
/// * An attribute present with an empty set matches nothing.
/// * A metric present in `ranges` only matches known values inside the range;
///   unknown values never match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub categories: BTreeMap<String, BTreeSet<String>>,
    pub ranges: BTreeMap<String, NumericRange>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria with every category of every attribute selected (i.e., show everything).
    pub fn select_all(dataset: &Dataset) -> Self {
        let categories = dataset
            .schema()
            .attribute_names
            .iter()
            .filter_map(|a| {
                let values = dataset.distinct_values(a).ok()?;
                Some((a.clone(), values.clone()))
            })
            .collect();
        Self {
            categories,
            ranges: BTreeMap::new(),
        }
    }

    /// Restrict `attribute` to the given categories.
    pub fn allow<I, S>(mut self, attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .insert(attribute.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict `metric` to the inclusive range `[min, max]`.
    pub fn range(mut self, metric: impl Into<String>, min: f64, max: f64) -> Self {
        self.ranges.insert(metric.into(), NumericRange::new(min, max));
        self
    }

    /// Attributes whose selection is empty.
    pub fn empty_selections(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, selected)| selected.is_empty())
            .map(|(a, _)| a.as_str())
            .collect()
    }

    /// Fails with [`DataError::EmptySelection`] for the first attribute with nothing selected.
    pub fn ensure_selections(&self) -> DataResult<()> {
        match self.empty_selections().first() {
            Some(attribute) => Err(DataError::EmptySelection {
                attribute: attribute.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Every named column must exist and every range must be finite and ordered.
    pub fn validate(&self, schema: &Schema) -> DataResult<()> {
        for attribute in self.categories.keys() {
            schema.require_attribute(attribute)?;
        }
        for (metric, range) in &self.ranges {
            schema.require_metric(metric)?;
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(DataError::InvalidRange {
                    metric: metric.clone(),
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Whether `record` satisfies every constraint in `criteria`.
pub fn matches_criteria(record: &Record, criteria: &FilterCriteria) -> bool {
    let categories_ok = criteria.categories.iter().all(|(attribute, allowed)| {
        record
            .attribute(attribute)
            .is_some_and(|value| allowed.contains(value))
    });
    categories_ok
        && criteria.ranges.iter().all(|(metric, range)| {
            record
                .metric(metric)
                .known()
                .is_some_and(|v| range.contains(v))
        })
}

/// Lazy, restartable view over the records that match a [`FilterCriteria`].
///
/// A clone taken before iteration is an independent pass over the same records.
#[derive(Debug, Clone)]
pub struct Filtered<'a, I> {
    inner: I,
    criteria: &'a FilterCriteria,
}

impl<'a, I> Iterator for Filtered<'a, I>
where
    I: Iterator<Item = &'a Record>,
{
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let criteria = self.criteria;
        self.inner.find(|r| matches_criteria(r, criteria))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Records of `dataset` matching `criteria`, in original order.
pub fn filter<'a>(
    dataset: &'a Dataset,
    criteria: &'a FilterCriteria,
) -> Filtered<'a, std::slice::Iter<'a, Record>> {
    filter_records(dataset.all_records(), criteria)
}

/// Same as [`filter`] over any sequence of records (e.g. a previous result).
pub fn filter_records<'a, I>(records: I, criteria: &'a FilterCriteria) -> Filtered<'a, I::IntoIter>
where
    I: IntoIterator<Item = &'a Record>,
{
    Filtered {
        inner: records.into_iter(),
        criteria,
    }
}

/// Return indices of records that pass all active filters.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .all_records()
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_criteria(r, criteria))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MetricValue;

    fn sample() -> Dataset {
        let schema = Schema::new(["cap", "staff"], ["venue", "hq"]);
        let records = vec![
            Record::new(1, "a")
                .with_metric("cap", 100.0)
                .with_metric("staff", 10.0)
                .with_attribute("venue", "NYSE")
                .with_attribute("hq", "USA"),
            Record::new(2, "b")
                .with_metric("cap", 5.0)
                .with_metric("staff", MetricValue::Unknown)
                .with_attribute("venue", "STO")
                .with_attribute("hq", "Sweden"),
            Record::new(3, "c")
                .with_metric("cap", 50.0)
                .with_metric("staff", 40.0)
                .with_attribute("venue", "NASDAQ")
                .with_attribute("hq", "USA"),
        ];
        Dataset::new(schema, records).unwrap()
    }

    fn names<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<&'a str> {
        records.map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn empty_criteria_match_everything() {
        let ds = sample();
        let criteria = FilterCriteria::new();
        assert_eq!(names(filter(&ds, &criteria)), vec!["a", "b", "c"]);
    }

    #[test]
    fn select_all_matches_everything() {
        let ds = sample();
        let criteria = FilterCriteria::select_all(&ds);
        assert_eq!(criteria.categories.len(), 2);
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn categories_and_ranges_combine() {
        let ds = sample();
        let criteria = FilterCriteria::new()
            .allow("hq", ["USA"])
            .range("cap", 60.0, 200.0);
        assert_eq!(names(filter(&ds, &criteria)), vec!["a"]);
    }

    #[test]
    fn range_is_inclusive() {
        let ds = sample();
        let criteria = FilterCriteria::new().range("cap", 5.0, 50.0);
        assert_eq!(names(filter(&ds, &criteria)), vec!["b", "c"]);
    }

    #[test]
    fn unknown_value_never_matches_range() {
        let ds = sample();
        let criteria = FilterCriteria::new().range("staff", f64::MIN, f64::MAX);
        assert_eq!(names(filter(&ds, &criteria)), vec!["a", "c"]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let ds = sample();
        let criteria = FilterCriteria::select_all(&ds).allow("venue", Vec::<String>::new());
        assert_eq!(filter(&ds, &criteria).count(), 0);
        assert_eq!(criteria.empty_selections(), vec!["venue"]);
        assert_eq!(
            criteria.ensure_selections(),
            Err(DataError::EmptySelection {
                attribute: "venue".to_string()
            })
        );
    }

    #[test]
    fn filter_is_restartable() {
        let ds = sample();
        let criteria = FilterCriteria::new().allow("hq", ["USA"]);
        let view = filter(&ds, &criteria);
        let first: Vec<_> = view.clone().collect();
        let second: Vec<_> = view.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn filtering_a_result_again_is_a_no_op() {
        let ds = sample();
        let criteria = FilterCriteria::new().allow("venue", ["NYSE", "NASDAQ"]);
        let once: Vec<&Record> = filter(&ds, &criteria).collect();
        let twice: Vec<&Record> = filter_records(once.iter().copied(), &criteria).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn validate_reports_unknown_columns_and_inverted_ranges() {
        let ds = sample();
        let schema = ds.schema();
        assert!(FilterCriteria::select_all(&ds).validate(schema).is_ok());
        assert_eq!(
            FilterCriteria::new().allow("country", ["x"]).validate(schema),
            Err(DataError::UnknownColumn {
                name: "country".to_string()
            })
        );
        assert_eq!(
            FilterCriteria::new().range("cap", 10.0, 1.0).validate(schema),
            Err(DataError::InvalidRange {
                metric: "cap".to_string(),
                min: 10.0,
                max: 1.0
            })
        );
    }

    #[test]
    fn validate_rejects_non_finite_bounds() {
        let ds = sample();
        let schema = ds.schema();
        for (min, max) in [
            (f64::NAN, 1e12),
            (0.0, f64::NAN),
            (f64::NEG_INFINITY, 10.0),
            (0.0, f64::INFINITY),
        ] {
            let err = FilterCriteria::new()
                .range("cap", min, max)
                .validate(schema)
                .unwrap_err();
            assert!(
                matches!(err, DataError::InvalidRange { ref metric, .. } if metric == "cap"),
                "{err}"
            );
        }
    }
}
