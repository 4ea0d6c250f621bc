//! Property-based tests for the filter-and-aggregate engine.
//!
//! Random small datasets (with unknown metric values mixed in) and random criteria
//! must always satisfy:
//! - filtering yields an order-preserving subsequence of the dataset
//! - filtering a filtered result again changes nothing
//! - `summarize(..).count` equals the number of filtered records
//! - the CSV export parses back to the same records, unknown markers included
//! - a range equal to a metric's global bounds keeps every known value

use std::collections::BTreeSet;

use wh_market_dashboard::data::export::{from_csv_str, to_csv_string};
use wh_market_dashboard::data::{
    filter, filter_records, summarize, Dataset, FilterCriteria, MetricValue, Record, Schema,
};

use proptest::prelude::*;

const METRICS: [&str; 2] = ["cap", "staff"];
const ATTRIBUTES: [&str; 2] = ["venue", "hq"];
const VENUES: [&str; 4] = ["NYSE", "NASDAQ", "STO", "-"];
const REGIONS: [&str; 3] = ["Illinois, USA", "Tokyo, Japan", "Liège, Belgium"];

// ============================================================================
// Strategies
// ============================================================================

fn metric_value_strategy() -> impl Strategy<Value = MetricValue> {
    prop_oneof![
        1 => Just(MetricValue::Unknown),
        4 => (0u64..1_000_000_000_000u64).prop_map(|v| MetricValue::Known(v as f64)),
        1 => (-1.0e6f64..1.0e6f64).prop_map(MetricValue::Known),
    ]
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        1u32..1000,
        "[A-Za-z][A-Za-z0-9 .,'&]{0,20}",
        metric_value_strategy(),
        metric_value_strategy(),
        prop::sample::select(VENUES.to_vec()),
        prop::sample::select(REGIONS.to_vec()),
    )
        .prop_map(|(id, name, cap, staff, venue, hq)| {
            Record::new(id, name)
                .with_metric("cap", cap)
                .with_metric("staff", staff)
                .with_attribute("venue", venue)
                .with_attribute("hq", hq)
        })
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record_strategy(), 0..30).prop_map(|records| {
        Dataset::new(Schema::new(METRICS, ATTRIBUTES), records).expect("uniform records")
    })
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(prop::sample::subsequence(VENUES.to_vec(), 0..=VENUES.len())),
        prop::option::of(prop::sample::subsequence(REGIONS.to_vec(), 0..=REGIONS.len())),
        prop::option::of((0.0f64..1.0e12, 0.0f64..1.0e12)),
    )
        .prop_map(|(venues, regions, range)| {
            let mut criteria = FilterCriteria::new();
            if let Some(v) = venues {
                criteria = criteria.allow("venue", v);
            }
            if let Some(r) = regions {
                criteria = criteria.allow("hq", r);
            }
            if let Some((a, b)) = range {
                criteria = criteria.range("cap", a.min(b), a.max(b));
            }
            criteria
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn filter_is_an_ordered_subsequence(ds in dataset_strategy(), criteria in criteria_strategy()) {
        let mut positions = Vec::new();
        for record in filter(&ds, &criteria) {
            let pos = ds
                .all_records()
                .iter()
                .position(|r| std::ptr::eq(r, record))
                .expect("filtered record comes from the dataset");
            positions.push(pos);
        }
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn filter_is_idempotent(ds in dataset_strategy(), criteria in criteria_strategy()) {
        let once: Vec<&Record> = filter(&ds, &criteria).collect();
        let twice: Vec<&Record> = filter_records(once.iter().copied(), &criteria).collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn summary_count_matches_filtered_length(ds in dataset_strategy(), criteria in criteria_strategy()) {
        let len = filter(&ds, &criteria).count();
        let summary = summarize(filter(&ds, &criteria), "cap");
        prop_assert_eq!(summary.count, len);
        prop_assert!(summary.known <= summary.count);
        if summary.known == 0 {
            prop_assert!(summary.mean().is_err());
            prop_assert_eq!(summary.sum, 0.0);
        }
    }

    #[test]
    fn export_round_trips(ds in dataset_strategy(), criteria in criteria_strategy()) {
        let filtered: Vec<&Record> = filter(&ds, &criteria).collect();
        let text = to_csv_string(ds.schema(), filtered.iter().copied()).unwrap();
        let back = from_csv_str(&text, ds.schema()).unwrap();
        let expected: Vec<Record> = filtered.into_iter().cloned().collect();
        prop_assert_eq!(back.all_records(), &expected[..]);
    }

    #[test]
    fn global_bounds_keep_every_known_value(ds in dataset_strategy()) {
        for metric in METRICS {
            let Ok((lo, hi)) = ds.bounds(metric) else {
                prop_assert!(ds.all_records().iter().all(|r| !r.metric(metric).is_known()));
                continue;
            };
            let criteria = FilterCriteria::new().range(metric, lo, hi);
            let known = ds.all_records().iter().filter(|r| r.metric(metric).is_known()).count();
            prop_assert_eq!(filter(&ds, &criteria).count(), known);
        }
    }

    #[test]
    fn select_all_keeps_every_record(ds in dataset_strategy()) {
        let criteria = FilterCriteria::select_all(&ds);
        prop_assert_eq!(filter(&ds, &criteria).count(), ds.len());
        let venues: BTreeSet<&str> = ds.all_records().iter().filter_map(|r| r.attribute("venue")).collect();
        prop_assert_eq!(ds.distinct_values("venue").unwrap().len(), venues.len());
    }
}
