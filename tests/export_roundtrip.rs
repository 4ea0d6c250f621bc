use std::io::Write;

use tempfile::NamedTempFile;

use wh_market_dashboard::data::export::{export_to_path, read_csv, to_csv_string};
use wh_market_dashboard::data::loader::{builtin_schema, load_builtin, STOCK_EXCHANGE, TOTAL_EMPLOYEES};
use wh_market_dashboard::data::{filter, FilterCriteria, MetricValue};
use wh_market_dashboard::ExportError;

#[test]
fn full_table_survives_a_file_round_trip() {
    let ds = load_builtin().unwrap();
    let tmp = NamedTempFile::new().unwrap();

    export_to_path(tmp.path(), ds.schema(), ds.all_records()).unwrap();
    let file = std::fs::File::open(tmp.path()).unwrap();
    let back = read_csv(file, ds.schema()).unwrap();

    assert_eq!(back, ds);
}

#[test]
fn unknown_employee_count_is_exported_as_marker() {
    let ds = load_builtin().unwrap();
    let criteria = FilterCriteria::new().allow(STOCK_EXCHANGE, ["OTCMKTS"]);
    let text = to_csv_string(ds.schema(), filter(&ds, &criteria)).unwrap();

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Rank,Company,Market Cap (USD),Founded Year,Total Employees,Headquarters,Stock Exchange")
    );
    assert_eq!(
        lines.next(),
        Some("19,Evofem Biosciences Inc.,128000,2007,40,\"California, USA\",OTCMKTS")
    );
    assert_eq!(
        lines.next(),
        Some("20,Callitas Therapeutics,3300,2003,N/A,\"British Columbia, Canada\",OTCMKTS")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn hand_written_file_with_marker_parses() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        "Rank,Company,Market Cap (USD),Founded Year,Total Employees,Headquarters,Stock Exchange\n\
         1,Acme,1000,1999,N/A,\"Oslo, Norway\",OSE\n"
    )
    .unwrap();

    let file = std::fs::File::open(tmp.path()).unwrap();
    let ds = read_csv(file, &builtin_schema()).unwrap();
    assert_eq!(ds.len(), 1);
    let record = &ds.all_records()[0];
    assert_eq!(record.metric(TOTAL_EMPLOYEES), MetricValue::Unknown);
    assert_eq!(record.attribute(STOCK_EXCHANGE), Some("OSE"));
}

#[test]
fn non_numeric_metric_is_a_parse_error() {
    let text = "Rank,Company,Market Cap (USD),Founded Year,Total Employees,Headquarters,Stock Exchange\n\
                1,Acme,lots,1999,5,Oslo,OSE\n";
    let err = read_csv(text.as_bytes(), &builtin_schema()).unwrap_err();
    assert!(
        matches!(err, ExportError::Parse { ref column, .. } if column == "Market Cap (USD)"),
        "{err}"
    );
}

#[test]
fn export_to_unwritable_path_fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let ds = load_builtin().unwrap();
    let err = export_to_path(&path, ds.schema(), ds.all_records()).unwrap_err();
    assert!(format!("{err:#}").contains("creating"), "{err:#}");
}
