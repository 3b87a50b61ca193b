//! Tests for raw source ingestion.

use std::path::Path;

use econ_ingest::{IngestError, RawFileStatus, check_raw_file, read_raw_csv, read_raw_csv_str};
use polars::prelude::{AnyValue, DataType};
use tempfile::TempDir;

#[test]
fn reads_quoted_fields_with_embedded_delimiters() {
    let text = "country,year,inflation_rate\n\"Korea, Republic of\",2020,\"1,234.5\"\n";
    let (df, info) = read_raw_csv_str(text, Path::new("inline.csv")).unwrap();

    assert_eq!(info.rows, 1);
    let country = df.column("country").unwrap().get(0).unwrap();
    assert!(matches!(country, AnyValue::String("Korea, Republic of")));
    let value = df.column("inflation_rate").unwrap().get(0).unwrap();
    assert!(matches!(value, AnyValue::String("1,234.5")));
}

#[test]
fn every_column_is_string_typed() {
    let text = "REF_AREA,TIME_PERIOD,OBS_VALUE\nBRA,2020,110\n";
    let (df, _) = read_raw_csv_str(text, Path::new("inline.csv")).unwrap();
    for column in df.get_columns() {
        assert_eq!(column.dtype(), &DataType::String);
    }
}

#[test]
fn inspect_reports_each_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("worldbank_inflation.csv"),
        "country,year,inflation_rate\nBrazil,2020,3.2%\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("imf_commodity_price.csv"), [0xFF, 0xFE, 0x41, 0x00]).unwrap();

    let inflation = check_raw_file("inflation", &dir.path().join("worldbank_inflation.csv"), 5);
    let commodity = check_raw_file("commodity", &dir.path().join("imf_commodity_price.csv"), 5);
    let wages = check_raw_file("wages", &dir.path().join("oecd_wages.csv"), 5);

    assert!(inflation.is_loaded());
    assert!(matches!(commodity.status, RawFileStatus::Unreadable { .. }));
    assert!(matches!(wages.status, RawFileStatus::Missing));
}

#[test]
fn utf16_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utf16.csv");
    std::fs::write(&path, [0xFE, 0xFF, 0x00, 0x41]).unwrap();
    let err = read_raw_csv(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
}
