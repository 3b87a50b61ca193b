//! End-to-end tests for the harmonization pipeline.

use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame};
use tempfile::TempDir;

use econ_core::{
    CoreError, MergeOptions, PipelineConfig, RunOptions, harmonize_frames, run_pipeline,
    write_run_report,
};
use econ_model::SourceKind;
use econ_standards::CountryRegistry;
use econ_transform::SourceColumns;

const INFLATION: &str = "\
country,year,inflation_rate
Brazil,2017,3.4%
Brazil,2018,3.7%
Brazil,2019,3.7%
Brazil,2020,3.2%
Freedonia,2017,1.0%
Freedonia,2018,1.0%
Freedonia,2019,1.0%
Freedonia,2020,1.0%
Chile,2019,2.6%
Chile,2020,3.0%
World,2020,1.9%
";

const COMMODITY: &str = "\
Date;All Commodity Price Index;Energy
2017;80;70
2018;85;75
2019;90;78
2020;95.5;60
";

const WAGES: &str = "\
REF_AREA,TIME_PERIOD,OBS_VALUE
BRA,2019,108
BRA,2020,110
OECD,2020,100
";

fn write_raw(dir: &Path, inflation: &str, commodity: &str, wages: &str) -> PipelineConfig {
    let raw = dir.join("raw");
    std::fs::create_dir_all(&raw).unwrap();
    std::fs::write(raw.join("worldbank_inflation.csv"), inflation).unwrap();
    std::fs::write(raw.join("imf_commodity_price.csv"), commodity).unwrap();
    std::fs::write(raw.join("oecd_wages.csv"), wages).unwrap();
    PipelineConfig {
        raw_dir: raw,
        processed_dir: dir.join("processed"),
        ..PipelineConfig::default()
    }
}

/// Metric fields of the output line starting with `prefix`.
fn row(lines: &[&str], prefix: &str) -> Vec<Option<f64>> {
    let line = lines.iter().find(|line| line.starts_with(prefix)).unwrap();
    line.split(',')
        .skip(2)
        .map(|field| field.parse::<f64>().ok())
        .collect()
}

#[test]
fn brazil_scenario_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = write_raw(dir.path(), INFLATION, COMMODITY, WAGES);

    let outcome = run_pipeline(&config, RunOptions::default()).unwrap();

    let output = config.output_path();
    assert_eq!(outcome.output_path.as_deref(), Some(output.as_path()));
    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "country_code,date,inflation_rate,wage_index,commodity_price");
    assert_eq!(lines.len(), 5);
    assert!(!text.contains("CHL"));

    let brazil_2020 = row(&lines, "BRA,2020-01-01,");
    assert_eq!(brazil_2020, vec![Some(3.2), Some(110.0), Some(95.5)]);
    let brazil_2017 = row(&lines, "BRA,2017-01-01,");
    assert_eq!(brazil_2017, vec![Some(3.4), None, Some(80.0)]);

    assert_eq!(outcome.output_rows, 4);
    assert_eq!(outcome.output_columns, 5);
    assert_eq!(outcome.merge.null_country_rows_removed, 5);
    let inflation = &outcome.sources[0];
    assert_eq!(inflation.kind, SourceKind::Inflation);
    assert_eq!(inflation.clean.unresolved_names, vec!["Freedonia", "World"]);
    assert_eq!(outcome.sources[1].raw.delimiter, b';');
    assert_eq!(outcome.sources[2].clean.unresolved_countries, 1);
}

#[test]
fn empty_wage_value_column_yields_null_wages() {
    let dir = TempDir::new().unwrap();
    let wages = "REF_AREA,TIME_PERIOD,OBS_VALUE\nBRA,2019,\nBRA,2020,\n";
    let config = write_raw(dir.path(), INFLATION, COMMODITY, wages);

    let outcome = run_pipeline(&config, RunOptions::default()).unwrap();

    assert_eq!(outcome.output_rows, 4);
    assert!(outcome.records.iter().all(|r| r.wage_index.is_none()));
    let wage_source = &outcome.sources[2];
    assert_eq!(wage_source.raw.blank_columns, vec!["OBS_VALUE".to_string()]);
    assert_eq!(wage_source.clean.null_values, 2);

    let text = std::fs::read_to_string(config.output_path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(row(&lines, "BRA,2020-01-01,"), vec![Some(3.2), None, Some(95.5)]);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = write_raw(dir.path(), INFLATION, COMMODITY, WAGES);

    let outcome = run_pipeline(&config, RunOptions { dry_run: true }).unwrap();

    assert!(outcome.output_path.is_none());
    assert_eq!(outcome.records.len(), 4);
    assert!(!config.output_path().exists());
}

#[test]
fn missing_raw_file_names_the_source() {
    let dir = TempDir::new().unwrap();
    let config = write_raw(dir.path(), INFLATION, COMMODITY, WAGES);
    std::fs::remove_file(config.source_path(SourceKind::Wages)).unwrap();

    let err = run_pipeline(&config, RunOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Ingest {
            kind: SourceKind::Wages,
            ..
        }
    ));
}

#[test]
fn missing_commodity_index_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_raw(dir.path(), INFLATION, "Date,Energy\n2020,60\n", WAGES);

    let err = run_pipeline(&config, RunOptions::default()).unwrap_err();
    assert!(matches!(err, CoreError::Transform(_)));
    assert!(err.to_string().contains("All Commodity Price Index"));
}

#[test]
fn conflicting_commodity_dates_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let commodity = "date,All Commodity Price Index\n2020,95.5\n2020-06-01,97.0\n";
    let config = write_raw(dir.path(), INFLATION, commodity, WAGES);

    let err = run_pipeline(&config, RunOptions::default()).unwrap_err();
    assert!(matches!(err, CoreError::Merge(_)));
    assert!(!config.output_path().exists());
}

#[test]
fn run_report_is_written_as_json() {
    let dir = TempDir::new().unwrap();
    let config = write_raw(dir.path(), INFLATION, COMMODITY, WAGES);
    let outcome = run_pipeline(&config, RunOptions::default()).unwrap();

    let report_path = dir.path().join("reports").join("run.json");
    write_run_report(&outcome, &report_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["output_rows"], 4);
    assert_eq!(json["merge"]["countries_dropped"][0], "CHL");
    assert_eq!(json["sources"][0]["kind"], "inflation");
    assert!(json.get("records").is_none());
}

#[test]
fn harmonize_in_memory_frames() {
    let inflation = DataFrame::new(vec![
        Column::new("country".into(), ["Brazil", "Brazil", "Brazil", "Brazil"]),
        Column::new("year".into(), [2017i64, 2018, 2019, 2020]),
        Column::new("inflation_rate".into(), [3.4f64, 3.7, 3.7, 3.2]),
    ])
    .unwrap();
    let commodity = DataFrame::new(vec![
        Column::new("date".into(), ["2020"]),
        Column::new("All Commodity Price Index".into(), ["95.5"]),
    ])
    .unwrap();
    let wages = DataFrame::new(vec![
        Column::new("REF_AREA".into(), ["BRA"]),
        Column::new("TIME_PERIOD".into(), ["2020"]),
        Column::new("OBS_VALUE".into(), ["110"]),
    ])
    .unwrap();
    let registry = CountryRegistry::iso3166().unwrap();

    let harmonized = harmonize_frames(
        &inflation,
        &commodity,
        &wages,
        &registry,
        &SourceColumns::default(),
        &MergeOptions::default(),
    )
    .unwrap();

    let brazil_2020 = harmonized
        .merged
        .records
        .iter()
        .find(|r| r.date == NaiveDate::from_ymd_opt(2020, 1, 1))
        .unwrap();
    assert_eq!(brazil_2020.country_code.as_str(), "BRA");
    assert_eq!(brazil_2020.inflation_rate, Some(3.2));
    assert_eq!(brazil_2020.wage_index, Some(110.0));
    assert_eq!(brazil_2020.commodity_price, Some(95.5));
}
