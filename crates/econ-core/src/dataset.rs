//! Harmonized dataset as a DataFrame and as CSV on disk.

use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, PolarsResult, SerWriter};

use econ_model::{MergedRecord, SourceKind, schema};

use crate::error::{CoreError, Result};

/// Metric columns in output order.
const METRICS: [SourceKind; 3] = [SourceKind::Inflation, SourceKind::Wages, SourceKind::Commodity];

/// Build the output table (`country_code,date,inflation_rate,wage_index,commodity_price`).
pub fn merged_to_dataframe(records: &[MergedRecord]) -> PolarsResult<DataFrame> {
    let country_code: Vec<String> = records
        .iter()
        .map(|r| r.country_code.as_str().to_string())
        .collect();
    let date: Vec<Option<String>> = records.iter().map(MergedRecord::date_string).collect();

    let mut columns = vec![
        Column::new(schema::COUNTRY_CODE.into(), country_code),
        Column::new(schema::DATE.into(), date),
    ];
    for kind in METRICS {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.metric(kind)).collect();
        columns.push(Column::new(kind.metric_column().into(), values));
    }
    DataFrame::new(columns)
}

/// Write the harmonized dataset as CSV, creating parent directories.
///
/// Missing values are written as empty fields.
pub fn write_merged_csv(records: &[MergedRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| CoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut df = merged_to_dataframe(records).map_err(|e| CoreError::Output {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut file = File::create(path).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| CoreError::Output {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    tracing::info!(path = %path.display(), rows = df.height(), "wrote harmonized dataset");
    Ok(())
}
