//! Tolerant CSV loading into string-typed DataFrames.

use std::path::Path;
use std::time::Instant;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame};
use serde::Serialize;

use crate::error::{IngestError, Result};

use super::decode::{TextEncoding, decode_bytes};
use super::header::{normalize_headers, sniff_delimiter};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// What the reader found out about a raw file.
#[derive(Debug, Clone, Serialize)]
pub struct RawFileInfo {
    pub encoding: TextEncoding,
    #[serde(serialize_with = "serialize_delimiter")]
    pub delimiter: u8,
    pub rows: usize,
    pub columns: usize,
    /// Rows with every cell blank.
    pub dropped_rows: usize,
    /// Unnamed columns with every cell blank, by positional name.
    pub dropped_columns: Vec<String>,
    /// Named columns with every cell blank. Kept in the frame as nulls.
    pub blank_columns: Vec<String>,
}

fn serialize_delimiter<S: serde::Serializer>(
    delimiter: &u8,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_char(char::from(*delimiter))
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Read a raw source CSV into a DataFrame whose columns are all `String`.
///
/// - UTF-8 (optional BOM) or Latin-1
/// - `,` or `;` delimited, picked from the header line
/// - ragged rows padded with nulls; extra cells get positional headers
/// - blank cells are null; fully blank rows are dropped
/// - fully blank columns are dropped only when their header is blank too
pub fn read_raw_csv(path: &Path) -> Result<(DataFrame, RawFileInfo)> {
    let start = Instant::now();
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::open(path, e))?;
    let (text, encoding) = decode_bytes(&bytes, path)?;
    let (df, info) = parse_text(&text, encoding, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = info.rows,
        columns = info.columns,
        encoding = info.encoding.as_str(),
        delimiter = %char::from(info.delimiter),
        duration_ms = start.elapsed().as_millis(),
        "read raw csv"
    );
    Ok((df, info))
}

/// Parse CSV text that is already in memory. `origin` labels errors.
pub fn read_raw_csv_str(text: &str, origin: &Path) -> Result<(DataFrame, RawFileInfo)> {
    parse_text(text, TextEncoding::Utf8, origin)
}

fn parse_text(text: &str, encoding: TextEncoding, path: &Path) -> Result<(DataFrame, RawFileInfo)> {
    let delimiter = sniff_delimiter(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = loop {
        match records.next() {
            Some(record) => {
                let record = record.map_err(|source| IngestError::CsvParse {
                    path: path.to_path_buf(),
                    source,
                })?;
                if record.iter().any(|cell| !cell.trim().is_empty()) {
                    break record;
                }
            }
            None => {
                return Err(IngestError::EmptyCsv {
                    path: path.to_path_buf(),
                });
            }
        }
    };

    let mut raw_headers: Vec<String> = header_record.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); raw_headers.len()];
    let mut height = 0usize;
    let mut dropped_rows = 0usize;

    for record in records {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            dropped_rows += 1;
            continue;
        }
        while raw_headers.len() < record.len() {
            raw_headers.push(String::new());
            cells.push(vec![None; height]);
        }
        for (idx, column) in cells.iter_mut().enumerate() {
            let value = record
                .get(idx)
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string);
            column.push(value);
        }
        height += 1;
    }

    let headers = normalize_headers(&raw_headers);
    let mut columns = Vec::with_capacity(headers.len());
    let mut dropped_columns = Vec::new();
    let mut blank_columns = Vec::new();
    for ((name, raw), values) in headers.into_iter().zip(&raw_headers).zip(cells) {
        // A data-less file keeps every header so callers can report missing columns.
        if height > 0 && values.iter().all(Option::is_none) {
            if raw.trim().is_empty() {
                dropped_columns.push(name);
                continue;
            }
            blank_columns.push(name.clone());
        }
        columns.push(Column::new(name.as_str().into(), values));
    }

    if !dropped_columns.is_empty() || !blank_columns.is_empty() {
        tracing::debug!(
            path = %path.display(),
            dropped = ?dropped_columns,
            blank = ?blank_columns,
            "empty columns"
        );
    }

    let df = DataFrame::new(columns)?;
    let info = RawFileInfo {
        encoding,
        delimiter,
        rows: df.height(),
        columns: df.width(),
        dropped_rows,
        dropped_columns,
        blank_columns,
    };
    Ok((df, info))
}
