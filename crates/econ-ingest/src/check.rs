//! Ingestion check: does each expected raw file exist, and what does it hold.

use std::path::{Path, PathBuf};

use econ_common::any_to_string;
use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;

use crate::csv::{RawFileInfo, read_raw_csv};

/// Outcome of checking one raw file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RawFileStatus {
    Missing,
    Unreadable {
        message: String,
    },
    Loaded {
        info: RawFileInfo,
        headers: Vec<String>,
        /// First rows, rendered as text.
        preview: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct RawFileCheck {
    pub label: String,
    pub path: PathBuf,
    pub status: RawFileStatus,
}

impl RawFileCheck {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, RawFileStatus::Loaded { .. })
    }
}

/// Check a raw file and capture up to `preview_rows` rows.
///
/// Never fails; problems are reported in the status.
pub fn check_raw_file(label: &str, path: &Path, preview_rows: usize) -> RawFileCheck {
    let status = if !path.is_file() {
        tracing::warn!(source = label, path = %path.display(), "raw file missing");
        RawFileStatus::Missing
    } else {
        match read_raw_csv(path) {
            Ok((df, info)) => RawFileStatus::Loaded {
                headers: df
                    .get_column_names()
                    .into_iter()
                    .map(ToString::to_string)
                    .collect(),
                preview: preview_rows_of(&df, preview_rows),
                info,
            },
            Err(err) => {
                tracing::warn!(source = label, path = %path.display(), error = %err, "raw file unreadable");
                RawFileStatus::Unreadable {
                    message: err.to_string(),
                }
            }
        }
    };
    RawFileCheck {
        label: label.to_string(),
        path: path.to_path_buf(),
        status,
    }
}

fn preview_rows_of(df: &DataFrame, limit: usize) -> Vec<Vec<String>> {
    let height = df.height().min(limit);
    (0..height)
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let check = check_raw_file("wages", &dir.path().join("oecd_wages.csv"), 5);
        assert!(matches!(check.status, RawFileStatus::Missing));
        assert!(!check.is_loaded());
    }

    #[test]
    fn test_preview_is_limited() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("oecd_wages.csv");
        std::fs::write(
            &path,
            "REF_AREA,TIME_PERIOD,OBS_VALUE\nBRA,2020,110\nBRA,2021,112\nBRA,2022,115\n",
        )
        .unwrap();

        let check = check_raw_file("wages", &path, 2);
        match check.status {
            RawFileStatus::Loaded {
                info,
                headers,
                preview,
            } => {
                assert_eq!(info.rows, 3);
                assert_eq!(headers, vec!["REF_AREA", "TIME_PERIOD", "OBS_VALUE"]);
                assert_eq!(preview.len(), 2);
                assert_eq!(preview[1], vec!["BRA", "2021", "112"]);
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }
}
