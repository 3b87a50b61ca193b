//! Pipeline configuration.
//!
//! Every field has a default, so an empty TOML file (or none at all) runs the
//! pipeline against `data/raw` and `data/processed`.
//!
//! ```toml
//! raw_dir = "data/raw"
//! output_file = "cleaned_global_data.csv"
//!
//! [columns.commodity]
//! index = "All Commodity Price Index"
//!
//! [merge]
//! min_observations = 3
//! commodity_duplicates = "fail"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use econ_model::SourceKind;
use econ_transform::SourceColumns;

use crate::error::{CoreError, Result};
use crate::merge::MergeOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub inflation_file: String,
    pub commodity_file: String,
    pub wages_file: String,
    pub output_file: String,
    /// CSV replacing the embedded ISO 3166-1 registry.
    pub country_registry: Option<PathBuf>,
    pub columns: SourceColumns,
    pub merge: MergeOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            processed_dir: PathBuf::from("data/processed"),
            inflation_file: "worldbank_inflation.csv".to_string(),
            commodity_file: "imf_commodity_price.csv".to_string(),
            wages_file: "oecd_wages.csv".to_string(),
            output_file: "cleaned_global_data.csv".to_string(),
            country_registry: None,
            columns: SourceColumns::default(),
            merge: MergeOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a TOML file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Parse TOML text. `origin` labels errors.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| CoreError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn source_file(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Inflation => &self.inflation_file,
            SourceKind::Commodity => &self.commodity_file,
            SourceKind::Wages => &self.wages_file,
        }
    }

    /// Location of the raw file for `kind`.
    pub fn source_path(&self, kind: SourceKind) -> PathBuf {
        self.raw_dir.join(self.source_file(kind))
    }

    pub fn output_path(&self) -> PathBuf {
        self.processed_dir.join(&self.output_file)
    }
}
