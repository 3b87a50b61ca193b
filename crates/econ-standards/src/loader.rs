//! Country registry loading from CSV.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde::Deserialize;

use econ_model::CountryCode;

use crate::country::{Country, CountryRegistry};
use crate::embedded::{ISO_3166_COUNTRIES, ISO_3166_ORIGIN};
use crate::error::{Result, StandardsError};

#[derive(Debug, Deserialize)]
struct CountryRow {
    alpha_2: String,
    alpha_3: String,
    numeric: String,
    name: String,
    #[serde(default)]
    official_name: Option<String>,
    #[serde(default)]
    common_name: Option<String>,
}

impl CountryRegistry {
    /// The ISO 3166-1 snapshot compiled into this crate.
    pub fn iso3166() -> Result<Self> {
        parse_country_registry(ISO_3166_COUNTRIES.as_bytes(), Path::new(ISO_3166_ORIGIN))
    }
}

/// Load a registry from a CSV file with the embedded table's columns.
pub fn load_country_registry(path: &Path) -> Result<CountryRegistry> {
    if !path.exists() {
        return Err(StandardsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|e| StandardsError::CsvRead {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let registry = parse_country_registry(file, path)?;
    tracing::info!(
        path = %path.display(),
        countries = registry.len(),
        "loaded country registry"
    );
    Ok(registry)
}

/// Parse registry rows from any reader. `origin` labels errors.
pub fn parse_country_registry<R: Read>(reader: R, origin: &Path) -> Result<CountryRegistry> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut countries = Vec::new();
    for row in reader.deserialize::<CountryRow>() {
        let row = row.map_err(|source| StandardsError::CsvRead {
            path: origin.to_path_buf(),
            source,
        })?;
        countries.push(country_from_row(row, origin)?);
    }

    if countries.is_empty() {
        return Err(StandardsError::Empty {
            path: origin.to_path_buf(),
        });
    }
    Ok(CountryRegistry::new(countries))
}

fn country_from_row(row: CountryRow, origin: &Path) -> Result<Country> {
    let alpha_3 = CountryCode::new(&row.alpha_3).map_err(|source| StandardsError::InvalidValue {
        field: "alpha_3",
        value: row.alpha_3.clone(),
        file: PathBuf::from(origin),
        source,
    })?;
    Ok(Country {
        alpha_2: row.alpha_2.to_uppercase(),
        alpha_3,
        numeric: row.numeric,
        name: row.name,
        official_name: row.official_name.filter(|v| !v.is_empty()),
        common_name: row.common_name.filter(|v| !v.is_empty()),
    })
}
