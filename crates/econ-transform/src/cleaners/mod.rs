//! Per-source cleaners.
//!
//! Each cleaner turns one raw table into a [`CanonicalSet`] of the same length:
//! rows are never dropped here, only their unusable parts nulled. The
//! cleaner for a source is picked by [`SourceKind`] in [`clean_source`].

mod commodity;
mod inflation;
mod wages;

use std::collections::BTreeSet;
use std::time::Instant;

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info_span;

use econ_model::{CanonicalSet, HeaderLookup, SourceKind};
use econ_standards::CountryRegistry;

use crate::error::{Result, TransformError};
use crate::options::SourceColumns;

pub use commodity::clean_commodity;
pub use inflation::clean_inflation;
pub use wages::clean_wages;

/// Shared inputs for every cleaner.
#[derive(Debug, Clone, Copy)]
pub struct CleanContext<'a> {
    pub registry: &'a CountryRegistry,
    pub columns: &'a SourceColumns,
}

impl<'a> CleanContext<'a> {
    pub fn new(registry: &'a CountryRegistry, columns: &'a SourceColumns) -> Self {
        Self { registry, columns }
    }
}

/// Data-quality counts for one cleaned source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub rows: usize,
    pub unresolved_countries: usize,
    pub null_dates: usize,
    pub null_values: usize,
    /// Distinct country labels that did not resolve, sorted.
    pub unresolved_names: Vec<String>,
}

/// A cleaned source and its statistics.
#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub set: CanonicalSet,
    pub stats: CleanStats,
}

/// Clean `df` with the cleaner for `kind`.
pub fn clean_source(kind: SourceKind, df: &DataFrame, ctx: &CleanContext<'_>) -> Result<CleanOutput> {
    let span = info_span!("clean", source = %kind, rows = df.height());
    let _guard = span.enter();
    let start = Instant::now();

    let output = match kind {
        SourceKind::Inflation => clean_inflation(df, ctx)?,
        SourceKind::Commodity => clean_commodity(df, ctx)?,
        SourceKind::Wages => clean_wages(df, ctx)?,
    };

    let stats = &output.stats;
    if stats.unresolved_countries > 0 {
        tracing::debug!(
            unresolved = stats.unresolved_countries,
            names = ?stats.unresolved_names,
            "country labels without an ISO3 code"
        );
    }
    tracing::info!(
        rows = stats.rows,
        unresolved_countries = stats.unresolved_countries,
        null_dates = stats.null_dates,
        null_values = stats.null_values,
        duration_ms = start.elapsed().as_millis(),
        "source cleaned"
    );
    Ok(output)
}

/// Resolve the configured column names to the table's own spelling.
fn require_columns<const N: usize>(
    kind: SourceKind,
    df: &DataFrame,
    wanted: [&str; N],
) -> Result<[String; N]> {
    let headers: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let lookup = HeaderLookup::new(&headers);

    let mut resolved: [String; N] = std::array::from_fn(|_| String::new());
    for (slot, name) in resolved.iter_mut().zip(wanted) {
        match lookup.get(name) {
            Some(actual) => *slot = actual.to_string(),
            None => {
                return Err(TransformError::MissingColumn {
                    kind,
                    column: name.to_string(),
                    available: headers,
                });
            }
        }
    }
    Ok(resolved)
}

/// Accumulates [`CleanStats`] while a cleaner walks its rows.
#[derive(Debug, Default)]
struct StatsBuilder {
    stats: CleanStats,
    unresolved: BTreeSet<String>,
}

impl StatsBuilder {
    fn row(&mut self, has_date: bool, has_value: bool) {
        self.stats.rows += 1;
        if !has_date {
            self.stats.null_dates += 1;
        }
        if !has_value {
            self.stats.null_values += 1;
        }
    }

    fn unresolved(&mut self, label: Option<String>) {
        self.stats.unresolved_countries += 1;
        if let Some(label) = label {
            self.unresolved.insert(label);
        }
    }

    fn finish(mut self) -> CleanStats {
        self.stats.unresolved_names = self.unresolved.into_iter().collect();
        self.stats
    }
}
