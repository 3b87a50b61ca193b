//! Harmonization pipeline with explicit stages.
//!
//! 1. **Registry**: load the country registry (embedded or from the config)
//! 2. **Ingest**: read the three raw files
//! 3. **Clean**: turn each raw table into a canonical set
//! 4. **Merge**: join, deduplicate and apply the coverage filter
//! 5. **Output**: write the harmonized CSV
//!
//! Each stage takes the output of the previous one and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info, info_span};

use econ_ingest::{RawFileInfo, read_raw_csv};
use econ_model::{MergedRecord, SourceKind, schema};
use econ_standards::{CountryRegistry, load_country_registry};
use econ_transform::{CleanContext, CleanOutput, CleanStats, SourceColumns, clean_source};

use crate::config::PipelineConfig;
use crate::dataset::write_merged_csv;
use crate::error::{CoreError, Result};
use crate::merge::{MergeOptions, MergeOutcome, MergeReport, merge_sources};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Run every stage except writing the dataset.
    pub dry_run: bool,
}

/// What happened to one raw source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub raw: RawFileInfo,
    pub clean: CleanStats,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub sources: Vec<SourceSummary>,
    pub merge: MergeReport,
    #[serde(skip)]
    pub records: Vec<MergedRecord>,
    /// `None` on a dry run.
    pub output_path: Option<PathBuf>,
    pub output_rows: usize,
    pub output_columns: usize,
    pub duration_ms: u64,
}

/// Cleaned sources and the merge built from them.
#[derive(Debug, Clone)]
pub struct Harmonized {
    pub inflation: CleanOutput,
    pub commodity: CleanOutput,
    pub wages: CleanOutput,
    pub merged: MergeOutcome,
}

impl Harmonized {
    pub fn clean_stats(&self, kind: SourceKind) -> &CleanStats {
        match kind {
            SourceKind::Inflation => &self.inflation.stats,
            SourceKind::Commodity => &self.commodity.stats,
            SourceKind::Wages => &self.wages.stats,
        }
    }
}

// ============================================================================
// Stage 1: Registry
// ============================================================================

/// The configured registry, or the embedded ISO 3166-1 table.
pub fn load_registry(config: &PipelineConfig) -> Result<CountryRegistry> {
    let registry = match &config.country_registry {
        Some(path) => load_country_registry(path)?,
        None => CountryRegistry::iso3166()?,
    };
    debug!(countries = registry.len(), "country registry ready");
    Ok(registry)
}

// ============================================================================
// Stage 2: Ingest
// ============================================================================

/// Read the raw file for `kind`.
pub fn ingest_source(config: &PipelineConfig, kind: SourceKind) -> Result<(DataFrame, RawFileInfo)> {
    let path = config.source_path(kind);
    let span = info_span!("ingest", source = %kind, path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let (df, info) = read_raw_csv(&path).map_err(|source| CoreError::Ingest {
        kind,
        path: path.clone(),
        source,
    })?;
    info!(
        rows = info.rows,
        columns = info.columns,
        encoding = info.encoding.as_str(),
        duration_ms = start.elapsed().as_millis(),
        "source ingested"
    );
    Ok((df, info))
}

// ============================================================================
// Stages 3 and 4: Clean and Merge
// ============================================================================

/// Clean three in-memory tables and merge them.
pub fn harmonize_frames(
    inflation: &DataFrame,
    commodity: &DataFrame,
    wages: &DataFrame,
    registry: &CountryRegistry,
    columns: &SourceColumns,
    options: &MergeOptions,
) -> Result<Harmonized> {
    let ctx = CleanContext::new(registry, columns);
    let inflation = clean_source(SourceKind::Inflation, inflation, &ctx)?;
    let commodity = clean_source(SourceKind::Commodity, commodity, &ctx)?;
    let wages = clean_source(SourceKind::Wages, wages, &ctx)?;

    let merged = info_span!("merge").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let merged = merge_sources(&inflation.set, &commodity.set, &wages.set, options)?;
        debug!(
            min_observations = options.min_observations,
            commodity_duplicates = %options.commodity_duplicates,
            duration_ms = start.elapsed().as_millis(),
            "merge stage complete"
        );
        Ok(merged)
    })?;

    Ok(Harmonized {
        inflation,
        commodity,
        wages,
        merged,
    })
}

// ============================================================================
// Full run
// ============================================================================

/// Run every stage for `config`.
pub fn run_pipeline(config: &PipelineConfig, options: RunOptions) -> Result<PipelineOutcome> {
    let span = info_span!("harmonize", raw_dir = %config.raw_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let registry = load_registry(config)?;

    let (inflation_df, inflation_info) = ingest_source(config, SourceKind::Inflation)?;
    let (commodity_df, commodity_info) = ingest_source(config, SourceKind::Commodity)?;
    let (wages_df, wages_info) = ingest_source(config, SourceKind::Wages)?;

    let harmonized = harmonize_frames(
        &inflation_df,
        &commodity_df,
        &wages_df,
        &registry,
        &config.columns,
        &config.merge,
    )?;

    let sources = [
        (SourceKind::Inflation, inflation_info),
        (SourceKind::Commodity, commodity_info),
        (SourceKind::Wages, wages_info),
    ]
    .into_iter()
    .map(|(kind, raw)| SourceSummary {
        kind,
        path: config.source_path(kind),
        clean: harmonized.clean_stats(kind).clone(),
        raw,
    })
    .collect();

    let MergeOutcome { records, report } = harmonized.merged;
    let output_path = if options.dry_run {
        info!("dry run; dataset not written");
        None
    } else {
        let path = config.output_path();
        info_span!("output").in_scope(|| write_merged_csv(&records, &path))?;
        Some(path)
    };

    let outcome = PipelineOutcome {
        sources,
        merge: report,
        output_rows: records.len(),
        output_columns: schema::OUTPUT_COLUMNS.len(),
        records,
        output_path,
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    info!(
        output_rows = outcome.output_rows,
        duration_ms = outcome.duration_ms,
        "pipeline complete"
    );
    Ok(outcome)
}

/// Write the run report as pretty JSON.
pub fn write_run_report(outcome: &PipelineOutcome, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| CoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
