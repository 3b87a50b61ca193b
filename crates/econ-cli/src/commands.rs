use anyhow::{Context, Result};
use tracing::{info, info_span};

use econ_core::{PipelineConfig, RunOptions, load_registry, run_pipeline, write_run_report};
use econ_ingest::check_raw_file;
use econ_model::SourceKind;

use crate::cli::{CountriesArgs, HarmonizeArgs, InspectArgs, SourceArgs};
use crate::types::{CountriesResult, HarmonizeResult, InspectResult, Resolution};

/// Configuration from `--config` (or defaults) with `--raw-dir` applied.
pub fn load_config(args: &SourceArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(raw_dir) = &args.raw_dir {
        config.raw_dir = raw_dir.clone();
    }
    Ok(config)
}

/// Pipeline configuration for a `harmonize` run; flags override the file.
pub fn harmonize_config(args: &HarmonizeArgs) -> Result<PipelineConfig> {
    let mut config = load_config(&args.source)?;
    if let Some(dir) = &args.processed_dir {
        config.processed_dir = dir.clone();
    }
    if let Some(name) = &args.output_file {
        config.output_file = name.clone();
    }
    if let Some(min) = args.min_observations {
        config.merge.min_observations = min;
    }
    if let Some(policy) = args.commodity_duplicates {
        config.merge.commodity_duplicates = policy.into();
    }
    Ok(config)
}

pub fn run_harmonize(args: &HarmonizeArgs) -> Result<HarmonizeResult> {
    let config = harmonize_config(args)?;
    let options = RunOptions {
        dry_run: args.dry_run,
    };
    let outcome = run_pipeline(&config, options).context("harmonize sources")?;
    if let Some(path) = &args.report {
        write_run_report(&outcome, path)
            .with_context(|| format!("write run report {}", path.display()))?;
        info!(path = %path.display(), "run report written");
    }
    Ok(HarmonizeResult {
        outcome,
        min_observations: config.merge.min_observations,
        report_path: args.report.clone(),
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let config = load_config(&args.source)?;
    let span = info_span!("inspect", raw_dir = %config.raw_dir.display());
    let _guard = span.enter();
    let checks = SourceKind::ALL
        .iter()
        .map(|kind| check_raw_file(kind.as_str(), &config.source_path(*kind), args.rows))
        .collect();
    Ok(InspectResult {
        raw_dir: config.raw_dir,
        checks,
    })
}

pub fn run_countries(args: &CountriesArgs) -> Result<CountriesResult> {
    let config = PipelineConfig {
        country_registry: args.registry.clone(),
        ..PipelineConfig::default()
    };
    let registry = load_registry(&config).context("load country registry")?;
    if args.names.is_empty() {
        return Ok(CountriesResult::Listing(registry.countries().to_vec()));
    }
    let resolved = args
        .names
        .iter()
        .map(|name| Resolution {
            query: name.clone(),
            country: registry.lookup(name).cloned(),
        })
        .collect();
    Ok(CountriesResult::Resolved(resolved))
}
