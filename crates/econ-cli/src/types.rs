use std::path::PathBuf;

use econ_core::PipelineOutcome;
use econ_ingest::RawFileCheck;
use econ_standards::Country;

#[derive(Debug)]
pub struct HarmonizeResult {
    pub outcome: PipelineOutcome,
    pub min_observations: usize,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InspectResult {
    pub raw_dir: PathBuf,
    pub checks: Vec<RawFileCheck>,
}

impl InspectResult {
    pub fn all_loaded(&self) -> bool {
        self.checks.iter().all(RawFileCheck::is_loaded)
    }
}

/// How one queried name resolved.
#[derive(Debug)]
pub struct Resolution {
    pub query: String,
    pub country: Option<Country>,
}

#[derive(Debug)]
pub enum CountriesResult {
    /// No names given: the whole registry.
    Listing(Vec<Country>),
    Resolved(Vec<Resolution>),
}
