//! Multi-source merge with deduplication and a coverage filter.
//!
//! Steps, in order:
//! 1. Left join of inflation (anchor) with wages on `(country_code, date)`.
//!    A key matches only when both parts are present on both sides; several
//!    wage matches fan out into several rows, in wage order.
//! 2. Commodity values are looked up by date alone.
//! 3. Exact duplicate rows are removed. Remaining `(country_code, date)`
//!    collisions keep the row whose metrics sort first, so the result does
//!    not depend on input order.
//! 4. Rows without a country are dropped, and countries with too few distinct
//!    dates are removed entirely.
//!
//! Output keeps join order; a collision winner takes the slot of the first
//! row with its key.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use econ_model::{CanonicalRecord, CanonicalSet, CountryCode, MergedRecord, SourceKind};

/// Countries need strictly more distinct dates than this to be kept.
pub const DEFAULT_MIN_OBSERVATIONS: usize = 3;

/// What to do when the commodity index lists one date with different values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateDatePolicy {
    /// Refuse to merge.
    #[default]
    Fail,
    /// Use the mean of all values for that date.
    Mean,
}

impl DuplicateDatePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Mean => "mean",
        }
    }
}

impl fmt::Display for DuplicateDatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeOptions {
    pub min_observations: usize,
    pub commodity_duplicates: DuplicateDatePolicy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            commodity_duplicates: DuplicateDatePolicy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MergeError {
    /// A canonical set was passed in the wrong position.
    #[error("expected {expected} records, got {found} records")]
    WrongSource {
        expected: SourceKind,
        found: SourceKind,
    },

    /// The commodity index has two different values for one date.
    #[error("commodity index has conflicting values for {date}: {first} and {second}")]
    DuplicateCommodityDate {
        date: NaiveDate,
        first: f64,
        second: f64,
    },
}

/// Row counts for each merge step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub inflation_rows: usize,
    pub wage_rows: usize,
    pub commodity_rows: usize,
    /// Rows after the inflation/wage join, fan-out included.
    pub joined_rows: usize,
    /// Joined rows that found a wage observation.
    pub wage_matches: usize,
    /// Distinct dates in the commodity lookup.
    pub commodity_dates: usize,
    /// Commodity dates whose differing values were averaged.
    pub commodity_dates_averaged: usize,
    pub exact_duplicates_removed: usize,
    pub key_collisions_removed: usize,
    pub null_country_rows_removed: usize,
    pub countries_retained: usize,
    /// Countries removed by the coverage filter, sorted.
    pub countries_dropped: Vec<CountryCode>,
    pub coverage_rows_removed: usize,
    pub output_rows: usize,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub records: Vec<MergedRecord>,
    pub report: MergeReport,
}

#[derive(Debug, Clone, PartialEq)]
struct JoinedRow {
    country_code: Option<CountryCode>,
    date: Option<NaiveDate>,
    inflation_rate: Option<f64>,
    wage_index: Option<f64>,
    commodity_price: Option<f64>,
}

type RowIdentity = (
    Option<CountryCode>,
    Option<NaiveDate>,
    Option<u64>,
    Option<u64>,
    Option<u64>,
);

impl JoinedRow {
    /// All five fields, floats by bit pattern.
    fn identity(&self) -> RowIdentity {
        (
            self.country_code.clone(),
            self.date,
            self.inflation_rate.map(f64::to_bits),
            self.wage_index.map(f64::to_bits),
            self.commodity_price.map(f64::to_bits),
        )
    }

    /// Total order on the metric fields: inflation, then wage, then
    /// commodity. Present values come before missing ones and compare by
    /// [`f64::total_cmp`].
    fn metric_order(&self, other: &Self) -> Ordering {
        fn field(a: Option<f64>, b: Option<f64>) -> Ordering {
            match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
        field(self.inflation_rate, other.inflation_rate)
            .then_with(|| field(self.wage_index, other.wage_index))
            .then_with(|| field(self.commodity_price, other.commodity_price))
    }
}

/// Merge the three canonical sets into the harmonized dataset.
pub fn merge_sources(
    inflation: &CanonicalSet,
    commodity: &CanonicalSet,
    wages: &CanonicalSet,
    options: &MergeOptions,
) -> Result<MergeOutcome, MergeError> {
    expect_source(inflation, SourceKind::Inflation)?;
    expect_source(commodity, SourceKind::Commodity)?;
    expect_source(wages, SourceKind::Wages)?;

    let mut report = MergeReport {
        inflation_rows: inflation.len(),
        wage_rows: wages.len(),
        commodity_rows: commodity.len(),
        ..MergeReport::default()
    };

    let commodity_by_date = commodity_lookup(commodity, options.commodity_duplicates, &mut report)?;

    let mut rows = join_wages(inflation, wages, &mut report);
    for row in &mut rows {
        row.commodity_price = row.date.and_then(|date| commodity_by_date.get(&date).copied());
    }

    let rows = remove_duplicates(rows, &mut report);
    let rows = apply_coverage(rows, options.min_observations, &mut report);

    let records: Vec<MergedRecord> = rows
        .into_iter()
        .filter_map(|row| {
            Some(MergedRecord {
                country_code: row.country_code?,
                date: row.date,
                inflation_rate: row.inflation_rate,
                wage_index: row.wage_index,
                commodity_price: row.commodity_price,
            })
        })
        .collect();
    report.output_rows = records.len();

    info!(
        joined_rows = report.joined_rows,
        output_rows = report.output_rows,
        countries_retained = report.countries_retained,
        countries_dropped = report.countries_dropped.len(),
        "merge complete"
    );
    Ok(MergeOutcome { records, report })
}

fn expect_source(set: &CanonicalSet, expected: SourceKind) -> Result<(), MergeError> {
    if set.source == expected {
        Ok(())
    } else {
        Err(MergeError::WrongSource {
            expected,
            found: set.source,
        })
    }
}

fn commodity_lookup(
    commodity: &CanonicalSet,
    policy: DuplicateDatePolicy,
    report: &mut MergeReport,
) -> Result<HashMap<NaiveDate, f64>, MergeError> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for record in commodity.iter() {
        // A missing value adds nothing to the lookup.
        if let (Some(date), Some(value)) = (record.date, record.value) {
            by_date.entry(date).or_default().push(value);
        }
    }

    let mut lookup = HashMap::with_capacity(by_date.len());
    for (date, values) in by_date {
        let first = values[0];
        let conflict = values.iter().copied().find(|v| v.to_bits() != first.to_bits());
        let value = match (conflict, policy) {
            (None, _) => first,
            (Some(second), DuplicateDatePolicy::Fail) => {
                return Err(MergeError::DuplicateCommodityDate {
                    date,
                    first,
                    second,
                });
            }
            (Some(_), DuplicateDatePolicy::Mean) => {
                report.commodity_dates_averaged += 1;
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                debug!(%date, values = values.len(), mean, "averaged commodity values");
                mean
            }
        };
        lookup.insert(date, value);
    }
    report.commodity_dates = lookup.len();
    Ok(lookup)
}

fn join_wages(inflation: &CanonicalSet, wages: &CanonicalSet, report: &mut MergeReport) -> Vec<JoinedRow> {
    let mut wage_index: HashMap<(&CountryCode, NaiveDate), Vec<&CanonicalRecord>> = HashMap::new();
    for record in wages.iter() {
        if let Some(key) = record.key() {
            wage_index.entry(key).or_default().push(record);
        }
    }

    let mut rows = Vec::with_capacity(inflation.len());
    for record in inflation.iter() {
        let matches = record.key().and_then(|key| wage_index.get(&key));
        let base = JoinedRow {
            country_code: record.country_code.clone(),
            date: record.date,
            inflation_rate: record.value,
            wage_index: None,
            commodity_price: None,
        };
        match matches {
            Some(matched) => {
                report.wage_matches += matched.len();
                for wage in matched {
                    rows.push(JoinedRow {
                        wage_index: wage.value,
                        ..base.clone()
                    });
                }
            }
            None => rows.push(base),
        }
    }
    report.joined_rows = rows.len();
    rows
}

fn remove_duplicates(rows: Vec<JoinedRow>, report: &mut MergeReport) -> Vec<JoinedRow> {
    let mut seen_rows: HashSet<RowIdentity> = HashSet::new();
    let mut slots: HashMap<(CountryCode, Option<NaiveDate>), usize> = HashMap::new();
    let mut kept: Vec<JoinedRow> = Vec::with_capacity(rows.len());

    for row in rows {
        if !seen_rows.insert(row.identity()) {
            report.exact_duplicates_removed += 1;
            continue;
        }
        let Some(code) = row.country_code.clone() else {
            kept.push(row);
            continue;
        };
        match slots.entry((code, row.date)) {
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(row);
            }
            Entry::Occupied(slot) => {
                report.key_collisions_removed += 1;
                let current = &mut kept[*slot.get()];
                debug!(
                    country_code = %slot.key().0,
                    date = ?row.date,
                    "resolving rows that share a country/date"
                );
                if row.metric_order(current) == Ordering::Less {
                    *current = row;
                }
            }
        }
    }

    if report.key_collisions_removed > 0 {
        warn!(
            rows = report.key_collisions_removed,
            "conflicting rows for the same country and date; kept the lowest values of each"
        );
    }
    kept
}

fn apply_coverage(rows: Vec<JoinedRow>, min_observations: usize, report: &mut MergeReport) -> Vec<JoinedRow> {
    let before = rows.len();
    let rows: Vec<JoinedRow> = rows.into_iter().filter(|row| row.country_code.is_some()).collect();
    report.null_country_rows_removed = before - rows.len();

    let mut dates: BTreeMap<&CountryCode, BTreeSet<NaiveDate>> = BTreeMap::new();
    for row in &rows {
        if let Some(code) = &row.country_code {
            let entry = dates.entry(code).or_default();
            if let Some(date) = row.date {
                entry.insert(date);
            }
        }
    }

    let retained: HashSet<CountryCode> = dates
        .iter()
        .filter(|(_, observed)| observed.len() > min_observations)
        .map(|(code, _)| (*code).clone())
        .collect();
    let dropped: Vec<CountryCode> = dates
        .keys()
        .filter(|code| !retained.contains(**code))
        .map(|code| (*code).clone())
        .collect();

    report.countries_retained = retained.len();
    if !dropped.is_empty() {
        debug!(countries = ?dropped, min_observations, "countries below coverage threshold");
    }
    report.countries_dropped = dropped;

    let before = rows.len();
    let kept: Vec<JoinedRow> = rows
        .into_iter()
        .filter(|row| row.country_code.as_ref().is_some_and(|code| retained.contains(code)))
        .collect();
    report.coverage_rows_removed = before - kept.len();
    kept
}
