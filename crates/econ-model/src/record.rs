//! Canonical and merged record types.
//!
//! Every source cleaner emits a [`CanonicalSet`]: a list of
//! `(country_code, date, value)` triples tagged with the [`SourceKind`] that
//! says which metric the `value` holds. Keeping the metric on the set rather
//! than on each record means a record can never carry two metrics.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::CountryCode;
use crate::schema;

/// One of the three harmonized inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Per-country consumer price inflation (annual %).
    Inflation,
    /// Global all-commodity price index, no country dimension.
    Commodity,
    /// Per-country wage index.
    Wages,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::Inflation, Self::Commodity, Self::Wages];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inflation => "inflation",
            Self::Commodity => "commodity",
            Self::Wages => "wages",
        }
    }

    /// Name of the metric column this source contributes to the merged output.
    pub const fn metric_column(self) -> &'static str {
        match self {
            Self::Inflation => schema::INFLATION_RATE,
            Self::Commodity => schema::COMMODITY_PRICE,
            Self::Wages => schema::WAGE_INDEX,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized observation from a single source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Resolved ISO3 code; `None` when resolution failed or the source is global.
    pub country_code: Option<CountryCode>,
    /// January 1 of the observation year; `None` when unparseable.
    pub date: Option<NaiveDate>,
    /// The source metric; `None` when unparseable.
    pub value: Option<f64>,
}

impl CanonicalRecord {
    pub fn new(country_code: Option<CountryCode>, date: Option<NaiveDate>, value: Option<f64>) -> Self {
        Self {
            country_code,
            date,
            value,
        }
    }

    /// The composite join key, present only when both parts are present.
    pub fn key(&self) -> Option<(&CountryCode, NaiveDate)> {
        match (&self.country_code, self.date) {
            (Some(code), Some(date)) => Some((code, date)),
            _ => None,
        }
    }
}

/// All canonical records produced from one raw source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSet {
    pub source: SourceKind,
    pub records: Vec<CanonicalRecord>,
}

impl CanonicalSet {
    pub fn new(source: SourceKind) -> Self {
        Self {
            source,
            records: Vec::new(),
        }
    }

    pub fn with_records(source: SourceKind, records: Vec<CanonicalRecord>) -> Self {
        Self { source, records }
    }

    pub fn push(&mut self, record: CanonicalRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }
}

/// One row of the harmonized output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub country_code: CountryCode,
    pub date: Option<NaiveDate>,
    pub inflation_rate: Option<f64>,
    pub wage_index: Option<f64>,
    pub commodity_price: Option<f64>,
}

impl MergedRecord {
    /// Value of the given metric column.
    pub fn metric(&self, source: SourceKind) -> Option<f64> {
        match source {
            SourceKind::Inflation => self.inflation_rate,
            SourceKind::Commodity => self.commodity_price,
            SourceKind::Wages => self.wage_index,
        }
    }

    /// Date rendered the way the output table stores it (`YYYY-MM-DD`).
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|date| date.format(schema::DATE_FORMAT).to_string())
    }
}
