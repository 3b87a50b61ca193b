use econ_common::any_to_text;
use econ_model::{CanonicalRecord, CanonicalSet, SourceKind};
use polars::prelude::{AnyValue, DataFrame};

use super::{CleanContext, CleanOutput, StatsBuilder, require_columns};
use crate::error::Result;
use crate::normalization::{numeric_from_any, resolve_country_any, year_date_from_any};

/// Clean the per-country inflation table (`country`, `year`, `inflation_rate`).
pub fn clean_inflation(df: &DataFrame, ctx: &CleanContext<'_>) -> Result<CleanOutput> {
    let columns = &ctx.columns.inflation;
    let [country, year, value] = require_columns(
        SourceKind::Inflation,
        df,
        [
            columns.country.as_str(),
            columns.year.as_str(),
            columns.value.as_str(),
        ],
    )?;
    let country = df.column(&country)?;
    let year = df.column(&year)?;
    let value = df.column(&value)?;

    let mut set = CanonicalSet::new(SourceKind::Inflation);
    let mut stats = StatsBuilder::default();
    for idx in 0..df.height() {
        let country_cell = country.get(idx).unwrap_or(AnyValue::Null);
        let code = resolve_country_any(ctx.registry, country_cell.clone());
        if code.is_none() {
            stats.unresolved(any_to_text(country_cell));
        }
        let date = year_date_from_any(year.get(idx).unwrap_or(AnyValue::Null));
        let rate = numeric_from_any(value.get(idx).unwrap_or(AnyValue::Null));
        stats.row(date.is_some(), rate.is_some());
        set.push(CanonicalRecord::new(code, date, rate));
    }

    Ok(CleanOutput {
        set,
        stats: stats.finish(),
    })
}
