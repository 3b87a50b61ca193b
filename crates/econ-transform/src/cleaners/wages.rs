use econ_common::any_to_text;
use econ_model::{CanonicalRecord, CanonicalSet, SourceKind};
use polars::prelude::{AnyValue, DataFrame};

use super::{CleanContext, CleanOutput, StatsBuilder, require_columns};
use crate::error::Result;
use crate::normalization::{numeric_from_any, resolve_country_any, year_date_from_any};

/// Clean the wage index table (`REF_AREA`, `TIME_PERIOD`, `OBS_VALUE`).
///
/// Region codes go through the same resolver as country names, so OECD
/// aggregates such as `OECD` or `EA20` end up without a country code.
pub fn clean_wages(df: &DataFrame, ctx: &CleanContext<'_>) -> Result<CleanOutput> {
    let columns = &ctx.columns.wages;
    let [region, period, value] = require_columns(
        SourceKind::Wages,
        df,
        [
            columns.region.as_str(),
            columns.period.as_str(),
            columns.value.as_str(),
        ],
    )?;
    let region = df.column(&region)?;
    let period = df.column(&period)?;
    let value = df.column(&value)?;

    let mut set = CanonicalSet::new(SourceKind::Wages);
    let mut stats = StatsBuilder::default();
    for idx in 0..df.height() {
        let region_cell = region.get(idx).unwrap_or(AnyValue::Null);
        let code = resolve_country_any(ctx.registry, region_cell.clone());
        if code.is_none() {
            stats.unresolved(any_to_text(region_cell));
        }
        let date = year_date_from_any(period.get(idx).unwrap_or(AnyValue::Null));
        let index = numeric_from_any(value.get(idx).unwrap_or(AnyValue::Null));
        stats.row(date.is_some(), index.is_some());
        set.push(CanonicalRecord::new(code, date, index));
    }

    Ok(CleanOutput {
        set,
        stats: stats.finish(),
    })
}
