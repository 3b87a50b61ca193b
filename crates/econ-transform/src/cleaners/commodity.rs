use econ_model::{CanonicalRecord, CanonicalSet, SourceKind};
use polars::prelude::{AnyValue, DataFrame};

use super::{CleanContext, CleanOutput, StatsBuilder, require_columns};
use crate::error::Result;
use crate::normalization::{numeric_from_any, year_date_from_any};

/// Clean the global commodity price table.
///
/// Only the date and the configured index column are read. The index is
/// global, so every record has `country_code = None`.
pub fn clean_commodity(df: &DataFrame, ctx: &CleanContext<'_>) -> Result<CleanOutput> {
    let columns = &ctx.columns.commodity;
    let [date, index] = require_columns(
        SourceKind::Commodity,
        df,
        [columns.date.as_str(), columns.index.as_str()],
    )?;
    let date = df.column(&date)?;
    let index = df.column(&index)?;

    let mut set = CanonicalSet::new(SourceKind::Commodity);
    let mut stats = StatsBuilder::default();
    for idx in 0..df.height() {
        let day = year_date_from_any(date.get(idx).unwrap_or(AnyValue::Null));
        let price = numeric_from_any(index.get(idx).unwrap_or(AnyValue::Null));
        stats.row(day.is_some(), price.is_some());
        set.push(CanonicalRecord::new(None, day, price));
    }

    Ok(CleanOutput {
        set,
        stats: stats.finish(),
    })
}
