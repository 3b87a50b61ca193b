use econ_common::any_to_text;
use econ_model::CountryCode;
use econ_standards::CountryRegistry;
use polars::prelude::AnyValue;

/// Resolve a cell holding a country name or code.
///
/// Numeric cells are read as ISO numeric codes (`76` resolves to BRA).
pub fn resolve_country_any(registry: &CountryRegistry, value: AnyValue<'_>) -> Option<CountryCode> {
    registry.resolve(any_to_text(value).as_deref())
}
