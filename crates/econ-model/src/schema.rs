//! Column names of the harmonized output table.

pub const COUNTRY_CODE: &str = "country_code";
pub const DATE: &str = "date";
pub const INFLATION_RATE: &str = "inflation_rate";
pub const WAGE_INDEX: &str = "wage_index";
pub const COMMODITY_PRICE: &str = "commodity_price";

/// Output column order.
pub const OUTPUT_COLUMNS: [&str; 5] = [
    COUNTRY_CODE,
    DATE,
    INFLATION_RATE,
    WAGE_INDEX,
    COMMODITY_PRICE,
];

/// `chrono` format for the year-anchored `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
