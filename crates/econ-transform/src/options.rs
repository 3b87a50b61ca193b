//! Column mappings for each raw source.
//!
//! Names are matched case-insensitively against the table headers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InflationColumns {
    pub country: String,
    pub year: String,
    pub value: String,
}

impl Default for InflationColumns {
    fn default() -> Self {
        Self {
            country: "country".to_string(),
            year: "year".to_string(),
            value: "inflation_rate".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommodityColumns {
    pub date: String,
    /// The single index series kept from the commodity table.
    pub index: String,
}

impl Default for CommodityColumns {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            index: "All Commodity Price Index".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WageColumns {
    pub region: String,
    pub period: String,
    pub value: String,
}

impl Default for WageColumns {
    fn default() -> Self {
        Self {
            region: "REF_AREA".to_string(),
            period: "TIME_PERIOD".to_string(),
            value: "OBS_VALUE".to_string(),
        }
    }
}

/// Column mappings for all three sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceColumns {
    pub inflation: InflationColumns,
    pub commodity: CommodityColumns,
    pub wages: WageColumns,
}
