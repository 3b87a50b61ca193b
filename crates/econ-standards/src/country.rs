//! Country registry and free-text country resolution.
//!
//! A [`CountryRegistry`] indexes every entry under each of its identifiers
//! (alpha-2, alpha-3, numeric code, short name, official name, common name).
//! Lookups trim the input and compare case-insensitively; there is no fuzzy
//! matching. A key that more than one entry claims is ambiguous and resolves
//! to nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use econ_model::CountryCode;

/// One ISO 3166-1 entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub alpha_2: String,
    pub alpha_3: CountryCode,
    pub numeric: String,
    pub name: String,
    pub official_name: Option<String>,
    pub common_name: Option<String>,
}

impl Country {
    /// Every identifier this entry answers to.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.alpha_2.as_str()),
            Some(self.alpha_3.as_str()),
            Some(self.numeric.as_str()),
            Some(self.name.as_str()),
            self.official_name.as_deref(),
            self.common_name.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Unique(usize),
    Ambiguous,
}

/// Immutable set of countries with a case-insensitive identifier index.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    countries: Vec<Country>,
    index: HashMap<String, Slot>,
}

impl CountryRegistry {
    pub fn new(countries: Vec<Country>) -> Self {
        let mut index: HashMap<String, Slot> = HashMap::new();
        for (position, country) in countries.iter().enumerate() {
            for identifier in country.identifiers() {
                let key = normalize_key(identifier);
                if key.is_empty() {
                    continue;
                }
                index
                    .entry(key)
                    .and_modify(|slot| {
                        if *slot != Slot::Unique(position) {
                            *slot = Slot::Ambiguous;
                        }
                    })
                    .or_insert(Slot::Unique(position));
            }
        }
        Self { countries, index }
    }

    /// Look up the entry a free-text name or code refers to.
    pub fn lookup(&self, name: &str) -> Option<&Country> {
        let key = normalize_key(name);
        if key.is_empty() {
            return None;
        }
        match self.index.get(&key) {
            Some(Slot::Unique(position)) => self.countries.get(*position),
            Some(Slot::Ambiguous) => {
                tracing::debug!(name, "ambiguous country identifier");
                None
            }
            None => None,
        }
    }

    /// Resolve a possibly-missing name to its ISO3 code.
    ///
    /// Never fails: null, blank, aggregates ("World") and unknown names all
    /// give `None`.
    pub fn resolve(&self, name: Option<&str>) -> Option<CountryCode> {
        name.and_then(|value| self.lookup(value))
            .map(|country| country.alpha_3.clone())
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Resolve a free-text country name against `registry`.
pub fn resolve_country(registry: &CountryRegistry, name: Option<&str>) -> Option<CountryCode> {
    registry.resolve(name)
}

fn normalize_key(value: &str) -> String {
    let trimmed = value.trim();
    // Numeric codes are stored zero-padded ("076").
    if !trimmed.is_empty() && trimmed.len() < 3 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return format!("{trimmed:0>3}");
    }
    trimmed.to_uppercase()
}
