//! Initial filter values supplied through the page URL.

use std::str::FromStr;

use url::form_urlencoded;

use super::filter::PriceRange;

/// `category`, `price` and `search` parameters as they arrived.
///
/// Values are decoded (`+` becomes a space) but not yet validated against
/// the catalog. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialQuery {
    pub category: Option<String>,
    pub price: Option<String>,
    pub search: Option<String>,
}

impl InitialQuery {
    /// Parses a query string with or without the leading `?`.
    /// The first occurrence of a repeated key wins.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        let query = query.trim().trim_start_matches('?');

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                "category" => &mut parsed.category,
                "price" => &mut parsed.price,
                "search" => &mut parsed.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        parsed
    }

    /// The category in catalog casing, e.g. `running` -> `Running`.
    pub fn normalized_category(&self) -> Option<String> {
        self.category.as_deref().map(normalize_category)
    }

    /// The price bucket if it names one; unknown buckets are dropped.
    pub fn price_range(&self) -> Option<PriceRange> {
        let raw = self.price.as_deref()?;
        match PriceRange::from_str(raw) {
            Ok(range) => Some(range),
            Err(_) => {
                tracing::debug!("[Catalog] Ignoring unknown price parameter '{}'", raw);
                None
            }
        }
    }

    /// The search text, lowercased for matching.
    pub fn search_text(&self) -> Option<String> {
        self.search.as_deref().map(str::to_lowercase)
    }
}

/// Uppercases the first character and lowercases the rest.
pub fn normalize_category(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
