//! Filter state, price buckets, sort keys and active-filter chips.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Fixed price buckets.
///
/// Wire values match the storefront's radio controls; the longer aliases are
/// accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "all")]
    #[strum(to_string = "all")]
    All,
    #[serde(rename = "0-150", alias = "under-150")]
    #[strum(to_string = "0-150", serialize = "under-150")]
    Under150,
    #[serde(rename = "150-200", alias = "150-to-200")]
    #[strum(to_string = "150-200", serialize = "150-to-200")]
    From150To200,
    #[serde(rename = "200+", alias = "over-200")]
    #[strum(to_string = "200+", serialize = "over-200")]
    Over200,
}

impl PriceRange {
    /// Under 150 is exclusive, 150-200 inclusive at both ends, over 200 exclusive.
    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::All => true,
            Self::Under150 => price < 150.0,
            Self::From150To200 => (150.0..=200.0).contains(&price),
            Self::Over200 => price > 200.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All prices",
            Self::Under150 => "Under $150",
            Self::From150To200 => "$150 - $200",
            Self::Over200 => "Over $200",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortBy {
    /// Catalog ingestion order
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    Name,
    Rating,
}

/// Current catalog query.
///
/// An empty `categories` set means "all categories", not "none".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Always stored lowercased.
    pub search: String,
    pub categories: BTreeSet<String>,
    pub price_range: PriceRange,
    pub sort_by: SortBy,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.contains(category)
    }
}

/// Which filter a chip summarises. The string form is the removal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChipKind {
    Search,
    Categories,
    Price,
}

/// Descriptor for one non-default filter currently applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub kind: ChipKind,
    pub label: String,
}

impl FilterChip {
    pub fn new(kind: ChipKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}
