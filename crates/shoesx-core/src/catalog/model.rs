//! Catalog product records and their typed ingestion.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fit score assumed when a product does not declare one.
pub const DEFAULT_FIT_SCORE: u32 = 90;

/// Opaque handle to the presentation element that renders a product.
///
/// The engine never looks inside; it only reports which handles should be
/// shown or hidden after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef(pub usize);

/// Read-only snapshot of one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub element: ElementRef,
    pub name: String,
    pub price: f64,
    pub category: String,
    /// 0.0 ..= 5.0
    pub rating: f64,
    pub sizes: String,
    pub colors: String,
    pub description: String,
    pub image: String,
    pub fit_score: u32,
}

impl ProductRecord {
    /// Parses the raw string attributes rendered for a product card.
    ///
    /// Recognised keys: `name`, `price`, `category`, `rating`, `sizes`,
    /// `colors`, `description`, `image`, `fitScore`. Missing text fields become
    /// empty, a missing or unparseable price or rating becomes 0, and a missing
    /// or unparseable fit score becomes [`DEFAULT_FIT_SCORE`].
    pub fn from_dataset(element: ElementRef, dataset: &HashMap<String, String>) -> Self {
        let text = |key: &str| dataset.get(key).map(|v| v.trim().to_string()).unwrap_or_default();

        let price = dataset
            .get("price")
            .and_then(|raw| parse_number(raw.trim().trim_start_matches('$')))
            .filter(|price| *price >= 0.0)
            .unwrap_or(0.0);

        let rating = dataset
            .get("rating")
            .and_then(|raw| parse_number(raw))
            .map(|rating| rating.clamp(0.0, 5.0))
            .unwrap_or(0.0);

        let fit_score = dataset
            .get("fitScore")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_FIT_SCORE);

        Self {
            element,
            name: text("name"),
            price,
            category: text("category"),
            rating,
            sizes: text("sizes"),
            colors: text("colors"),
            description: text("description"),
            image: text("image"),
            fit_score,
        }
    }

    /// Case-insensitive match of an already-lowercased needle against
    /// name, description or category.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite())
}
