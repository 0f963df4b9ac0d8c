use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use shoesx_core::catalog::{CatalogEngine, ElementRef, ProductRecord, SortBy};

use super::AppContext;

pub fn run(ctx: &AppContext, products: Option<PathBuf>, query: &str, sort: Option<SortBy>) -> Result<()> {
    let path = match products.or_else(|| ctx.config.catalog.products_file.clone()) {
        Some(path) => path,
        None => bail!("No products file. Pass --products or set catalog.products_file in config.toml"),
    };
    let records = load_products(&path)?;

    let mut engine = CatalogEngine::initialize(records, query)?;
    if let Some(sort) = sort {
        engine.set_sort_by(sort);
    }

    let summary = engine.summary();
    println!("Showing {} of {} products", summary.results_label(), summary.total_label());
    for chip in &summary.chips {
        println!("  [{}]", chip.label);
    }

    let filtered = engine.filtered_products();
    if filtered.is_empty() {
        println!("No products match the current filters.");
    }
    for product in filtered {
        println!(
            "  {:<28} ${:>8.2}  {:<12} {:.1}*",
            product.name, product.price, product.category, product.rating
        );
    }

    if let Some(metrics) = engine.metrics() {
        println!(
            "{} products | avg rating {} | avg fit {} | top category {}",
            metrics.total_products,
            metrics.rating_label(),
            metrics.fit_label(),
            metrics.top_category_label()
        );
    }
    Ok(())
}

/// Reads a JSON array of product attribute objects.
///
/// Attribute values are stringified the way they would appear on a rendered
/// product card, so `"price": 120` and `"price": "$120"` are both accepted.
pub fn load_products(path: &Path) -> Result<Vec<ProductRecord>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_products(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_products(content: &str) -> Result<Vec<ProductRecord>> {
    let entries: Vec<serde_json::Map<String, Value>> = serde_json::from_str(content)?;
    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let dataset: HashMap<String, String> = entry
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| {
                    let text = match value {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), text)
                })
                .collect();
            ProductRecord::from_dataset(ElementRef(index), &dataset)
        })
        .collect())
}
