//! Cart domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};

/// Product fields captured when a variant is added to the cart.
///
/// `price` is the display string as rendered by the storefront (e.g. `"$129.99"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl ProductRef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            image: image.into(),
            category: category.into(),
        }
    }
}

/// One `(product, size)` entry in the cart.
///
/// Display fields are copies taken at add-time, so a line survives catalog
/// changes. `quantity` is always at least 1; a line that would drop to zero is
/// removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_image: String,
    pub price: f64,
    pub size: String,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Builds a new line from a product snapshot.
    pub fn from_product(
        product: &ProductRef,
        size: impl Into<String>,
        quantity: u32,
        added_at: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_image: product.image.clone(),
            price: parse_display_price(&product.price)?,
            size: size.into(),
            quantity,
            category: product.category.clone(),
            added_at,
        })
    }

    /// Returns true if this line is keyed by `(product_id, size)`.
    pub fn matches(&self, product_id: &str, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }

    /// Price multiplied by quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Parses a display price such as `"$1,249.50"` into a unit price.
///
/// A single leading `$` and thousands separators are stripped. Anything that
/// does not yield a finite, non-negative number is rejected.
pub fn parse_display_price(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let without_symbol = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    let digits: String = without_symbol.chars().filter(|c| *c != ',').collect();

    let price: f64 = digits
        .parse()
        .map_err(|_| ShopError::invalid_argument(format!("Unparseable price: '{}'", raw)))?;

    if !price.is_finite() || price < 0.0 {
        return Err(ShopError::invalid_argument(format!(
            "Price must be a non-negative number: '{}'",
            raw
        )));
    }

    Ok(price)
}
