//! Catalog filter/sort engine.
//!
//! Holds the product snapshot ingested once at startup and recomputes a
//! deterministic filtered view whenever a filter field changes. Everything is
//! synchronous and in-memory; the presentation layer pulls the view, the
//! summary and the display update after each call.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::filter::{ChipKind, FilterChip, FilterState, PriceRange, SortBy};
use super::model::{DEFAULT_FIT_SCORE, ElementRef, ProductRecord};
use super::query::InitialQuery;
use crate::error::{Result, ShopError};

/// Which presentation elements to show (in display order) and which to hide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayUpdate {
    pub shown: Vec<ElementRef>,
    pub hidden: Vec<ElementRef>,
    pub no_results: bool,
}

/// Result counts, active chips and quick-filter highlight state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    pub results_count: usize,
    pub total_count: usize,
    pub chips: Vec<FilterChip>,
    pub active_quick_category: Option<String>,
    pub active_quick_price: Option<PriceRange>,
}

impl FilterSummary {
    /// Result count padded to two digits, e.g. `07`.
    pub fn results_label(&self) -> String {
        format!("{:02}", self.results_count)
    }

    pub fn total_label(&self) -> String {
        format!("{:02}", self.total_count)
    }
}

/// Headline numbers over the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMetrics {
    pub total_products: usize,
    pub average_rating: f64,
    /// Rounded percentage
    pub average_fit: u32,
    pub top_category: Option<String>,
}

impl CatalogMetrics {
    pub fn rating_label(&self) -> String {
        if self.average_rating > 0.0 {
            format!("{:.1}", self.average_rating)
        } else {
            "4.5".to_string()
        }
    }

    pub fn fit_label(&self) -> String {
        format!("{}%", self.average_fit)
    }

    pub fn top_category_label(&self) -> &str {
        self.top_category.as_deref().unwrap_or("All")
    }
}

#[derive(Debug, Default)]
pub struct CatalogEngine {
    products: Vec<ProductRecord>,
    /// Indices into `products`, in display order.
    filtered: Vec<usize>,
    filters: FilterState,
    /// Distinct non-empty categories in first-appearance order.
    available_categories: Vec<String>,
    loaded: bool,
}

impl CatalogEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `products`, seeds filters from `query` and applies them once.
    pub fn initialize(products: Vec<ProductRecord>, query: &str) -> Result<Self> {
        let mut engine = Self::new();
        engine.load_products(products)?;
        engine.apply_initial_query(&InitialQuery::parse(query));
        engine.apply_filters();
        Ok(engine)
    }

    /// One-time ingestion of the catalog snapshot.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the catalog was already loaded.
    pub fn load_products(&mut self, products: Vec<ProductRecord>) -> Result<()> {
        if self.loaded {
            return Err(ShopError::invalid_argument("Catalog products are already loaded"));
        }

        let mut seen = BTreeSet::new();
        self.available_categories = products
            .iter()
            .filter(|p| !p.category.is_empty())
            .filter(|p| seen.insert(p.category.clone()))
            .map(|p| p.category.clone())
            .collect();
        self.filtered = (0..products.len()).collect();
        self.products = products;
        self.loaded = true;

        tracing::info!(
            "[Catalog] Loaded {} product(s) across {} categories",
            self.products.len(),
            self.available_categories.len()
        );
        Ok(())
    }

    /// Injects URL-supplied values into the filter state without applying them.
    ///
    /// A category that is not in the catalog leaves the category filter empty;
    /// an unknown price bucket is ignored.
    pub fn apply_initial_query(&mut self, query: &InitialQuery) {
        if let Some(category) = query.normalized_category() {
            self.filters.categories.clear();
            if self.available_categories.contains(&category) {
                self.filters.categories.insert(category);
            } else {
                tracing::debug!("[Catalog] Ignoring unknown category parameter '{}'", category);
            }
        }
        if let Some(range) = query.price_range() {
            self.filters.price_range = range;
        }
        if let Some(search) = query.search_text() {
            self.filters.search = search;
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn available_categories(&self) -> &[String] {
        &self.available_categories
    }

    pub fn total_count(&self) -> usize {
        self.products.len()
    }

    pub fn set_search(&mut self, text: &str) -> Vec<&ProductRecord> {
        self.filters.search = text.to_lowercase();
        self.apply_filters()
    }

    pub fn set_categories<I, S>(&mut self, categories: I) -> Vec<&ProductRecord>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.categories = categories.into_iter().map(Into::into).collect();
        self.apply_filters()
    }

    pub fn set_price_range(&mut self, range: PriceRange) -> Vec<&ProductRecord> {
        self.filters.price_range = range;
        self.apply_filters()
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) -> Vec<&ProductRecord> {
        self.filters.sort_by = sort_by;
        self.apply_filters()
    }

    /// Selects exactly `category`, or clears back to all categories if it was
    /// already the sole selection.
    pub fn toggle_quick_category(&mut self, category: &str) -> Vec<&ProductRecord> {
        if self.active_quick_category() == Some(category) {
            self.filters.categories.clear();
        } else {
            self.filters.categories = BTreeSet::from([category.to_string()]);
        }
        self.apply_filters()
    }

    /// Selects `range`, or clears back to all prices if it was already active.
    pub fn toggle_quick_price(&mut self, range: PriceRange) -> Vec<&ProductRecord> {
        self.filters.price_range = if self.filters.price_range == range {
            PriceRange::All
        } else {
            range
        };
        self.apply_filters()
    }

    /// Resets the field a chip stands for.
    pub fn remove_filter(&mut self, kind: ChipKind) -> Vec<&ProductRecord> {
        match kind {
            ChipKind::Search => self.filters.search.clear(),
            ChipKind::Categories => self.filters.categories.clear(),
            ChipKind::Price => self.filters.price_range = PriceRange::All,
        }
        self.apply_filters()
    }

    pub fn clear_filters(&mut self) -> Vec<&ProductRecord> {
        self.filters = FilterState::default();
        self.apply_filters()
    }

    /// Recomputes the view: search, then category, then price, then sort.
    pub fn apply_filters(&mut self) -> Vec<&ProductRecord> {
        let filters = &self.filters;
        let mut results: Vec<usize> = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.matches_search(&filters.search))
            .filter(|(_, p)| filters.matches_category(&p.category))
            .filter(|(_, p)| filters.price_range.contains(p.price))
            .map(|(index, _)| index)
            .collect();

        let products = &self.products;
        if let Some(compare) = comparator(filters.sort_by) {
            results.sort_by(|a, b| compare(&products[*a], &products[*b]));
        }

        tracing::debug!(
            "[Catalog] {} of {} product(s) match {:?}",
            results.len(),
            self.products.len(),
            self.filters
        );
        self.filtered = results;
        self.filtered_products()
    }

    /// The current view in display order.
    pub fn filtered_products(&self) -> Vec<&ProductRecord> {
        self.filtered.iter().map(|index| &self.products[*index]).collect()
    }

    pub fn display_update(&self) -> DisplayUpdate {
        let shown: Vec<ElementRef> = self
            .filtered
            .iter()
            .map(|index| self.products[*index].element)
            .collect();
        let visible: BTreeSet<usize> = self.filtered.iter().copied().collect();
        let hidden = self
            .products
            .iter()
            .enumerate()
            .filter(|(index, _)| !visible.contains(index))
            .map(|(_, p)| p.element)
            .collect();

        DisplayUpdate {
            no_results: shown.is_empty(),
            shown,
            hidden,
        }
    }

    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            results_count: self.filtered.len(),
            total_count: self.products.len(),
            chips: self.active_filter_chips(),
            active_quick_category: self.active_quick_category().map(str::to_string),
            active_quick_price: self.active_quick_price(),
        }
    }

    /// True when the category selection narrows the catalog.
    ///
    /// Selecting every available category has the same effect as selecting
    /// none, so neither counts as filtered.
    pub fn is_category_filtered(&self) -> bool {
        !self.filters.categories.is_empty()
            && !self.available_categories.is_empty()
            && self
                .available_categories
                .iter()
                .any(|category| !self.filters.categories.contains(category))
    }

    pub fn active_filter_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();

        if !self.filters.search.is_empty() {
            chips.push(FilterChip::new(
                ChipKind::Search,
                format!("Search: \"{}\"", self.filters.search),
            ));
        }

        if self.is_category_filtered() {
            let label = match self.active_quick_category() {
                Some(category) => format!("Category: {}", category),
                None => format!("Categories ({})", self.filters.categories.len()),
            };
            chips.push(FilterChip::new(ChipKind::Categories, label));
        }

        if self.filters.price_range != PriceRange::All {
            chips.push(FilterChip::new(
                ChipKind::Price,
                format!("Price: {}", self.filters.price_range.label()),
            ));
        }

        chips
    }

    /// The quick-category pill to highlight: set only for a single selection.
    pub fn active_quick_category(&self) -> Option<&str> {
        if self.filters.categories.len() == 1 {
            self.filters.categories.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    pub fn active_quick_price(&self) -> Option<PriceRange> {
        (self.filters.price_range != PriceRange::All).then_some(self.filters.price_range)
    }

    /// Aggregate numbers over the full catalog, `None` when it is empty.
    pub fn metrics(&self) -> Option<CatalogMetrics> {
        if self.products.is_empty() {
            return None;
        }
        let count = self.products.len() as f64;

        let average_rating = self.products.iter().map(|p| p.rating).sum::<f64>() / count;
        let average_fit = self
            .products
            .iter()
            .map(|p| if p.fit_score == 0 { DEFAULT_FIT_SCORE } else { p.fit_score })
            .map(f64::from)
            .sum::<f64>()
            / count;

        Some(CatalogMetrics {
            total_products: self.products.len(),
            average_rating,
            average_fit: average_fit.round() as u32,
            top_category: self.top_category(),
        })
    }

    /// Most common category; ties go to the one that appears first.
    fn top_category(&self) -> Option<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for product in self.products.iter().filter(|p| !p.category.is_empty()) {
            *counts.entry(product.category.as_str()).or_default() += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for category in &self.available_categories {
            let count = counts.get(category.as_str()).copied().unwrap_or(0);
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((category.as_str(), count));
            }
        }
        best.map(|(category, _)| category.to_string())
    }
}

type Comparator = fn(&ProductRecord, &ProductRecord) -> Ordering;

/// `None` keeps ingestion order. All sorts are stable.
fn comparator(sort_by: SortBy) -> Option<Comparator> {
    match sort_by {
        SortBy::Default => None,
        SortBy::PriceLow => Some(|a: &ProductRecord, b: &ProductRecord| a.price.total_cmp(&b.price)),
        SortBy::PriceHigh => Some(|a: &ProductRecord, b: &ProductRecord| b.price.total_cmp(&a.price)),
        SortBy::Name => Some(|a: &ProductRecord, b: &ProductRecord| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortBy::Rating => Some(|a: &ProductRecord, b: &ProductRecord| b.rating.total_cmp(&a.rating)),
    }
}
