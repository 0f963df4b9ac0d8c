//! Product catalog: typed ingestion, filter state and the filter/sort engine.

mod engine;
mod filter;
mod model;
mod query;

pub use engine::{CatalogEngine, CatalogMetrics, DisplayUpdate, FilterSummary};
pub use filter::{ChipKind, FilterChip, FilterState, PriceRange, SortBy};
pub use model::{DEFAULT_FIT_SCORE, ElementRef, ProductRecord};
pub use query::{InitialQuery, normalize_category};
