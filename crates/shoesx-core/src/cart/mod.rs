//! Shopping cart domain: line items, the local store seam and the cart engine.

mod engine;
mod model;
mod store;

pub use engine::{CartCallback, CartEngine, CartSummary, FREE_SHIPPING_THRESHOLD, SubscriptionId};
pub use model::{CartLineItem, ProductRef, parse_display_price};
pub use store::{DEFAULT_CART_KEY, KeyValueStore};
