//! # Search Projection
//!
//! Client-side search over whatever catalog state is current.
//!
//! ## How the Projection Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 (latest catalog) × (latest query)                       │
//! │                                                                         │
//! │  Loading                  ──────────────────────────► Loading           │
//! │                                                                         │
//! │  Success(data)    query blank ──────────────────────► Success(data)     │
//! │                   otherwise   ──────────────────────► Success(filter)   │
//! │                                                                         │
//! │  Error(msg, cached)  query blank ───────────────────► unchanged         │
//! │                      cached present ────────────────► Error(msg, filter)│
//! │                      cached absent  ────────────────► unchanged         │
//! │                                                                         │
//! │  filter: query is a case-insensitive substring of name OR type          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is synchronous and deterministic. The live, channel-driven
//! combinator in `catalog-sync` feeds its inputs into [`Projection`].

use crate::types::{Product, SyncResult};

/// Returns true when `query` is a case-insensitive substring of the
/// product's name or type.
///
/// ```rust
/// use catalog_core::search::matches;
/// use catalog_core::Product;
///
/// let shirt = Product::new("Red Shirt", "Apparel");
/// assert!(matches(&shirt, "SHIRT"));
/// assert!(matches(&shirt, "parel"));
/// assert!(!matches(&shirt, "mug"));
/// ```
pub fn matches(product: &Product, query: &str) -> bool {
    let needle = query.to_lowercase();
    product.product_name.to_lowercase().contains(&needle)
        || product.product_type.to_lowercase().contains(&needle)
}

/// Keeps the products matching `query`, preserving order.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|product| matches(product, query))
        .cloned()
        .collect()
}

/// Projects one catalog state through one query.
pub fn project(catalog: &SyncResult<Vec<Product>>, query: &str) -> SyncResult<Vec<Product>> {
    if query.trim().is_empty() {
        return catalog.clone();
    }

    match catalog {
        SyncResult::Loading => SyncResult::Loading,
        SyncResult::Success { data } => SyncResult::Success {
            data: filter_products(data, query),
        },
        SyncResult::Error {
            message,
            cached_data: Some(cached),
        } => SyncResult::Error {
            message: message.clone(),
            cached_data: Some(filter_products(cached, query)),
        },
        SyncResult::Error {
            cached_data: None, ..
        } => catalog.clone(),
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Latest-value combinator over a catalog input and a query input.
///
/// Holds the most recent value of each input and recomputes the view
/// whenever either one is replaced. No history is kept.
///
/// ## Usage
/// ```rust
/// use catalog_core::search::Projection;
/// use catalog_core::{Product, SyncResult};
///
/// let mut projection = Projection::new();
/// assert!(projection.view().is_loading());
///
/// projection.set_catalog(SyncResult::success(vec![
///     Product::new("Red Shirt", "Apparel"),
///     Product::new("Blue Mug", "Kitchen"),
/// ]));
/// projection.set_query("mug");
///
/// assert_eq!(projection.view().data().map(Vec::len), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Projection {
    catalog: SyncResult<Vec<Product>>,
    query: String,
    view: SyncResult<Vec<Product>>,
}

impl Projection {
    /// Starts from `Loading` and an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the catalog input and returns the recomputed view.
    pub fn set_catalog(&mut self, catalog: SyncResult<Vec<Product>>) -> &SyncResult<Vec<Product>> {
        self.catalog = catalog;
        self.recompute()
    }

    /// Replaces the query input and returns the recomputed view.
    pub fn set_query(&mut self, query: impl Into<String>) -> &SyncResult<Vec<Product>> {
        self.query = query.into();
        self.recompute()
    }

    /// Latest catalog input.
    pub fn catalog(&self) -> &SyncResult<Vec<Product>> {
        &self.catalog
    }

    /// Latest query input.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current projected view.
    pub fn view(&self) -> &SyncResult<Vec<Product>> {
        &self.view
    }

    fn recompute(&mut self) -> &SyncResult<Vec<Product>> {
        self.view = project(&self.catalog, &self.query);
        &self.view
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
