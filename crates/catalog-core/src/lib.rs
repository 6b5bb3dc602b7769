//! # catalog-core: Pure Logic for the ProductX Catalog
//!
//! This crate holds every rule of the catalog that can be expressed without
//! touching the network, the disk, or a clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ProductX Catalog Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Presentation (catalog-cli / mobile UI)            │   │
//! │  │        product list ──► search box ──► add-product form        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        catalog-sync (service, feed, projector, form state)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catalog-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │   dto    │ │ mapping  │ │     search       │  │   │
//! │  │   │ Product  │ │RawProduct│ │defaults +│ │ filter, project, │  │   │
//! │  │   │SyncResult│ │AddProduct│ │placeholds│ │ Projection       │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO TASKS                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product` and the three-state `SyncResult<T>`
//! - [`dto`] - Upstream wire records (`RawProduct`, `AddProductResponse`)
//! - [`mapping`] - Upstream → `Product` defaulting policy, placeholder images
//! - [`search`] - Filter predicate and the catalog × query projection
//! - [`validation`] - Add-product form field parsing
//! - [`error`] - Failure taxonomy and validation errors
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::search::project;
//! use catalog_core::{Product, SyncResult};
//!
//! let shirt = Product::new("Red Shirt", "Apparel");
//! let mug = Product::new("Blue Mug", "Kitchen");
//! let catalog = SyncResult::Success { data: vec![shirt.clone(), mug] };
//!
//! assert_eq!(
//!     project(&catalog, "shirt"),
//!     SyncResult::Success { data: vec![shirt] }
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod mapping;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dto::{AddProductResponse, RawProduct};
pub use error::{FailureKind, ValidationError};
pub use types::{Product, SyncResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Price used when the upstream record carries none.
pub const DEFAULT_PRICE: f64 = 0.0;

/// Tax (percent) used when the upstream record carries none.
pub const DEFAULT_TAX: f64 = 18.0;

/// Display name used when the upstream record carries none.
pub const DEFAULT_PRODUCT_NAME: &str = "Product Name";

/// Display type used when the upstream record carries none.
pub const DEFAULT_PRODUCT_TYPE: &str = "Product Type";

/// Message shown when the server accepted the call but did not confirm it.
pub const ADD_PRODUCT_FAILED: &str = "Failed to add product";

/// Message shown when a submission fails without any description.
pub const ADD_PRODUCT_UNKNOWN: &str = "Unknown error occurred";
