//! # Domain Types
//!
//! The two types every layer of the catalog speaks.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌───────────────────────────────────┐  │
//! │  │      Product        │        │          SyncResult<T>            │  │
//! │  │  ─────────────────  │        │  ───────────────────────────────  │  │
//! │  │  id  (0 = local)    │        │  Loading                          │  │
//! │  │  image              │        │  Success { data }                 │  │
//! │  │  price  (optional)  │        │  Error { message, cached_data }   │  │
//! │  │  product_name       │        │                                   │  │
//! │  │  product_type       │        │  Error always tries to carry the  │  │
//! │  │  tax    (optional)  │        │  last-known-good catalog          │  │
//! │  └─────────────────────┘        └───────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry as shown to the user.
///
/// Immutable value record; `id == 0` means the product has not been
/// assigned an identifier by the server or the cache yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Identifier, 0 when not persisted anywhere yet.
    #[serde(default)]
    #[ts(type = "number")]
    pub id: i64,

    /// Remote image URL or local image path.
    #[serde(default)]
    pub image: String,

    /// Unit price, absent when unknown.
    #[serde(default)]
    pub price: Option<f64>,

    /// Display name.
    #[serde(default)]
    pub product_name: String,

    /// Category shown under the name.
    #[serde(default)]
    pub product_type: String,

    /// Tax percentage, absent when unknown.
    #[serde(default)]
    pub tax: Option<f64>,
}

impl Product {
    /// Creates a product with just a name and a type.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::Product;
    ///
    /// let p = Product::new("Red Shirt", "Apparel");
    /// assert_eq!(p.id, 0);
    /// assert!(p.price.is_none());
    /// ```
    pub fn new(product_name: impl Into<String>, product_type: impl Into<String>) -> Self {
        Product {
            product_name: product_name.into(),
            product_type: product_type.into(),
            ..Default::default()
        }
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the tax percentage.
    pub fn with_tax(mut self, tax: f64) -> Self {
        self.tax = Some(tax);
        self
    }

    /// Sets the image URL or path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

// =============================================================================
// SyncResult
// =============================================================================

/// Three-state result of a catalog operation.
///
/// ## State Machine
/// ```text
///            subscribe
///                │
///                ▼
///          ┌───────────┐
///          │  Loading  │
///          └─────┬─────┘
///        ok      │      failure
///      ┌─────────┴─────────┐
///      ▼                   ▼
/// ┌──────────┐   ┌───────────────────────────┐
/// │ Success  │   │ Error(message, cached?)   │
/// │  (data)  │   │ cached = last-known-good  │
/// └──────────┘   └───────────────────────────┘
/// ```
///
/// Consumers match exhaustively; a new variant must be handled everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncResult<T> {
    /// Work in flight, nothing to show yet.
    Loading,

    /// Fresh, authoritative payload.
    Success {
        /// The payload just obtained.
        data: T,
    },

    /// The operation failed.
    Error {
        /// Short, user-facing classification of the failure.
        message: String,
        /// Best-effort stale payload, absent when none is available.
        #[serde(rename = "cachedData")]
        cached_data: Option<T>,
    },
}

impl<T> Default for SyncResult<T> {
    fn default() -> Self {
        SyncResult::Loading
    }
}

impl<T> SyncResult<T> {
    /// Shorthand for `SyncResult::Success { data }`.
    pub fn success(data: T) -> Self {
        SyncResult::Success { data }
    }

    /// Shorthand for an error with optional stale data.
    pub fn error(message: impl Into<String>, cached_data: Option<T>) -> Self {
        SyncResult::Error {
            message: message.into(),
            cached_data,
        }
    }

    /// Returns true while the operation is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, SyncResult::Loading)
    }

    /// Returns true once the operation has reached Success or Error.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Returns the payload to render: fresh data on success, stale data on
    /// error, nothing while loading.
    pub fn data(&self) -> Option<&T> {
        match self {
            SyncResult::Loading => None,
            SyncResult::Success { data } => Some(data),
            SyncResult::Error { cached_data, .. } => cached_data.as_ref(),
        }
    }

    /// Returns the error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SyncResult::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Maps the payload (fresh or cached) while keeping the state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SyncResult<U> {
        match self {
            SyncResult::Loading => SyncResult::Loading,
            SyncResult::Success { data } => SyncResult::Success { data: f(data) },
            SyncResult::Error {
                message,
                cached_data,
            } => SyncResult::Error {
                message,
                cached_data: cached_data.map(f),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        let state: SyncResult<Vec<Product>> = SyncResult::default();
        assert!(state.is_loading());
        assert!(state.data().is_none());
    }

    #[test]
    fn test_error_exposes_cached_data() {
        let state = SyncResult::error("Network error", Some(vec![Product::new("Mug", "Kitchen")]));
        assert!(state.is_terminal());
        assert_eq!(state.error_message(), Some("Network error"));
        assert_eq!(state.data().map(Vec::len), Some(1));
    }

    #[test]
    fn test_map_keeps_state() {
        let state = SyncResult::error("Server error", Some(vec![1, 2, 3]));
        assert_eq!(
            state.map(|v| v.len()),
            SyncResult::Error {
                message: "Server error".into(),
                cached_data: Some(3)
            }
        );
    }

    #[test]
    fn test_json_shape() {
        let state = SyncResult::error("Network error", None::<Vec<Product>>);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Network error");
        assert!(json["cachedData"].is_null());

        let product = Product::new("Red Shirt", "Apparel").with_price(499.0);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["productName"], "Red Shirt");
        assert_eq!(json["price"], 499.0);
    }
}
