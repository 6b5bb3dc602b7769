//! # Upstream Wire Records
//!
//! JSON shapes exchanged with the product API. Field names follow the
//! server (`product_name`, `product_type`), not the Rust domain model.
//!
//! ```text
//! GET  public/get  ──► [ RawProduct, RawProduct, ... ]
//! POST public/add  ──► AddProductResponse { message, product_details,
//!                                           product_id, success }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One product as the server lists it. Every field may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawProduct {
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub tax: Option<f64>,
}

/// Body returned by the add-product endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddProductResponse {
    /// Human-readable server message.
    #[serde(default)]
    pub message: String,

    /// The product as stored by the server.
    #[serde(default)]
    pub product_details: RawProduct,

    /// Server-assigned identifier.
    #[serde(default)]
    #[ts(type = "number")]
    pub product_id: i64,

    /// Server-side success flag.
    #[serde(default)]
    pub success: bool,
}
