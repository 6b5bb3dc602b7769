//! # Catalog API Wire Types
//!
//! What goes over the wire to the catalog API and what comes back.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog API                                      │
//! │                                                                         │
//! │  GET  {base}/public/get                                                │
//! │       ◄── 200 [ { image, price, product_name, product_type, tax }, ..] │
//! │                                                                         │
//! │  POST {base}/public/add   (multipart/form-data)                        │
//! │       ──► product_name = "Red Shirt"                                   │
//! │           product_type = "Apparel"                                     │
//! │           price        = "10.0"                                        │
//! │           tax          = "5.0"                                         │
//! │           files[]      = <image bytes> | "" (always present)           │
//! │       ◄── 200 { message, product_details, product_id, success }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::Product;

use crate::files::LocalFile;

/// Multipart field carrying the product name.
pub const PRODUCT_NAME_FIELD: &str = "product_name";

/// Multipart field carrying the product type.
pub const PRODUCT_TYPE_FIELD: &str = "product_type";

/// Multipart field carrying the price.
pub const PRICE_FIELD: &str = "price";

/// Multipart field carrying the tax percentage.
pub const TAX_FIELD: &str = "tax";

/// Multipart field carrying the image. Sent even when there is no image.
pub const FILES_FIELD: &str = "files[]";

// =============================================================================
// Submission
// =============================================================================

/// The `files[]` part of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePart {
    /// No image: the field is sent with an empty value.
    Empty,

    /// One image file.
    File { file_name: String, bytes: Vec<u8> },
}

impl From<Option<LocalFile>> for FilePart {
    fn from(file: Option<LocalFile>) -> Self {
        match file {
            Some(file) => FilePart::File {
                file_name: file.name,
                bytes: file.bytes,
            },
            None => FilePart::Empty,
        }
    }
}

/// A fully-prepared add-product request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSubmission {
    pub product_name: String,
    pub product_type: String,
    /// Decimal string, e.g. `"10.0"`.
    pub price: String,
    /// Decimal string, e.g. `"18.0"`.
    pub tax: String,
    pub files: FilePart,
}

impl ProductSubmission {
    /// Builds the request for `product` with an optional materialised image.
    ///
    /// Absent amounts are sent as `"0.0"`.
    pub fn new(product: &Product, image: Option<LocalFile>) -> Self {
        ProductSubmission {
            product_name: product.product_name.clone(),
            product_type: product.product_type.clone(),
            price: format_decimal(product.price.unwrap_or(0.0)),
            tax: format_decimal(product.tax.unwrap_or(0.0)),
            files: FilePart::from(image),
        }
    }

    /// The four text fields in submission order.
    pub fn text_fields(&self) -> [(&'static str, &str); 4] {
        [
            (PRODUCT_NAME_FIELD, self.product_name.as_str()),
            (PRODUCT_TYPE_FIELD, self.product_type.as_str()),
            (PRICE_FIELD, self.price.as_str()),
            (TAX_FIELD, self.tax.as_str()),
        ]
    }
}

/// Formats an amount as a decimal string, keeping `.0` on whole numbers.
///
/// ```rust
/// use catalog_sync::protocol::format_decimal;
///
/// assert_eq!(format_decimal(10.0), "10.0");
/// assert_eq!(format_decimal(18.5), "18.5");
/// ```
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

// =============================================================================
// Response
// =============================================================================

/// Outcome of a call that reached the server.
///
/// A failure status is a response too: the transport reports it here
/// rather than as an error, and `body` is then `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse<T> {
    /// HTTP status code.
    pub status: u16,

    /// Decoded body. `None` for failure statuses and for empty or `null`
    /// bodies.
    pub body: Option<T>,
}

impl<T> TransportResponse<T> {
    /// A 200 response carrying `body`.
    pub fn ok(body: T) -> Self {
        TransportResponse {
            status: 200,
            body: Some(body),
        }
    }

    /// A response with `status` and no body.
    pub fn empty(status: u16) -> Self {
        TransportResponse { status, body: None }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
