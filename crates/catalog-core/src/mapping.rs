//! # Upstream → Product Mapping
//!
//! Turns incomplete upstream records into displayable products.
//!
//! ## Defaulting Policy
//! ```text
//! ┌──────────────────┬─────────────────────────────────────────────────────┐
//! │ Upstream field   │ When missing                                        │
//! ├──────────────────┼─────────────────────────────────────────────────────┤
//! │ image            │ random pick from PLACEHOLDER_IMAGES (also for "")   │
//! │ price            │ 0.0                                                 │
//! │ product_name     │ "Product Name"                                      │
//! │ product_type     │ "Product Type"                                      │
//! │ tax              │ 18.0                                                │
//! └──────────────────┴─────────────────────────────────────────────────────┘
//! ```
//!
//! The mapped product always carries `id = 0`; identifiers are assigned by
//! whoever persists it.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::dto::{AddProductResponse, RawProduct};
use crate::types::Product;
use crate::{DEFAULT_PRICE, DEFAULT_PRODUCT_NAME, DEFAULT_PRODUCT_TYPE, DEFAULT_TAX};

/// Images shown for products the server lists without one.
pub static PLACEHOLDER_IMAGES: [&str; 5] = [
    "https://vx-erp-product-images.s3.ap-south-1.amazonaws.com/9_1738107592_0_temp_image_1738107591899.jpg",
    "https://vx-erp-product-images.s3.ap-south-1.amazonaws.com/9_1738106971_0_temp_image_1738106970691.jpg",
    "https://vx-erp-product-images.s3.ap-south-1.amazonaws.com/9_1738106363_0_temp_image_1738106363171.jpg",
    "https://vx-erp-product-images.s3.ap-south-1.amazonaws.com/9_1738106114_0_temp_image_1738106114070.jpg",
    "https://vx-erp-product-images.s3.ap-south-1.amazonaws.com/9_1738106068_0_temp_image_1738106068076.jpg",
];

/// Picks one placeholder image.
pub fn placeholder_image<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // The table is non-empty, so choose never returns None.
    PLACEHOLDER_IMAGES
        .choose(rng)
        .copied()
        .unwrap_or(PLACEHOLDER_IMAGES[0])
}

impl RawProduct {
    /// Maps this record to a product using the thread-local RNG for the
    /// placeholder pick.
    pub fn into_product(self) -> Product {
        self.into_product_with(&mut rand::thread_rng())
    }

    /// Maps this record to a product with a caller-supplied RNG.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::mapping::PLACEHOLDER_IMAGES;
    /// use catalog_core::RawProduct;
    ///
    /// let product = RawProduct::default().into_product();
    /// assert!(PLACEHOLDER_IMAGES.contains(&product.image.as_str()));
    /// assert_eq!(product.price, Some(0.0));
    /// assert_eq!(product.tax, Some(18.0));
    /// ```
    pub fn into_product_with<R: Rng + ?Sized>(self, rng: &mut R) -> Product {
        let image = match self.image {
            Some(image) if !image.is_empty() => image,
            _ => placeholder_image(rng).to_string(),
        };

        Product {
            id: 0,
            image,
            price: Some(self.price.unwrap_or(DEFAULT_PRICE)),
            product_name: self
                .product_name
                .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
            product_type: self
                .product_type
                .unwrap_or_else(|| DEFAULT_PRODUCT_TYPE.to_string()),
            tax: Some(self.tax.unwrap_or(DEFAULT_TAX)),
        }
    }
}

impl From<&Product> for RawProduct {
    fn from(product: &Product) -> Self {
        RawProduct {
            image: Some(product.image.clone()),
            price: product.price,
            product_name: Some(product.product_name.clone()),
            product_type: Some(product.product_type.clone()),
            tax: product.tax,
        }
    }
}

impl AddProductResponse {
    /// The created product, carrying the server-assigned id.
    pub fn product(&self) -> Product {
        Product {
            id: self.product_id,
            ..self.product_details.clone().into_product()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
