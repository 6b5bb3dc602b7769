//! # Text Rendering
//!
//! Turns catalog and submission states into terminal text. Pure functions so
//! the layout is testable without a terminal.
//!
//! ```text
//! Loading                     → "Loading products..."
//! Success(products)           → product table (or "No products found.")
//! Error(message, Some(cache)) → message, "Showing cached products:", table
//! Error(message, None)        → message, "No cached products available."
//! ```

use std::fmt::Write;

use catalog_core::{AddProductResponse, Product, SyncResult};

pub const LOADING: &str = "Loading products...";
pub const NO_PRODUCTS: &str = "No products found.";
pub const SHOWING_CACHED: &str = "Showing cached products:";
pub const NO_CACHE: &str = "No cached products available.";

/// Renders one catalog state.
pub fn catalog(view: &SyncResult<Vec<Product>>) -> String {
    match view {
        SyncResult::Loading => format!("{LOADING}\n"),
        SyncResult::Success { data } => table(data),
        SyncResult::Error {
            message,
            cached_data,
        } => {
            let mut out = format!("{message}\n");
            match cached_data {
                Some(products) => {
                    out.push_str(SHOWING_CACHED);
                    out.push('\n');
                    out.push_str(&table(products));
                }
                None => {
                    out.push_str(NO_CACHE);
                    out.push('\n');
                }
            }
            out
        }
    }
}

/// Renders the outcome of an add-product submission.
pub fn submission(outcome: &SyncResult<AddProductResponse>) -> String {
    match outcome {
        SyncResult::Loading => "Submitting...\n".to_string(),
        SyncResult::Success { data } if data.message.is_empty() => {
            format!("Product added (id {})\n", data.product_id)
        }
        SyncResult::Success { data } => {
            format!("{} (id {})\n", data.message, data.product_id)
        }
        SyncResult::Error { message, .. } => format!("{message}\n"),
    }
}

/// Renders products as an aligned table.
pub fn table(products: &[Product]) -> String {
    if products.is_empty() {
        return format!("{NO_PRODUCTS}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<30} {:<20} {:>10} {:>7}",
        "ID", "NAME", "TYPE", "PRICE", "TAX %"
    );

    for product in products {
        let _ = writeln!(
            out,
            "{:>4}  {:<30} {:<20} {:>10} {:>7}",
            product.id,
            truncate(&product.product_name, 30),
            truncate(&product.product_type, 20),
            amount(product.price),
            amount(product.tax),
        );
    }

    out
}

fn amount(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product {
            id: 1,
            product_name: "Red Shirt".into(),
            product_type: "Apparel".into(),
            price: Some(10.0),
            tax: Some(5.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_loading() {
        assert_eq!(catalog(&SyncResult::Loading), "Loading products...\n");
    }

    #[test]
    fn test_success_table() {
        let text = catalog(&SyncResult::success(vec![shirt()]));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("NAME"));
        assert!(lines[1].contains("Red Shirt"));
        assert!(lines[1].contains("10.00"));
        assert!(lines[1].contains("5.00"));
    }

    #[test]
    fn test_empty_success() {
        assert_eq!(catalog(&SyncResult::success(vec![])), "No products found.\n");
    }

    #[test]
    fn test_error_with_cache() {
        let text = catalog(&SyncResult::error("No internet connection", Some(vec![shirt()])));

        assert!(text.starts_with("No internet connection\n"));
        assert!(text.contains(SHOWING_CACHED));
        assert!(text.contains("Red Shirt"));
    }

    #[test]
    fn test_error_without_cache() {
        let text = catalog(&SyncResult::error("Server error", None));

        assert_eq!(text, "Server error\nNo cached products available.\n");
    }

    #[test]
    fn test_missing_amount_renders_dash() {
        let mut product = shirt();
        product.tax = None;

        let text = table(&[product]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.trim_end().ends_with('-'));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = "x".repeat(50);
        assert_eq!(truncate(&long, 30).chars().count(), 30);
        assert_eq!(truncate("short", 30), "short");
    }

    #[test]
    fn test_submission_messages() {
        let response = AddProductResponse {
            message: "Product added Successfully!".into(),
            product_details: Default::default(),
            product_id: 2657,
            success: true,
        };

        assert_eq!(
            submission(&SyncResult::success(response)),
            "Product added Successfully! (id 2657)\n"
        );
        assert_eq!(
            submission(&SyncResult::error("Failed to add product", None)),
            "Failed to add product\n"
        );
    }
}
