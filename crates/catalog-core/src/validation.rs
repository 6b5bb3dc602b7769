//! # Validation Module
//!
//! Parsing and checks for the add-product form.
//!
//! ## Amount Fields
//! ```text
//! ┌─────────────────────┬───────────────────────────────────────────────┐
//! │ Text typed by user  │ Amount sent                                   │
//! ├─────────────────────┼───────────────────────────────────────────────┤
//! │ ""                  │ 0.0                                           │
//! │ "499.5"             │ 499.5                                         │
//! │ "abc", "NaN", "inf" │ absent                                        │
//! └─────────────────────┴───────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::Product;

/// Parses a price or tax text field.
///
/// ```rust
/// use catalog_core::validation::parse_amount;
///
/// assert_eq!(parse_amount(""), Some(0.0));
/// assert_eq!(parse_amount(" 12.5 "), Some(12.5));
/// assert_eq!(parse_amount("twelve"), None);
/// ```
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Checks that an optional amount is finite and not negative.
pub fn validate_amount(field: &str, amount: Option<f64>) -> ValidationResult<()> {
    let Some(amount) = amount else {
        return Ok(());
    };

    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Checks a product before it is submitted.
pub fn validate_submission(product: &Product) -> ValidationResult<()> {
    validate_amount("price", product.price)?;
    validate_amount("tax", product.tax)?;
    Ok(())
}
