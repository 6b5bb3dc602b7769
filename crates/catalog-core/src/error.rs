//! # Error Types
//!
//! Failure taxonomy for catalog operations, and validation errors for the
//! add-product form.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core (this file)                                              │
//! │  ├── FailureKind      - classification carried in SyncResult::Error    │
//! │  └── ValidationError  - add-product form input problems                │
//! │                                                                         │
//! │  catalog-db                                                            │
//! │  └── DbError          - cache read/write failures                      │
//! │                                                                         │
//! │  catalog-sync                                                          │
//! │  ├── TransportError   - HTTP / IO failures  ──► FailureKind            │
//! │  ├── CacheError       - wraps DbError       ──► FailureKind::Unknown   │
//! │  └── ConfigError      - catalog.toml / env problems                    │
//! │                                                                         │
//! │  Nothing crosses the service boundary as Err: every failure becomes    │
//! │  SyncResult::Error { message: FailureKind::message(), .. }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::{ADD_PRODUCT_FAILED, ADD_PRODUCT_UNKNOWN};

// =============================================================================
// Failure Kind
// =============================================================================

/// Why a catalog fetch failed.
///
/// ## Classification
/// ```text
/// transport IO / no connectivity           → Network   "Network error"
/// server answered with a failure status    → Server    "Server error"
/// success status, missing or invalid body  → EmptyBody "Failed to load from server"
/// anything else                            → Unknown   "Unknown error"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("Network error")]
    Network,

    #[error("Server error")]
    Server,

    #[error("Failed to load from server")]
    EmptyBody,

    #[error("Unknown error")]
    Unknown,
}

impl FailureKind {
    /// User-facing message carried by `SyncResult::Error`.
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::Network => "Network error",
            FailureKind::Server => "Server error",
            FailureKind::EmptyBody => "Failed to load from server",
            FailureKind::Unknown => "Unknown error",
        }
    }
}

/// Message for a failed add-product submission.
///
/// Uses the cause's own description when it has one.
///
/// ```rust
/// use catalog_core::error::submission_message;
///
/// assert_eq!(submission_message(Some("connection refused")), "connection refused");
/// assert_eq!(submission_message(Some("")), "Unknown error occurred");
/// assert_eq!(submission_message(None), "Unknown error occurred");
/// ```
pub fn submission_message(cause: Option<&str>) -> String {
    match cause.map(str::trim) {
        Some(cause) if !cause.is_empty() => cause.to_string(),
        _ => ADD_PRODUCT_UNKNOWN.to_string(),
    }
}

/// Message for a submission the server did not confirm.
pub fn submission_rejected() -> String {
    ADD_PRODUCT_FAILED.to_string()
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for the add-product form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Amount fields (price, tax) must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Amount fields must be finite numbers.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
