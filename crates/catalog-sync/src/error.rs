//! # Sync Error Types
//!
//! Error types for the sync layer.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │       Cache             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Db                     │ │
//! │  │  InvalidUrl     │  │  Status         │  │  Unavailable            │ │
//! │  │  LoadFailed     │  │  Decode         │  │                         │ │
//! │  │  SaveFailed     │  │  Other          │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  TransportError and CacheError never leave ProductSyncService: they    │
//! │  are classified into a FailureKind and emitted as SyncResult::Error.   │
//! │  CatalogError aggregates everything for setup code (config, pool).     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::FailureKind;
use catalog_db::DbError;
use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// A failed call to the catalog API.
///
/// `Display` is the bare cause so it can be shown to the user as-is when an
/// add-product submission fails.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response: connection refused, DNS, timeout, broken body stream.
    #[error("{0}")]
    Network(String),

    /// The server answered with a failure status.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// The server answered successfully but the body could not be decoded.
    #[error("{0}")]
    Decode(String),

    /// Anything else (request building, redirects, ...).
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Classification used for `SyncResult::Error` messages.
    ///
    /// ```text
    /// Network  → FailureKind::Network    "Network error"
    /// Status   → FailureKind::Server     "Server error"
    /// Decode   → FailureKind::EmptyBody  "Failed to load from server"
    /// Other    → FailureKind::Unknown    "Unknown error"
    /// ```
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            TransportError::Network(_) => FailureKind::Network,
            TransportError::Status { .. } => FailureKind::Server,
            TransportError::Decode(_) => FailureKind::EmptyBody,
            TransportError::Other(_) => FailureKind::Unknown,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if err.is_status() {
            TransportError::Status {
                status: err.status().map(|s| s.as_u16()).unwrap_or_default(),
            }
        } else if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
            TransportError::Network(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

/// Result type alias for transport calls.
pub type TransportResult<T> = Result<T, TransportError>;

// =============================================================================
// Cache Errors
// =============================================================================

/// A failed read or write of the local cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The SQLite cache reported an error.
    #[error("Cache database error: {0}")]
    Db(#[from] DbError),

    /// The cache could not be reached at all.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for cache calls.
pub type CacheResult<T> = Result<T, CacheError>;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Problems loading, saving or validating `catalog.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an unusable value.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// The API base URL is malformed or uses an unsupported scheme.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// The config file could not be written.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Aggregate Error
// =============================================================================

/// Any error the sync layer can report during setup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type alias for setup code.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert_eq!(
            TransportError::Network("connection refused".into()).failure_kind(),
            FailureKind::Network
        );
        assert_eq!(
            TransportError::Status { status: 500 }.failure_kind(),
            FailureKind::Server
        );
        assert_eq!(
            TransportError::Decode("expected value".into()).failure_kind(),
            FailureKind::EmptyBody
        );
        assert_eq!(
            TransportError::Other("builder error".into()).failure_kind(),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_transport_display_is_bare_cause() {
        let err = TransportError::Network("connection refused".into());
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(
            TransportError::Status { status: 502 }.to_string(),
            "HTTP status 502"
        );
    }

    #[test]
    fn test_json_errors_are_decode_errors() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(TransportError::from(err), TransportError::Decode(_)));
    }

    #[test]
    fn test_aggregate_conversions() {
        let err: CatalogError = ConfigError::InvalidConfig("timeout_secs".into()).into();
        assert!(matches!(err, CatalogError::Config(_)));

        let err: CatalogError = CacheError::from(DbError::PoolExhausted).into();
        assert_eq!(
            err.to_string(),
            "Cache database error: Connection pool exhausted"
        );
    }
}
