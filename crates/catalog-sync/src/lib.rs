//! # catalog-sync: Network-with-Local-Fallback Sync
//!
//! This crate decides, on every fetch, whether to trust the network, persist
//! it, or fall back to the cached catalog, and keeps a live search projection
//! over whichever state is current.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Sync Architecture                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 ProductSyncService (orchestrator)                │  │
//! │  │                                                                  │  │
//! │  │  fetch_products() → Loading, then Success | Error(+cache)        │  │
//! │  │  add_product()    → Success | Error                              │  │
//! │  └────────┬──────────────────────┬──────────────────────┬───────────┘  │
//! │           ▼                      ▼                      ▼               │
//! │  ┌────────────────┐  ┌────────────────────┐  ┌────────────────────┐    │
//! │  │CatalogTransport│  │   ProductCache     │  │   FileProvider     │    │
//! │  │                │  │                    │  │                    │    │
//! │  │ HttpTransport  │  │ ProductCache-      │  │ FsFileProvider     │    │
//! │  │ (reqwest)      │  │ Repository (sqlx)  │  │ (tokio::fs)        │    │
//! │  └────────────────┘  └────────────────────┘  └────────────────────┘    │
//! │                                                                         │
//! │  PRESENTATION-FACING STATE                                             │
//! │  ─────────────────────────                                             │
//! │  CatalogFeed      - single shared fetch, replays latest state          │
//! │  SearchQuery      - live query string                                  │
//! │  SearchProjector  - feed × query, recomputed on either change          │
//! │  AddProductForm   - form fields + is_loading / error / success flags   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - `catalog.toml` + environment configuration
//! - [`error`] - Transport, cache and config error types
//! - [`protocol`] - Wire types for the catalog API
//! - [`transport`] - `CatalogTransport` and the reqwest implementation
//! - [`cache`] - `ProductCache` seam over the SQLite repository
//! - [`files`] - Image references and the filesystem file provider
//! - [`service`] - `ProductSyncService`
//! - [`feed`] - `CatalogFeed`, `SearchQuery`, `SearchProjector`
//! - [`form`] - `AddProductForm`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_sync::{CatalogConfig, CatalogFeed, HttpTransport, ProductSyncService};
//!
//! let config = CatalogConfig::load_or_default(None);
//! let db = Database::new(DbConfig::new(config.database_path())).await?;
//!
//! let service = ProductSyncService::new(
//!     Arc::new(HttpTransport::new(&config)?),
//!     Arc::new(db.products()),
//!     Arc::new(FsFileProvider::new()),
//! );
//!
//! let feed = CatalogFeed::new(service);
//! let query = SearchQuery::new();
//! let mut projector = SearchProjector::new(feed.subscribe(), query.subscribe());
//!
//! while let Some(view) = projector.next().await {
//!     render(&view);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod files;
pub mod form;
pub mod protocol;
pub mod service;
pub mod transport;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::ProductCache;
pub use config::CatalogConfig;
pub use error::{CacheError, CatalogError, CatalogResult, ConfigError, TransportError};
pub use feed::{CatalogFeed, SearchProjector, SearchQuery};
pub use files::{FileProvider, FsFileProvider, ImageRef, LocalFile};
pub use form::{AddProductForm, SubmissionStatus};
pub use protocol::{ProductSubmission, TransportResponse};
pub use service::{CatalogState, ProductSyncService};
pub use transport::{CatalogTransport, HttpTransport};
