//! # Repository Module
//!
//! Database repository implementations for the catalog cache.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductSyncService                                                     │
//! │       │                                                                 │
//! │       │  db.products().replace_all(&fresh)                              │
//! │       ▼                                                                 │
//! │  ProductCacheRepository                                                 │
//! │  ├── get_all(&self)                                                     │
//! │  ├── replace_all(&self, products)                                       │
//! │  ├── count(&self)                                                       │
//! │  └── last_refreshed(&self)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite `products` table                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
