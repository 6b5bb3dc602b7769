//! # Application State
//!
//! Everything a command needs, built once per invocation.
//!
//! ```text
//! AppState
//! ├── config    CatalogConfig (file + env)
//! ├── db        Database (SQLite cache, migrations applied)
//! └── service   ProductSyncService
//!               ├── HttpTransport      (reqwest)
//!               ├── ProductCache       (db.products())
//!               └── FsFileProvider     (optional staging dir)
//! ```

use std::sync::Arc;

use catalog_db::{Database, DbConfig};
use catalog_sync::{CatalogConfig, FsFileProvider, HttpTransport, ProductSyncService};
use tracing::{debug, info};

pub struct AppState {
    pub config: CatalogConfig,
    pub db: Database,
    pub service: ProductSyncService,
}

impl AppState {
    /// Opens the cache database and wires the sync service.
    pub async fn connect(config: CatalogConfig) -> anyhow::Result<Self> {
        let db_path = config.database_path();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Cache database connected and migrations applied");

        Self::with_database(config, db)
    }

    /// Wires the sync service over an already opened database.
    pub fn with_database(config: CatalogConfig, db: Database) -> anyhow::Result<Self> {
        let files = match &config.images.staging_dir {
            Some(dir) => FsFileProvider::with_staging_dir(dir.clone()),
            None => FsFileProvider::new(),
        };

        let service = ProductSyncService::new(
            Arc::new(HttpTransport::new(&config)?),
            Arc::new(db.products()),
            Arc::new(files),
        );

        Ok(AppState {
            config,
            db,
            service,
        })
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
