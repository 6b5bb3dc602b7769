//! # Catalog Configuration
//!
//! Where the catalog API lives, where the cache is stored, and where picked
//! images are staged.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CATALOG_API_URL=http://localhost:8080/api/                         │
//! │     CATALOG_HTTP_TIMEOUT_SECS=10                                       │
//! │     CATALOG_DB_PATH=/tmp/catalog.db                                    │
//! │     CATALOG_IMAGE_STAGING_DIR=/tmp/catalog-images                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/catalog/catalog.toml (Linux)                             │
//! │     ~/Library/Application Support/com.productx.catalog/ (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://app.getswipe.in/api/                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [api]
//! base_url = "https://app.getswipe.in/api/"
//! list_path = "public/get"
//! add_path = "public/add"
//! timeout_secs = 30
//!
//! [cache]
//! database_path = "/var/lib/catalog/catalog.db"
//!
//! [images]
//! staging_dir = "/var/cache/catalog/images"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "catalog.toml";
const DATABASE_FILE_NAME: &str = "catalog.db";

// =============================================================================
// API Settings
// =============================================================================

/// Remote catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every path is resolved against. Keep the trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the product list endpoint (GET).
    #[serde(default = "default_list_path")]
    pub list_path: String,

    /// Path of the add-product endpoint (multipart POST).
    #[serde(default = "default_add_path")]
    pub add_path: String,

    /// Request timeout (seconds), enforced by the HTTP client.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://app.getswipe.in/api/".to_string()
}

fn default_list_path() -> String {
    "public/get".to_string()
}

fn default_add_path() -> String {
    "public/add".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("catalog-sync/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            list_path: default_list_path(),
            add_path: default_add_path(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// Cache & Image Settings
// =============================================================================

/// Local cache settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSettings {
    /// SQLite file. Defaults to `catalog.db` in the project data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// Picked-image settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Directory picked images are copied into before upload.
    /// When unset, images are read in place.
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub images: ImageSettings,
}

impl CatalogConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The default path may be absent.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Loads config or returns defaults if the file cannot be used.
    ///
    /// Environment overrides are applied either way.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load_or_default_with(config_path, |key| std::env::var(key).ok())
    }

    fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_file(config_path)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    fn load_or_default_with<F>(config_path: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_file(config_path)
            .and_then(|config| config.validate().map(|_| config))
            .unwrap_or_else(|e| {
                warn!("Failed to load catalog config: {}. Using defaults.", e);
                Self::default()
            });

        config.apply_overrides(lookup);
        config
    }

    /// File settings: the explicit path, else the default path if present.
    fn from_file(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::LoadFailed(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => path,
                other => {
                    debug!(path = ?other, "Config file not found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        info!(?path, "Loading catalog config from file");
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Catalog config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        parse_base_url(&self.api.base_url)?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        self.list_url()?;
        self.add_url()?;

        Ok(())
    }

    /// Applies overrides looked up by variable name.
    ///
    /// `load` passes the process environment; tests pass a map. An unusable
    /// value is logged and skipped, leaving the previous setting in place.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CATALOG_API_URL") {
            match parse_base_url(&url) {
                Ok(_) => {
                    debug!(url = %url, "Overriding API URL from environment");
                    self.api.base_url = url;
                }
                Err(e) => warn!(value = %url, error = %e, "Ignoring CATALOG_API_URL"),
            }
        }

        if let Some(timeout) = lookup("CATALOG_HTTP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => self.api.timeout_secs = secs,
                _ => warn!(value = %timeout, "Ignoring CATALOG_HTTP_TIMEOUT_SECS, expected seconds > 0"),
            }
        }

        if let Some(path) = lookup("CATALOG_DB_PATH") {
            debug!(path = %path, "Overriding cache path from environment");
            self.cache.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("CATALOG_IMAGE_STAGING_DIR") {
            self.images.staging_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "productx", "catalog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved SQLite path: explicit setting, else the project data dir,
    /// else `catalog.db` in the working directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.cache.database_path {
            return path.clone();
        }

        directories::ProjectDirs::from("com", "productx", "catalog")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    /// Full URL of the product list endpoint.
    pub fn list_url(&self) -> ConfigResult<Url> {
        Ok(parse_base_url(&self.api.base_url)?.join(&self.api.list_path)?)
    }

    /// Full URL of the add-product endpoint.
    pub fn add_url(&self) -> ConfigResult<Url> {
        Ok(parse_base_url(&self.api.base_url)?.join(&self.api.add_path)?)
    }

    /// HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

/// Parses an http(s) base URL as a directory, so `.../api` and `.../api/`
/// both resolve endpoint paths under `api/`.
fn parse_base_url(raw: &str) -> ConfigResult<Url> {
    let mut base = Url::parse(raw)?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "API URL must start with http:// or https://, got: {}",
            raw
        )));
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base)
}
