//! # Image Materialisation
//!
//! Turns a picked image reference into bytes that can be uploaded.
//!
//! A reference that is empty, missing, or unreadable is treated the same as
//! no image at all: the submission carries an empty `files[]` part.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name used when the reference has none of its own.
pub const FALLBACK_FILE_NAME: &str = "temp_image";

/// Opaque reference to a locally picked (and possibly cropped) image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ImageRef(path.into())
    }

    /// True when the reference points nowhere.
    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Name the uploaded file is given.
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME)
            .to_string()
    }
}

impl From<&str> for ImageRef {
    fn from(path: &str) -> Self {
        ImageRef::new(path)
    }
}

/// A readable local file ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Resolves image references to readable files.
#[async_trait]
pub trait FileProvider: Send + Sync {
    /// Returns the file behind `image`, or `None` if it cannot be read.
    async fn materialize(&self, image: &ImageRef) -> Option<LocalFile>;
}

/// Reads images from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsFileProvider {
    staging_dir: Option<PathBuf>,
}

impl FsFileProvider {
    /// Reads images in place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies each image into `dir` before it is uploaded.
    pub fn with_staging_dir(dir: impl Into<PathBuf>) -> Self {
        FsFileProvider {
            staging_dir: Some(dir.into()),
        }
    }

    async fn stage(&self, name: &str, bytes: &[u8]) -> std::io::Result<()> {
        let Some(dir) = &self.staging_dir else {
            return Ok(());
        };

        tokio::fs::create_dir_all(dir).await?;
        let target = dir.join(name);
        tokio::fs::write(&target, bytes).await?;

        debug!(path = %target.display(), "Staged image for upload");
        Ok(())
    }
}

#[async_trait]
impl FileProvider for FsFileProvider {
    async fn materialize(&self, image: &ImageRef) -> Option<LocalFile> {
        if image.is_empty() {
            return None;
        }

        let bytes = match tokio::fs::read(image.path()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %image.path().display(), error = %e, "Image unreadable, submitting without it");
                return None;
            }
        };

        let name = image.file_name();

        if let Err(e) = self.stage(&name, &bytes).await {
            warn!(error = %e, "Failed to stage image, submitting without it");
            return None;
        }

        Some(LocalFile { name, bytes })
    }
}
