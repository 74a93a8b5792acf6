use async_trait::async_trait;
use std::path::Path;
use tempfile::TempPath;

use crate::error::LenvError;

/// Fetches remote resources into local temporary files.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` into a temporary file that is deleted when the returned
    /// path is dropped.
    ///
    /// Connection failures and non-success status codes are reported as
    /// distinct errors.
    async fn fetch(&self, url: &str) -> Result<TempPath, LenvError>;

    async fn fetch_text(&self, url: &str) -> Result<String, LenvError> {
        let path = self.fetch(url).await?;
        let bytes = std::fs::read(&path)?;
        String::from_utf8(bytes).map_err(|e| LenvError::bad_response_from("read response", e))
    }
}

pub trait ArchiveExtractor: Send + Sync {
    /// Expand `archive` under `dest`, creating intermediate directories and
    /// keeping the archive's relative layout.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), LenvError>;
}

/// Platform-specific mechanics of making one install directory the active one.
pub trait ActivationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Remove the link entity at `link`. A missing link is not an error.
    fn remove_link(&self, link: &Path) -> Result<(), LenvError>;

    /// Create `link` as a directory alias resolving to `target`.
    fn create_link(&self, link: &Path, target: &Path) -> Result<(), LenvError>;

    fn normalize_permissions(&self, _link: &Path) -> Result<(), LenvError> {
        Ok(())
    }

    /// Persist `var=link` so future shell sessions see it. Must not duplicate
    /// an existing identical binding.
    fn bind_home(&self, var: &str, link: &Path) -> Result<(), LenvError>;
}
