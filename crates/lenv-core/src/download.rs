use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use lenv_backend::{ArchiveExtractor, Downloader, LenvError};
use log::{debug, info, warn};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// [`Downloader`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    /// # Errors
    /// Returns a transport error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, LenvError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("lenv/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LenvError::transport_from("build http client", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch(&self, url: &str) -> Result<TempPath, LenvError> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LenvError::transport_from("download", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LenvError::HttpStatus {
                operation: "download",
                status: status.as_u16(),
            });
        }

        let (file, path) = tempfile::Builder::new()
            .prefix("lenv-")
            .tempfile()?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| LenvError::transport_from("download stream", e))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }
        file.flush().await?;

        info!("Downloaded {downloaded} bytes from {url}");
        Ok(path)
    }
}

/// Extracts zip archives with the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), LenvError> {
        let fail = |what: String| LenvError::extract(archive, what);

        let file = std::fs::File::open(archive)
            .map_err(|e| fail(format!("failed to open: {e}")))?;
        let mut zip = zip::ZipArchive::new(file)
            .map_err(|e| fail(format!("failed to read archive: {e}")))?;

        std::fs::create_dir_all(dest)
            .map_err(|e| fail(format!("failed to create {}: {e}", dest.display())))?;

        for i in 0..zip.len() {
            let mut entry = zip
                .by_index(i)
                .map_err(|e| fail(format!("failed to read entry {i}: {e}")))?;
            let Some(name) = entry.enclosed_name() else {
                warn!("Skipping zip entry with unsafe path: {}", entry.name());
                continue;
            };
            let out_path = dest.join(name);

            if entry.is_dir() {
                std::fs::create_dir_all(&out_path)
                    .map_err(|e| fail(format!("failed to create {}: {e}", out_path.display())))?;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| fail(format!("failed to create {}: {e}", parent.display())))?;
            }
            let mut outfile = std::fs::File::create(&out_path)
                .map_err(|e| fail(format!("failed to create {}: {e}", out_path.display())))?;
            std::io::copy(&mut entry, &mut outfile)
                .map_err(|e| fail(format!("failed to write {}: {e}", out_path.display())))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    let permissions = std::fs::Permissions::from_mode(mode);
                    let _ = std::fs::set_permissions(&out_path, permissions);
                }
            }
        }

        debug!("Extracted {} into {}", archive.display(), dest.display());
        Ok(())
    }
}
