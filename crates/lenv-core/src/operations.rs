use std::path::Path;

use lenv_backend::{ArchiveExtractor, Downloader, LenvError, Version};
use log::{debug, info, warn};

use crate::feed;
use crate::language::Language;
use crate::post_install;
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(Version),
    AlreadyInstalled(Version),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed(Version),
    /// The target was global and the confirmation was refused.
    Declined(Version),
}

/// One row of a version listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub version: Version,
    pub installed: bool,
    pub active: bool,
}

/// Asset prefix of the running platform.
///
/// # Errors
/// Returns `UnsupportedPlatform` when there is no release asset family for
/// this OS and architecture.
pub fn require_platform_prefix() -> Result<String, LenvError> {
    lenv_platform::current_platform_prefix().ok_or_else(|| {
        LenvError::unsupported_platform(std::env::consts::OS, std::env::consts::ARCH)
    })
}

/// Download, extract and register `target`.
///
/// The registry is mutated in memory only; the caller saves it. A partially
/// populated install directory is removed when any step fails.
///
/// # Errors
/// Network, extraction and post-install failures.
pub async fn install(
    registry: &mut Registry,
    language: Language,
    downloader: &dyn Downloader,
    extractor: &dyn ArchiveExtractor,
    prefix: &str,
    target: &Version,
) -> Result<InstallOutcome, LenvError> {
    if let Some(existing) = registry.find_version(target) {
        debug!("{} is already installed at {}", existing.name(), existing.path.display());
        return Ok(InstallOutcome::AlreadyInstalled(existing.clone()));
    }

    let url = language.download_url(&target.version, prefix, &target.vendor);
    info!("Installing {language} {} from {url}", target.name());
    let archive = downloader.fetch(&url).await?;

    let install_dir = registry.paths().version_dir(&target.name());
    if install_dir.exists() {
        warn!("Replacing unregistered directory {}", install_dir.display());
        std::fs::remove_dir_all(&install_dir)?;
    }

    let populated = populate(
        language,
        downloader,
        extractor,
        &archive,
        target,
        &install_dir,
    )
    .await;
    if let Err(error) = populated {
        discard(&install_dir);
        return Err(error);
    }

    if let Err(e) = archive.close() {
        debug!("Failed to delete downloaded archive: {e}");
    }

    let installed = Version::new(target.version.clone(), target.vendor.clone())
        .with_path(install_dir);
    registry.add_version(installed.clone());
    Ok(InstallOutcome::Installed(installed))
}

async fn populate(
    language: Language,
    downloader: &dyn Downloader,
    extractor: &dyn ArchiveExtractor,
    archive: &Path,
    target: &Version,
    install_dir: &Path,
) -> Result<(), LenvError> {
    extractor.extract(archive, install_dir)?;
    post_install::run(language, downloader, target, install_dir).await
}

fn discard(install_dir: &Path) {
    match std::fs::remove_dir_all(install_dir) {
        Ok(()) => debug!("Removed partial install {}", install_dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial install {}: {e}", install_dir.display()),
    }
}

/// Remove `target` from disk and from the registry.
///
/// `confirm` is consulted only when the target is the global version. On
/// confirmation the in-memory global pointer is cleared; the activation link
/// is left dangling and the next load demotes any stale pointer.
///
/// # Errors
/// `NotInstalled` when the target is unknown, `Consistency` if the registry
/// entry disappears between lookup and removal, or the I/O failure.
pub fn uninstall(
    registry: &mut Registry,
    target: &Version,
    confirm: impl FnOnce(&Version) -> bool,
) -> Result<UninstallOutcome, LenvError> {
    let installed = registry
        .find_version(target)
        .cloned()
        .ok_or_else(|| LenvError::not_installed(target.name()))?;

    let was_global = registry.is_global(&installed);
    if was_global && !confirm(&installed) {
        info!("Keeping global version {}", installed.name());
        return Ok(UninstallOutcome::Declined(installed));
    }

    if was_global {
        registry.set_global(None);
    }

    match std::fs::remove_dir_all(&installed.path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} was already gone", installed.path.display());
        }
        Err(e) => return Err(e.into()),
    }

    if !registry.remove_version(&installed) {
        return Err(LenvError::consistency(
            "uninstall",
            format!("{} vanished from the installed list", installed.name()),
        ));
    }

    info!("Uninstalled {}", installed.name());
    Ok(UninstallOutcome::Removed(installed))
}

/// Installed versions in install order.
#[must_use]
pub fn list_installed(registry: &Registry) -> Vec<ListEntry> {
    registry
        .installed()
        .iter()
        .map(|version| ListEntry {
            version: version.clone(),
            installed: true,
            active: registry.is_global(version),
        })
        .collect()
}

/// Versions offered by the release feed for `prefix`, followed by installed
/// versions the feed no longer lists.
///
/// # Errors
/// Transport, HTTP status and response-parse failures of the feed request.
pub async fn list_available(
    registry: &Registry,
    language: Language,
    downloader: &dyn Downloader,
    prefix: &str,
) -> Result<Vec<ListEntry>, LenvError> {
    let body = downloader.fetch_text(&language.releases_url()).await?;
    let releases = feed::parse_releases(&body)?;
    let remote = feed::candidates(&releases, prefix);
    debug!("Feed offers {} {language} candidates for {prefix}", remote.len());

    let mut entries: Vec<ListEntry> = remote
        .into_iter()
        .map(|candidate| match registry.find_version(&candidate) {
            Some(installed) => ListEntry {
                active: registry.is_global(installed),
                version: installed.clone(),
                installed: true,
            },
            None => ListEntry {
                version: candidate,
                installed: false,
                active: false,
            },
        })
        .collect();

    let local_only: Vec<ListEntry> = list_installed(registry)
        .into_iter()
        .filter(|local| !entries.iter().any(|e| e.version.same_identity(&local.version)))
        .collect();
    entries.extend(local_only);

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lenv_backend::{ArchiveExtractor, Downloader, LenvError, Version};
    use lenv_platform::LenvPaths;
    use tempfile::TempPath;

    use super::*;

    struct StaticDownloader {
        body: Vec<u8>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticDownloader {
        fn new(body: impl Into<Vec<u8>>) -> Self {
            Self {
                body: body.into(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Downloader for StaticDownloader {
        async fn fetch(&self, url: &str) -> Result<TempPath, LenvError> {
            self.requested.lock().expect("lock").push(url.to_string());
            let mut file = tempfile::NamedTempFile::new()?;
            file.write_all(&self.body)?;
            Ok(file.into_temp_path())
        }
    }

    struct OfflineDownloader;

    #[async_trait]
    impl Downloader for OfflineDownloader {
        async fn fetch(&self, _url: &str) -> Result<TempPath, LenvError> {
            Err(LenvError::transport("download", "connection refused"))
        }
    }

    /// Writes a `bin/` directory with a single marker file.
    struct FakeExtractor;

    impl ArchiveExtractor for FakeExtractor {
        fn extract(&self, _archive: &Path, dest: &Path) -> Result<(), LenvError> {
            std::fs::create_dir_all(dest.join("bin"))?;
            std::fs::write(dest.join("bin").join("java"), b"#!/bin/sh\n")?;
            Ok(())
        }
    }

    struct BrokenExtractor;

    impl ArchiveExtractor for BrokenExtractor {
        fn extract(&self, archive: &Path, dest: &Path) -> Result<(), LenvError> {
            std::fs::create_dir_all(dest.join("lib"))?;
            Err(LenvError::extract(archive, "truncated archive"))
        }
    }

    fn registry(root: &Path) -> Registry {
        Registry::load(LenvPaths::from_root(root).namespace("java")).expect("registry should load")
    }

    #[tokio::test]
    async fn install_registers_version_under_versions_dir() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());
        let downloader = StaticDownloader::new(b"zip".to_vec());
        let target = Version::new("17", "temurin");

        let outcome = install(
            &mut registry,
            Language::Java,
            &downloader,
            &FakeExtractor,
            "linux64",
            &target,
        )
        .await
        .expect("install should succeed");

        let installed = match outcome {
            InstallOutcome::Installed(installed) => installed,
            other => panic!("expected a fresh install, got {other:?}"),
        };
        assert_eq!(installed.path, registry.paths().version_dir("17-temurin"));
        assert!(installed.path.join("bin").join("java").is_file());
        assert_eq!(registry.installed(), [target]);
        assert_eq!(
            *downloader.requested.lock().expect("lock"),
            [
                "https://github.com/kiber-io/lenv-java-versions/releases/download/17/linux64-temurin.zip"
            ]
        );
    }

    #[tokio::test]
    async fn installing_twice_reports_already_installed() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());
        let downloader = StaticDownloader::new(b"zip".to_vec());
        let target = Version::new("17", "temurin");

        install(
            &mut registry,
            Language::Java,
            &downloader,
            &FakeExtractor,
            "linux64",
            &target,
        )
        .await
        .expect("first install");
        let outcome = install(
            &mut registry,
            Language::Java,
            &downloader,
            &FakeExtractor,
            "linux64",
            &target,
        )
        .await
        .expect("second install");

        assert!(matches!(outcome, InstallOutcome::AlreadyInstalled(_)));
        assert_eq!(registry.installed().len(), 1);
        assert_eq!(downloader.requested.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn failed_download_leaves_registry_untouched() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());

        let error = install(
            &mut registry,
            Language::Java,
            &OfflineDownloader,
            &FakeExtractor,
            "linux64",
            &Version::new("17", "temurin"),
        )
        .await
        .expect_err("offline install should fail");

        assert!(matches!(error, LenvError::Network { .. }));
        assert!(registry.installed().is_empty());
        assert!(!registry.paths().version_dir("17-temurin").exists());
    }

    #[tokio::test]
    async fn failed_extraction_removes_partial_directory() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());
        let downloader = StaticDownloader::new(b"zip".to_vec());

        let error = install(
            &mut registry,
            Language::Java,
            &downloader,
            &BrokenExtractor,
            "linux64",
            &Version::new("17", "temurin"),
        )
        .await
        .expect_err("broken archive should fail");

        assert!(matches!(error, LenvError::Extract { .. }));
        assert!(registry.installed().is_empty());
        assert!(!registry.paths().version_dir("17-temurin").exists());
    }

    #[tokio::test]
    async fn python_install_fails_without_interpreter() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = Registry::load(LenvPaths::from_root(temp.path()).namespace("python"))
            .expect("registry should load");
        let downloader = StaticDownloader::new(b"print('pip')".to_vec());

        let error = install(
            &mut registry,
            Language::Python,
            &downloader,
            &FakeExtractor,
            "linux64",
            &Version::new("3.12.1", "cpython"),
        )
        .await
        .expect_err("missing interpreter should fail the install");

        assert!(matches!(error, LenvError::InstallFailed { phase: "pip bootstrap", .. }));
        assert!(registry.installed().is_empty());
        assert!(!registry.paths().version_dir("3.12.1-cpython").exists());
        assert_eq!(
            downloader.requested.lock().expect("lock").last().map(String::as_str),
            Some("https://bootstrap.pypa.io/get-pip.py")
        );
    }

    #[test]
    fn uninstall_unknown_is_not_installed() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());

        let error = uninstall(&mut registry, &Version::new("8", "zulu"), |_| true)
            .expect_err("unknown version should fail");

        assert!(!error.is_fatal());
    }

    #[test]
    fn uninstall_of_plain_version_skips_confirmation() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());
        let dir = registry.paths().version_dir("17-temurin");
        std::fs::create_dir_all(&dir).expect("install dir should be created");
        registry.add_version(Version::new("17", "temurin").with_path(&dir));

        let outcome = uninstall(&mut registry, &Version::new("17", "temurin"), |_| {
            panic!("confirmation should not be requested")
        })
        .expect("uninstall should succeed");

        assert!(matches!(outcome, UninstallOutcome::Removed(_)));
        assert!(!dir.exists());
        assert!(registry.installed().is_empty());
    }

    #[tokio::test]
    async fn list_available_marks_installed_and_appends_local_only() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());
        registry.add_version(Version::new("21", "zulu").with_path("/x"));
        registry.add_version(Version::new("8", "legacy").with_path("/y"));
        registry.set_global(Some(Version::new("21", "zulu").with_path("/x")));

        let downloader = StaticDownloader::new(
            r#"[{"tag_name": "21", "assets": [
                {"name": "linux64-temurin.zip"},
                {"name": "linux64-zulu.zip"}
            ]}]"#,
        );
        let entries = list_available(&registry, Language::Java, &downloader, "linux64")
            .await
            .expect("listing should succeed");

        let rows: Vec<(String, bool, bool)> = entries
            .iter()
            .map(|e| (e.version.name(), e.installed, e.active))
            .collect();
        assert_eq!(
            rows,
            [
                ("21-temurin".to_string(), false, false),
                ("21-zulu".to_string(), true, true),
                ("8-legacy".to_string(), true, false),
            ]
        );
    }

    #[test]
    fn list_installed_marks_active() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let mut registry = registry(temp.path());
        registry.add_version(Version::new("17", "temurin").with_path("/a"));
        registry.add_version(Version::new("21", "zulu").with_path("/b"));
        registry.set_global(Some(Version::new("21", "zulu")));

        let active: Vec<bool> = list_installed(&registry).iter().map(|e| e.active).collect();
        assert_eq!(active, [false, true]);
    }
}
