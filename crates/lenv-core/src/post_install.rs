use std::path::{Path, PathBuf};

use lenv_backend::{Downloader, LenvError, Version};
use log::{debug, info};

use crate::language::Language;
use crate::permissions;

const GET_PIP_BASE: &str = "https://bootstrap.pypa.io";

/// Language-specific steps run after an archive has been extracted into
/// `install_dir`.
pub(crate) async fn run(
    language: Language,
    downloader: &dyn Downloader,
    version: &Version,
    install_dir: &Path,
) -> Result<(), LenvError> {
    match language {
        Language::Java => {
            permissions::normalize_tree(install_dir)
                .map_err(|e| LenvError::install_failed("permissions", e.to_string()))?;
            Ok(())
        }
        Language::Python => bootstrap_pip(downloader, version, install_dir).await,
    }
}

async fn bootstrap_pip(
    downloader: &dyn Downloader,
    version: &Version,
    install_dir: &Path,
) -> Result<(), LenvError> {
    permissions::mark_executable(&install_dir.join("bin"))
        .map_err(|e| LenvError::install_failed("permissions", e.to_string()))?;

    let url = get_pip_url(&version.version);
    info!("Installing pip for {} from {url}", version.name());
    let script = downloader.fetch(&url).await?;

    let interpreter = interpreter_path(install_dir);
    debug!("Running {} {}", interpreter.display(), script.display());
    let output = lenv_platform::pip_bootstrap_command(&interpreter, &script, install_dir)
        .output()
        .await
        .map_err(|e| {
            LenvError::install_failed(
                "pip bootstrap",
                format!("failed to run {}: {e}", interpreter.display()),
            )
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LenvError::install_failed(
            "pip bootstrap",
            format!("{} exited with {}: {}", interpreter.display(), output.status, stderr.trim()),
        ));
    }

    Ok(())
}

fn interpreter_path(install_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        install_dir.join("python.exe")
    } else {
        install_dir.join("bin").join("python")
    }
}

/// `get-pip.py` location for a Python version. Interpreters older than 3.8
/// need the pinned per-minor script.
pub(crate) fn get_pip_url(version: &str) -> String {
    let threshold = semver::Version::new(3, 8, 0);
    match parse_lenient(version) {
        Some(parsed) if parsed < threshold => format!(
            "{GET_PIP_BASE}/pip/{}.{}/get-pip.py",
            parsed.major, parsed.minor
        ),
        _ => format!("{GET_PIP_BASE}/get-pip.py"),
    }
}

/// Accepts `X`, `X.Y` and `X.Y.Z` with an optional pre-release or build
/// suffix.
fn parse_lenient(version: &str) -> Option<semver::Version> {
    if let Ok(parsed) = semver::Version::parse(version) {
        return Some(parsed);
    }

    let split = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split);
    let mut parts = core.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = parts.next().map(str::parse::<u64>).transpose().ok()?;
    let patch = parts.next().map(str::parse::<u64>).transpose().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let normalized = format!(
        "{major}.{}.{}{suffix}",
        minor.unwrap_or(0),
        patch.unwrap_or(0)
    );
    semver::Version::parse(&normalized).ok()
}
