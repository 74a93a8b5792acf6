//! Core operations for lenv.
//!
//! This crate holds everything between the CLI and the filesystem:
//! - The per-namespace registry of installed versions and the global pointer.
//! - Switching the active version through a platform activation strategy.
//! - Release feed parsing and HTTP/zip collaborators.
//! - Install, uninstall, list and set-global operations for each language.

pub mod activation;
pub mod download;
pub mod feed;
mod language;
mod operations;
mod permissions;
mod post_install;
mod registry;

/// Platform activation strategies and the set-global transition.
pub use activation::{
    JunctionActivation, SymlinkActivation, activation_for_current_platform, set_global,
};
/// HTTP downloader and zip extractor used by installs.
pub use download::{HttpDownloader, ZipExtractor};
/// Release feed records and candidate filtering.
pub use feed::{Asset, Release, candidates, parse_asset_vendor, parse_releases};
/// Managed language namespaces.
pub use language::Language;
/// Command-level operations and their outcomes.
pub use operations::{
    InstallOutcome, ListEntry, UninstallOutcome, install, list_available, list_installed,
    require_platform_prefix, uninstall,
};
/// Persisted registry of installed versions.
pub use registry::{Registry, ROOT_TOKEN, VERSIONS_TOKEN};
