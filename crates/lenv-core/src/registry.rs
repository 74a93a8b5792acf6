use std::io::Write as _;
use std::path::{Path, PathBuf};

use lenv_backend::{LenvError, Version, find_version};
use lenv_platform::NamespacePaths;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Stands for the managed root in persisted paths.
pub const ROOT_TOKEN: &str = "${LENV_ROOT}";
/// Stands for the namespace versions directory in persisted paths.
pub const VERSIONS_TOKEN: &str = "${LENV_VERSIONS}";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(default, rename = "installedVersions")]
    installed: Vec<Version>,
    #[serde(default, rename = "globalVersion")]
    global: Option<Version>,
}

/// Installed versions and the global pointer of one language namespace.
///
/// Loaded once per command, mutated in memory, then written back with
/// [`Registry::save`].
#[derive(Debug)]
pub struct Registry {
    paths: NamespacePaths,
    installed: Vec<Version>,
    global: Option<Version>,
}

impl Registry {
    /// Load the registry for `paths`, creating the layout and an empty config
    /// document on first use.
    ///
    /// Entries whose install directory is gone are dropped. The global pointer
    /// is cleared when it no longer names an installed version or when the
    /// activation link is missing or empty.
    ///
    /// # Errors
    /// Returns `ConfigUnavailable` when the layout cannot be created or the
    /// config document cannot be read or parsed.
    pub fn load(paths: NamespacePaths) -> Result<Self, LenvError> {
        paths.ensure_dirs().map_err(|e| {
            LenvError::config_unavailable(format!(
                "failed to create {}: {e}",
                paths.versions_dir.display()
            ))
        })?;

        if !paths.config_file.exists() {
            info!("Initializing {}", paths.config_file.display());
            let registry = Self {
                paths,
                installed: Vec::new(),
                global: None,
            };
            registry.save()?;
            return Ok(registry);
        }

        let content = std::fs::read_to_string(&paths.config_file).map_err(|e| {
            LenvError::config_unavailable(format!(
                "failed to read {}: {e}",
                paths.config_file.display()
            ))
        })?;
        let document: ConfigDocument = serde_json::from_str(&content).map_err(|e| {
            LenvError::config_unavailable(format!(
                "failed to parse {}: {e}",
                paths.config_file.display()
            ))
        })?;

        let mut registry = Self {
            installed: document
                .installed
                .into_iter()
                .map(|v| expand_version(&paths, v))
                .collect(),
            global: document.global.map(|v| expand_version(&paths, v)),
            paths,
        };
        registry.reconcile();
        Ok(registry)
    }

    fn reconcile(&mut self) {
        self.installed.retain(|version| {
            let present = version.path.is_dir();
            if !present {
                warn!(
                    "Dropping {}: {} no longer exists",
                    version.name(),
                    version.path.display()
                );
            }
            present
        });

        let Some(global) = self.global.take() else {
            return;
        };

        let Some(installed) = find_version(&self.installed, &global) else {
            warn!("Global version {} is not installed, unsetting", global.name());
            return;
        };

        if !dir_has_entries(&self.paths.current_link) {
            warn!(
                "Activation link {} is missing or empty, unsetting global version",
                self.paths.current_link.display()
            );
            return;
        }

        self.global = Some(installed.clone());
    }

    /// Write the registry back with portable placeholder paths.
    ///
    /// # Errors
    /// Returns `ConfigUnavailable` if serialization or the atomic write fails.
    pub fn save(&self) -> Result<(), LenvError> {
        let document = ConfigDocument {
            installed: self
                .installed
                .iter()
                .map(|v| collapse_version(&self.paths, v))
                .collect(),
            global: self
                .global
                .as_ref()
                .map(|v| collapse_version(&self.paths, v)),
        };

        let data = serde_json::to_string_pretty(&document).map_err(|e| {
            LenvError::config_unavailable(format!("failed to serialize config: {e}"))
        })?;
        write_atomic(&self.paths.config_file, data.as_bytes()).map_err(|e| {
            LenvError::config_unavailable(format!(
                "failed to write {}: {e}",
                self.paths.config_file.display()
            ))
        })?;

        debug!("Saved {}", self.paths.config_file.display());
        Ok(())
    }

    #[must_use]
    pub fn paths(&self) -> &NamespacePaths {
        &self.paths
    }

    #[must_use]
    pub fn installed(&self) -> &[Version] {
        &self.installed
    }

    #[must_use]
    pub fn global(&self) -> Option<&Version> {
        self.global.as_ref()
    }

    #[must_use]
    pub fn is_global(&self, version: &Version) -> bool {
        self.global.as_ref().is_some_and(|g| g.same_identity(version))
    }

    pub fn set_global(&mut self, version: Option<Version>) {
        self.global = version;
    }

    /// Append without a duplicate check; callers look the identity up first.
    pub fn add_version(&mut self, version: Version) {
        self.installed.push(version);
    }

    /// Remove by identity. Returns `false` if nothing matched.
    pub fn remove_version(&mut self, version: &Version) -> bool {
        match self.installed.iter().position(|v| v.same_identity(version)) {
            Some(index) => {
                self.installed.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn find_version(&self, version: &Version) -> Option<&Version> {
        find_version(&self.installed, version)
    }

    /// Replace a machine-specific prefix with its placeholder token.
    #[must_use]
    pub fn to_portable(&self, path: &Path) -> PathBuf {
        collapse(&self.paths, path)
    }

    /// Expand a placeholder token back into an absolute path.
    #[must_use]
    pub fn from_portable(&self, path: &Path) -> PathBuf {
        expand(&self.paths, path)
    }
}

fn collapse(paths: &NamespacePaths, path: &Path) -> PathBuf {
    // Most specific prefix first: the versions dir lives under the root.
    for (prefix, token) in [(&paths.versions_dir, VERSIONS_TOKEN), (&paths.root, ROOT_TOKEN)] {
        if let Ok(rest) = path.strip_prefix(prefix) {
            return join_token(token, rest);
        }
    }
    path.to_path_buf()
}

fn expand(paths: &NamespacePaths, path: &Path) -> PathBuf {
    for (token, base) in [(VERSIONS_TOKEN, &paths.versions_dir), (ROOT_TOKEN, &paths.root)] {
        if let Ok(rest) = path.strip_prefix(token) {
            return if rest.as_os_str().is_empty() {
                base.clone()
            } else {
                base.join(rest)
            };
        }
    }
    path.to_path_buf()
}

fn join_token(token: &str, rest: &Path) -> PathBuf {
    if rest.as_os_str().is_empty() {
        PathBuf::from(token)
    } else {
        Path::new(token).join(rest)
    }
}

fn collapse_version(paths: &NamespacePaths, version: &Version) -> Version {
    let mut version = version.clone();
    version.path = collapse(paths, &version.path);
    version
}

fn expand_version(paths: &NamespacePaths, mut version: Version) -> Version {
    version.path = expand(paths, &version.path);
    version
}

fn dir_has_entries(path: &Path) -> bool {
    std::fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_some())
}

fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "config path has no parent")
    })?;

    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
