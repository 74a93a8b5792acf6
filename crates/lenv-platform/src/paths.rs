use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the managed root.
pub const ROOT_ENV: &str = "LENV_ROOT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathsError {
    #[error("{0} is not set")]
    RootUnset(&'static str),
    #[error("{var} must be an absolute path, got: {value}")]
    RootNotAbsolute { var: &'static str, value: String },
}

/// The managed root and everything derived from it.
#[derive(Debug, Clone)]
pub struct LenvPaths {
    pub root: PathBuf,
}

impl LenvPaths {
    /// Resolve the managed root from `LENV_ROOT`.
    ///
    /// # Errors
    /// Returns an error when the variable is unset, empty or relative.
    pub fn from_env() -> Result<Self, PathsError> {
        Self::from_value(std::env::var_os(ROOT_ENV).map(PathBuf::from))
    }

    fn from_value(value: Option<PathBuf>) -> Result<Self, PathsError> {
        let root = value
            .filter(|root| !root.as_os_str().is_empty())
            .ok_or(PathsError::RootUnset(ROOT_ENV))?;

        if !root.is_absolute() {
            return Err(PathsError::RootNotAbsolute {
                var: ROOT_ENV,
                value: root.display().to_string(),
            });
        }

        Ok(Self { root })
    }

    #[must_use]
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn namespace(&self, name: &str) -> NamespacePaths {
        NamespacePaths::new(&self.root, name)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.root.join("lenv.log")
    }
}

/// Layout of one language namespace under the managed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePaths {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub versions_dir: PathBuf,
    pub current_link: PathBuf,
    pub config_file: PathBuf,
}

impl NamespacePaths {
    #[must_use]
    pub fn new(root: &Path, name: &str) -> Self {
        let dir = root.join(name);
        Self {
            root: root.to_path_buf(),
            versions_dir: dir.join("versions"),
            current_link: dir.join("current"),
            config_file: dir.join("config.json"),
            dir,
        }
    }

    /// Install directory for a `version-vendor` name.
    #[must_use]
    pub fn version_dir(&self, name: &str) -> PathBuf {
        self.versions_dir.join(name)
    }

    /// Ensure the root, namespace and versions directories exist.
    ///
    /// # Errors
    /// Returns an error if any directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.versions_dir)?;
        log::debug!("Ensured namespace layout at {}", self.dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{LenvPaths, PathsError};

    #[test]
    fn unset_or_empty_root_is_rejected() {
        assert_eq!(
            LenvPaths::from_value(None).unwrap_err(),
            PathsError::RootUnset("LENV_ROOT")
        );
        assert_eq!(
            LenvPaths::from_value(Some(PathBuf::new())).unwrap_err(),
            PathsError::RootUnset("LENV_ROOT")
        );
    }

    #[test]
    fn relative_root_is_rejected() {
        let error = LenvPaths::from_value(Some(PathBuf::from("relative/root"))).unwrap_err();
        assert!(matches!(error, PathsError::RootNotAbsolute { .. }));
    }

    #[test]
    fn namespace_paths_use_expected_names() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let paths = LenvPaths::from_value(Some(temp.path().to_path_buf()))
            .expect("absolute root should be accepted");
        let java = paths.namespace("java");

        assert_eq!(java.dir, temp.path().join("java"));
        assert!(java.versions_dir.ends_with(Path::new("java").join("versions")));
        assert!(java.current_link.ends_with(Path::new("java").join("current")));
        assert!(java.config_file.ends_with(Path::new("java").join("config.json")));
        assert_eq!(
            java.version_dir("17-temurin"),
            java.versions_dir.join("17-temurin")
        );
        assert!(paths.log_file().ends_with("lenv.log"));
    }

    #[test]
    fn ensure_dirs_creates_layout() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let root = temp.path().join("managed");
        let python = LenvPaths::from_root(&root).namespace("python");

        python
            .ensure_dirs()
            .expect("ensure_dirs should create namespace directories");

        assert!(root.is_dir());
        assert!(python.versions_dir.is_dir());
        assert!(!python.current_link.exists());
    }
}
