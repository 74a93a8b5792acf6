use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// An installed or installable runtime.
///
/// Identity is the `(version, vendor)` pair; `path` is where the runtime lives
/// once installed and is empty for remote candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub version: String,
    pub vendor: String,
    #[serde(default)]
    pub path: PathBuf,
}

impl Version {
    #[must_use]
    pub fn new(version: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            vendor: vendor.into(),
            path: PathBuf::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// The `version-vendor` key used for lookups, display and directory names.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}-{}", self.version, self.vendor)
    }

    #[must_use]
    pub fn same_identity(&self, other: &Version) -> bool {
        self.version == other.version && self.vendor == other.vendor
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
        self.vendor.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.version, self.vendor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("Expected <version>-<vendor>, got: {input}")]
    MissingSeparator { input: String },
    #[error("Empty {part} in: {input}")]
    EmptyPart { part: &'static str, input: String },
    #[error("The {part} in {input} cannot be used as a directory name")]
    UnsafePart { part: &'static str, input: String },
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Splits a `version-vendor` token at its first hyphen.
    ///
    /// The name becomes a directory under `versions/`, so neither part may
    /// contain a path separator or be a `.`/`..` component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (version, vendor) =
            s.split_once('-')
                .ok_or_else(|| VersionParseError::MissingSeparator {
                    input: s.to_string(),
                })?;

        check_part("version", version, s)?;
        check_part("vendor", vendor, s)?;

        Ok(Version::new(version, vendor))
    }
}

fn check_part(part: &'static str, value: &str, input: &str) -> Result<(), VersionParseError> {
    if value.is_empty() {
        return Err(VersionParseError::EmptyPart {
            part,
            input: input.to_string(),
        });
    }
    if matches!(value, "." | "..") || value.contains(['/', '\\']) {
        return Err(VersionParseError::UnsafePart {
            part,
            input: input.to_string(),
        });
    }
    Ok(())
}

/// Linear lookup by identity. Absence is an ordinary outcome.
#[must_use]
pub fn find_version<'a>(versions: &'a [Version], target: &Version) -> Option<&'a Version> {
    versions.iter().find(|v| v.same_identity(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_hyphen() {
        let v: Version = "17.0.2-temurin".parse().unwrap();
        assert_eq!(v.version, "17.0.2");
        assert_eq!(v.vendor, "temurin");
        assert!(!v.is_installed());

        let v: Version = "3.12.1-cpython-pgo".parse().unwrap();
        assert_eq!(v.version, "3.12.1");
        assert_eq!(v.vendor, "cpython-pgo");
    }

    #[test]
    fn test_parse_missing_hyphen_is_rejected() {
        let result: Result<Version, _> = "17".parse();
        assert!(matches!(
            result,
            Err(VersionParseError::MissingSeparator { ref input }) if input == "17"
        ));
    }

    #[test]
    fn test_parse_empty_parts_are_rejected() {
        assert!(matches!(
            "-temurin".parse::<Version>(),
            Err(VersionParseError::EmptyPart { part: "version", .. })
        ));
        assert!(matches!(
            "17-".parse::<Version>(),
            Err(VersionParseError::EmptyPart { part: "vendor", .. })
        ));
    }

    #[test]
    fn test_parse_rejects_names_that_leave_versions_dir() {
        for (input, part) in [
            ("../../x-v", "version"),
            ("..-temurin", "version"),
            (".-temurin", "version"),
            ("17-a/b", "vendor"),
            (r"17-..\evil", "vendor"),
            ("17-..", "vendor"),
        ] {
            match input.parse::<Version>() {
                Err(VersionParseError::UnsafePart { part: got, .. }) => {
                    assert_eq!(got, part, "{input}");
                }
                other => panic!("{input} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_keeps_dots_inside_parts() {
        let v: Version = "3.12.1-cpython".parse().unwrap();
        assert_eq!(v.version, "3.12.1");

        let v: Version = "17-..temurin".parse().unwrap();
        assert_eq!(v.vendor, "..temurin");
    }

    #[test]
    fn test_parse_does_not_normalize() {
        let v: Version = " 17-Temurin".parse().unwrap();
        assert_eq!(v.version, " 17");
        assert_eq!(v.vendor, "Temurin");
        assert_ne!(v, Version::new("17", "temurin"));
    }

    #[test]
    fn test_name_joins_with_hyphen() {
        let v = Version::new("21", "corretto");
        assert_eq!(v.name(), "21-corretto");
        assert_eq!(v.to_string(), v.name());
    }

    #[test]
    fn test_equality_ignores_path() {
        let a = Version::new("17", "temurin").with_path("/a");
        let b = Version::new("17", "temurin").with_path("/b");
        assert_eq!(a, b);
        assert_ne!(a, Version::new("17", "zulu"));
        assert_ne!(a, Version::new("21", "temurin"));
    }

    #[test]
    fn test_find_version_returns_matching_entry() {
        let installed = vec![
            Version::new("17", "temurin").with_path("/v/17-temurin"),
            Version::new("21", "temurin").with_path("/v/21-temurin"),
        ];

        let found = find_version(&installed, &Version::new("21", "temurin"))
            .expect("21-temurin should be found");
        assert_eq!(found.path, PathBuf::from("/v/21-temurin"));

        assert!(find_version(&installed, &Version::new("21", "zulu")).is_none());
        assert!(find_version(&[], &Version::new("17", "temurin")).is_none());
    }
}
