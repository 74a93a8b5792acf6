use std::fmt;

const GITHUB_DOWNLOAD_BASE: &str = "https://github.com";
const GITHUB_API_BASE: &str = "https://api.github.com/repos";

/// A managed runtime namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Java,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Java, Language::Python];

    /// Namespace directory name under the managed root.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "java" | "j" => Some(Self::Java),
            "python" | "p" | "py" => Some(Self::Python),
            _ => None,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Python => "Python",
        }
    }

    #[must_use]
    pub const fn feed_repo(self) -> &'static str {
        match self {
            Self::Java => "kiber-io/lenv-java-versions",
            Self::Python => "kiber-io/lenv-python-versions",
        }
    }

    /// Variable bound to the activation link in shell startup files.
    #[must_use]
    pub const fn home_var(self) -> &'static str {
        match self {
            Self::Java => "JAVA_HOME",
            Self::Python => "PYTHON_HOME",
        }
    }

    #[must_use]
    pub fn releases_url(self) -> String {
        format!("{GITHUB_API_BASE}/{}/releases", self.feed_repo())
    }

    #[must_use]
    pub fn download_url(self, version: &str, prefix: &str, vendor: &str) -> String {
        format!(
            "{GITHUB_DOWNLOAD_BASE}/{}/releases/download/{version}/{prefix}-{vendor}.zip",
            self.feed_repo()
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
