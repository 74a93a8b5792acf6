use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LenvError {
    #[error("Configuration unavailable: {details}")]
    ConfigUnavailable { details: String },

    #[error("Unknown operating system and architecture: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error(transparent)]
    InvalidIdentity(#[from] crate::types::VersionParseError),

    #[error("Network error during {operation} ({stage}): {details}")]
    Network {
        operation: &'static str,
        stage: NetworkStage,
        details: String,
    },

    #[error("Bad status during {operation}: HTTP {status}")]
    HttpStatus { operation: &'static str, status: u16 },

    #[error("{name} is not installed")]
    NotInstalled { name: String },

    #[error("Failed to extract {archive}: {details}")]
    Extract { archive: String, details: String },

    #[error("Failed to set global version during {step}: {details}")]
    Activation { step: &'static str, details: String },

    #[error("Registry is inconsistent in {context}: {details}")]
    Consistency {
        context: &'static str,
        details: String,
    },

    #[error("Installation failed during {phase}: {details}")]
    InstallFailed {
        phase: &'static str,
        details: String,
    },

    #[error("IO error ({kind}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStage {
    #[error("request")]
    Request,
    #[error("response parse")]
    ResponseParse,
}

impl LenvError {
    pub fn config_unavailable(details: impl Into<String>) -> Self {
        Self::ConfigUnavailable {
            details: details.into(),
        }
    }

    pub fn unsupported_platform(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            os: os.into(),
            arch: arch.into(),
        }
    }

    pub fn not_installed(name: impl Into<String>) -> Self {
        Self::NotInstalled { name: name.into() }
    }

    pub fn activation(step: &'static str, details: impl Into<String>) -> Self {
        Self::Activation {
            step,
            details: details.into(),
        }
    }

    pub fn activation_from<E>(step: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::activation(step, error.to_string())
    }

    pub fn consistency(context: &'static str, details: impl Into<String>) -> Self {
        Self::Consistency {
            context,
            details: details.into(),
        }
    }

    pub fn install_failed(phase: &'static str, details: impl Into<String>) -> Self {
        Self::InstallFailed {
            phase,
            details: details.into(),
        }
    }

    pub fn extract(archive: &std::path::Path, details: impl Into<String>) -> Self {
        Self::Extract {
            archive: archive.display().to_string(),
            details: details.into(),
        }
    }

    pub fn transport(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Network {
            operation,
            stage: NetworkStage::Request,
            details: details.into(),
        }
    }

    pub fn transport_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::transport(operation, error.to_string())
    }

    pub fn bad_response(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Network {
            operation,
            stage: NetworkStage::ResponseParse,
            details: details.into(),
        }
    }

    pub fn bad_response_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::bad_response(operation, error.to_string())
    }

    /// Whether the command layer should abort with a failing exit status.
    ///
    /// A missing target is reported to the user but the process still exits
    /// cleanly.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotInstalled { .. })
    }
}

impl From<std::io::Error> for LenvError {
    fn from(err: std::io::Error) -> Self {
        LenvError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
