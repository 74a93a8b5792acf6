mod commands;
mod paths;
mod platform;

pub use commands::{junction_command, pip_bootstrap_command, setx_command};
pub use paths::{LenvPaths, NamespacePaths, PathsError, ROOT_ENV};
pub use platform::{current_platform_prefix, platform_prefix};
