#![allow(clippy::missing_errors_doc)]

mod binding;
mod config;

pub use binding::{bind_home, default_profile_files, export_line};
pub use config::{ConfigError, ShellConfig, ShellConfigEdit};
