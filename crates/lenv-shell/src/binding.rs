use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, ShellConfig};

/// `export VAR="value"`, with the value escaped for a double-quoted POSIX
/// shell word.
#[must_use]
pub fn export_line(var: &str, value: &Path) -> String {
    let value = value.display().to_string();
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    format!("export {var}={quoted}")
}

/// `~/.profile` and `~/.bashrc` of the current user.
pub fn default_profile_files() -> Result<Vec<PathBuf>, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
    Ok(vec![home.join(".profile"), home.join(".bashrc")])
}

/// Append [`export_line`] to every file in `files` that lacks it verbatim.
/// Missing files are created. Returns the files that were changed.
pub fn bind_home(files: &[PathBuf], var: &str, value: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let line = export_line(var, value);
    let mut changed = Vec::new();

    for path in files {
        let mut config = ShellConfig::load(path.clone())?;
        let edit = config.add_line(&line);
        if !edit.has_changes() {
            debug!("{} already binds {var}", path.display());
            continue;
        }

        debug!("Editing {}:\n{}", path.display(), edit.diff_preview());
        config.apply_edit(&edit)?;
        changed.push(path.clone());
    }

    if !changed.is_empty() {
        info!("Bound {var} in {} shell file(s)", changed.len());
    }

    Ok(changed)
}
