use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error in {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine home directory")]
    HomeDirUnavailable,
}

impl ConfigError {
    fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A shell startup file held in memory while it is edited.
pub struct ShellConfig {
    pub config_path: PathBuf,
    pub content: String,
}

impl ShellConfig {
    /// Read `config_path`; a missing file loads as empty content.
    pub fn load(config_path: PathBuf) -> Result<Self, ConfigError> {
        let content = if config_path.exists() {
            fs::read_to_string(&config_path).map_err(|e| ConfigError::io(&config_path, e))?
        } else {
            String::new()
        };

        Ok(Self {
            config_path,
            content,
        })
    }

    /// Whether `line` is present verbatim as a whole line.
    #[must_use]
    pub fn has_line(&self, line: &str) -> bool {
        self.content.lines().any(|existing| existing == line)
    }

    /// Build an edit appending `line`, or an empty edit if it is already there.
    #[must_use]
    pub fn add_line(&self, line: &str) -> ShellConfigEdit {
        if self.has_line(line) {
            return ShellConfigEdit {
                original: self.content.clone(),
                modified: self.content.clone(),
                changes: vec![],
            };
        }

        let mut modified = self.content.clone();
        if !modified.is_empty() && !modified.ends_with('\n') {
            modified.push('\n');
        }
        modified.push_str(line);
        modified.push('\n');

        ShellConfigEdit {
            original: self.content.clone(),
            modified,
            changes: vec![format!("Add line: {line}")],
        }
    }

    pub fn apply_edit(&mut self, edit: &ShellConfigEdit) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        fs::write(&self.config_path, &edit.modified)
            .map_err(|e| ConfigError::io(&self.config_path, e))?;
        self.content.clone_from(&edit.modified);

        Ok(())
    }
}

pub struct ShellConfigEdit {
    pub original: String,
    pub modified: String,
    pub changes: Vec<String>,
}

impl ShellConfigEdit {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    #[must_use]
    pub fn diff_preview(&self) -> String {
        if !self.has_changes() {
            return "No changes needed.".to_string();
        }

        let mut preview = String::new();

        for change in &self.changes {
            let _ = writeln!(preview, "+ {change}");
        }

        preview
    }
}
