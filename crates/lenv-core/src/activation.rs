//! Making one installed version the global one.
//!
//! The platform mechanics live behind [`ActivationStrategy`]; [`set_global`]
//! drives the transition and restores the previous link if a later step
//! fails.

use std::path::{Path, PathBuf};

use lenv_backend::{ActivationStrategy, LenvError, Version};
use log::{debug, info, warn};

use crate::permissions;
use crate::registry::Registry;

/// Symlink based activation for Linux, Android and macOS.
///
/// The home variable is bound by appending an `export` line to the given
/// shell startup files.
#[derive(Debug, Clone)]
pub struct SymlinkActivation {
    profile_files: Vec<PathBuf>,
}

impl SymlinkActivation {
    #[must_use]
    pub fn new(profile_files: Vec<PathBuf>) -> Self {
        Self { profile_files }
    }

    /// Bind through `~/.profile` and `~/.bashrc`.
    ///
    /// # Errors
    /// Returns `ConfigUnavailable` when the home directory cannot be found.
    pub fn for_current_user() -> Result<Self, LenvError> {
        let files = lenv_shell::default_profile_files()
            .map_err(|e| LenvError::config_unavailable(e.to_string()))?;
        Ok(Self::new(files))
    }
}

impl ActivationStrategy for SymlinkActivation {
    fn name(&self) -> &'static str {
        "symlink"
    }

    fn remove_link(&self, link: &Path) -> Result<(), LenvError> {
        let meta = match std::fs::symlink_metadata(link) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(LenvError::activation_from("remove link", e)),
        };

        // A plain directory is only removed when empty.
        let result = if meta.is_dir() {
            std::fs::remove_dir(link)
        } else {
            std::fs::remove_file(link)
        };
        result.map_err(|e| {
            LenvError::activation("remove link", format!("{}: {e}", link.display()))
        })
    }

    #[cfg(unix)]
    fn create_link(&self, link: &Path, target: &Path) -> Result<(), LenvError> {
        std::os::unix::fs::symlink(target, link).map_err(|e| {
            LenvError::activation(
                "create link",
                format!("{} -> {}: {e}", link.display(), target.display()),
            )
        })
    }

    #[cfg(not(unix))]
    fn create_link(&self, link: &Path, _target: &Path) -> Result<(), LenvError> {
        Err(LenvError::activation(
            "create link",
            format!("symlinks are not supported here: {}", link.display()),
        ))
    }

    fn normalize_permissions(&self, link: &Path) -> Result<(), LenvError> {
        permissions::normalize_tree(link).map_err(|e| {
            LenvError::activation("normalize permissions", format!("{}: {e}", link.display()))
        })
    }

    fn bind_home(&self, var: &str, link: &Path) -> Result<(), LenvError> {
        lenv_shell::bind_home(&self.profile_files, var, link)
            .map(|_| ())
            .map_err(|e| LenvError::activation_from("bind home variable", e))
    }
}

/// Directory junction activation for Windows, with the home variable stored
/// in the user environment through `setx`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JunctionActivation;

impl ActivationStrategy for JunctionActivation {
    fn name(&self) -> &'static str {
        "junction"
    }

    fn remove_link(&self, link: &Path) -> Result<(), LenvError> {
        match std::fs::symlink_metadata(link) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LenvError::activation_from("remove link", e)),
            // Removing a junction never touches the target's contents.
            Ok(_) => std::fs::remove_dir(link).map_err(|e| {
                LenvError::activation("remove link", format!("{}: {e}", link.display()))
            }),
        }
    }

    fn create_link(&self, link: &Path, target: &Path) -> Result<(), LenvError> {
        let mut command = lenv_platform::junction_command(link, target);
        run_helper("create link", &mut command)
    }

    fn bind_home(&self, var: &str, link: &Path) -> Result<(), LenvError> {
        if std::env::var_os(var).is_some_and(|current| Path::new(&current) == link) {
            debug!("{var} already points at {}", link.display());
            return Ok(());
        }

        let mut command = lenv_platform::setx_command(var, link);
        run_helper("bind home variable", &mut command)
    }
}

fn run_helper(step: &'static str, command: &mut std::process::Command) -> Result<(), LenvError> {
    debug!("Running {command:?}");
    let output = command
        .output()
        .map_err(|e| LenvError::activation_from(step, e))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(LenvError::activation(
        step,
        format!("{command:?} exited with {}: {}", output.status, stderr.trim()),
    ))
}

/// Pick the activation strategy for the running OS.
///
/// # Errors
/// Returns `UnsupportedPlatform` for operating systems without a strategy.
pub fn activation_for_current_platform() -> Result<Box<dyn ActivationStrategy>, LenvError> {
    match std::env::consts::OS {
        "linux" | "android" | "macos" => Ok(Box::new(SymlinkActivation::for_current_user()?)),
        "windows" => Ok(Box::new(JunctionActivation)),
        os => Err(LenvError::unsupported_platform(os, std::env::consts::ARCH)),
    }
}

/// Point the namespace's activation link at `target` and bind `home_var` to
/// the link.
///
/// On success the registry's global pointer is updated in memory and the
/// installed record is returned; the caller saves the registry. If a step
/// after removing the old link fails, the old link is recreated before the
/// error is returned and the global pointer is left alone.
///
/// # Errors
/// `NotInstalled` when `target` is not in the registry, or the failing
/// step's `Activation` error.
pub fn set_global(
    registry: &mut Registry,
    strategy: &dyn ActivationStrategy,
    home_var: &str,
    target: &Version,
) -> Result<Version, LenvError> {
    let installed = registry
        .find_version(target)
        .cloned()
        .ok_or_else(|| LenvError::not_installed(target.name()))?;
    let link = registry.paths().current_link.clone();

    let previous = std::fs::read_link(&link).ok();
    debug!(
        "Activating {} via {} (previous: {:?})",
        installed.name(),
        strategy.name(),
        previous
    );

    strategy.remove_link(&link)?;

    if let Err(error) = activate(strategy, &link, &installed.path, home_var) {
        restore_link(strategy, &link, previous.as_deref());
        return Err(error);
    }

    info!("{} is now global", installed.name());
    registry.set_global(Some(installed.clone()));
    Ok(installed)
}

fn activate(
    strategy: &dyn ActivationStrategy,
    link: &Path,
    target: &Path,
    home_var: &str,
) -> Result<(), LenvError> {
    strategy.create_link(link, target)?;
    strategy.normalize_permissions(link)?;
    strategy.bind_home(home_var, link)
}

fn restore_link(strategy: &dyn ActivationStrategy, link: &Path, previous: Option<&Path>) {
    if let Err(e) = strategy.remove_link(link) {
        warn!("Failed to clear half-created link {}: {e}", link.display());
        return;
    }

    let Some(previous) = previous else {
        return;
    };

    match strategy.create_link(link, previous) {
        Ok(()) => info!("Restored previous link to {}", previous.display()),
        Err(e) => warn!(
            "Failed to restore previous link to {}: {e}",
            previous.display()
        ),
    }
}
