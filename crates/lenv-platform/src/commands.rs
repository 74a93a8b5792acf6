//! Helper processes lenv spawns. Every builder here suppresses the console
//! window that Windows would otherwise flash for each child.

use std::ffi::OsStr;
use std::path::Path;

#[cfg(windows)]
use std::os::windows::process::CommandExt;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

trait HideWindow {
    fn hide_window(&mut self) -> &mut Self;
}

impl HideWindow for std::process::Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

impl HideWindow for tokio::process::Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

/// `cmd /c mklink /J <link> <target>`.
///
/// Junctions need no elevated privileges, unlike directory symlinks.
#[must_use]
pub fn junction_command(link: &Path, target: &Path) -> std::process::Command {
    let mut command = std::process::Command::new("cmd");
    command
        .args(["/c", "mklink", "/J"])
        .arg(link)
        .arg(target)
        .hide_window();
    command
}

/// `setx <var> <value>`, persisting a variable in the user environment.
#[must_use]
pub fn setx_command(var: &str, value: impl AsRef<OsStr>) -> std::process::Command {
    let mut command = std::process::Command::new("setx");
    command.arg(var).arg(value).hide_window();
    command
}

/// Runs the downloaded `get-pip.py` with a freshly installed interpreter.
#[must_use]
pub fn pip_bootstrap_command(
    interpreter: &Path,
    script: &Path,
    install_dir: &Path,
) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(interpreter);
    command.arg(script).current_dir(install_dir).hide_window();
    command
}
