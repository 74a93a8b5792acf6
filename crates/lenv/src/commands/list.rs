use std::fmt::Write as _;

use lenv_core::ListEntry;

const ACTIVE_MARK: &str = " -> ";
const INSTALLED_MARK: &str = "  * ";
const BLANK_MARK: &str = "    ";

pub fn render_installed(entries: &[ListEntry]) -> String {
    if entries.is_empty() {
        return "No versions installed\n".to_string();
    }

    let mut out = String::from("Installed Versions:\n");
    for entry in entries {
        let mark = if entry.active { ACTIVE_MARK } else { BLANK_MARK };
        let _ = writeln!(out, "{mark}{}", entry.version);
    }
    out
}

pub fn render_available(entries: &[ListEntry]) -> String {
    if entries.is_empty() {
        return "No versions available for your platform and architecture\n".to_string();
    }

    let mut out = String::from("Available Versions:\n");
    for entry in entries {
        let mark = match (entry.installed, entry.active) {
            (_, true) => ACTIVE_MARK,
            (true, false) => INSTALLED_MARK,
            (false, false) => BLANK_MARK,
        };
        let _ = writeln!(out, "{mark}{}", entry.version);
    }
    out
}
