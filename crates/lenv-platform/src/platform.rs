/// Map an OS/architecture pair to the asset-name prefix used by the release
/// feeds, e.g. `("linux", "x86_64")` becomes `linux64`.
///
/// Accepts both Rust (`macos`, `x86_64`) and Go-style (`darwin`, `amd64`)
/// identifiers. Returns `None` for anything unsupported; callers must not
/// guess a fallback.
#[must_use]
pub fn platform_prefix(os: &str, arch: &str) -> Option<String> {
    let os_token = match os {
        "windows" => "win",
        "macos" | "darwin" => "mac",
        "linux" | "android" => "linux",
        _ => return None,
    };

    let arch_token = match arch {
        "x86_64" | "amd64" => "64",
        _ => return None,
    };

    Some(format!("{os_token}{arch_token}"))
}

#[must_use]
pub fn current_platform_prefix() -> Option<String> {
    platform_prefix(std::env::consts::OS, std::env::consts::ARCH)
}
