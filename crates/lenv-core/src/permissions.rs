use std::path::Path;

/// Mode applied to every directory and file under an activated install.
#[cfg(unix)]
pub(crate) const NORMALIZED_MODE: u32 = 0o755;

/// Recursively set [`NORMALIZED_MODE`] on `root` and everything below it.
/// Symlinks are followed for `root` itself but not inside the tree.
#[cfg(unix)]
pub(crate) fn normalize_tree(root: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut pending = vec![root.to_path_buf()];
    while let Some(path) = pending.pop() {
        let meta = if path == root {
            std::fs::metadata(&path)?
        } else {
            std::fs::symlink_metadata(&path)?
        };
        if meta.file_type().is_symlink() {
            continue;
        }

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(NORMALIZED_MODE))?;

        if meta.is_dir() {
            for entry in std::fs::read_dir(&path)? {
                pending.push(entry?.path());
            }
        }
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn normalize_tree(_root: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Add execute bits to every regular file directly inside `dir`.
#[cfg(unix)]
pub(crate) fn mark_executable(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if !dir.is_dir() {
        return Ok(());
    }

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let meta = std::fs::symlink_metadata(&path)?;
        if !meta.is_file() {
            continue;
        }
        let mode = meta.permissions().mode() | 0o111;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn mark_executable(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
