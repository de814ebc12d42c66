//! Repository root resolution.

use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};

use crate::error::SettingsError;

/// The repository root this crate was built in.
///
/// The tooling crate lives at `<repo-root>/crates/mpl-idl-gen`, so the root is
/// two levels above its manifest directory.
pub fn default_repo_root() -> PathBuf {
    normalize(&Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(".."))
}

/// Find the workspace root by looking for a Cargo.toml with `[workspace]`,
/// starting at `start` and walking up.
///
/// A relative `start` is taken from the current directory, so `.` climbs
/// past it like any absolute path would.
///
/// # Errors
///
/// Fails when the current directory is unavailable or no ancestor of `start`
/// is a workspace root.
pub fn find_workspace_root(start: &Path) -> Result<PathBuf, SettingsError> {
    let mut current = absolute(start)?;

    loop {
        let cargo_toml = current.join("Cargo.toml");
        if let Ok(content) = fs::read_to_string(&cargo_toml) {
            if is_workspace_manifest(&content) {
                return Ok(current);
            }
        }

        if !current.pop() {
            return Err(SettingsError::WorkspaceRootNotFound {
                start: start.to_path_buf(),
            });
        }
    }
}

/// `path` made absolute against the current directory, with `.` and `..`
/// removed.
///
/// # Errors
///
/// Fails when `path` is relative and the current directory is unavailable.
pub fn absolute(path: &Path) -> Result<PathBuf, SettingsError> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = env::current_dir().map_err(|source| SettingsError::CurrentDir { source })?;
    Ok(normalize(&cwd.join(path)))
}

/// Whether `content` is a manifest with a `[workspace]` table.
fn is_workspace_manifest(content: &str) -> bool {
    content
        .parse::<toml::Table>()
        .map(|table| table.get("workspace").is_some_and(toml::Value::is_table))
        .unwrap_or(false)
}

/// Resolve `path` against `root`. Absolute paths are kept as they are.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

/// Lexically remove `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
