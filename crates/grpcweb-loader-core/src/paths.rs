//! Path helpers shared by the pipeline and its hosts.

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory and fold `.` and `..`
/// components lexically. Symlinks are not resolved.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(normalize(&absolute))
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the root is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Join the normal components of a relative path with `/`.
///
/// Used wherever a path is embedded in generated text, so the result is the
/// same on every platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "paths/paths_tests.rs"]
mod paths_tests;
