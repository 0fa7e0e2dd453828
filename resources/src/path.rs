//! Helpers for `/`-separated resource paths.
//!
//! Manifest lookups compare paths as exact strings. Only the filesystem
//! source and the multi-root router run paths through [`normalize`].

use std::path::{Component, Path};

use crate::ResourceError;

/// Normalize a resource path.
///
/// - Replaces backslashes with forward slashes
/// - Collapses redundant separators (`a///b` → `a/b`)
/// - Drops `.` segments
/// - Rejects `..` segments (path traversal not allowed)
/// - Strips leading and trailing slashes
///
/// Returns `Err(ResourceError::InvalidPath)` if the path is empty or contains `..`.
pub fn normalize(path: &str) -> Result<String, ResourceError> {
    let normalized = normalize_or_root(path)?;
    if normalized.is_empty() {
        return Err(ResourceError::InvalidPath("empty path".into()));
    }
    Ok(normalized)
}

/// Like [`normalize`], but a path with no segments left (`""`, `"/"`, `"."`)
/// is the root and normalizes to `""`.
pub fn normalize_or_root(path: &str) -> Result<String, ResourceError> {
    let replaced = path.replace('\\', "/");
    let mut segments = Vec::new();

    for segment in replaced.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(ResourceError::InvalidPath(format!(
                "path traversal (..) not allowed: {path}"
            )));
        }
        segments.push(segment);
    }

    Ok(segments.join("/"))
}

/// Split a normalized path into root name and remainder.
///
/// If there is only one segment, the remainder is empty.
pub(crate) fn split_root(path: &str) -> (&str, &str) {
    match path.find('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => (path, ""),
    }
}

/// Final `/`-delimited segment of `path`. The root (`""`) has an empty name.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Prefix shared by every child of `dir`: empty for the root, `dir/` otherwise.
pub(crate) fn child_prefix(dir: &str) -> String {
    if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}/")
    }
}

/// Every proper `/`-prefix of `path`, shortest first.
pub(crate) fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(pos, _)| &path[..pos])
}

/// Convert a host-relative path into a resource path with forward slashes.
///
/// Returns `None` for non-UTF-8 names and for paths that are absolute or
/// climb out with `..`.
pub fn from_relative_path(relative: &Path) -> Option<String> {
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(segments.join("/"))
}
