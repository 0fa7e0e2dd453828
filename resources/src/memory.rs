use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{ResourceError, ResourceResult};
use crate::source::ResourceSource;

/// In-memory resource source for tests and embedded resources.
///
/// Clones share the same file table, so files can still be inserted after
/// a clone has been handed to [`Resources`](crate::Resources). A manifest
/// that was already discovered does not see later inserts.
///
/// # Example
///
/// ```
/// use resdir_resources::{MemorySource, Resources};
///
/// let mem = MemorySource::new();
/// mem.insert("config/settings.json", b"{}".to_vec());
///
/// let resources = Resources::new(mem);
/// assert!(resources.exists("config"));
/// ```
#[derive(Clone, Default)]
pub struct MemorySource {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemorySource {
    /// Create an empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from `(path, bytes)` pairs.
    pub fn from_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<u8>)>,
        P: Into<String>,
    {
        let source = Self::new();
        for (path, data) in files {
            source.insert(path, data);
        }
        source
    }

    /// Insert a file at the given path.
    ///
    /// The path should use forward slashes and have no leading slash.
    /// Overwrites any existing file at the same path.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) {
        self.files.write().insert(path.into(), data);
    }

    /// Remove a file at the given path, returning its data if it existed.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files.write().remove(path)
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl ResourceSource for MemorySource {
    fn read(&self, path: &str) -> ResourceResult<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_owned()))
    }

    fn discover(&self) -> ResourceResult<Vec<String>> {
        let mut paths: Vec<String> = self.files.read().keys().cloned().collect();
        paths.sort();
        Ok(paths)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_existing_file() {
        let mem = MemorySource::new();
        mem.insert("config.json", b"{}".to_vec());
        assert_eq!(mem.read("config.json").unwrap(), b"{}");
    }

    #[test]
    fn read_missing_file() {
        let mem = MemorySource::new();
        assert!(mem.read("nope.txt").unwrap_err().is_not_found());
    }

    #[test]
    fn discover_is_sorted() {
        let mem = MemorySource::from_files([
            ("b/c.txt", vec![]),
            ("a.txt", vec![]),
            ("b/a.txt", vec![]),
        ]);
        assert_eq!(mem.discover().unwrap(), ["a.txt", "b/a.txt", "b/c.txt"]);
    }

    #[test]
    fn clones_share_storage() {
        let mem = MemorySource::new();
        let clone = mem.clone();
        clone.insert("shared.txt", b"data".to_vec());
        assert_eq!(mem.read("shared.txt").unwrap(), b"data");
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn remove_returns_data() {
        let mem = MemorySource::new();
        mem.insert("file.txt", b"data".to_vec());
        assert_eq!(mem.remove("file.txt"), Some(b"data".to_vec()));
        assert!(mem.remove("file.txt").is_none());
        assert!(mem.is_empty());
    }
}
