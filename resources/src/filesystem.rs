use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ResourceError, ResourceResult};
use crate::path;
use crate::source::ResourceSource;

/// Resource source backed by a directory on the native filesystem.
///
/// Reads join the normalized resource path onto the root. Paths with `..`
/// segments are rejected before they reach the filesystem, which keeps
/// every read inside the root. Discovery walks the root recursively and
/// reports regular files only; symlinks are not followed.
///
/// # Example
///
/// ```ignore
/// let resources = Resources::new(FileSystemSource::new("./resources"));
/// let text = resources.read_text("testdir/root.txt")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
}

impl FileSystemSource {
    /// Create a source rooted at the given directory.
    ///
    /// The directory does not need to exist yet; it is checked when
    /// reading or discovering.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a resource path to a full filesystem path.
    fn resolve(&self, path: &str) -> ResourceResult<PathBuf> {
        let normalized = path::normalize(path)?;
        Ok(self.root.join(normalized))
    }
}

impl ResourceSource for FileSystemSource {
    fn read(&self, path: &str) -> ResourceResult<Vec<u8>> {
        let full_path = self.resolve(path)?;
        if full_path.is_dir() {
            return Err(ResourceError::NotFound(path.to_owned()));
        }
        std::fs::read(&full_path).map_err(|err| ResourceError::from_io(path, err))
    }

    fn discover(&self) -> ResourceResult<Vec<String>> {
        if !self.root.is_dir() {
            return Err(ResourceError::Discovery(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|err| ResourceError::Discovery(err.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            match path::from_relative_path(relative) {
                Some(resource_path) => paths.push(resource_path),
                None => log::warn!("skipping unrepresentable path {}", entry.path().display()),
            }
        }

        paths.sort();
        log::debug!("walked {}: {} files", self.root.display(), paths.len());
        Ok(paths)
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}
