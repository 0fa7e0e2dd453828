use std::fmt;
use std::hash::{Hash, Hasher};

use crate::charset::Charset;
use crate::error::ResourceResult;
use crate::manifest::Manifest;
use crate::path;
use crate::resources::Resources;

/// A file or directory in a resource tree.
///
/// Entries are cheap values rebuilt from a path on demand. Two entries are
/// equal when they have the same kind and path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceEntry<'m> {
    File(ResourceFile),
    Directory(ResourceDirectory<'m>),
}

impl<'m> ResourceEntry<'m> {
    /// Path relative to the resource root, using forward slashes.
    pub fn path(&self) -> &str {
        match self {
            ResourceEntry::File(file) => file.path(),
            ResourceEntry::Directory(dir) => dir.path(),
        }
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        path::file_name(self.path())
    }

    pub fn is_file(&self) -> bool {
        matches!(self, ResourceEntry::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, ResourceEntry::Directory(_))
    }

    pub fn as_file(&self) -> Option<&ResourceFile> {
        match self {
            ResourceEntry::File(file) => Some(file),
            ResourceEntry::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&ResourceDirectory<'m>> {
        match self {
            ResourceEntry::Directory(dir) => Some(dir),
            ResourceEntry::File(_) => None,
        }
    }

    pub fn into_file(self) -> Option<ResourceFile> {
        match self {
            ResourceEntry::File(file) => Some(file),
            ResourceEntry::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<ResourceDirectory<'m>> {
        match self {
            ResourceEntry::Directory(dir) => Some(dir),
            ResourceEntry::File(_) => None,
        }
    }
}

/// A readable resource file.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceFile {
    path: String,
}

impl ResourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        path::file_name(&self.path)
    }

    /// Extension of the file name, without the dot.
    pub fn extension(&self) -> Option<&str> {
        let name = self.name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(pos) => Some(&name[pos + 1..]),
        }
    }

    /// Read the file's bytes through `resources`.
    pub fn read_bytes(&self, resources: &Resources) -> ResourceResult<Vec<u8>> {
        resources.read_bytes(&self.path)
    }

    /// Read the file and decode it with `charset`.
    pub fn read_text(&self, resources: &Resources, charset: Charset) -> ResourceResult<String> {
        resources.read_text_with(&self.path, charset)
    }
}

impl fmt::Debug for ResourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceFile").field(&self.path).finish()
    }
}

/// A directory implied by the files beneath it.
///
/// Borrows the [`Manifest`] it was resolved from so it can list its
/// children without touching the host again.
#[derive(Clone)]
pub struct ResourceDirectory<'m> {
    path: String,
    manifest: &'m Manifest,
}

impl<'m> ResourceDirectory<'m> {
    pub(crate) fn new(path: String, manifest: &'m Manifest) -> Self {
        Self { path, manifest }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the path; empty for the root.
    pub fn name(&self) -> &str {
        path::file_name(&self.path)
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Immediate children, files and directories, sorted by name.
    pub fn list(&self) -> Vec<ResourceEntry<'m>> {
        self.manifest.list(&self.path)
    }

    /// Immediate file children only.
    pub fn list_files(&self) -> Vec<ResourceFile> {
        self.list()
            .into_iter()
            .filter_map(ResourceEntry::into_file)
            .collect()
    }

    /// Immediate directory children only.
    pub fn list_directories(&self) -> Vec<ResourceDirectory<'m>> {
        self.list()
            .into_iter()
            .filter_map(ResourceEntry::into_directory)
            .collect()
    }

    /// Every entry below this directory, depth-first.
    pub fn walk(&self) -> Vec<ResourceEntry<'m>> {
        self.manifest.walk(&self.path)
    }

    /// Resolve a path relative to this directory.
    pub fn get(&self, relative: &str) -> Option<ResourceEntry<'m>> {
        if relative.is_empty() {
            return Some(ResourceEntry::Directory(self.clone()));
        }
        let full = format!("{}{relative}", path::child_prefix(&self.path));
        self.manifest.get(&full)
    }
}

impl PartialEq for ResourceDirectory<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ResourceDirectory<'_> {}

impl Hash for ResourceDirectory<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Debug for ResourceDirectory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceDirectory").field(&self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn manifest() -> Manifest {
        Manifest::from_paths([
            "testdir/root.txt",
            "testdir/subdir1/file1.txt",
            "testdir/subdir1/file2.json",
            "testdir/subdir2/nested/deep.txt",
        ])
    }

    #[test]
    fn file_name_and_extension() {
        let file = ResourceFile::new("a/b/archive.tar.gz");
        assert_eq!(file.name(), "archive.tar.gz");
        assert_eq!(file.extension(), Some("gz"));
        assert_eq!(ResourceFile::new("a/.hidden").extension(), None);
        assert_eq!(ResourceFile::new("Makefile").extension(), None);
    }

    #[test]
    fn directory_lists_files_and_directories() {
        let manifest = manifest();
        let dir = manifest
            .get("testdir")
            .and_then(ResourceEntry::into_directory)
            .unwrap();

        let files = dir.list_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "root.txt");

        let dirs: Vec<String> = dir
            .list_directories()
            .iter()
            .map(|d| d.name().to_owned())
            .collect();
        assert_eq!(dirs, ["subdir1", "subdir2"]);
    }

    #[test]
    fn relative_lookup() {
        let manifest = manifest();
        let dir = manifest
            .get("testdir/subdir2")
            .and_then(ResourceEntry::into_directory)
            .unwrap();
        assert!(dir.get("nested/deep.txt").unwrap().is_file());
        assert!(dir.get("nested").unwrap().is_directory());
        assert!(dir.get("missing").is_none());
        assert!(manifest.root().get("testdir").is_some());
    }

    #[test]
    fn equality_is_by_kind_and_path() {
        let one = manifest();
        let other = Manifest::from_paths(["testdir/x.txt"]);
        assert_eq!(one.get("testdir"), other.get("testdir"));
        assert_ne!(
            ResourceEntry::File(ResourceFile::new("testdir")),
            one.get("testdir").unwrap()
        );

        let set: HashSet<ResourceEntry<'_>> = one
            .list("testdir")
            .into_iter()
            .chain(one.list("testdir"))
            .collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn root_directory() {
        let manifest = manifest();
        let root = manifest.root();
        assert!(root.is_root());
        assert_eq!(root.name(), "");
        assert_eq!(root.list().len(), 1);
        assert_eq!(root.walk().len(), 8);
    }

    #[test]
    fn debug_output_names_kind() {
        let manifest = manifest();
        assert_eq!(format!("{:?}", ResourceFile::new("a.txt")), "ResourceFile(\"a.txt\")");
        assert_eq!(format!("{:?}", manifest.root()), "ResourceDirectory(\"\")");
    }
}
