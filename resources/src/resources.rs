use std::sync::OnceLock;

use crate::charset::Charset;
use crate::discovery::DiscoveryChain;
use crate::entry::{ResourceDirectory, ResourceEntry, ResourceFile};
use crate::error::{ResourceError, ResourceResult};
use crate::manifest::Manifest;
use crate::source::ResourceSource;

/// Entry point for discovering, traversing and reading one resource root.
///
/// The manifest is discovered lazily on first use and memoized for the
/// lifetime of this value. Concurrent first calls run discovery at most once
/// and all observe the same manifest. Build one `Resources` per root at
/// start-up and share it by reference (or `Arc`).
///
/// # Example
///
/// ```
/// use resdir_resources::{MemorySource, Resources};
///
/// let mem = MemorySource::new();
/// mem.insert("testdir/root.txt", b"root".to_vec());
/// mem.insert("testdir/subdir1/file1.txt", b"one".to_vec());
///
/// let resources = Resources::new(mem);
/// let names: Vec<String> = resources
///     .list("testdir")
///     .iter()
///     .map(|entry| entry.name().to_owned())
///     .collect();
/// assert_eq!(names, ["root.txt", "subdir1"]);
/// assert_eq!(resources.read_text("testdir/root.txt").unwrap(), "root");
/// ```
pub struct Resources {
    source: Box<dyn ResourceSource>,
    discovery: DiscoveryChain,
    manifest: OnceLock<Manifest>,
}

impl Resources {
    /// Use `source` with the default discovery chain (walk, then index).
    pub fn new(source: impl ResourceSource) -> Self {
        Self::with_discovery(source, DiscoveryChain::default())
    }

    /// Use `source` with a custom discovery chain.
    pub fn with_discovery(source: impl ResourceSource, discovery: DiscoveryChain) -> Self {
        Self {
            source: Box::new(source),
            discovery,
            manifest: OnceLock::new(),
        }
    }

    /// Use `source` with an already built manifest; no discovery runs.
    pub fn with_manifest(source: impl ResourceSource, manifest: Manifest) -> Self {
        Self {
            source: Box::new(source),
            discovery: DiscoveryChain::new(),
            manifest: OnceLock::from(manifest),
        }
    }

    /// The manifest, discovering it on first call.
    pub fn manifest(&self) -> &Manifest {
        self.manifest.get_or_init(|| {
            log::debug!("discovering resources on {}", self.source.name());
            self.discovery.load(self.source.as_ref())
        })
    }

    /// Whether the manifest has been discovered yet.
    pub fn is_loaded(&self) -> bool {
        self.manifest.get().is_some()
    }

    pub fn source(&self) -> &dyn ResourceSource {
        self.source.as_ref()
    }

    /// The root directory.
    pub fn root(&self) -> ResourceDirectory<'_> {
        self.manifest().root()
    }

    /// Resolve `path` to a file or directory entry. The empty path is the root.
    pub fn get(&self, path: &str) -> Option<ResourceEntry<'_>> {
        self.manifest().get(path)
    }

    /// Alias of [`get`](Self::get).
    pub fn resolve(&self, path: &str) -> Option<ResourceEntry<'_>> {
        self.get(path)
    }

    /// Immediate children of the directory at `path`.
    pub fn list(&self, path: &str) -> Vec<ResourceEntry<'_>> {
        self.manifest().list(path)
    }

    /// Whether `path` is a known file or directory.
    pub fn exists(&self, path: &str) -> bool {
        self.manifest().contains(path)
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut files = self.manifest().all_files().to_vec();
        files.sort();
        files
    }

    /// Files matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Vec<ResourceFile>
    where
        P: FnMut(&ResourceFile) -> bool,
    {
        self.manifest().find(predicate)
    }

    /// Files with the given extension (without the dot).
    pub fn find_by_extension(&self, extension: &str) -> Vec<ResourceFile> {
        self.manifest().find_by_extension(extension)
    }

    /// Read the file at `path`.
    ///
    /// Fails with [`ResourceError::NotFound`] when the manifest has no such
    /// file; read failures from the source are returned unchanged.
    pub fn read_bytes(&self, path: &str) -> ResourceResult<Vec<u8>> {
        if !self.manifest().is_file(path) {
            return Err(ResourceError::NotFound(path.to_owned()));
        }
        self.source.read(path)
    }

    /// Read the file at `path` as UTF-8 text.
    pub fn read_text(&self, path: &str) -> ResourceResult<String> {
        self.read_text_with(path, Charset::Utf8)
    }

    /// Read the file at `path` and decode it with `charset`.
    pub fn read_text_with(&self, path: &str, charset: Charset) -> ResourceResult<String> {
        Ok(charset.decode(&self.read_bytes(path)?))
    }
}
