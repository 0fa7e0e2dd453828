use std::collections::HashMap;

use crate::charset::Charset;
use crate::entry::ResourceEntry;
use crate::error::{ResourceError, ResourceResult};
use crate::path;
use crate::resources::Resources;

/// Routes paths across several named resource roots.
///
/// Paths are structured as `"root_name/rest/of/path"`. The first path
/// segment selects the root. If no root name matches, the default root (if
/// set) is tried with the full path. Routed paths are normalized first, so
/// `"assets//a/./b.txt"` reaches `a/b.txt` in `assets`; lookups inside the
/// selected root stay exact.
///
/// # Example
///
/// ```ignore
/// let mut roots = ResourceRoots::new();
/// roots.mount("assets", Resources::new(FileSystemSource::new("./assets")));
/// roots.mount("builtin", Resources::new(MemorySource::new()));
/// roots.set_default("assets");
///
/// let bytes = roots.read_bytes("assets/textures/brick.png")?;
/// // With the default root, this reads from assets too:
/// let bytes = roots.read_bytes("textures/brick.png")?;
/// ```
#[derive(Default)]
pub struct ResourceRoots {
    roots: HashMap<String, Resources>,
    default_root: Option<String>,
}

impl ResourceRoots {
    /// Create a router with no roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `resources` under the given root name.
    ///
    /// Replaces any previously mounted root with the same name.
    pub fn mount(&mut self, name: impl Into<String>, resources: Resources) {
        let name = name.into();
        if self.roots.insert(name.clone(), resources).is_some() {
            log::warn!("resource root \"{name}\" was mounted twice; keeping the last one");
        }
    }

    /// Set the root used when a path does not start with a root name.
    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default_root = Some(name.into());
    }

    /// Mounted root names, sorted.
    pub fn root_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roots.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The root mounted under `name`.
    pub fn root(&self, name: &str) -> Option<&Resources> {
        self.roots.get(name)
    }

    /// The default root, if one is set and mounted.
    pub fn default_root(&self) -> Option<&Resources> {
        self.default_root
            .as_deref()
            .and_then(|name| self.roots.get(name))
    }

    /// Resolve a routed path to its root and the path inside that root.
    ///
    /// A path with no segments (`""`, `"/"`, `"."`) addresses the default
    /// root's top level.
    pub fn resolve(&self, raw_path: &str) -> ResourceResult<(&Resources, String)> {
        let normalized = path::normalize_or_root(raw_path)?;
        if normalized.is_empty() {
            return self
                .default_root()
                .map(|resources| (resources, String::new()))
                .ok_or_else(|| ResourceError::NoSuchRoot(String::new()));
        }

        let (root, rest) = path::split_root(&normalized);

        // Try matching the first segment as a root name
        if let Some(resources) = self.roots.get(root) {
            return Ok((resources, rest.to_owned()));
        }

        // Fall back to the default root with the full path
        if let Some(resources) = self.default_root() {
            return Ok((resources, normalized));
        }

        Err(ResourceError::NoSuchRoot(root.to_owned()))
    }

    /// Resolve a routed path to an entry.
    ///
    /// Returns `Ok(None)` when the root exists but the path does not.
    pub fn get(&self, raw_path: &str) -> ResourceResult<Option<ResourceEntry<'_>>> {
        let (resources, path) = self.resolve(raw_path)?;
        Ok(resources.get(&path))
    }

    /// List the immediate children of a routed directory.
    pub fn list(&self, raw_path: &str) -> ResourceResult<Vec<ResourceEntry<'_>>> {
        let (resources, path) = self.resolve(raw_path)?;
        Ok(resources.list(&path))
    }

    /// Whether a routed path names a known file or directory.
    pub fn exists(&self, raw_path: &str) -> bool {
        self.resolve(raw_path)
            .map(|(resources, path)| resources.exists(&path))
            .unwrap_or(false)
    }

    /// Read a routed file.
    pub fn read_bytes(&self, raw_path: &str) -> ResourceResult<Vec<u8>> {
        let (resources, path) = self.resolve(raw_path)?;
        resources.read_bytes(&path)
    }

    /// Read a routed file and decode it with `charset`.
    pub fn read_text(&self, raw_path: &str, charset: Charset) -> ResourceResult<String> {
        let (resources, path) = self.resolve(raw_path)?;
        resources.read_text_with(&path, charset)
    }
}
