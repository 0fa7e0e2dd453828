//! Ordered fallback strategies for building a [`Manifest`].
//!
//! A [`DiscoveryChain`] tries each step in turn and keeps the first one
//! that yields at least one path. The default chain walks the source first
//! (accurate during development) and falls back to the serialized index
//! (resources packed where no directory listing is available). When every
//! step fails or comes back empty the manifest is empty; that is not an
//! error.

use crate::charset::Charset;
use crate::error::{ResourceError, ResourceResult};
use crate::manifest::{self, MANIFEST_FILENAME, Manifest};
use crate::source::ResourceSource;

/// One way of enumerating the files of a source.
pub trait Discover: Send + Sync + 'static {
    /// Short label used in log messages.
    fn name(&self) -> &str;

    /// Enumerate file paths, or fail with [`ResourceError::Discovery`].
    fn discover(&self, source: &dyn ResourceSource) -> ResourceResult<Vec<String>>;
}

/// Enumerate files through [`ResourceSource::discover`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDiscovery;

impl Discover for WalkDiscovery {
    fn name(&self) -> &str {
        "walk"
    }

    fn discover(&self, source: &dyn ResourceSource) -> ResourceResult<Vec<String>> {
        source.discover()
    }
}

/// Read the serialized index file through [`ResourceSource::read`].
#[derive(Debug, Clone)]
pub struct IndexDiscovery {
    filename: String,
}

impl IndexDiscovery {
    /// Read the index from a custom file name.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl Default for IndexDiscovery {
    fn default() -> Self {
        Self::new(MANIFEST_FILENAME)
    }
}

impl Discover for IndexDiscovery {
    fn name(&self) -> &str {
        "index"
    }

    fn discover(&self, source: &dyn ResourceSource) -> ResourceResult<Vec<String>> {
        let bytes = source.read(&self.filename).map_err(|err| {
            ResourceError::Discovery(format!("cannot load {}: {err}", self.filename))
        })?;
        let text = Charset::Utf8.decode(&bytes);
        let paths = manifest::parse_index(&text);
        if paths.is_empty() && !matches!(text.trim(), "" | "[]") {
            log::warn!("index {} is malformed; ignoring it", self.filename);
        }
        Ok(paths)
    }
}

/// A fixed list of paths, e.g. an index compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    paths: Vec<String>,
}

impl StaticDiscovery {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Discover for StaticDiscovery {
    fn name(&self) -> &str {
        "static"
    }

    fn discover(&self, _source: &dyn ResourceSource) -> ResourceResult<Vec<String>> {
        Ok(self.paths.clone())
    }
}

/// Discovery steps tried in order until one yields paths.
pub struct DiscoveryChain {
    steps: Vec<Box<dyn Discover>>,
}

impl DiscoveryChain {
    /// A chain with no steps. Loading it always gives an empty manifest.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub fn then(mut self, step: impl Discover) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn push(&mut self, step: impl Discover) {
        self.steps.push(Box::new(step));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the steps, in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run the chain against `source` and build the manifest from the first
    /// non-empty result.
    pub fn load(&self, source: &dyn ResourceSource) -> Manifest {
        for step in &self.steps {
            match step.discover(source) {
                Ok(paths) => {
                    let paths = prepare(paths);
                    if paths.is_empty() {
                        log::debug!(
                            "{} discovery on {} found nothing; trying next step",
                            step.name(),
                            source.name()
                        );
                        continue;
                    }
                    log::debug!(
                        "{} discovery on {} found {} resources",
                        step.name(),
                        source.name(),
                        paths.len()
                    );
                    return Manifest::from_paths(paths);
                }
                Err(err) => {
                    log::debug!(
                        "{} discovery on {} failed: {err}; trying next step",
                        step.name(),
                        source.name()
                    );
                }
            }
        }

        log::debug!("no resources discovered on {}", source.name());
        Manifest::empty()
    }
}

impl Default for DiscoveryChain {
    /// Walk first, then the serialized index.
    fn default() -> Self {
        Self::new()
            .then(WalkDiscovery)
            .then(IndexDiscovery::default())
    }
}

/// Drop the reserved index name and empty paths, then sort and deduplicate.
fn prepare(mut paths: Vec<String>) -> Vec<String> {
    paths.retain(|path| !path.is_empty() && path != MANIFEST_FILENAME);
    paths.sort();
    paths.dedup();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySource;

    /// Source whose directory listing is unavailable, like a packed archive.
    struct PackedSource(MemorySource);

    impl ResourceSource for PackedSource {
        fn read(&self, path: &str) -> ResourceResult<Vec<u8>> {
            self.0.read(path)
        }

        fn discover(&self) -> ResourceResult<Vec<String>> {
            Err(ResourceError::Discovery("listing not supported".into()))
        }
    }

    #[test]
    fn walk_wins_when_it_finds_files() {
        let mem = MemorySource::from_files([
            ("b.txt", vec![]),
            ("a/c.txt", vec![]),
            (MANIFEST_FILENAME, br#"["stale.txt"]"#.to_vec()),
        ]);
        let manifest = DiscoveryChain::default().load(&mem);
        assert_eq!(manifest.all_files(), ["a/c.txt", "b.txt"]);
    }

    #[test]
    fn index_used_when_walk_fails() {
        let mem = MemorySource::new();
        mem.insert(MANIFEST_FILENAME, br#"["z.txt","a/b.txt","z.txt"]"#.to_vec());
        let manifest = DiscoveryChain::default().load(&PackedSource(mem));
        assert_eq!(manifest.all_files(), ["a/b.txt", "z.txt"]);
    }

    #[test]
    fn index_used_when_walk_is_empty() {
        let chain = DiscoveryChain::new()
            .then(StaticDiscovery::default())
            .then(IndexDiscovery::default());
        let mem = MemorySource::new();
        mem.insert(MANIFEST_FILENAME, br#"["only.txt"]"#.to_vec());
        assert_eq!(chain.load(&mem).all_files(), ["only.txt"]);
    }

    #[test]
    fn index_excludes_itself() {
        let mem = MemorySource::new();
        mem.insert(
            MANIFEST_FILENAME,
            format!(r#"["{MANIFEST_FILENAME}","x.txt"]"#).into_bytes(),
        );
        let manifest = DiscoveryChain::default().load(&PackedSource(mem));
        assert_eq!(manifest.all_files(), ["x.txt"]);
    }

    #[test]
    fn custom_index_filename() {
        let mem = MemorySource::new();
        mem.insert("files.json", br#"["x.txt"]"#.to_vec());
        let chain = DiscoveryChain::new().then(IndexDiscovery::new("files.json"));
        assert_eq!(chain.load(&mem).all_files(), ["x.txt"]);
    }

    #[test]
    fn everything_failing_gives_empty_manifest() {
        let manifest = DiscoveryChain::default().load(&PackedSource(MemorySource::new()));
        assert!(manifest.is_empty());
        assert!(manifest.get("").unwrap().is_directory());
    }

    #[test]
    fn malformed_index_gives_empty_manifest() {
        let mem = MemorySource::new();
        mem.insert(MANIFEST_FILENAME, b"not json at all".to_vec());
        let manifest = DiscoveryChain::default().load(&PackedSource(mem));
        assert!(manifest.is_empty());
    }

    #[test]
    fn empty_chain() {
        let chain = DiscoveryChain::new();
        assert!(chain.is_empty());
        assert!(chain.load(&MemorySource::from_files([("a", vec![])])).is_empty());
    }

    #[test]
    fn default_step_order() {
        assert_eq!(DiscoveryChain::default().step_names(), ["walk", "index"]);
    }
}
