use crate::error::ResourceResult;

/// Host access to one resource root.
///
/// A source supplies the two primitives the manifest and the reader need:
/// fetching a file's bytes by exact path, and enumerating every file path.
/// Each host (native filesystem, embedded table, archive) provides one
/// implementation, chosen when the [`Resources`](crate::Resources) value is
/// built.
///
/// # Path Contract
///
/// Paths are relative to the source's root, use forward slashes and never
/// start with `/`. Implementations that touch the host filesystem must keep
/// reads inside their root.
///
/// # Errors
///
/// `read` returns [`ResourceError::NotFound`](crate::ResourceError::NotFound)
/// for a missing file and [`ResourceError::Read`](crate::ResourceError::Read)
/// when the file exists but cannot be read. `discover` returns
/// [`ResourceError::Discovery`](crate::ResourceError::Discovery) when the
/// root cannot be enumerated at all.
pub trait ResourceSource: Send + Sync + 'static {
    /// Read the entire contents of the file at `path`.
    fn read(&self, path: &str) -> ResourceResult<Vec<u8>>;

    /// Enumerate every file path under the root.
    fn discover(&self) -> ResourceResult<Vec<String>>;

    /// Short label used in log messages.
    fn name(&self) -> &str {
        "source"
    }
}
