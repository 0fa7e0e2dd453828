use thiserror::Error;

/// Errors produced while discovering, resolving or reading resources.
///
/// A path that simply isn't part of a manifest is not an error for the
/// query methods (`get`, `list`, `exists`); it only becomes
/// [`ResourceError::NotFound`] when bytes are requested.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),
    /// The resource exists but reading it failed.
    #[error("failed to read resource {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The host could not enumerate resources at all.
    #[error("resource discovery failed: {0}")]
    Discovery(String),
    /// The path is empty or escapes the resource root.
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// No resource root is mounted under the given name.
    #[error("no such resource root: {0}")]
    NoSuchRoot(String),
    /// The charset name is not one of the supported encodings.
    #[error("unknown charset: {0}")]
    UnknownCharset(String),
    /// Strict UTF-16 decoding was given an odd number of bytes.
    #[error("UTF-16 data must have an even number of bytes, got {0}")]
    OddLength(usize),
}

pub type ResourceResult<T> = Result<T, ResourceError>;

impl ResourceError {
    /// Classify an I/O failure for `path`, keeping "missing" distinct from
    /// "unreadable".
    pub fn from_io(path: impl Into<String>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ResourceError::NotFound(path.into())
        } else {
            ResourceError::Read {
                path: path.into(),
                source: err,
            }
        }
    }

    /// Whether this error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err = ResourceError::from_io("a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "resource not found: a.txt");
    }

    #[test]
    fn other_io_errors_map_to_read() {
        let err = ResourceError::from_io(
            "a.txt",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ResourceError::Read { ref path, .. } if path == "a.txt"));
        assert!(!err.is_not_found());
        assert!(std::error::Error::source(&err).is_some());
    }
}
