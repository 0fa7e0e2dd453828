use std::path::PathBuf;

use resdir_resources::ResourceError;
use thiserror::Error;

/// Errors reported by the `resdir` commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read {path}: {source}")]
    ReadIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is out of date; run `resdir index` to refresh it")]
    StaleIndex(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code. Missing and unreadable resources get distinct codes
    /// so scripts can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Resource(ResourceError::NotFound(_)) => 2,
            CliError::Resource(ResourceError::Read { .. }) => 3,
            CliError::StaleIndex(_) => 4,
            _ => 1,
        }
    }
}
