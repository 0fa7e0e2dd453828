//! Resource manifests, virtual directory trees and charset decoding.
//!
//! A resource root is described once by a flat list of relative file paths.
//! From that list alone the [`Manifest`] answers whether a path is a file or
//! a directory, lists a directory's immediate children and walks the whole
//! tree, without asking the host again. Bytes are fetched through a
//! [`ResourceSource`] and turned into text with [`Charset::decode`].
//!
//! # Architecture
//!
//! - [`ResourceSource`] is the host boundary: `read` one file, `discover`
//!   every path. One implementation per host.
//! - [`DiscoveryChain`] tries discovery strategies in order (directory walk,
//!   then the serialized `__resources__.json` index) and builds the manifest
//!   from the first non-empty result.
//! - [`Resources`] ties a source to its lazily discovered manifest and is
//!   the value callers query and read through.
//! - [`ResourceRoots`] routes `"root/path"` strings across several named
//!   [`Resources`].
//!
//! # Sources
//!
//! - [`MemorySource`]: in-memory files for tests and embedded resources
//! - [`FileSystemSource`]: native directory (requires the `filesystem` feature)
//!
//! ```
//! use resdir_resources::{Charset, MemorySource, Resources};
//!
//! let mem = MemorySource::new();
//! mem.insert("a/b.txt", b"hello".to_vec());
//! mem.insert("c.txt", vec![0xE9]);
//!
//! let resources = Resources::new(mem);
//! let names: Vec<String> = resources
//!     .root()
//!     .list()
//!     .iter()
//!     .map(|entry| entry.name().to_owned())
//!     .collect();
//! assert_eq!(names, ["a", "c.txt"]);
//! assert!(resources.get("a").unwrap().is_directory());
//! assert_eq!(resources.read_text_with("c.txt", Charset::Iso8859_1).unwrap(), "é");
//! ```

mod charset;
pub mod discovery;
mod entry;
mod error;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
mod filesystem;
pub mod manifest;
mod memory;
pub mod path;
mod resources;
mod roots;
mod source;

pub use charset::Charset;
pub use discovery::{Discover, DiscoveryChain, IndexDiscovery, StaticDiscovery, WalkDiscovery};
pub use entry::{ResourceDirectory, ResourceEntry, ResourceFile};
pub use error::{ResourceError, ResourceResult};
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
pub use filesystem::FileSystemSource;
pub use manifest::{MANIFEST_FILENAME, Manifest};
pub use memory::MemorySource;
pub use resources::Resources;
pub use roots::ResourceRoots;
pub use source::ResourceSource;
