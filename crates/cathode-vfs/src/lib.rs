//! Virtual file system abstraction for the Cathode terminal.
//!
//! The terminal navigates, lists, and copies entries through the `Vfs`
//! trait. Methods take `&self` so a single filesystem can be shared
//! between the foreground command loop and the background copy worker;
//! implementations provide their own interior mutability.

use std::io::{Read, Write};
use std::sync::Arc;

use cathode_types::error::Result;

mod host;
mod memory;
mod path;

pub use host::HostVfs;
pub use memory::MemoryVfs;
pub use path::{file_name, join, normalize, parent};

/// Whether an entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry in a directory listing.
#[derive(Debug, Clone)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

/// Metadata for a single path.
#[derive(Debug, Clone, Copy)]
pub struct VfsMetadata {
    pub kind: EntryKind,
    pub size: u64,
}

/// A virtual file system.
///
/// Paths are absolute, `/`-separated, and normalized by implementations
/// (`.` and `..` resolved lexically, repeated slashes collapsed).
pub trait Vfs: Send + Sync {
    /// Whether the path exists at all.
    fn exists(&self, path: &str) -> bool;

    /// Metadata for a path.
    fn stat(&self, path: &str) -> Result<VfsMetadata>;

    /// Direct children of a directory, sorted by name.
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>>;

    /// Create a directory (and missing parents).
    fn mkdir(&self, path: &str) -> Result<()>;

    /// Read an entire file.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Create or replace a file with the given contents.
    fn write(&self, path: &str, data: &[u8]) -> Result<()>;

    /// Open a file for streamed reading.
    fn open_read(&self, path: &str) -> Result<Box<dyn Read + Send>>;

    /// Create or truncate a file for streamed writing. The contents
    /// become visible no later than `flush` or drop.
    fn create_write(&self, path: &str) -> Result<Box<dyn Write + Send>>;

    /// Remove a file or an empty directory.
    fn remove(&self, path: &str) -> Result<()>;
}

/// Shared handle used across the terminal and the copy worker.
pub type SharedVfs = Arc<dyn Vfs>;

/// Sum of all file sizes under `path`, recursively.
pub fn tree_size(vfs: &dyn Vfs, path: &str) -> Result<u64> {
    let mut total = 0u64;
    for entry in vfs.readdir(path)? {
        let child = join(path, &entry.name);
        match entry.kind {
            EntryKind::File => total += entry.size,
            EntryKind::Directory => total += tree_size(vfs, &child)?,
        }
    }
    Ok(total)
}
