//! Host-filesystem-backed VFS.
//!
//! Maps virtual absolute paths onto a directory of the real filesystem.
//! Virtual paths are normalized lexically before translation, so `..`
//! can never climb above the configured root.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use cathode_types::error::{CathodeError, Result};

use crate::path::normalize;
use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

/// A VFS rooted at a host directory.
#[derive(Debug)]
pub struct HostVfs {
    root: PathBuf,
}

impl HostVfs {
    /// Create a VFS over an existing host directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CathodeError::Vfs(format!(
                "root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Translate a virtual path into a host path under the root.
    fn host_path(&self, path: &str) -> PathBuf {
        let normalized = normalize(path);
        let mut out = self.root.clone();
        for component in normalized.split('/').filter(|c| !c.is_empty()) {
            out.push(component);
        }
        out
    }

    fn meta_of(path: &Path) -> Result<VfsMetadata> {
        let meta = fs::metadata(path)?;
        Ok(VfsMetadata {
            kind: if meta.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            size: if meta.is_dir() { 0 } else { meta.len() },
        })
    }
}

impl Vfs for HostVfs {
    fn exists(&self, path: &str) -> bool {
        self.host_path(path).exists()
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        Self::meta_of(&self.host_path(path))
    }

    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let host = self.host_path(path);
        let mut entries = Vec::new();
        for entry in fs::read_dir(&host)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            entries.push(VfsEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: if meta.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                size: if meta.is_dir() { 0 } else { meta.len() },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        fs::create_dir_all(self.host_path(path))?;
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.host_path(path))?)
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        fs::write(self.host_path(path), data)?;
        Ok(())
    }

    fn open_read(&self, path: &str) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(fs::File::open(self.host_path(path))?))
    }

    fn create_write(&self, path: &str) -> Result<Box<dyn Write + Send>> {
        Ok(Box::new(fs::File::create(self.host_path(path))?))
    }

    fn remove(&self, path: &str) -> Result<()> {
        let host = self.host_path(path);
        if host == self.root {
            return Err(CathodeError::Vfs("cannot remove root".to_string()));
        }
        if fs::metadata(&host)?.is_dir() {
            fs::remove_dir(&host)?;
        } else {
            fs::remove_file(&host)?;
        }
        Ok(())
    }
}
