//! In-memory VFS implementation.
//!
//! The entire tree lives in a `BTreeMap<String, Node>` keyed by
//! normalized absolute path, behind an `RwLock` so the copy worker and
//! the command loop can share one instance. Useful for unit tests and
//! fully sandboxed game worlds.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::sync::{Arc, RwLock};

use cathode_types::error::{CathodeError, Result};

use crate::path::{normalize, parent};
use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

type NodeMap = BTreeMap<String, Node>;

/// A fully in-memory virtual file system.
#[derive(Debug)]
pub struct MemoryVfs {
    nodes: Arc<RwLock<NodeMap>>,
}

impl MemoryVfs {
    /// Create a new in-memory VFS with only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self {
            nodes: Arc::new(RwLock::new(nodes)),
        }
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, NodeMap> {
        self.nodes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, NodeMap> {
        self.nodes.write().unwrap_or_else(|e| e.into_inner())
    }

    fn mkdir_locked(nodes: &mut NodeMap, path: &str) -> Result<()> {
        if let Some(Node::File(_)) = nodes.get(path) {
            return Err(CathodeError::Vfs(format!("not a directory: {path}")));
        }
        if nodes.contains_key(path) {
            return Ok(());
        }
        let par = parent(path).to_string();
        if par != path {
            Self::mkdir_locked(nodes, &par)?;
        }
        nodes.insert(path.to_string(), Node::Dir);
        Ok(())
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs for MemoryVfs {
    fn exists(&self, path: &str) -> bool {
        self.lock_read().contains_key(&normalize(path))
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        let path = normalize(path);
        match self.lock_read().get(&path) {
            Some(Node::File(data)) => Ok(VfsMetadata {
                kind: EntryKind::File,
                size: data.len() as u64,
            }),
            Some(Node::Dir) => Ok(VfsMetadata {
                kind: EntryKind::Directory,
                size: 0,
            }),
            None => Err(CathodeError::Vfs(format!("no such path: {path}"))),
        }
    }

    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let path = normalize(path);
        let nodes = self.lock_read();
        match nodes.get(&path) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(CathodeError::Vfs(format!("not a directory: {path}")));
            },
            None => {
                return Err(CathodeError::Vfs(format!("no such directory: {path}")));
            },
        }

        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };

        // BTreeMap iteration is sorted by key, so children come out in
        // lexicographic order.
        let mut entries = Vec::new();
        for (key, node) in nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if !rest.is_empty() && !rest.contains('/') {
                entries.push(VfsEntry {
                    name: rest.to_string(),
                    kind: match node {
                        Node::Dir => EntryKind::Directory,
                        Node::File(_) => EntryKind::File,
                    },
                    size: match node {
                        Node::File(data) => data.len() as u64,
                        Node::Dir => 0,
                    },
                });
            }
        }
        Ok(entries)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        let path = normalize(path);
        Self::mkdir_locked(&mut self.lock_write(), &path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path);
        match self.lock_read().get(&path) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Dir) => Err(CathodeError::Vfs(format!("is a directory: {path}"))),
            None => Err(CathodeError::Vfs(format!("no such file: {path}"))),
        }
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path);
        let mut nodes = self.lock_write();
        let par = parent(&path);
        if !nodes.contains_key(par) {
            return Err(CathodeError::Vfs(format!(
                "parent directory does not exist: {par}"
            )));
        }
        nodes.insert(path, Node::File(data.to_vec()));
        Ok(())
    }

    fn open_read(&self, path: &str) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.read(path)?)))
    }

    fn create_write(&self, path: &str) -> Result<Box<dyn Write + Send>> {
        let path = normalize(path);
        {
            let mut nodes = self.lock_write();
            let par = parent(&path).to_string();
            if !nodes.contains_key(&par) {
                return Err(CathodeError::Vfs(format!(
                    "parent directory does not exist: {par}"
                )));
            }
            // Truncate immediately so readers observe the new file.
            nodes.insert(path.clone(), Node::File(Vec::new()));
        }
        Ok(Box::new(MemoryWriter {
            nodes: Arc::clone(&self.nodes),
            path,
            buf: Vec::new(),
        }))
    }

    fn remove(&self, path: &str) -> Result<()> {
        let path = normalize(path);
        if path == "/" {
            return Err(CathodeError::Vfs("cannot remove root".to_string()));
        }
        let mut nodes = self.lock_write();
        match nodes.get(&path) {
            Some(Node::Dir) => {
                let prefix = format!("{path}/");
                let has_children = nodes
                    .range(prefix.clone()..)
                    .next()
                    .is_some_and(|(k, _)| k.starts_with(&prefix));
                if has_children {
                    return Err(CathodeError::Vfs(format!("directory not empty: {path}")));
                }
            },
            Some(Node::File(_)) => {},
            None => {
                return Err(CathodeError::Vfs(format!("no such path: {path}")));
            },
        }
        nodes.remove(&path);
        Ok(())
    }
}

/// Streamed writer into a `MemoryVfs` file. Contents are committed on
/// every flush and on drop.
struct MemoryWriter {
    nodes: Arc<RwLock<NodeMap>>,
    path: String,
    buf: Vec<u8>,
}

impl MemoryWriter {
    fn commit(&self) {
        let mut nodes = self.nodes.write().unwrap_or_else(|e| e.into_inner());
        nodes.insert(self.path.clone(), Node::File(self.buf.clone()));
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.commit();
        Ok(())
    }
}

impl Drop for MemoryWriter {
    fn drop(&mut self) {
        self.commit();
    }
}
