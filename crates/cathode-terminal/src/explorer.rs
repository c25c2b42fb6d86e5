//! Navigation state over the virtual filesystem.

use cathode_vfs::{EntryKind, SharedVfs, join, parent};

/// Listing rows are indented to read as terminal output.
const INDENT: &str = "   ";

/// Current working directory plus a lazily rebuilt listing cache.
///
/// Both navigation operations check existence before mutating; on
/// refusal the path is left untouched.
pub struct Explorer {
    vfs: SharedVfs,
    path: String,
    listing: Option<Vec<String>>,
}

impl Explorer {
    pub fn new(vfs: SharedVfs) -> Self {
        Self {
            vfs,
            path: "/".to_string(),
            listing: None,
        }
    }

    /// Current working path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The filesystem this explorer navigates.
    pub fn vfs(&self) -> &SharedVfs {
        &self.vfs
    }

    /// Resolve a user-typed path against the current directory.
    pub fn resolve(&self, input: &str) -> String {
        join(&self.path, input)
    }

    /// Descend into `folder` (relative or absolute). Returns whether
    /// the target exists; the path only changes when it does.
    pub fn move_to(&mut self, folder: &str) -> bool {
        let target = self.resolve(folder);
        let exists = self
            .vfs
            .stat(&target)
            .is_ok_and(|meta| meta.kind == EntryKind::Directory);
        if exists {
            self.path = target;
            self.listing = None;
        } else {
            log::warn!("cd refused: {target} does not exist");
        }
        exists
    }

    /// Move to the parent directory. Refused at the root.
    pub fn move_to_parent(&mut self) -> bool {
        if self.path == "/" {
            log::warn!("cd refused: already at the root");
            return false;
        }
        let target = parent(&self.path).to_string();
        let exists = self.vfs.exists(&target);
        if exists {
            self.path = target;
            self.listing = None;
        }
        exists
    }

    /// Drop the cached listing (e.g. after an external copy landed).
    pub fn invalidate(&mut self) {
        self.listing = None;
    }

    /// Indented names of everything in the current directory, folders
    /// first. Cached until the path changes or `invalidate` is called.
    pub fn entries(&mut self) -> Vec<String> {
        if let Some(listing) = &self.listing {
            return listing.clone();
        }
        let mut listing = self.folders();
        listing.extend(self.files());
        self.listing = Some(listing.clone());
        listing
    }

    /// Indented folder names in the current directory.
    pub fn folders(&self) -> Vec<String> {
        self.list_kind(EntryKind::Directory)
    }

    /// Indented file names in the current directory.
    pub fn files(&self) -> Vec<String> {
        self.list_kind(EntryKind::File)
    }

    fn list_kind(&self, kind: EntryKind) -> Vec<String> {
        match self.vfs.readdir(&self.path) {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| e.kind == kind)
                .map(|e| format!("{INDENT}{}", e.name))
                .collect(),
            Err(e) => {
                log::warn!("listing {} failed: {e}", self.path);
                Vec::new()
            },
        }
    }
}
