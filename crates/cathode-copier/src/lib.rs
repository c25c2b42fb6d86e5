//! Background copy engine.
//!
//! Validates a copy request up front (distinct source-missing and
//! destination-missing signals), then streams the bytes on a worker
//! thread through one reusable buffer. The foreground keeps a
//! [`CopyHandle`] and polls progress; it is never blocked by the
//! transfer. Cancellation is honored between chunks.

mod job;

use std::io::{Read, Write};
use std::sync::Arc;
use std::thread;

use cathode_types::error::Result;
use cathode_vfs::{EntryKind, SharedVfs, Vfs, tree_size};

pub use job::{CopyHandle, CopyProgress};

/// Outcome of the validation phase of a copy request.
///
/// `handle` is present only when both existence checks passed and a
/// transfer was actually started.
#[derive(Debug)]
pub struct CopyOutcome {
    pub source_exists: bool,
    pub dest_exists: bool,
    pub handle: Option<CopyHandle>,
}

/// How a transfer body finished.
enum CopyEnd {
    Completed,
    Cancelled,
}

/// The copy engine. Cheap to construct; one instance can serve many
/// sequential jobs.
pub struct Copier {
    vfs: SharedVfs,
    chunk_size: usize,
}

impl Copier {
    /// Default transfer buffer size.
    pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

    pub fn new(vfs: SharedVfs) -> Self {
        Self::with_chunk_size(vfs, Self::DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(vfs: SharedVfs, chunk_size: usize) -> Self {
        Self {
            vfs,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Validate and start a copy. Returns immediately; the transfer
    /// itself runs on a worker thread.
    ///
    /// `create_dest` creates the destination directory when missing
    /// instead of refusing.
    pub fn copy(&self, source: &str, dest: &str, create_dest: bool) -> CopyOutcome {
        let (outcome, job) = self.validate(source, dest, create_dest);
        if let Some(job) = job {
            let vfs = Arc::clone(&self.vfs);
            let chunk_size = self.chunk_size;
            thread::spawn(move || job.run(vfs.as_ref(), chunk_size));
        }
        outcome
    }

    /// Validate and run a copy on the calling thread. Test seam and
    /// building block of [`Self::copy`]; same validation semantics.
    pub fn copy_blocking(&self, source: &str, dest: &str, create_dest: bool) -> CopyOutcome {
        let (outcome, job) = self.validate(source, dest, create_dest);
        if let Some(job) = job {
            job.run(self.vfs.as_ref(), self.chunk_size);
        }
        outcome
    }

    fn validate(&self, source: &str, dest: &str, create_dest: bool) -> (CopyOutcome, Option<Job>) {
        let source_kind = self.vfs.stat(source).map(|meta| meta.kind);
        let mut dest_exists = self
            .vfs
            .stat(dest)
            .is_ok_and(|meta| meta.kind == EntryKind::Directory);

        let Ok(kind) = source_kind else {
            return (
                CopyOutcome {
                    source_exists: false,
                    dest_exists,
                    handle: None,
                },
                None,
            );
        };

        if !dest_exists && create_dest && self.vfs.mkdir(dest).is_ok() {
            dest_exists = true;
        }
        if !dest_exists {
            return (
                CopyOutcome {
                    source_exists: true,
                    dest_exists: false,
                    handle: None,
                },
                None,
            );
        }

        let progress = Arc::new(CopyProgress::new());
        let job = Job {
            source: source.to_string(),
            dest: dest.to_string(),
            kind,
            progress: Arc::clone(&progress),
        };
        (
            CopyOutcome {
                source_exists: true,
                dest_exists: true,
                handle: Some(CopyHandle::new(progress)),
            },
            Some(job),
        )
    }
}

/// One validated transfer, ready to run.
struct Job {
    source: String,
    dest: String,
    kind: EntryKind,
    progress: Arc<CopyProgress>,
}

impl Job {
    fn run(self, vfs: &dyn Vfs, chunk_size: usize) {
        let mut buf = vec![0u8; chunk_size];
        let result = match self.kind {
            EntryKind::File => self.run_file(vfs, &mut buf),
            EntryKind::Directory => self.run_dir(vfs, &mut buf),
        };
        match result {
            Ok(CopyEnd::Completed) => {
                log::debug!("copy {} -> {} completed", self.source, self.dest);
                self.progress.finish();
            },
            Ok(CopyEnd::Cancelled) => {
                log::warn!("copy {} -> {} cancelled", self.source, self.dest);
                self.progress.abort();
            },
            Err(e) => {
                log::error!("copy {} -> {} failed: {e}", self.source, self.dest);
                self.progress.abort();
            },
        }
    }

    fn run_file(&self, vfs: &dyn Vfs, buf: &mut [u8]) -> Result<CopyEnd> {
        let total = vfs.stat(&self.source)?.size;
        self.progress.set_total(total);
        let dest_file = cathode_vfs::join(&self.dest, cathode_vfs::file_name(&self.source));
        copy_file_chunked(vfs, &self.source, &dest_file, buf, &self.progress)
    }

    fn run_dir(&self, vfs: &dyn Vfs, buf: &mut [u8]) -> Result<CopyEnd> {
        // Full pre-scan so progress is a fraction of the real total.
        let total = tree_size(vfs, &self.source)?;
        self.progress.set_total(total);
        copy_dir_recursive(vfs, &self.source, &self.dest, buf, &self.progress)
    }
}

/// Stream one file through the shared buffer, bumping progress after
/// every chunk and honoring cancellation between chunks.
fn copy_file_chunked(
    vfs: &dyn Vfs,
    source: &str,
    dest: &str,
    buf: &mut [u8],
    progress: &CopyProgress,
) -> Result<CopyEnd> {
    let mut reader = vfs.open_read(source)?;
    let mut writer = vfs.create_write(dest)?;
    loop {
        if progress.is_cancel_requested() {
            return Ok(CopyEnd::Cancelled);
        }
        let n = reader.read(buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
        progress.add_copied(n as u64);
    }
    writer.flush()?;
    Ok(CopyEnd::Completed)
}

/// Depth-first directory mirror: create the target directory, copy its
/// files, then descend into subdirectories.
fn copy_dir_recursive(
    vfs: &dyn Vfs,
    source: &str,
    dest: &str,
    buf: &mut [u8],
    progress: &CopyProgress,
) -> Result<CopyEnd> {
    let mirrored = cathode_vfs::join(dest, cathode_vfs::file_name(source));
    vfs.mkdir(&mirrored)?;

    let entries = vfs.readdir(source)?;
    for entry in entries.iter().filter(|e| e.kind == EntryKind::File) {
        let src_file = cathode_vfs::join(source, &entry.name);
        let dst_file = cathode_vfs::join(&mirrored, &entry.name);
        match copy_file_chunked(vfs, &src_file, &dst_file, buf, progress)? {
            CopyEnd::Completed => {},
            CopyEnd::Cancelled => return Ok(CopyEnd::Cancelled),
        }
    }
    for entry in entries.iter().filter(|e| e.kind == EntryKind::Directory) {
        let src_dir = cathode_vfs::join(source, &entry.name);
        match copy_dir_recursive(vfs, &src_dir, &mirrored, buf, progress)? {
            CopyEnd::Completed => {},
            CopyEnd::Cancelled => return Ok(CopyEnd::Cancelled),
        }
    }
    Ok(CopyEnd::Completed)
}
