//! Progress state shared between the copy worker and the foreground.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use cathode_types::human::{format_rate, format_size};

/// Progress fields of one copy job.
///
/// Written by the worker thread after every chunk, read by whoever
/// polls the handle. Each field is an independently-readable scalar;
/// readers may observe a value one chunk stale, never a torn one.
#[derive(Debug)]
pub struct CopyProgress {
    total: AtomicU64,
    copied: AtomicU64,
    last_sample: AtomicU64,
    done: AtomicBool,
    aborted: AtomicBool,
    cancel: AtomicBool,
}

impl CopyProgress {
    pub(crate) fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            copied: AtomicU64::new(0),
            last_sample: AtomicU64::new(0),
            done: AtomicBool::new(false),
            aborted: AtomicBool::new(false),
            cancel: AtomicBool::new(false),
        }
    }

    pub(crate) fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    pub(crate) fn add_copied(&self, bytes: u64) {
        self.copied.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn finish(&self) {
        self.done.store(true, Ordering::Release);
    }

    pub(crate) fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub(crate) fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Cloneable polling handle to one running (or finished) copy job.
#[derive(Debug, Clone)]
pub struct CopyHandle {
    progress: Arc<CopyProgress>,
}

impl CopyHandle {
    pub(crate) fn new(progress: Arc<CopyProgress>) -> Self {
        Self { progress }
    }

    /// Bytes transferred so far.
    pub fn copied_bytes(&self) -> u64 {
        self.progress.copied.load(Ordering::Relaxed)
    }

    /// Total bytes this job will transfer.
    pub fn total_bytes(&self) -> u64 {
        self.progress.total.load(Ordering::Relaxed)
    }

    /// Completed fraction, clamped to `[0, 1]`. Exactly `1.0` once the
    /// job has finished (including zero-byte jobs).
    pub fn fraction(&self) -> f32 {
        let total = self.total_bytes();
        if total == 0 {
            return if self.is_done() { 1.0 } else { 0.0 };
        }
        (self.copied_bytes() as f64 / total as f64).clamp(0.0, 1.0) as f32
    }

    /// Whether the transfer ran to completion.
    pub fn is_done(&self) -> bool {
        self.progress.done.load(Ordering::Acquire)
    }

    /// Whether the transfer stopped early (cancelled or failed).
    pub fn is_aborted(&self) -> bool {
        self.progress.aborted.load(Ordering::Acquire)
    }

    /// Request cancellation; honored by the worker between chunks.
    pub fn cancel(&self) {
        self.progress.cancel.store(true, Ordering::Relaxed);
    }

    /// Bytes transferred since the previous call to this method.
    /// Calling it once per second yields bytes-per-second.
    pub fn sample_throughput(&self) -> u64 {
        let copied = self.copied_bytes();
        let prev = self.progress.last_sample.swap(copied, Ordering::Relaxed);
        copied.saturating_sub(prev)
    }

    /// Human-readable transferred size, e.g. `3.50MB`.
    pub fn copied_readable(&self) -> String {
        format_size(self.copied_bytes())
    }

    /// Human-readable total size.
    pub fn total_readable(&self) -> String {
        format_size(self.total_bytes())
    }

    /// Human-readable throughput for one sampling interval.
    pub fn throughput_readable(&self) -> String {
        format_rate(self.sample_throughput())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle_with_progress() -> (CopyHandle, Arc<CopyProgress>) {
        let progress = Arc::new(CopyProgress::new());
        (CopyHandle::new(Arc::clone(&progress)), progress)
    }

    #[test]
    fn fraction_is_copied_over_total() {
        let (handle, progress) = handle_with_progress();
        progress.set_total(200);
        progress.add_copied(50);
        assert_eq!(handle.fraction(), 0.25);
    }

    #[test]
    fn fraction_clamps_overrun() {
        let (handle, progress) = handle_with_progress();
        progress.set_total(100);
        progress.add_copied(150);
        assert_eq!(handle.fraction(), 1.0);
    }

    #[test]
    fn zero_total_fraction_depends_on_done() {
        let (handle, progress) = handle_with_progress();
        assert_eq!(handle.fraction(), 0.0);
        progress.finish();
        assert_eq!(handle.fraction(), 1.0);
    }

    #[test]
    fn throughput_is_delta_between_samples() {
        let (handle, progress) = handle_with_progress();
        progress.add_copied(1000);
        assert_eq!(handle.sample_throughput(), 1000);
        progress.add_copied(234);
        assert_eq!(handle.sample_throughput(), 234);
        assert_eq!(handle.sample_throughput(), 0);
    }

    #[test]
    fn cancel_is_visible_to_worker() {
        let (handle, progress) = handle_with_progress();
        assert!(!progress.is_cancel_requested());
        handle.cancel();
        assert!(progress.is_cancel_requested());
    }

    #[test]
    fn readable_sizes_format() {
        let (handle, progress) = handle_with_progress();
        progress.set_total(10 * 1024 * 1024);
        progress.add_copied(5 * 1024 * 1024);
        assert_eq!(handle.copied_readable(), "5.00MB");
        assert_eq!(handle.total_readable(), "10.00MB");
    }

    #[test]
    fn clones_share_state() {
        let (handle, progress) = handle_with_progress();
        let other = handle.clone();
        progress.add_copied(10);
        assert_eq!(other.copied_bytes(), 10);
    }
}
