//! `move` interpretation: validates and launches background copies.

use std::cell::RefCell;
use std::rc::Rc;

use cathode_copier::Copier;
use cathode_types::textbar::TextBar;

use crate::Explorer;
use crate::response::ServiceResponse;
use crate::services::InterpreterService;

const MOVE_COMMAND: &str = "move";
/// Trailing flag asking for the destination to be created if missing.
const HARD_FLAG: &str = "--hard";
const SOURCE_NOT_FOUND_KEY: &str = "ERROR SOURCE_NOT_FOUND";
const DEST_NOT_FOUND_KEY: &str = "ERROR DEST_NOT_FOUND";
const ERROR_PRIORITY: i32 = 9;

/// Interprets `move <source> <dest> [--hard]`.
///
/// On success the returned list pairs a visible `src -> dst` line with
/// a progress response bound to the freshly started job.
pub struct CopierService {
    copier: Copier,
    explorer: Rc<RefCell<Explorer>>,
    bar: TextBar,
}

impl CopierService {
    pub fn new(copier: Copier, explorer: Rc<RefCell<Explorer>>) -> Self {
        Self {
            copier,
            explorer,
            bar: TextBar::default(),
        }
    }

    /// Use a custom progress bar template.
    pub fn with_bar(mut self, bar: TextBar) -> Self {
        self.bar = bar;
        self
    }
}

impl InterpreterService for CopierService {
    fn interpret(&mut self, input: &str) -> Option<Vec<ServiceResponse>> {
        let args: Vec<&str> = input.split_whitespace().collect();
        if args.len() < 3 || args[0] != MOVE_COMMAND {
            return None;
        }

        let hard = args[args.len() - 1] == HARD_FLAG;
        let (source, dest) = {
            let explorer = self.explorer.borrow();
            (explorer.resolve(args[1]), explorer.resolve(args[2]))
        };

        let outcome = self.copier.copy(&source, &dest, hard);
        if !outcome.source_exists {
            return Some(vec![ServiceResponse::error(
                SOURCE_NOT_FOUND_KEY,
                ERROR_PRIORITY,
            )]);
        }
        if !outcome.dest_exists {
            return Some(vec![ServiceResponse::error(
                DEST_NOT_FOUND_KEY,
                ERROR_PRIORITY,
            )]);
        }

        let handle = outcome.handle?;
        log::info!("copy started: {source} -> {dest}");
        Some(vec![
            ServiceResponse::plain(format!("{} -> {}", args[1], args[2])),
            ServiceResponse::Progress {
                bar: self.bar.clone(),
                handle,
                background: false,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cathode_vfs::{MemoryVfs, SharedVfs};
    use std::sync::Arc;
    use std::time::Duration;

    fn service() -> (CopierService, SharedVfs) {
        let vfs: SharedVfs = Arc::new(MemoryVfs::new());
        vfs.mkdir("/media").unwrap();
        vfs.write("/media/song.ogg", &[1u8; 4096]).unwrap();
        vfs.mkdir("/backup").unwrap();
        let explorer = Rc::new(RefCell::new(Explorer::new(Arc::clone(&vfs))));
        let copier = Copier::with_chunk_size(Arc::clone(&vfs), 512);
        (CopierService::new(copier, explorer), vfs)
    }

    fn wait_done(response: &ServiceResponse) {
        let ServiceResponse::Progress { handle, .. } = response else {
            panic!("expected a progress response");
        };
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        while !handle.is_done() && !handle.is_aborted() {
            assert!(std::time::Instant::now() < deadline, "copy timed out");
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(handle.is_done());
    }

    #[test]
    fn valid_move_reports_operation_and_progress() {
        let (mut svc, vfs) = service();
        let out = svc.interpret("move /media/song.ogg /backup").unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].display_text(), "/media/song.ogg -> /backup");
        wait_done(&out[1]);
        assert_eq!(vfs.read("/backup/song.ogg").unwrap().len(), 4096);
    }

    #[test]
    fn missing_source_errors_with_specific_key() {
        let (mut svc, _) = service();
        let out = svc.interpret("move /media/ghost.ogg /backup").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_text(), SOURCE_NOT_FOUND_KEY);
        assert_eq!(out[0].priority(), Some(9));
    }

    #[test]
    fn missing_dest_errors_without_hard_flag() {
        let (mut svc, _) = service();
        let out = svc.interpret("move /media/song.ogg /nowhere").unwrap();
        assert_eq!(out[0].display_text(), DEST_NOT_FOUND_KEY);
    }

    #[test]
    fn hard_flag_creates_destination() {
        let (mut svc, vfs) = service();
        let out = svc
            .interpret("move /media/song.ogg /fresh --hard")
            .unwrap();
        assert_eq!(out.len(), 2);
        wait_done(&out[1]);
        assert!(vfs.exists("/fresh/song.ogg"));
    }

    #[test]
    fn relative_paths_resolve_against_current_directory() {
        let (mut svc, vfs) = service();
        svc.explorer.borrow_mut().move_to("media");
        let out = svc.interpret("move song.ogg /backup").unwrap();
        assert_eq!(out.len(), 2);
        wait_done(&out[1]);
        assert!(vfs.exists("/backup/song.ogg"));
    }

    #[test]
    fn unrelated_or_short_input_is_declined() {
        let (mut svc, _) = service();
        assert!(svc.interpret("move onlyone").is_none());
        assert!(svc.interpret("copy a b").is_none());
    }
}
