//! `cd` interpretation over the explorer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Explorer;
use crate::response::ServiceResponse;
use crate::services::InterpreterService;

const CHANGE_DIR_COMMAND: &str = "cd";
const PREVIOUS_DIR_TOKEN: &str = "..";
const DIR_NOT_FOUND_KEY: &str = "ERROR DIR_NOT_FOUND";
/// Bare `cd` resolves its own usage text from the table.
const USAGE_KEY: &str = "cd";
const ERROR_PRIORITY: i32 = 8;

/// Interprets `cd <dir>` and `cd ..`.
pub struct DirectoryService {
    explorer: Rc<RefCell<Explorer>>,
}

impl DirectoryService {
    pub fn new(explorer: Rc<RefCell<Explorer>>) -> Self {
        Self { explorer }
    }

    fn change_directory(&self, folder: &str) -> bool {
        let mut explorer = self.explorer.borrow_mut();
        if folder == PREVIOUS_DIR_TOKEN {
            explorer.move_to_parent()
        } else {
            explorer.move_to(folder)
        }
    }
}

impl InterpreterService for DirectoryService {
    fn interpret(&mut self, input: &str) -> Option<Vec<ServiceResponse>> {
        let args: Vec<&str> = input.split_whitespace().collect();

        match args.as_slice() {
            [CHANGE_DIR_COMMAND, folder] => {
                if self.change_directory(folder) {
                    // Acknowledged silently; the entry still occupies a
                    // slot so the UI can pair it with a prompt refresh.
                    Some(vec![ServiceResponse::background("")])
                } else {
                    Some(vec![ServiceResponse::error(
                        DIR_NOT_FOUND_KEY,
                        ERROR_PRIORITY,
                    )])
                }
            },
            [CHANGE_DIR_COMMAND] => {
                Some(vec![ServiceResponse::error(USAGE_KEY, ERROR_PRIORITY)])
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cathode_vfs::{MemoryVfs, Vfs};
    use std::sync::Arc;

    fn service() -> (DirectoryService, Rc<RefCell<Explorer>>) {
        let vfs = MemoryVfs::new();
        vfs.mkdir("/games/retro").unwrap();
        let explorer = Rc::new(RefCell::new(Explorer::new(Arc::new(vfs))));
        (DirectoryService::new(Rc::clone(&explorer)), explorer)
    }

    #[test]
    fn cd_into_existing_folder_acknowledges_in_background() {
        let (mut svc, explorer) = service();
        let out = svc.interpret("cd games").unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].is_background());
        assert!(!out[0].is_error());
        assert_eq!(explorer.borrow().path(), "/games");
    }

    #[test]
    fn cd_into_missing_folder_errors_without_moving() {
        let (mut svc, explorer) = service();
        let out = svc.interpret("cd nowhere").unwrap();
        assert_eq!(out[0].priority(), Some(8));
        assert_eq!(out[0].display_text(), DIR_NOT_FOUND_KEY);
        assert_eq!(explorer.borrow().path(), "/");
    }

    #[test]
    fn cd_dot_dot_at_root_is_refused() {
        let (mut svc, explorer) = service();
        let out = svc.interpret("cd ..").unwrap();
        assert!(out[0].is_error());
        assert_eq!(out[0].display_text(), DIR_NOT_FOUND_KEY);
        assert_eq!(explorer.borrow().path(), "/");
    }

    #[test]
    fn cd_dot_dot_walks_up() {
        let (mut svc, explorer) = service();
        svc.interpret("cd games").unwrap();
        svc.interpret("cd retro").unwrap();
        let out = svc.interpret("cd ..").unwrap();
        assert!(!out[0].is_error());
        assert_eq!(explorer.borrow().path(), "/games");
    }

    #[test]
    fn bare_cd_asks_for_usage() {
        let (mut svc, _) = service();
        let out = svc.interpret("cd").unwrap();
        assert!(out[0].is_error());
        assert_eq!(out[0].display_text(), "cd");
    }

    #[test]
    fn unrelated_input_is_declined() {
        let (mut svc, _) = service();
        assert!(svc.interpret("help me").is_none());
        assert!(svc.interpret("cd too many args").is_none());
    }
}
