//! Table-backed command service. Last line of defense in the
//! interpreter order: it accepts any input and turns table misses into
//! the lowest-precedence not-found error.

use std::rc::Rc;

use crate::response::ServiceResponse;
use crate::services::InterpreterService;
use crate::table::{CommandTable, NOT_FOUND_KEY};

const ERROR_PRIORITY: i32 = 10;

/// Resolves input against the command table.
pub struct CommandService {
    table: Rc<CommandTable>,
}

impl CommandService {
    pub fn new(table: Rc<CommandTable>) -> Self {
        Self { table }
    }
}

impl InterpreterService for CommandService {
    fn interpret(&mut self, input: &str) -> Option<Vec<ServiceResponse>> {
        let resolution = self.table.resolve(input);
        if resolution.error {
            return Some(vec![ServiceResponse::error(NOT_FOUND_KEY, ERROR_PRIORITY)]);
        }
        Some(
            resolution
                .responses
                .into_iter()
                .map(ServiceResponse::plain)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableBuilder;

    fn service() -> CommandService {
        let table = TableBuilder::from_csv(
            "c0,c1,answer\nhelp,me,try again\nERROR,NOT_FOUND,[ERROR]:not found\n",
        )
        .build();
        CommandService::new(Rc::new(table))
    }

    #[test]
    fn known_command_yields_plain_responses() {
        let mut svc = service();
        let out = svc.interpret("help me").unwrap();
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_error());
        assert_eq!(out[0].display_text(), "try again");
    }

    #[test]
    fn unknown_command_yields_not_found_error() {
        let mut svc = service();
        let out = svc.interpret("help you").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].priority(), Some(10));
        assert_eq!(out[0].display_text(), NOT_FOUND_KEY);
    }

    #[test]
    fn always_responds_even_to_garbage() {
        let mut svc = service();
        assert!(svc.interpret("").is_some());
        assert!(svc.interpret("total nonsense").is_some());
    }
}
