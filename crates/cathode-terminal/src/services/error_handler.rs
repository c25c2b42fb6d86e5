//! Fallback error formatting.
//!
//! Prioritized error survivors carry table keys, not user-facing text.
//! This stage resolves each key through the command table; a key the
//! table does not define falls back to the base `ERROR` entry, so the
//! user always sees something coherent.

use std::rc::Rc;

use crate::response::ServiceResponse;
use crate::table::{BASE_ERROR_KEY, CommandTable};

/// Turns error keys into displayable responses via the table.
pub struct ErrorFormatter {
    table: Rc<CommandTable>,
}

impl ErrorFormatter {
    pub fn new(table: Rc<CommandTable>) -> Self {
        Self { table }
    }

    /// Format every survivor, preserving order.
    pub fn format(&self, errors: &[ServiceResponse]) -> Vec<ServiceResponse> {
        errors.iter().flat_map(|e| self.format_one(e)).collect()
    }

    fn format_one(&self, error: &ServiceResponse) -> Vec<ServiceResponse> {
        let ServiceResponse::Error { key, .. } = error else {
            // Non-error survivors pass through as-is.
            return vec![error.clone()];
        };
        let resolution = self.table.resolve(key);
        let texts = if resolution.error {
            log::debug!("error key {key:?} not in table, using base error");
            self.table.resolve(BASE_ERROR_KEY).responses
        } else {
            resolution.responses
        };
        texts.into_iter().map(ServiceResponse::plain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableBuilder;

    fn formatter() -> ErrorFormatter {
        let table = TableBuilder::from_csv(
            "c0,c1,answer\n\
             ERROR,NOT_FOUND,[ERROR]:not found\n\
             ERROR,DIR_NOT_FOUND,[ERROR]:no such directory\n\
             ERROR,,[ERROR]:generic failure\n",
        )
        .build();
        ErrorFormatter::new(Rc::new(table))
    }

    #[test]
    fn known_key_resolves_to_table_text() {
        let fmt = formatter();
        let out = fmt.format(&[ServiceResponse::error("ERROR DIR_NOT_FOUND", 8)]);
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_error());
        assert_eq!(out[0].display_text(), "[ERROR]:no such directory");
    }

    #[test]
    fn unknown_key_falls_back_to_base_error() {
        let fmt = formatter();
        let out = fmt.format(&[ServiceResponse::error("ERROR WHO_KNOWS", 1)]);
        assert_eq!(out[0].display_text(), "[ERROR]:generic failure");
    }

    #[test]
    fn multiple_errors_format_in_order() {
        let fmt = formatter();
        let out = fmt.format(&[
            ServiceResponse::error("ERROR NOT_FOUND", 10),
            ServiceResponse::error("ERROR DIR_NOT_FOUND", 10),
        ]);
        let texts: Vec<String> = out.iter().map(ServiceResponse::display_text).collect();
        assert_eq!(
            texts,
            vec!["[ERROR]:not found", "[ERROR]:no such directory"]
        );
    }

    #[test]
    fn empty_input_formats_to_nothing() {
        let fmt = formatter();
        assert!(fmt.format(&[]).is_empty());
    }
}
