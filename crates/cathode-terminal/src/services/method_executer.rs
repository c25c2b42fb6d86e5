//! Marker-driven method dispatch decorator.
//!
//! Entries shaped `<DMETHOD>:name` or `<IMETHOD>:name` are replaced by
//! the output of the named registry operation, spliced in place. An
//! unknown name leaves the marker entry untouched (a later decorator
//! or the display layer will show it as-is, which is the honest
//! failure mode for bad table data).

use crate::response::{
    DECORATOR_METHOD_MARKER, INTERPRETER_METHOD_MARKER, ServiceResponse, split_marker,
};
use crate::services::{DecoratorService, MethodRegistry};

/// Dispatches named zero-argument operations found in response text.
pub struct MethodExecuterService {
    registry: MethodRegistry,
}

impl MethodExecuterService {
    pub fn new(registry: MethodRegistry) -> Self {
        Self { registry }
    }

    fn method_of(text: &str) -> Option<&str> {
        let (header, method) = split_marker(text)?;
        if header == DECORATOR_METHOD_MARKER || header == INTERPRETER_METHOD_MARKER {
            Some(method)
        } else {
            None
        }
    }
}

impl DecoratorService for MethodExecuterService {
    fn decorate(&mut self, responses: Vec<ServiceResponse>) -> Vec<ServiceResponse> {
        let mut out = Vec::with_capacity(responses.len());
        for response in responses {
            let method = match &response {
                ServiceResponse::Plain { text, background } if !background => {
                    Self::method_of(text).map(str::to_string)
                },
                _ => None,
            };
            match method {
                Some(method) => match self.registry.invoke(&method) {
                    Some(list) => {
                        log::debug!("dispatched method {method:?} ({} responses)", list.len());
                        out.extend(list);
                    },
                    None => {
                        log::warn!("no provider for method {method:?}");
                        out.push(response);
                    },
                },
                None => out.push(response),
            }
        }
        out
    }
}
