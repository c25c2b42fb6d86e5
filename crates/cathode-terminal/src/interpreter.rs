//! Two-stage pipeline: interpretation, then decoration.
//!
//! Interpreter services run in configured order until one recognizes
//! the input and produces a fully non-error response list. Everything
//! the losing stages emitted goes into an error pool; if nobody wins,
//! the pool is reduced to the entries with the lowest priority value
//! and handed to the error formatter. Decoration then runs over
//! whichever list resulted.

use crate::response::ServiceResponse;
use crate::services::error_handler::ErrorFormatter;
use crate::services::{DecoratorService, InterpreterService};

/// Pipeline orchestrator. Service order is fixed at composition time
/// and doubles as the precedence order.
pub struct Interpreter {
    interpreters: Vec<Box<dyn InterpreterService>>,
    decorators: Vec<Box<dyn DecoratorService>>,
    error_formatter: ErrorFormatter,
}

impl Interpreter {
    pub fn new(error_formatter: ErrorFormatter) -> Self {
        Self {
            interpreters: Vec::new(),
            decorators: Vec::new(),
            error_formatter,
        }
    }

    /// Append an interpreter stage. Earlier stages take precedence.
    pub fn push_interpreter(&mut self, service: Box<dyn InterpreterService>) {
        self.interpreters.push(service);
    }

    /// Append a decorator stage. Stages run in push order.
    pub fn push_decorator(&mut self, service: Box<dyn DecoratorService>) {
        self.decorators.push(service);
    }

    /// Process one command line to a final, decorated response list.
    ///
    /// Never fails: unrecognized or refused input comes back as
    /// formatted error responses.
    pub fn interpret(&mut self, input: &str) -> Vec<ServiceResponse> {
        let mut responses: Vec<ServiceResponse> = Vec::new();
        let mut error_pool: Vec<ServiceResponse> = Vec::new();

        for service in &mut self.interpreters {
            let Some(list) = service.interpret(input) else {
                continue;
            };
            if list.iter().all(|r| !r.is_error()) {
                // First fully successful stage wins outright.
                responses = list;
                break;
            }
            error_pool.extend(list);
        }

        if responses.is_empty() && !error_pool.is_empty() {
            let survivors = prioritize_errors(error_pool);
            responses = self.error_formatter.format(&survivors);
        }

        if !responses.is_empty() {
            for decorator in &mut self.decorators {
                responses = decorator.decorate(responses);
            }
        }

        responses
    }
}

/// Keep only the error entries sharing the lowest priority value in the
/// pool (ties keep all, pool order preserved). Non-error entries that
/// rode along with a failed stage are discarded here.
fn prioritize_errors(pool: Vec<ServiceResponse>) -> Vec<ServiceResponse> {
    let min = pool.iter().filter_map(ServiceResponse::priority).min();
    match min {
        Some(min) => pool
            .into_iter()
            .filter(|r| r.priority() == Some(min))
            .collect(),
        None => Vec::new(),
    }
}
