//! Pipeline service contracts and the built-in services.
//!
//! Services come in two roles: interpreter stages map raw input to a
//! candidate response list (or decline), decorator stages transform an
//! already-produced list. Both are composed into ordered lists at
//! startup; the order is the precedence order.

pub mod ascii;
pub mod command;
pub mod compiler;
pub mod copier;
pub mod directory;
pub mod error_handler;
pub mod formatter;
pub mod method_executer;

use crate::response::ServiceResponse;

/// A pipeline stage that tries to interpret raw user input.
///
/// Returning `None` means "this input is not mine"; returning a list
/// containing any error-kind entry counts as a failed attempt whose
/// errors join the pool.
pub trait InterpreterService {
    fn interpret(&mut self, input: &str) -> Option<Vec<ServiceResponse>>;
}

/// A pipeline stage that transforms the full response list.
///
/// Decorators must pass background-flagged entries through untouched
/// and keep them in position.
pub trait DecoratorService {
    fn decorate(&mut self, responses: Vec<ServiceResponse>) -> Vec<ServiceResponse>;
}

/// A named zero-argument operation invocable through in-band markers.
pub type MethodCallback = Box<dyn FnMut() -> Vec<ServiceResponse>>;

/// Registry mapping operation names to callbacks, replacing lookup of
/// methods by symbolic name on whichever service exposes them. First
/// registration of a name wins; later ones are shadowed.
#[derive(Default)]
pub struct MethodRegistry {
    entries: Vec<(String, MethodCallback)>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under a symbolic name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut() -> Vec<ServiceResponse> + 'static,
    ) {
        self.entries.push((name.into(), Box::new(callback)));
    }

    /// Invoke the first provider of `name`, if any.
    pub fn invoke(&mut self, name: &str) -> Option<Vec<ServiceResponse>> {
        let (_, callback) = self.entries.iter_mut().find(|(n, _)| n == name)?;
        Some(callback())
    }

    /// Whether any provider is registered under `name`.
    pub fn provides(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }
}
