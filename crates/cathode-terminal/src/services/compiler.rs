//! `run` interpretation: hands script source to an opaque engine and
//! renders whatever comes back.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::Explorer;
use crate::response::ServiceResponse;
use crate::services::InterpreterService;

const RUN_COMMAND: &str = "run";
const COMPILATION_ERROR_KEY: &str = "ERROR COMPILATION SCRIPT";
const ERROR_PRIORITY: i32 = 8;

/// A value produced by script execution, renderable to terminal text.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Number(f64),
    Text(String),
    List(Vec<ScriptValue>),
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            },
        }
    }
}

/// Failure signal from the script engine. The text is for logs only;
/// the user sees the table's compilation-error entry.
#[derive(Debug, Clone)]
pub struct ScriptError(pub String);

/// Opaque script-execution collaborator: source text in, value or
/// failure out.
pub trait ScriptEngine {
    fn run(&mut self, source: &str) -> Result<ScriptValue, ScriptError>;
}

/// Engine used when no scripting backend is wired in; every run fails.
#[derive(Debug, Default)]
pub struct NullScriptEngine;

impl ScriptEngine for NullScriptEngine {
    fn run(&mut self, _source: &str) -> Result<ScriptValue, ScriptError> {
        Err(ScriptError("no script engine configured".to_string()))
    }
}

/// Interprets `run <file>`.
pub struct CompilerService {
    explorer: Rc<RefCell<Explorer>>,
    engine: Box<dyn ScriptEngine>,
}

impl CompilerService {
    pub fn new(explorer: Rc<RefCell<Explorer>>, engine: Box<dyn ScriptEngine>) -> Self {
        Self { explorer, engine }
    }
}

impl InterpreterService for CompilerService {
    fn interpret(&mut self, input: &str) -> Option<Vec<ServiceResponse>> {
        let args: Vec<&str> = input.split_whitespace().collect();
        let [RUN_COMMAND, file] = args.as_slice() else {
            return None;
        };

        let (path, source) = {
            let explorer = self.explorer.borrow();
            let path = explorer.resolve(file);
            let source = explorer.vfs().read(&path);
            (path, source)
        };
        let Ok(source) = source else {
            return Some(vec![ServiceResponse::error(
                COMPILATION_ERROR_KEY,
                ERROR_PRIORITY,
            )]);
        };

        match self.engine.run(&String::from_utf8_lossy(&source)) {
            Ok(value) => Some(vec![ServiceResponse::plain(value.to_string())]),
            Err(e) => {
                log::warn!("script {path} failed: {}", e.0);
                Some(vec![ServiceResponse::error(
                    COMPILATION_ERROR_KEY,
                    ERROR_PRIORITY,
                )])
            },
        }
    }
}
