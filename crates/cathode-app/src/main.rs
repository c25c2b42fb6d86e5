//! Cathode terminal entry point.
//!
//! Thin interactive glue: reads lines from stdin, feeds them to the
//! interpreter, renders the decorated responses with ANSI colors, and
//! live-polls progress responses until their copy job settles.

mod render;
mod vfs_setup;

use std::cell::RefCell;
use std::io::Write as _;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use cathode_copier::Copier;
use cathode_terminal::services::MethodRegistry;
use cathode_terminal::services::ascii::AsciiArt;
use cathode_terminal::services::command::CommandService;
use cathode_terminal::services::compiler::{CompilerService, NullScriptEngine};
use cathode_terminal::services::copier::CopierService;
use cathode_terminal::services::directory::DirectoryService;
use cathode_terminal::services::error_handler::ErrorFormatter;
use cathode_terminal::services::formatter::TextFormatterService;
use cathode_terminal::services::method_executer::MethodExecuterService;
use cathode_terminal::table::CommandTable;
use cathode_terminal::{Explorer, Interpreter, ServiceResponse, TableBuilder};
use cathode_types::config::TerminalConfig;
use cathode_vfs::{HostVfs, MemoryVfs, SharedVfs};

const DEFAULT_COMMANDS: &str = include_str!("../assets/commands.csv");
const DEFAULT_TITLE: &str = include_str!("../assets/title.txt");

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cathode.toml".to_string());
    let config = TerminalConfig::load(Path::new(&config_path))?;

    let vfs: SharedVfs = if config.fs_root.as_os_str().is_empty() {
        log::info!("no fs_root configured, using demo in-memory filesystem");
        let mem = MemoryVfs::new();
        vfs_setup::populate_demo_vfs(&mem);
        Arc::new(mem)
    } else {
        Arc::new(HostVfs::new(&config.fs_root)?)
    };

    let csv = std::fs::read_to_string(&config.commands_path)
        .unwrap_or_else(|_| DEFAULT_COMMANDS.to_string());
    let ascii = std::fs::read_to_string(&config.ascii_path)
        .unwrap_or_else(|_| DEFAULT_TITLE.to_string());

    let table = Rc::new(TableBuilder::from_csv(&csv).build());
    log::info!("command table ready: {} roots", table.root_tokens().len());

    let explorer = Rc::new(RefCell::new(Explorer::new(Arc::clone(&vfs))));
    let mut interpreter = build_interpreter(&config, &vfs, &table, &explorer, &ascii);

    // Boot banner, exactly as if the user had typed it.
    show_responses(&interpreter.interpret("ascii"));

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{}{}", explorer.borrow().path(), config.prompt);
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let responses = interpreter.interpret(input);
        if !show_responses(&responses) {
            break;
        }
    }

    log::info!("terminal session ended");
    Ok(())
}

/// Compose the pipeline: interpreter stages in precedence order, then
/// method dispatch before coloring on the decorator side.
fn build_interpreter(
    config: &TerminalConfig,
    vfs: &SharedVfs,
    table: &Rc<CommandTable>,
    explorer: &Rc<RefCell<Explorer>>,
    ascii: &str,
) -> Interpreter {
    let mut registry = MethodRegistry::new();

    let art = AsciiArt::new(ascii, 1);
    registry.register("load_title", move || art.load());
    registry.register("clear", || vec![ServiceResponse::Clear]);
    registry.register("close_terminal", || vec![ServiceResponse::Exit]);
    {
        let explorer = Rc::clone(explorer);
        registry.register("load_entries", move || {
            explorer
                .borrow_mut()
                .entries()
                .into_iter()
                .map(ServiceResponse::plain)
                .collect()
        });
    }
    {
        let explorer = Rc::clone(explorer);
        registry.register("load_folders", move || {
            explorer
                .borrow()
                .folders()
                .into_iter()
                .map(ServiceResponse::plain)
                .collect()
        });
    }

    let copier = Copier::with_chunk_size(Arc::clone(vfs), config.copy_chunk_bytes);

    let mut interpreter = Interpreter::new(ErrorFormatter::new(Rc::clone(table)));
    interpreter.push_interpreter(Box::new(DirectoryService::new(Rc::clone(explorer))));
    interpreter.push_interpreter(Box::new(CopierService::new(copier, Rc::clone(explorer))));
    interpreter.push_interpreter(Box::new(CompilerService::new(
        Rc::clone(explorer),
        Box::new(NullScriptEngine),
    )));
    // The table service recognizes everything, so it goes last.
    interpreter.push_interpreter(Box::new(CommandService::new(Rc::clone(table))));

    interpreter.push_decorator(Box::new(MethodExecuterService::new(registry)));
    interpreter.push_decorator(Box::new(TextFormatterService::new()));

    interpreter
}

/// Print a response list. Returns `false` when the session should end.
fn show_responses(responses: &[ServiceResponse]) -> bool {
    for response in responses {
        match response {
            ServiceResponse::Exit => return false,
            ServiceResponse::Clear => print!("\x1b[2J\x1b[H"),
            ServiceResponse::Progress { handle, .. } => watch_progress(response, handle),
            _ if response.is_background() => {},
            _ => println!("{}", render::markup_to_ansi(&response.display_text())),
        }
    }
    true
}

/// Redraw a progress line in place until the copy settles.
fn watch_progress(response: &ServiceResponse, handle: &cathode_copier::CopyHandle) {
    while !handle.is_done() && !handle.is_aborted() {
        print!("\r{}", render::markup_to_ansi(&response.display_text()));
        let _ = std::io::stdout().flush();
        std::thread::sleep(Duration::from_millis(50));
    }
    println!("\r{}", render::markup_to_ansi(&response.display_text()));
    if handle.is_aborted() {
        log::warn!("copy did not complete");
    }
}
