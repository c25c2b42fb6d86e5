//! Pipeline response units and the in-band marker conventions.

use cathode_copier::CopyHandle;
use cathode_types::textbar::TextBar;

/// Header marking an error response for the text formatter.
pub const ERROR_MARKER: &str = "[ERROR]";
/// Header marking an informational response for the text formatter.
pub const INFO_MARKER: &str = "[INFO]";
/// Header requesting a decorator-side method invocation.
pub const DECORATOR_METHOD_MARKER: &str = "<DMETHOD>";
/// Header requesting an interpreter-side method invocation.
pub const INTERPRETER_METHOD_MARKER: &str = "<IMETHOD>";

/// Marker payloads use a `TYPE:PAYLOAD` shape. Split on the FIRST
/// colon only; the payload may itself contain colons.
pub fn split_marker(text: &str) -> Option<(&str, &str)> {
    text.split_once(':')
}

/// One unit of pipeline output.
///
/// Error responses carry the command-table key naming the failure plus
/// a priority (lower number takes precedence); they are turned into
/// user-facing text by the fallback formatting stage. Background
/// responses occupy their position in the list but are never shown.
#[derive(Debug, Clone)]
pub enum ServiceResponse {
    /// Free text, shown unless `background`.
    Plain { text: String, background: bool },
    /// A failure, keyed into the command table.
    Error {
        key: String,
        background: bool,
        priority: i32,
    },
    /// A live progress bar bound to a running copy job.
    Progress {
        bar: TextBar,
        handle: CopyHandle,
        background: bool,
    },
    /// Signal: the display layer should clear its scrollback.
    Clear,
    /// Signal: the session should end.
    Exit,
}

impl ServiceResponse {
    /// Visible plain text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain {
            text: text.into(),
            background: false,
        }
    }

    /// Non-displayed side-effect carrier.
    pub fn background(text: impl Into<String>) -> Self {
        Self::Plain {
            text: text.into(),
            background: true,
        }
    }

    /// An error keyed into the command table.
    pub fn error(key: impl Into<String>, priority: i32) -> Self {
        Self::Error {
            key: key.into(),
            background: false,
            priority,
        }
    }

    /// Whether this entry is error-kind.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Whether this entry is a non-displayed side-effect carrier.
    pub fn is_background(&self) -> bool {
        match self {
            Self::Plain { background, .. }
            | Self::Error { background, .. }
            | Self::Progress { background, .. } => *background,
            Self::Clear | Self::Exit => true,
        }
    }

    /// Error priority, if error-kind.
    pub fn priority(&self) -> Option<i32> {
        match self {
            Self::Error { priority, .. } => Some(*priority),
            _ => None,
        }
    }

    /// The text a display layer would show for this entry right now.
    /// Progress entries render their bar at the current fraction.
    pub fn display_text(&self) -> String {
        match self {
            Self::Plain { text, .. } => text.clone(),
            Self::Error { key, .. } => key.clone(),
            Self::Progress { bar, handle, .. } => {
                let mut bar = bar.clone();
                bar.set_percent(handle.fraction());
                format!(
                    "{} {}/{}",
                    bar.generate_text(),
                    handle.copied_readable(),
                    handle.total_readable()
                )
            },
            Self::Clear | Self::Exit => String::new(),
        }
    }
}
