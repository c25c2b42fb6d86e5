//! Terminal configuration.
//!
//! Loaded once at startup from a TOML file and passed by reference to
//! whatever needs it. A missing file yields the defaults; a malformed
//! file is a hard `Config` error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CathodeError, Result};

/// Top-level configuration for a terminal session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// CSV file defining the command table.
    pub commands_path: PathBuf,
    /// ASCII art banner shown by the `load_title` operation.
    pub ascii_path: PathBuf,
    /// Host directory the virtual filesystem is rooted at. Empty means
    /// an in-memory filesystem seeded with demo content.
    pub fs_root: PathBuf,
    /// Transfer buffer size for the copy engine, in bytes.
    pub copy_chunk_bytes: usize,
    /// Prompt suffix appended after the current path.
    pub prompt: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            commands_path: PathBuf::from("assets/commands.csv"),
            ascii_path: PathBuf::from("assets/title.txt"),
            fs_root: PathBuf::new(),
            copy_chunk_bytes: 1024 * 1024,
            prompt: "> ".to_string(),
        }
    }
}

impl TerminalConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.copy_chunk_bytes == 0 {
            return Err(CathodeError::Config(
                "copy_chunk_bytes must be non-zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = TerminalConfig::default();
        assert_eq!(config.copy_chunk_bytes, 1024 * 1024);
        assert!(config.fs_root.as_os_str().is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config =
            TerminalConfig::from_toml_str("commands_path = \"table.csv\"").unwrap();
        assert_eq!(config.commands_path, PathBuf::from("table.csv"));
        assert_eq!(config.copy_chunk_bytes, 1024 * 1024);
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = TerminalConfig::from_toml_str("copy_chunk_bytes = 0").unwrap_err();
        assert!(matches!(err, CathodeError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = TerminalConfig::from_toml_str("not [[[ toml").unwrap_err();
        assert!(matches!(err, CathodeError::TomlParse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = TerminalConfig::load(Path::new("/no/such/file.toml")).unwrap();
        assert_eq!(config.prompt, "> ");
    }
}
