//! Error types for Cathode.

use std::io;

/// Errors produced by the Cathode framework.
///
/// These cover infrastructure faults only. Failed commands (unknown
/// input, missing directories, refused copies) are pipeline data, not
/// Rust errors: they travel as error-kind responses with a priority.
#[derive(Debug, thiserror::Error)]
pub enum CathodeError {
    #[error("command table error: {0}")]
    Table(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("copy error: {0}")]
    Copy(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CathodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_error_display() {
        let e = CathodeError::Table("bad grid".into());
        assert_eq!(format!("{e}"), "command table error: bad grid");
    }

    #[test]
    fn service_error_display() {
        let e = CathodeError::Service("no provider".into());
        assert_eq!(format!("{e}"), "service error: no provider");
    }

    #[test]
    fn vfs_error_display() {
        let e = CathodeError::Vfs("file not found".into());
        assert_eq!(format!("{e}"), "VFS error: file not found");
    }

    #[test]
    fn copy_error_display() {
        let e = CathodeError::Copy("worker died".into());
        assert_eq!(format!("{e}"), "copy error: worker died");
    }

    #[test]
    fn config_error_display() {
        let e = CathodeError::Config("missing key".into());
        assert_eq!(format!("{e}"), "config error: missing key");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: CathodeError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let bad_toml = "this is [[[not valid toml";
        let toml_err = toml::from_str::<toml::Value>(bad_toml).unwrap_err();
        let e: CathodeError = toml_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("TOML parse error"));
    }

    #[test]
    fn error_is_debug() {
        let e = CathodeError::Table("test".into());
        let dbg = format!("{e:?}");
        assert!(dbg.contains("Table"));
    }

    #[test]
    fn result_alias_ok() {
        let r: Result<i32> = Ok(42);
        assert_eq!(r.unwrap(), 42);
    }
}
