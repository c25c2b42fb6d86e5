//! Foundation types for the Cathode in-game terminal.
//!
//! This crate contains the platform-agnostic types shared by all Cathode
//! crates: the error enum, rich-text colors, human-readable byte
//! formatting, the textual progress bar, and configuration.

pub mod color;
pub mod config;
pub mod error;
pub mod human;
pub mod textbar;
