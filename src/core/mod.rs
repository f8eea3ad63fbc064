//! Core logic: command handling, scrollback, metrics, keyboard flashes and
//! the file tree.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod fs;
pub mod keyboard;
pub mod metrics;
pub mod output;
pub mod prompt;
pub mod shell;
pub mod tree;
