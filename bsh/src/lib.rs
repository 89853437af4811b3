//! bsh - a shell for walking the Bible like a filesystem
//!
//! This crate provides:
//! - Built-in commands (`cd`, `ls`, `cat`, `grep`, `mark`, `goto`, ...) on top
//!   of [`bsh_core::Engine`]
//! - Colored rendering of listings, readings and search hits
//! - A manual and per-command help
//! - Line completion for the interactive REPL

pub mod builtins;
pub mod completer;
pub mod error;
pub mod help;
pub mod render;
pub mod shell;

pub use error::{ShError, ShResult};
pub use shell::{load_corpus, BuiltinFn, CapturedOutput, ExecContext, Output, Shell, ShellBuilder};
