//! Line-oriented shell driving a [`DiarySession`](crate::session::DiarySession).
//!
//! Runs interactively through rustyline, or reads one command per stdin line
//! when `STERDIARY_CLI_SCRIPT` is set.

pub mod commands;
mod context;
pub mod output;
mod shell;
pub mod terminal;

pub use context::{CliError, CliMode, CommandError, CommandResult, ShellContext};
pub use shell::run_cli;
pub use terminal::TerminalCompositor;
