//! Terminal display and input surface for the budget session.

pub mod commands;
pub mod context;
pub mod output;
pub mod render;
mod shell;

use thiserror::Error;

use crate::errors::LedgerError;

pub use context::{CliMode, ShellContext};
pub use shell::run_cli;

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Dialog(#[from] dialoguer::Error),
}

/// Errors from a single command; reported, then the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Prompt error: {0}")]
    Dialog(#[from] dialoguer::Error),
}

pub type CommandResult = Result<LoopControl, CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
