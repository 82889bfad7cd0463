//! Error types for the demo runner.

use colored::Colorize;
use ledger::LedgerError;
use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};

/// Errors that end a demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    /// Error when a ledger call is rejected.
    LedgerError(LedgerError),

    /// Error when the configuration is unusable.
    ConfigError(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::LedgerError(e) => write!(f, "{}", e),
            DemoError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl StdError for DemoError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            DemoError::LedgerError(e) => Some(e),
            DemoError::ConfigError(_) => None,
        }
    }
}

impl From<LedgerError> for DemoError {
    fn from(error: LedgerError) -> Self {
        DemoError::LedgerError(error)
    }
}

/// Gets the process exit code for the outcome of a run: 0 on success, 1 on any error.
pub fn exit_code<T, E>(result: &Result<T, E>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Writes `Fatal: <error>` for a failed run and gets its exit code.
///
/// A successful run writes nothing.
pub fn report_outcome<T, E, W>(result: &Result<T, E>, out: &mut W) -> io::Result<i32>
where
    E: fmt::Display,
    W: Write,
{
    if let Err(e) = result {
        writeln!(out, "{} {:#}", "Fatal:".red(), e)?;
    }
    Ok(exit_code(result))
}
