//! Demo runner for issued currency on the XRP Ledger test network.

pub mod config;
pub mod errors;
pub mod runner;

// Re-export commonly used types and functions
pub use config::DemoConfig;
pub use errors::{exit_code, report_outcome, DemoError};
pub use runner::{DemoReport, DemoRunner, Scenario, Step, StepOutcome};
