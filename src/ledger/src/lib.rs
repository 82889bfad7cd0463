//! Issued-currency primitives for the demo runner.
//!
//! This crate provides the types shared by every ledger client: wallets and
//! addresses, trust line and amount descriptions, transaction results and their
//! human-readable status labels, plus the traits a concrete client implements.

pub mod client;
pub mod errors;
pub mod status;
pub mod transactions;
pub mod types;

// Re-export commonly used types
pub use client::{Faucet, IssuedCurrencyClient};
pub use errors::LedgerError;
pub use status::{status_label, TransactionStatus};
pub use types::{Address, IssuedAmount, TransactionResult, TrustLineSpec, Wallet};
