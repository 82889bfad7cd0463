//! Error types for the ledger crate.

use thiserror::Error;

/// Errors that can occur while talking to the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Error when an account address is not a classic ledger address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when a currency code is neither a three-character code nor 40 hex digits.
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Error when an amount or limit is not a non-negative decimal.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when the ledger node rejects or fails a request.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Error when the faucet cannot produce a funded wallet.
    #[error("Faucet error: {0}")]
    Faucet(String),

    /// Error when a response cannot be interpreted.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Error when a call is made after the connection was closed.
    #[error("Connection closed")]
    ConnectionClosed,
}
