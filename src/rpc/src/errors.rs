//! Error types for the rpc crate.

use ledger::LedgerError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur while talking to a ledger node or the faucet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// Error when the HTTP request could not be completed.
    NetworkError(String),

    /// Error when the server answered with a non-success HTTP status.
    HttpStatus(u16, String),

    /// Error when the node reported an error in its result.
    NodeError {
        /// The node's error code, e.g. `txnNotFound`
        error: String,
        /// The node's explanation, when given
        message: Option<String>,
    },

    /// Error when a response is missing a field or is not JSON.
    MalformedResponse(String),

    /// Error when a request is made on a closed client.
    Closed,
}

impl RpcError {
    /// Whether this is a node error with the given code.
    pub fn is_node_error(&self, code: &str) -> bool {
        matches!(self, RpcError::NodeError { error, .. } if error == code)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RpcError::HttpStatus(status, body) => write!(f, "HTTP {}: {}", status, body),
            RpcError::NodeError { error, message: Some(message) } => {
                write!(f, "Node error {}: {}", error, message)
            }
            RpcError::NodeError { error, message: None } => write!(f, "Node error {}", error),
            RpcError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            RpcError::Closed => write!(f, "Client is closed"),
        }
    }
}

impl StdError for RpcError {}

impl From<reqwest::Error> for RpcError {
    fn from(error: reqwest::Error) -> Self {
        RpcError::NetworkError(error.to_string())
    }
}

impl From<RpcError> for LedgerError {
    fn from(error: RpcError) -> Self {
        match error {
            RpcError::Closed => LedgerError::ConnectionClosed,
            RpcError::MalformedResponse(msg) => LedgerError::InvalidResponse(msg),
            other => LedgerError::Rpc(other.to_string()),
        }
    }
}
