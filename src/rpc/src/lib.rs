//! JSON-RPC client for the XRP Ledger.
//!
//! This crate implements the issued-currency client and the wallet faucet on
//! top of a rippled node's JSON-RPC interface. Transactions are signed by the
//! node itself (sign-and-submit), so no key material is handled locally.

pub mod client;
pub mod errors;
pub mod faucet;
pub mod xrpl;


// Re-export commonly used types
pub use client::{ClientOptions, JsonRpcClient};
pub use errors::RpcError;
pub use faucet::TestnetFaucet;
pub use xrpl::XrplIssuedCurrencyClient;
