//! The client boundary the demo runner drives.

use crate::errors::LedgerError;
use crate::types::{Address, TransactionResult, Wallet};
use async_trait::async_trait;

/// A client able to manage trust lines and issued currency on the ledger.
///
/// Amounts, limits and currency codes are passed as strings, exactly as they
/// are sent to the ledger. Each call resolves once the transaction has reached
/// a final status or was rejected.
#[async_trait]
pub trait IssuedCurrencyClient: Send + Sync {
    /// Creates a trust line from `trustee` to `issuer` for up to `limit` units of `currency`.
    async fn create_trust_line(
        &self,
        issuer: &Address,
        currency: &str,
        limit: &str,
        trustee: &Wallet,
    ) -> Result<TransactionResult, LedgerError>;

    /// Creates `amount` of `currency`, sent from `issuer` to `recipient`.
    async fn create_issued_currency(
        &self,
        issuer: &Wallet,
        recipient: &Address,
        currency: &str,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError>;

    /// Enables rippling on the issuer's account.
    async fn enable_rippling(&self, issuer: &Wallet) -> Result<TransactionResult, LedgerError>;

    /// Sends issued currency from one holder to another.
    async fn send_issued_currency_payment(
        &self,
        sender: &Wallet,
        recipient: &Address,
        currency: &str,
        issuer: &Address,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError>;

    /// Returns issued currency to its issuer.
    async fn redeem_issued_currency(
        &self,
        holder: &Wallet,
        currency: &str,
        issuer: &Address,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError>;

    /// Closes the connection to the ledger. Later calls fail with `ConnectionClosed`.
    async fn close(&self) -> Result<(), LedgerError>;
}

/// A source of funded test wallets.
#[async_trait]
pub trait Faucet: Send + Sync {
    /// Generates a random wallet and funds it.
    async fn generate_wallet(&self) -> Result<Wallet, LedgerError>;
}
