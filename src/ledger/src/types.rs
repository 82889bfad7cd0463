//! Core types for the issued-currency demos.

use crate::errors::LedgerError;
use crate::status::TransactionStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The base58 alphabet used by classic ledger addresses.
const ADDRESS_ALPHABET: &str = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

/// Characters allowed in a three-character currency code besides letters and digits.
const CURRENCY_SYMBOLS: &str = "?!@#$%^&*<>(){}[]|";

/// A classic ledger account address, e.g. `rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parses and validates a classic address.
    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        let len = value.len();
        if !value.starts_with('r') || !(25..=35).contains(&len) {
            return Err(LedgerError::InvalidAddress(value.to_string()));
        }
        if !value.chars().all(|c| ADDRESS_ALPHABET.contains(c)) {
            return Err(LedgerError::InvalidAddress(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Checks that a currency code is a valid issued-currency code.
///
/// Standard codes are three characters and may not be `XRP`; non-standard codes
/// are exactly 40 hexadecimal digits.
pub fn validate_currency(code: &str) -> Result<(), LedgerError> {
    let standard = code.chars().count() == 3
        && !code.eq_ignore_ascii_case("XRP")
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || CURRENCY_SYMBOLS.contains(c));
    let hex = code.len() == 40 && code.chars().all(|c| c.is_ascii_hexdigit());

    if standard || hex {
        Ok(())
    } else {
        Err(LedgerError::InvalidCurrency(code.to_string()))
    }
}

/// Checks that an amount or limit is a finite, non-negative decimal string.
pub fn validate_amount(value: &str) -> Result<(), LedgerError> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 && !value.starts_with('+') => Ok(()),
        _ => Err(LedgerError::InvalidAmount(value.to_string())),
    }
}

/// A funded ledger wallet.
///
/// The seed never leaves the process except as the secret of a
/// sign-and-submit request to the ledger node.
#[derive(Clone, PartialEq, Eq)]
pub struct Wallet {
    address: Address,
    seed: String,
}

impl Wallet {
    /// Creates a wallet handle from an address and its secret seed.
    pub fn new(address: Address, seed: impl Into<String>) -> Self {
        Self {
            address,
            seed: seed.into(),
        }
    }

    /// Gets the wallet's address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Gets the wallet's secret seed.
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("seed", &"<redacted>")
            .finish()
    }
}

/// An amount of issued currency, as the ledger represents it on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedAmount {
    /// The currency code
    pub currency: String,
    /// The issuing account
    pub issuer: Address,
    /// The decimal value
    pub value: String,
}

impl IssuedAmount {
    /// Creates a validated issued amount.
    pub fn new(currency: &str, issuer: &Address, value: &str) -> Result<Self, LedgerError> {
        validate_currency(currency)?;
        validate_amount(value)?;
        Ok(Self {
            currency: currency.to_string(),
            issuer: issuer.clone(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for IssuedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} issued by {}", self.value, self.currency, self.issuer)
    }
}

/// A trust line to be created by a trustee towards an issuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustLineSpec {
    /// The account whose currency will be trusted
    pub issuer: Address,
    /// The currency code
    pub currency: String,
    /// The maximum balance the trustee will hold
    pub limit: String,
}

impl TrustLineSpec {
    /// Creates a validated trust line description.
    pub fn new(issuer: &Address, currency: &str, limit: &str) -> Result<Self, LedgerError> {
        validate_currency(currency)?;
        validate_amount(limit)?;
        Ok(Self {
            issuer: issuer.clone(),
            currency: currency.to_string(),
            limit: limit.to_string(),
        })
    }

    /// The trust line limit as an issued amount.
    pub fn limit_amount(&self) -> IssuedAmount {
        IssuedAmount {
            currency: self.currency.clone(),
            issuer: self.issuer.clone(),
            value: self.limit.clone(),
        }
    }
}

/// The outcome of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// The transaction hash
    pub hash: String,
    /// The interpreted status
    pub status: TransactionStatus,
    /// Whether the node reported the transaction in a validated ledger
    pub validated: bool,
    /// The raw engine result code, when the node reported one
    pub engine_result: Option<String>,
}

impl TransactionResult {
    /// Creates a result without an engine result code.
    pub fn new(hash: impl Into<String>, status: TransactionStatus, validated: bool) -> Self {
        Self {
            hash: hash.into(),
            status,
            validated,
            engine_result: None,
        }
    }

    /// Attaches the engine result code.
    pub fn with_engine_result(mut self, engine_result: impl Into<String>) -> Self {
        self.engine_result = Some(engine_result.into());
        self
    }
}

impl fmt::Display for TransactionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status.label(), self.hash)?;
        if let Some(engine_result) = &self.engine_result {
            write!(f, " [{}]", engine_result)?;
        }
        Ok(())
    }
}
