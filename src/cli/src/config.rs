//! Configuration for the demo runner.

use crate::errors::DemoError;
use anyhow::Result;
use ledger::types::{validate_amount, validate_currency};
use rpc::ClientOptions;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Largest accepted `last_ledger_offset`.
pub const MAX_LAST_LEDGER_OFFSET: u32 = 1000;

/// Configuration for the demo runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// The ledger node's JSON-RPC endpoint
    pub json_rpc_url: String,
    /// The faucet that funds new wallets
    pub faucet_url: String,
    /// Delay between two status polls, in milliseconds
    pub poll_interval_ms: u64,
    /// How many ledgers a transaction may take to be validated
    pub last_ledger_offset: u32,
    /// How many times to check that a faucet wallet is funded
    pub funding_attempts: u32,
    /// The issued currency code
    pub currency: String,
    /// The limit of every trust line
    pub trust_line_limit: String,
    /// The amount created by the issuer
    pub issue_amount: String,
    /// The amount paid from the operational to the customer wallet
    pub payment_amount: String,
    /// The amount the customer redeems with the issuer
    pub redeem_amount: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            json_rpc_url: "https://s.altnet.rippletest.net:51234".to_string(),
            faucet_url: "https://faucet.altnet.rippletest.net/accounts".to_string(),
            poll_interval_ms: 1000,
            last_ledger_offset: 20,
            funding_attempts: 20,
            currency: "USD".to_string(),
            trust_line_limit: "100".to_string(),
            issue_amount: "100".to_string(),
            payment_amount: "50".to_string(),
            redeem_amount: "25".to_string(),
        }
    }
}

impl DemoConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Checks the currency, amounts and endpoints before anything is sent.
    pub fn validate(&self) -> Result<(), DemoError> {
        if self.json_rpc_url.is_empty() {
            return Err(DemoError::ConfigError("json_rpc_url is empty".to_string()));
        }
        if self.faucet_url.is_empty() {
            return Err(DemoError::ConfigError("faucet_url is empty".to_string()));
        }
        if self.last_ledger_offset == 0 || self.last_ledger_offset > MAX_LAST_LEDGER_OFFSET {
            return Err(DemoError::ConfigError(format!(
                "last_ledger_offset must be between 1 and {}, got {}",
                MAX_LAST_LEDGER_OFFSET, self.last_ledger_offset
            )));
        }
        if self.funding_attempts == 0 {
            return Err(DemoError::ConfigError(
                "funding_attempts must be at least 1".to_string(),
            ));
        }

        validate_currency(&self.currency)?;
        for amount in [
            &self.trust_line_limit,
            &self.issue_amount,
            &self.payment_amount,
            &self.redeem_amount,
        ] {
            validate_amount(amount)?;
        }
        Ok(())
    }

    /// Gets the submission settings for the ledger clients.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            last_ledger_offset: self.last_ledger_offset,
            funding_attempts: self.funding_attempts,
        }
    }
}
