//! Test-network faucet that hands out funded wallets.

use crate::client::{ClientOptions, JsonRpcClient};
use async_trait::async_trait;
use ledger::{Address, Faucet, LedgerError, Wallet};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Faucet client for the public test network.
#[derive(Debug)]
pub struct TestnetFaucet {
    faucet_url: String,
    http: reqwest::Client,
    node: JsonRpcClient,
    options: ClientOptions,
}

impl TestnetFaucet {
    /// Creates a faucet client. `node_url` is used to wait for the new account to be funded.
    pub fn new(faucet_url: impl Into<String>, node_url: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            faucet_url: faucet_url.into(),
            http: reqwest::Client::new(),
            node: JsonRpcClient::new(node_url),
            options,
        }
    }

    /// Asks the faucet for a new account.
    async fn request_account(&self) -> Result<Wallet, LedgerError> {
        let response = self
            .http
            .post(&self.faucet_url)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| LedgerError::Faucet(format!("Failed to connect to faucet: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| LedgerError::Faucet(format!("Failed to get response text: {}", e)))?;
        debug!("Faucet responded with {}", status);

        if !status.is_success() {
            return Err(LedgerError::Faucet(format!("HTTP {}: {}", status.as_u16(), response_text)));
        }

        let response: Value = serde_json::from_str(&response_text)
            .map_err(|e| LedgerError::Faucet(format!("Failed to parse response: {}", e)))?;

        let wallet = parse_faucet_account(&response)?;
        debug!("Faucet response carried account {}", wallet.address());
        Ok(wallet)
    }

    /// Waits until the account shows up in a validated ledger.
    async fn wait_for_funding(&self, address: &Address) -> Result<(), LedgerError> {
        for attempt in 1..=self.options.funding_attempts {
            let request = json!({ "account": address, "ledger_index": "validated" });
            match self.node.request("account_info", request).await {
                Ok(info) => {
                    let balance = info
                        .pointer("/account_data/Balance")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    debug!("Account {} funded with {} drops", address, balance);
                    return Ok(());
                }
                Err(e) if e.is_node_error("actNotFound") => {
                    debug!("Account {} not funded yet (attempt {})", address, attempt);
                }
                Err(e) => return Err(e.into()),
            }
            if attempt < self.options.funding_attempts {
                tokio::time::sleep(self.options.poll_interval).await;
            }
        }

        Err(LedgerError::Faucet(format!(
            "Account {} not funded after {} attempts",
            address, self.options.funding_attempts
        )))
    }
}

#[async_trait]
impl Faucet for TestnetFaucet {
    async fn generate_wallet(&self) -> Result<Wallet, LedgerError> {
        let wallet = self.request_account().await?;
        info!("Faucet created account {}", wallet.address());
        self.wait_for_funding(wallet.address()).await?;
        Ok(wallet)
    }
}

/// Extracts the new wallet from a faucet response.
///
/// Older faucets return the secret as `account.secret`; newer ones return it as
/// a top-level `seed`. The address is `account.classicAddress` or `account.address`.
fn parse_faucet_account(response: &Value) -> Result<Wallet, LedgerError> {
    let account = response
        .get("account")
        .ok_or_else(|| LedgerError::Faucet("No account in faucet response".to_string()))?;

    let address = account
        .get("classicAddress")
        .or_else(|| account.get("address"))
        .and_then(Value::as_str)
        .ok_or_else(|| LedgerError::Faucet("No address in faucet response".to_string()))?;

    let seed = account
        .get("secret")
        .or_else(|| response.get("seed"))
        .and_then(Value::as_str)
        .ok_or_else(|| LedgerError::Faucet("No secret in faucet response".to_string()))?;

    Ok(Wallet::new(Address::parse(address)?, seed))
}
