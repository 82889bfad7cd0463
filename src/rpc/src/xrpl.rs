//! Issued-currency client backed by a rippled node.

use crate::client::{ClientOptions, JsonRpcClient};
use crate::errors::RpcError;
use async_trait::async_trait;
use ledger::transactions;
use ledger::{
    Address, IssuedAmount, IssuedCurrencyClient, LedgerError, TransactionResult, TransactionStatus,
    TrustLineSpec, Wallet,
};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Issued-currency client that submits transactions through a node's JSON-RPC API.
#[derive(Debug)]
pub struct XrplIssuedCurrencyClient {
    rpc: JsonRpcClient,
    options: ClientOptions,
}

impl XrplIssuedCurrencyClient {
    /// Creates a client for the node at `url`.
    pub fn new(url: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            rpc: JsonRpcClient::new(url),
            options,
        }
    }

    /// Gets the underlying JSON-RPC connection.
    pub fn rpc(&self) -> &JsonRpcClient {
        &self.rpc
    }

    /// Gets the index of the ledger currently being built.
    async fn current_ledger_index(&self) -> Result<u32, RpcError> {
        let result = self.rpc.request("ledger_current", json!({})).await?;
        ledger_index_field(&result, "ledger_current_index")
    }

    /// Gets the index of the latest validated ledger.
    async fn validated_ledger_index(&self) -> Result<u32, RpcError> {
        let result = self
            .rpc
            .request("ledger", json!({ "ledger_index": "validated" }))
            .await?;
        ledger_index_field(&result, "ledger_index")
            .or_else(|_| ledger_index_field(&result["ledger"], "ledger_index"))
    }

    /// Signs `tx` on the node with the wallet's secret, submits it and waits for a final status.
    async fn submit_and_wait(&self, wallet: &Wallet, tx: Value) -> Result<TransactionResult, LedgerError> {
        let current = self.current_ledger_index().await?;
        let last_ledger_sequence = current
            .checked_add(self.options.last_ledger_offset)
            .ok_or_else(|| {
                LedgerError::InvalidResponse(format!(
                    "Ledger {} plus offset {} overflows LastLedgerSequence",
                    current, self.options.last_ledger_offset
                ))
            })?;
        let tx = transactions::with_last_ledger_sequence(tx, last_ledger_sequence);
        let tx_type = tx["TransactionType"].as_str().unwrap_or("transaction").to_string();

        let submitted = self
            .rpc
            .request(
                "submit",
                json!({
                    "tx_json": tx,
                    "secret": wallet.seed(),
                }),
            )
            .await?;

        let engine_result = submitted
            .get("engine_result")
            .and_then(Value::as_str)
            .ok_or_else(|| LedgerError::InvalidResponse("submit result has no engine_result".to_string()))?
            .to_string();
        let hash = submitted
            .pointer("/tx_json/hash")
            .and_then(Value::as_str)
            .ok_or_else(|| LedgerError::InvalidResponse("submit result has no transaction hash".to_string()))?
            .to_string();
        info!("Submitted {} {} from {}: {}", tx_type, hash, wallet.address(), engine_result);

        let provisional = TransactionStatus::from_engine_result(&engine_result, false);
        if matches!(
            provisional,
            TransactionStatus::MalformedTransaction | TransactionStatus::Failed
        ) {
            return Ok(TransactionResult::new(hash, provisional, false).with_engine_result(engine_result));
        }

        self.wait_for_final_status(hash, last_ledger_sequence, engine_result)
            .await
    }

    /// Polls the node until the transaction is validated or can no longer be.
    async fn wait_for_final_status(
        &self,
        hash: String,
        last_ledger_sequence: u32,
        submitted_result: String,
    ) -> Result<TransactionResult, LedgerError> {
        loop {
            tokio::time::sleep(self.options.poll_interval).await;

            match self.rpc.request("tx", json!({ "transaction": hash })).await {
                Ok(tx) if tx.get("validated").and_then(Value::as_bool) == Some(true) => {
                    let engine_result = tx
                        .pointer("/meta/TransactionResult")
                        .and_then(Value::as_str)
                        .ok_or_else(|| {
                            LedgerError::InvalidResponse(format!("validated transaction {} has no result", hash))
                        })?
                        .to_string();
                    let status = TransactionStatus::from_engine_result(&engine_result, true);
                    debug!("Transaction {} validated: {}", hash, engine_result);
                    return Ok(TransactionResult::new(hash, status, true).with_engine_result(engine_result));
                }
                Ok(_) => {}
                Err(e) if e.is_node_error("txnNotFound") => {}
                Err(e) => return Err(e.into()),
            }

            let validated_index = self.validated_ledger_index().await?;
            if validated_index > last_ledger_sequence {
                debug!(
                    "Transaction {} expired: validated ledger {} > {}",
                    hash, validated_index, last_ledger_sequence
                );
                return Ok(TransactionResult::new(
                    hash,
                    TransactionStatus::LastLedgerSequenceExpired,
                    false,
                )
                .with_engine_result(submitted_result));
            }
        }
    }
}

#[async_trait]
impl IssuedCurrencyClient for XrplIssuedCurrencyClient {
    async fn create_trust_line(
        &self,
        issuer: &Address,
        currency: &str,
        limit: &str,
        trustee: &Wallet,
    ) -> Result<TransactionResult, LedgerError> {
        let spec = TrustLineSpec::new(issuer, currency, limit)?;
        let tx = transactions::trust_set(trustee.address(), &spec)?;
        self.submit_and_wait(trustee, tx).await
    }

    async fn create_issued_currency(
        &self,
        issuer: &Wallet,
        recipient: &Address,
        currency: &str,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError> {
        let tx = transactions::issue_payment(issuer.address(), recipient, currency, amount)?;
        self.submit_and_wait(issuer, tx).await
    }

    async fn enable_rippling(&self, issuer: &Wallet) -> Result<TransactionResult, LedgerError> {
        let tx = transactions::account_set_default_ripple(issuer.address());
        self.submit_and_wait(issuer, tx).await
    }

    async fn send_issued_currency_payment(
        &self,
        sender: &Wallet,
        recipient: &Address,
        currency: &str,
        issuer: &Address,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError> {
        let amount = IssuedAmount::new(currency, issuer, amount)?;
        let tx = transactions::issued_currency_payment(sender.address(), recipient, &amount)?;
        self.submit_and_wait(sender, tx).await
    }

    async fn redeem_issued_currency(
        &self,
        holder: &Wallet,
        currency: &str,
        issuer: &Address,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError> {
        let amount = IssuedAmount::new(currency, issuer, amount)?;
        let tx = transactions::redemption(holder.address(), &amount)?;
        self.submit_and_wait(holder, tx).await
    }

    async fn close(&self) -> Result<(), LedgerError> {
        if self.rpc.is_closed() {
            return Err(LedgerError::ConnectionClosed);
        }
        self.rpc.close();
        debug!("Closed connection to {}", self.rpc.url());
        Ok(())
    }
}

/// Reads a ledger index that the node may report as a number or a string.
pub(crate) fn ledger_index_field(result: &Value, field: &str) -> Result<u32, RpcError> {
    let value = result
        .get(field)
        .ok_or_else(|| RpcError::MalformedResponse(format!("No {} in response: {}", field, result)))?;

    let index = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    };

    index
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| RpcError::MalformedResponse(format!("Invalid {}: {}", field, value)))
}
