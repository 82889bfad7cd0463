//! Minimal JSON-RPC transport for a rippled node.

use crate::errors::RpcError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Tuning for transaction submission and faucet funding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientOptions {
    /// Delay between two status polls
    pub poll_interval: Duration,
    /// How many ledgers past the current one a transaction may be validated in
    pub last_ledger_offset: u32,
    /// How many times to look for a faucet-funded account before giving up
    pub funding_attempts: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            last_ledger_offset: 20,
            funding_attempts: 20,
        }
    }
}

/// A JSON-RPC connection to a single node.
#[derive(Debug)]
pub struct JsonRpcClient {
    url: String,
    http: reqwest::Client,
    closed: AtomicBool,
}

impl JsonRpcClient {
    /// Creates a client for the node at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Gets the node URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Calls `method` with a single parameter object and returns the `result` field.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        if self.is_closed() {
            return Err(RpcError::Closed);
        }

        let body = json!({
            "method": method,
            "params": [params],
        });
        debug!("-> {} {}", method, redact_secrets(&body));

        let response = self.http.post(&self.url).json(&body).send().await?;
        let status = response.status();
        let response_text = response.text().await?;
        match serde_json::from_str::<Value>(&response_text) {
            Ok(logged) => debug!("<- {} {} {}", method, status, redact_secrets(&logged)),
            Err(_) => debug!("<- {} {} {}", method, status, response_text),
        }

        if !status.is_success() {
            return Err(RpcError::HttpStatus(status.as_u16(), response_text));
        }

        let mut response: Value = serde_json::from_str(&response_text)
            .map_err(|e| RpcError::MalformedResponse(format!("{}: {}", e, response_text)))?;

        let result = response
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| RpcError::MalformedResponse(format!("No result in response: {}", response_text)))?;

        if result.get("status").and_then(Value::as_str) == Some("error") {
            let error = result
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            let message = result
                .get("error_message")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Err(RpcError::NodeError { error, message });
        }

        Ok(result)
    }

    /// Marks the connection closed. Requests made afterwards fail with `RpcError::Closed`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Whether the connection was closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Fields that carry wallet secrets and must never reach the logs.
const SECRET_FIELDS: [&str; 3] = ["secret", "seed", "passphrase"];

/// Copies `value` with every secret field replaced by a placeholder.
pub(crate) fn redact_secrets(value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| {
                    if SECRET_FIELDS.contains(&key.as_str()) {
                        (key.clone(), Value::String("<redacted>".to_string()))
                    } else {
                        (key.clone(), redact_secrets(field))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_secrets).collect()),
        other => other.clone(),
    }
}
