//! Builders for the ledger transactions the demos submit.

use crate::errors::LedgerError;
use crate::types::{Address, IssuedAmount, TrustLineSpec};
use serde_json::{json, Value};

/// `AccountSet` flag that enables rippling by default on an account's trust lines.
pub const ASF_DEFAULT_RIPPLE: u32 = 8;

/// Builds a `TrustSet` from the trustee towards the trust line's issuer.
pub fn trust_set(trustee: &Address, spec: &TrustLineSpec) -> Result<Value, LedgerError> {
    Ok(json!({
        "TransactionType": "TrustSet",
        "Account": trustee,
        "LimitAmount": amount_value(&spec.limit_amount())?,
    }))
}

/// Builds a `Payment` that creates new issued currency from its issuer.
pub fn issue_payment(
    issuer: &Address,
    recipient: &Address,
    currency: &str,
    amount: &str,
) -> Result<Value, LedgerError> {
    let amount = IssuedAmount::new(currency, issuer, amount)?;
    issued_currency_payment(issuer, recipient, &amount)
}

/// Builds an `AccountSet` that turns on default rippling.
pub fn account_set_default_ripple(account: &Address) -> Value {
    json!({
        "TransactionType": "AccountSet",
        "Account": account,
        "SetFlag": ASF_DEFAULT_RIPPLE,
    })
}

/// Builds a `Payment` of issued currency between two accounts.
pub fn issued_currency_payment(
    sender: &Address,
    recipient: &Address,
    amount: &IssuedAmount,
) -> Result<Value, LedgerError> {
    if sender == recipient {
        return Err(LedgerError::InvalidAddress(format!(
            "sender and recipient are both {}",
            sender
        )));
    }

    Ok(json!({
        "TransactionType": "Payment",
        "Account": sender,
        "Destination": recipient,
        "Amount": amount_value(amount)?,
    }))
}

/// Builds a `Payment` returning issued currency to its issuer.
pub fn redemption(holder: &Address, amount: &IssuedAmount) -> Result<Value, LedgerError> {
    issued_currency_payment(holder, &amount.issuer, amount)
}

/// Sets the last ledger sequence a transaction may be validated in.
pub fn with_last_ledger_sequence(mut tx: Value, sequence: u32) -> Value {
    if let Some(fields) = tx.as_object_mut() {
        fields.insert("LastLedgerSequence".to_string(), json!(sequence));
    }
    tx
}

fn amount_value(amount: &IssuedAmount) -> Result<Value, LedgerError> {
    serde_json::to_value(amount).map_err(|e| LedgerError::InvalidAmount(e.to_string()))
}
