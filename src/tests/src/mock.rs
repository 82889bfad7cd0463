//! In-memory ledger that records every call made by the demo runner.

use async_trait::async_trait;
use ledger::{
    Address, Faucet, IssuedCurrencyClient, LedgerError, TransactionResult, TransactionStatus, Wallet,
};
use std::sync::{Mutex, MutexGuard};

/// Addresses handed out by the mock faucet, in order.
pub const ADDRESSES: [&str; 4] = [
    "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY",
    "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
    "rrrrrrrrrrrrrrrrrrrrBZbvji",
    "rGWrZyQqhTp9Xu7G5Pkayo7bXjH4k4QYpf",
];

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GenerateWallet,
    CreateTrustLine {
        issuer: String,
        currency: String,
        limit: String,
        trustee: String,
    },
    CreateIssuedCurrency {
        issuer: String,
        recipient: String,
        currency: String,
        amount: String,
    },
    EnableRippling {
        issuer: String,
    },
    SendPayment {
        sender: String,
        recipient: String,
        currency: String,
        issuer: String,
        amount: String,
    },
    Redeem {
        holder: String,
        currency: String,
        issuer: String,
        amount: String,
    },
    Close,
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    wallets: usize,
    transactions: usize,
}

/// Mock client and faucet sharing one call log.
#[derive(Default)]
pub struct MockLedger {
    state: Mutex<MockState>,
    fail_at: Option<usize>,
    statuses: Vec<TransactionStatus>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the call with the given index in the call log (0-based).
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Answers the n-th transaction with the n-th status; later ones succeed.
    pub fn with_statuses(mut self, statuses: Vec<TransactionStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .calls
            .clone()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MockState>, LedgerError> {
        self.state
            .lock()
            .map_err(|e| LedgerError::Rpc(format!("Mutex poisoned: {}", e)))
    }

    /// Records a call and rejects it if it is the configured failure.
    fn record(&self, state: &mut MockState, call: Call) -> Result<(), LedgerError> {
        let index = state.calls.len();
        state.calls.push(call);
        if self.fail_at == Some(index) {
            return Err(LedgerError::Rpc(format!("call {} rejected", index)));
        }
        Ok(())
    }

    fn transaction(&self, call: Call) -> Result<TransactionResult, LedgerError> {
        let mut state = self.lock()?;
        self.record(&mut state, call)?;

        let n = state.transactions;
        state.transactions += 1;
        let status = self
            .statuses
            .get(n)
            .copied()
            .unwrap_or(TransactionStatus::Succeeded);
        Ok(TransactionResult::new(format!("TX{}", n), status, status.is_final()))
    }
}

#[async_trait]
impl Faucet for MockLedger {
    async fn generate_wallet(&self) -> Result<Wallet, LedgerError> {
        let mut state = self.lock()?;
        self.record(&mut state, Call::GenerateWallet)?;

        let address = ADDRESSES
            .get(state.wallets)
            .ok_or_else(|| LedgerError::Faucet("out of test addresses".to_string()))?;
        state.wallets += 1;
        Ok(Wallet::new(Address::parse(address)?, format!("seed-{}", state.wallets)))
    }
}

#[async_trait]
impl IssuedCurrencyClient for MockLedger {
    async fn create_trust_line(
        &self,
        issuer: &Address,
        currency: &str,
        limit: &str,
        trustee: &Wallet,
    ) -> Result<TransactionResult, LedgerError> {
        self.transaction(Call::CreateTrustLine {
            issuer: issuer.to_string(),
            currency: currency.to_string(),
            limit: limit.to_string(),
            trustee: trustee.address().to_string(),
        })
    }

    async fn create_issued_currency(
        &self,
        issuer: &Wallet,
        recipient: &Address,
        currency: &str,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError> {
        self.transaction(Call::CreateIssuedCurrency {
            issuer: issuer.address().to_string(),
            recipient: recipient.to_string(),
            currency: currency.to_string(),
            amount: amount.to_string(),
        })
    }

    async fn enable_rippling(&self, issuer: &Wallet) -> Result<TransactionResult, LedgerError> {
        self.transaction(Call::EnableRippling {
            issuer: issuer.address().to_string(),
        })
    }

    async fn send_issued_currency_payment(
        &self,
        sender: &Wallet,
        recipient: &Address,
        currency: &str,
        issuer: &Address,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError> {
        self.transaction(Call::SendPayment {
            sender: sender.address().to_string(),
            recipient: recipient.to_string(),
            currency: currency.to_string(),
            issuer: issuer.to_string(),
            amount: amount.to_string(),
        })
    }

    async fn redeem_issued_currency(
        &self,
        holder: &Wallet,
        currency: &str,
        issuer: &Address,
        amount: &str,
    ) -> Result<TransactionResult, LedgerError> {
        self.transaction(Call::Redeem {
            holder: holder.address().to_string(),
            currency: currency.to_string(),
            issuer: issuer.to_string(),
            amount: amount.to_string(),
        })
    }

    async fn close(&self) -> Result<(), LedgerError> {
        let mut state = self.lock()?;
        self.record(&mut state, Call::Close)
    }
}
