//! Transaction status codes and their human-readable labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The status of a submitted transaction, as reported by an issued-currency client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// The transaction has not reached a final state yet.
    Pending,
    /// The transaction was validated and applied.
    Succeeded,
    /// The transaction failed locally and was not applied.
    Failed,
    /// The status could not be determined.
    Unknown,
    /// A partial payment was required but not allowed.
    FullPaymentNotSupported,
    /// The transaction was malformed and will never succeed.
    MalformedTransaction,
    /// Only the fee was claimed: the payment path could deliver only part of the amount.
    ClaimedCostOnlyPathPartial,
    /// Only the fee was claimed: no liquidity along the payment path.
    ClaimedCostOnlyPathDry,
    /// Only the fee was claimed.
    ClaimedCostOnly,
    /// The transaction was not validated before its last ledger sequence passed.
    LastLedgerSequenceExpired,
}

impl TransactionStatus {
    /// Gets the status for a numeric code. Unrecognised codes map to `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => TransactionStatus::Pending,
            1 => TransactionStatus::Succeeded,
            2 => TransactionStatus::Failed,
            3 => TransactionStatus::Unknown,
            4 => TransactionStatus::FullPaymentNotSupported,
            5 => TransactionStatus::MalformedTransaction,
            6 => TransactionStatus::ClaimedCostOnlyPathPartial,
            7 => TransactionStatus::ClaimedCostOnlyPathDry,
            8 => TransactionStatus::ClaimedCostOnly,
            9 => TransactionStatus::LastLedgerSequenceExpired,
            _ => TransactionStatus::Unknown,
        }
    }

    /// Gets the numeric code of the status.
    pub fn code(self) -> i64 {
        match self {
            TransactionStatus::Pending => 0,
            TransactionStatus::Succeeded => 1,
            TransactionStatus::Failed => 2,
            TransactionStatus::Unknown => 3,
            TransactionStatus::FullPaymentNotSupported => 4,
            TransactionStatus::MalformedTransaction => 5,
            TransactionStatus::ClaimedCostOnlyPathPartial => 6,
            TransactionStatus::ClaimedCostOnlyPathDry => 7,
            TransactionStatus::ClaimedCostOnly => 8,
            TransactionStatus::LastLedgerSequenceExpired => 9,
        }
    }

    /// Gets the label printed for the status.
    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::ClaimedCostOnlyPathDry => "CLAIMED_COST_ONLY_PATH_DRY",
            TransactionStatus::ClaimedCostOnlyPathPartial => "CLAIMED_COST_ONLY_PATH_PARTIAL",
            TransactionStatus::ClaimedCostOnly => "CLAIMED_COST_ONLY",
            TransactionStatus::MalformedTransaction => "MALFORMED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Succeeded => "SUCCEEDED",
            TransactionStatus::LastLedgerSequenceExpired => "LAST_LEDGER_SEQUENCE_EXPIRED",
            _ => "UNKNOWN",
        }
    }

    /// Interprets a ledger engine result code such as `tesSUCCESS` or `tecPATH_DRY`.
    ///
    /// `tes` results only count as success once the transaction is validated.
    pub fn from_engine_result(engine_result: &str, validated: bool) -> Self {
        match engine_result {
            "tecPATH_DRY" => TransactionStatus::ClaimedCostOnlyPathDry,
            "tecPATH_PARTIAL" => TransactionStatus::ClaimedCostOnlyPathPartial,
            r if r.starts_with("tes") => {
                if validated {
                    TransactionStatus::Succeeded
                } else {
                    TransactionStatus::Pending
                }
            }
            r if r.starts_with("tec") => TransactionStatus::ClaimedCostOnly,
            r if r.starts_with("tem") => TransactionStatus::MalformedTransaction,
            r if r.starts_with("tef") || r.starts_with("tel") => TransactionStatus::Failed,
            r if r.starts_with("ter") => TransactionStatus::Pending,
            _ => TransactionStatus::Unknown,
        }
    }

    /// Whether the status can still change.
    pub fn is_final(self) -> bool {
        self != TransactionStatus::Pending
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gets the label for a numeric status code.
pub fn status_label(code: i64) -> &'static str {
    TransactionStatus::from_code(code).label()
}
