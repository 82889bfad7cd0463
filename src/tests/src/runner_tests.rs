//! Tests for the demo runner against the mock ledger.

use crate::mock::{Call, MockLedger, ADDRESSES};
use cli::{exit_code, report_outcome, DemoConfig, DemoError, DemoRunner, Scenario, Step};
use ledger::{LedgerError, TransactionStatus};
use tokio::runtime::Runtime;

fn trust_line(trustee: &str) -> Call {
    Call::CreateTrustLine {
        issuer: ADDRESSES[0].to_string(),
        currency: "USD".to_string(),
        limit: "100".to_string(),
        trustee: trustee.to_string(),
    }
}

fn full_sequence() -> Vec<Call> {
    vec![
        Call::GenerateWallet,
        Call::GenerateWallet,
        Call::GenerateWallet,
        trust_line(ADDRESSES[1]),
        trust_line(ADDRESSES[2]),
        Call::CreateIssuedCurrency {
            issuer: ADDRESSES[0].to_string(),
            recipient: ADDRESSES[1].to_string(),
            currency: "USD".to_string(),
            amount: "100".to_string(),
        },
        Call::EnableRippling {
            issuer: ADDRESSES[0].to_string(),
        },
        Call::SendPayment {
            sender: ADDRESSES[1].to_string(),
            recipient: ADDRESSES[2].to_string(),
            currency: "USD".to_string(),
            issuer: ADDRESSES[0].to_string(),
            amount: "50".to_string(),
        },
        Call::Redeem {
            holder: ADDRESSES[2].to_string(),
            currency: "USD".to_string(),
            issuer: ADDRESSES[0].to_string(),
            amount: "25".to_string(),
        },
        Call::Close,
    ]
}

/// Tests the issue scenario, which mirrors the basic trust line and issuance demo.
#[test]
fn test_issue_scenario() {
    let rt = Runtime::new().unwrap();
    let ledger = MockLedger::new();
    let config = DemoConfig::default();

    let report = rt
        .block_on(DemoRunner::new(&ledger, &ledger, &config).run(Scenario::Issue))
        .unwrap();

    assert_eq!(report.issuer.as_str(), ADDRESSES[0]);
    assert_eq!(report.operational.as_str(), ADDRESSES[1]);
    assert_eq!(report.customer, None);

    let steps: Vec<Step> = report.steps.iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![Step::CreateTrustLine, Step::CreateIssuedCurrency]);

    assert_eq!(
        ledger.calls(),
        vec![
            Call::GenerateWallet,
            Call::GenerateWallet,
            trust_line(ADDRESSES[1]),
            Call::CreateIssuedCurrency {
                issuer: ADDRESSES[0].to_string(),
                recipient: ADDRESSES[1].to_string(),
                currency: "USD".to_string(),
                amount: "100".to_string(),
            },
            Call::Close,
        ]
    );
}

/// Tests that the full scenario issues its calls in a fixed order and reports results in that order.
#[tokio::test]
async fn test_full_scenario_results_in_call_order() {
    let ledger = MockLedger::new();
    let config = DemoConfig::default();

    let report = DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Full)
        .await
        .unwrap();

    assert_eq!(ledger.calls(), full_sequence());
    assert_eq!(report.customer.as_ref().map(|c| c.as_str()), Some(ADDRESSES[2]));

    let steps: Vec<Step> = report.steps.iter().map(|s| s.step).collect();
    assert_eq!(
        steps,
        vec![
            Step::CreateTrustLine,
            Step::CreateTrustLine,
            Step::CreateIssuedCurrency,
            Step::EnableRippling,
            Step::SendPayment,
            Step::Redeem,
        ]
    );

    let hashes: Vec<&str> = report.steps.iter().map(|s| s.result.hash.as_str()).collect();
    assert_eq!(hashes, vec!["TX0", "TX1", "TX2", "TX3", "TX4", "TX5"]);
}

/// Tests that a rejected call stops every later step and maps to exit code 1.
#[tokio::test]
async fn test_rejection_stops_the_run() {
    let expected = full_sequence();
    let config = DemoConfig::default();

    for failing in 0..expected.len() {
        let ledger = MockLedger::new().failing_at(failing);
        let result = DemoRunner::new(&ledger, &ledger, &config)
            .run(Scenario::Full)
            .await;

        assert_eq!(
            result.as_ref().unwrap_err(),
            &DemoError::LedgerError(LedgerError::Rpc(format!("call {} rejected", failing)))
        );
        assert_eq!(exit_code(&result), 1);
        assert_eq!(ledger.calls(), expected[..=failing].to_vec());
    }
}

/// Tests that a successful run maps to exit code 0.
#[tokio::test]
async fn test_success_exit_code() {
    let ledger = MockLedger::new();
    let config = DemoConfig::default();

    let result = DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Issue)
        .await;
    assert_eq!(exit_code(&result), 0);
}

/// Tests that a failed run writes a `Fatal:` line naming the error and exits with 1.
#[tokio::test]
async fn test_failed_run_reports_fatal() {
    let ledger = MockLedger::new().failing_at(3);
    let config = DemoConfig::default();

    let result = DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Full)
        .await;

    let mut out = Vec::new();
    let code = report_outcome(&result, &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(code, 1);
    assert!(output.contains("Fatal:"));
    assert!(output.contains("call 3 rejected"));
    assert!(output.ends_with('\n'));
}

/// Tests that a configuration error is reported the same way.
#[tokio::test]
async fn test_config_error_reports_fatal() {
    let ledger = MockLedger::new();
    let mut config = DemoConfig::default();
    config.funding_attempts = 0;

    let result = DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Issue)
        .await;

    let mut out = Vec::new();
    assert_eq!(report_outcome(&result, &mut out).unwrap(), 1);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Fatal:"));
    assert!(output.contains("Configuration error: funding_attempts must be at least 1"));
    assert!(ledger.calls().is_empty());
}

/// Tests that a successful run writes nothing and exits with 0.
#[tokio::test]
async fn test_successful_run_reports_nothing() {
    let ledger = MockLedger::new();
    let config = DemoConfig::default();

    let result = DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Issue)
        .await;

    let mut out = Vec::new();
    assert_eq!(report_outcome(&result, &mut out).unwrap(), 0);
    assert!(out.is_empty());
}

/// Tests that unsuccessful statuses are reported but do not change the sequence.
#[tokio::test]
async fn test_statuses_do_not_branch() {
    let ledger = MockLedger::new().with_statuses(vec![
        TransactionStatus::Succeeded,
        TransactionStatus::ClaimedCostOnlyPathDry,
        TransactionStatus::MalformedTransaction,
        TransactionStatus::LastLedgerSequenceExpired,
    ]);
    let config = DemoConfig::default();

    let report = DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Full)
        .await
        .unwrap();

    let labels: Vec<&str> = report.steps.iter().map(|s| s.result.status.label()).collect();
    assert_eq!(
        labels,
        vec![
            "SUCCEEDED",
            "CLAIMED_COST_ONLY_PATH_DRY",
            "MALFORMED",
            "LAST_LEDGER_SEQUENCE_EXPIRED",
            "SUCCEEDED",
            "SUCCEEDED",
        ]
    );
    assert_eq!(ledger.calls(), full_sequence());
}

/// Tests that configured amounts and currency flow into the calls.
#[tokio::test]
async fn test_configured_values_are_used() {
    let ledger = MockLedger::new();
    let mut config = DemoConfig::default();
    config.currency = "EUR".to_string();
    config.trust_line_limit = "1000".to_string();
    config.issue_amount = "250.5".to_string();

    DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Issue)
        .await
        .unwrap();

    let calls = ledger.calls();
    assert_eq!(
        calls[2],
        Call::CreateTrustLine {
            issuer: ADDRESSES[0].to_string(),
            currency: "EUR".to_string(),
            limit: "1000".to_string(),
            trustee: ADDRESSES[1].to_string(),
        }
    );
    assert!(matches!(
        &calls[3],
        Call::CreateIssuedCurrency { currency, amount, .. } if currency == "EUR" && amount == "250.5"
    ));
}

/// Tests that an invalid configuration is rejected before any call is made.
#[tokio::test]
async fn test_invalid_config_makes_no_calls() {
    let ledger = MockLedger::new();
    let mut config = DemoConfig::default();
    config.currency = "XRP".to_string();

    let result = DemoRunner::new(&ledger, &ledger, &config)
        .run(Scenario::Issue)
        .await;

    assert!(matches!(
        result,
        Err(DemoError::LedgerError(LedgerError::InvalidCurrency(_)))
    ));
    assert_eq!(exit_code(&result), 1);
    assert!(ledger.calls().is_empty());
}

#[test]
fn test_scenario_parsing() {
    assert_eq!("issue".parse::<Scenario>(), Ok(Scenario::Issue));
    assert_eq!("full".parse::<Scenario>(), Ok(Scenario::Full));
    assert!("everything".parse::<Scenario>().is_err());
    assert_eq!(Scenario::Full.to_string(), "full");
}

#[test]
fn test_full_scenario_warns_about_path_dry_payment() {
    assert_eq!(Scenario::Issue.notice(), None);

    let notice = Scenario::Full.notice().unwrap();
    assert!(notice.contains("CLAIMED_COST_ONLY_PATH_DRY"));
    assert!(notice.contains("redemption"));
}
