//! Issued-currency demo against the XRP Ledger test network.

use anyhow::Result;
use cli::{exit_code, report_outcome, DemoConfig, DemoReport, DemoRunner, Scenario};
use rpc::{TestnetFaucet, XrplIssuedCurrencyClient};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the demo.
#[derive(Debug, StructOpt)]
#[structopt(name = "issued-currency-demo", about = "Issue and move currency on the XRP Ledger test network")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Ledger node JSON-RPC endpoint
    #[structopt(short, long)]
    node: Option<String>,

    /// Faucet endpoint
    #[structopt(short, long)]
    faucet: Option<String>,

    /// Scenario to run: issue or full
    #[structopt(short, long, default_value = "issue")]
    scenario: Scenario,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = run(Opt::from_args()).await;
    let code = match report_outcome(&result, &mut std::io::stdout()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Failed to write the outcome: {}", e);
            exit_code(&result)
        }
    };

    std::process::exit(code);
}

async fn run(opt: Opt) -> Result<DemoReport> {
    // Load configuration
    let mut config = match &opt.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    };

    // Override endpoints if specified
    if let Some(node) = opt.node {
        config.json_rpc_url = node;
    }
    if let Some(faucet) = opt.faucet {
        config.faucet_url = faucet;
    }
    debug!("Using configuration {:?}", config);

    let client = XrplIssuedCurrencyClient::new(config.json_rpc_url.clone(), config.client_options());
    let faucet = TestnetFaucet::new(
        config.faucet_url.clone(),
        config.json_rpc_url.clone(),
        config.client_options(),
    );

    let report = DemoRunner::new(&client, &faucet, &config)
        .run(opt.scenario)
        .await?;
    Ok(report)
}
