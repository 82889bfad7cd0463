//! The demo runner: a fixed sequence of ledger calls with console narration.

use crate::config::DemoConfig;
use crate::errors::DemoError;
use colored::Colorize;
use ledger::{Address, Faucet, IssuedCurrencyClient, TransactionResult, Wallet};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Which sequence of steps to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Trust line from an operational wallet, then issue currency to it.
    Issue,
    /// Adds a customer wallet, rippling, a payment and a redemption.
    Full,
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issue" => Ok(Scenario::Issue),
            "full" => Ok(Scenario::Full),
            other => Err(format!("unknown scenario '{}' (expected 'issue' or 'full')", other)),
        }
    }
}

impl Scenario {
    /// Gets what a reader should expect from the run, when it differs from plain success.
    ///
    /// The full scenario enables rippling after the trust lines exist, so those lines keep
    /// no-ripple on the issuer's side and the payment between the two holders has no path.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Scenario::Issue => None,
            Scenario::Full => Some(
                "Note: rippling is enabled after the trust lines are created, so the payment \
                 is expected to end CLAIMED_COST_ONLY_PATH_DRY and the redemption may fail too.",
            ),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Issue => write!(f, "issue"),
            Scenario::Full => write!(f, "full"),
        }
    }
}

/// A ledger operation performed by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateTrustLine,
    CreateIssuedCurrency,
    EnableRippling,
    SendPayment,
    Redeem,
}

/// The result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The operation performed
    pub step: Step,
    /// What the step did, as narrated
    pub description: String,
    /// The ledger's answer
    pub result: TransactionResult,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// The issuing account
    pub issuer: Address,
    /// The operational account
    pub operational: Address,
    /// The customer account, for scenarios that use one
    pub customer: Option<Address>,
    /// Step outcomes in the order the calls were issued
    pub steps: Vec<StepOutcome>,
}

/// Runs demo scenarios against a client and a faucet.
pub struct DemoRunner<'a, C: ?Sized, F: ?Sized> {
    client: &'a C,
    faucet: &'a F,
    config: &'a DemoConfig,
}

impl<'a, C, F> DemoRunner<'a, C, F>
where
    C: IssuedCurrencyClient + ?Sized,
    F: Faucet + ?Sized,
{
    /// Creates a runner.
    pub fn new(client: &'a C, faucet: &'a F, config: &'a DemoConfig) -> Self {
        Self {
            client,
            faucet,
            config,
        }
    }

    /// Runs `scenario` to completion, then closes the client.
    ///
    /// The first rejected call ends the run; later steps and the close are not attempted.
    pub async fn run(&self, scenario: Scenario) -> Result<DemoReport, DemoError> {
        self.config.validate()?;
        info!("Running {} scenario against {}", scenario, self.config.json_rpc_url);

        if let Some(notice) = scenario.notice() {
            println!("{}", notice.yellow());
            println!();
        }

        match scenario {
            Scenario::Issue => println!("Generating issuing and operational wallets..."),
            Scenario::Full => println!("Generating issuing, operational and customer wallets..."),
        }

        let issuer = self.faucet.generate_wallet().await?;
        let operational = self.faucet.generate_wallet().await?;
        let customer = match scenario {
            Scenario::Issue => None,
            Scenario::Full => Some(self.faucet.generate_wallet().await?),
        };

        println!("{} {}", "Issuing Address:".green(), issuer.address());
        println!("{} {}", "Operational Address:".green(), operational.address());
        if let Some(customer) = &customer {
            println!("{} {}", "Customer Address:".green(), customer.address());
        }
        println!();

        let mut steps = Vec::new();
        steps.push(self.create_trust_line(&issuer, &operational).await?);
        if let Some(customer) = &customer {
            steps.push(self.create_trust_line(&issuer, customer).await?);
        }
        steps.push(self.create_issued_currency(&issuer, &operational).await?);
        if let Some(customer) = &customer {
            steps.push(self.enable_rippling(&issuer).await?);
            steps.push(self.send_payment(&issuer, &operational, customer).await?);
            steps.push(self.redeem(&issuer, customer).await?);
        }

        self.client.close().await?;
        info!("Finished {} scenario with {} transactions", scenario, steps.len());

        Ok(DemoReport {
            issuer: issuer.address().clone(),
            operational: operational.address().clone(),
            customer: customer.map(|c| c.address().clone()),
            steps,
        })
    }

    async fn create_trust_line(&self, issuer: &Wallet, trustee: &Wallet) -> Result<StepOutcome, DemoError> {
        let description = format!(
            "Building trustline from {} to issuer {} for {} {}",
            trustee.address(),
            issuer.address(),
            self.config.trust_line_limit,
            self.config.currency
        );
        println!("{}", description);

        let result = self
            .client
            .create_trust_line(
                issuer.address(),
                &self.config.currency,
                &self.config.trust_line_limit,
                trustee,
            )
            .await?;
        Ok(report(Step::CreateTrustLine, description, result))
    }

    async fn create_issued_currency(&self, issuer: &Wallet, recipient: &Wallet) -> Result<StepOutcome, DemoError> {
        let description = format!(
            "Creating {} {} Issued Currency\nIssued by {} to {}",
            self.config.issue_amount,
            self.config.currency,
            issuer.address(),
            recipient.address()
        );
        println!("{}", description);

        let result = self
            .client
            .create_issued_currency(
                issuer,
                recipient.address(),
                &self.config.currency,
                &self.config.issue_amount,
            )
            .await?;
        Ok(report(Step::CreateIssuedCurrency, description, result))
    }

    async fn enable_rippling(&self, issuer: &Wallet) -> Result<StepOutcome, DemoError> {
        let description = format!("Enabling rippling on {}", issuer.address());
        println!("{}", description);

        let result = self.client.enable_rippling(issuer).await?;
        Ok(report(Step::EnableRippling, description, result))
    }

    async fn send_payment(
        &self,
        issuer: &Wallet,
        sender: &Wallet,
        recipient: &Wallet,
    ) -> Result<StepOutcome, DemoError> {
        let description = format!(
            "Sending {} {} from {} to {}",
            self.config.payment_amount,
            self.config.currency,
            sender.address(),
            recipient.address()
        );
        println!("{}", description);

        let result = self
            .client
            .send_issued_currency_payment(
                sender,
                recipient.address(),
                &self.config.currency,
                issuer.address(),
                &self.config.payment_amount,
            )
            .await?;
        Ok(report(Step::SendPayment, description, result))
    }

    async fn redeem(&self, issuer: &Wallet, holder: &Wallet) -> Result<StepOutcome, DemoError> {
        let description = format!(
            "Redeeming {} {} from {} with issuer {}",
            self.config.redeem_amount,
            self.config.currency,
            holder.address(),
            issuer.address()
        );
        println!("{}", description);

        let result = self
            .client
            .redeem_issued_currency(
                holder,
                &self.config.currency,
                issuer.address(),
                &self.config.redeem_amount,
            )
            .await?;
        Ok(report(Step::Redeem, description, result))
    }
}

/// Prints a step's result and wraps it in an outcome.
fn report(step: Step, description: String, result: TransactionResult) -> StepOutcome {
    let label = result.status.label();
    let label = if result.status.is_final() && result.validated {
        label.green()
    } else {
        label.yellow()
    };
    match &result.engine_result {
        Some(engine_result) => println!("{} {} {} [{}]", "Result:".bold(), label, result.hash, engine_result),
        None => println!("{} {} {}", "Result:".bold(), label, result.hash),
    }
    println!();
    info!("{:?} finished with {}", step, result.status);

    StepOutcome {
        step,
        description,
        result,
    }
}
