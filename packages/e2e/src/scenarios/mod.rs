//! Verification scenarios for a completed migration
//!
//! Each scenario starts from the state the orchestrator leaves behind and
//! prepares its own preconditions: legacy tokens on the outpost, converter
//! liquidity and fees. Setup transactions that may already have been applied
//! are best-effort. Checks assert exact balance deltas, so scenarios run in
//! any order; [`run_all_scenarios`] reports them in this one:
//! - `bridging_disabled`
//! - `convert_on_hub`
//! - `convert_on_outpost`
//! - `transfer_for_burning`
//! - `burn_accounting`

mod bridging;
mod burn;
mod conversion;
pub mod helpers;

use crate::chain::{ChainClient, ChainContext};
use crate::config::ArtifactsConfig;
use crate::orchestrator::Migrated;
use crate::TestResult;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::info;

pub use bridging::bridging_disabled;
pub use burn::{burn_accounting, transfer_for_burning};
pub use conversion::{convert_on_hub, convert_on_outpost};

/// Amount moved by setup transfers and top-ups
pub const SETUP_AMOUNT: u128 = 1_000_000_000_000;

/// Amount every check converts or transfers
pub const CHECK_AMOUNT: u128 = 100;

/// Amount converted on the outpost before a burn round-trip
pub const BURN_CONVERT_AMOUNT: u128 = 100_000;

/// Fee-denom top-up letting the outpost converter pay for IBC sends
pub const CONVERTER_FEE_TOP_UP: u128 = 1_000_000;

/// Everything a scenario reads: chains and the recorded migration outputs
pub struct ScenarioContext<'a> {
    pub chains: &'a ChainContext,
    pub migrated: &'a Migrated,
    pub artifacts: &'a ArtifactsConfig,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(
        chains: &'a ChainContext,
        migrated: &'a Migrated,
        artifacts: &'a ArtifactsConfig,
    ) -> Self {
        Self {
            chains,
            migrated,
            artifacts,
        }
    }

    pub fn hub(&self) -> &'a dyn ChainClient {
        self.chains.hub.as_ref()
    }

    pub fn outpost(&self) -> &'a dyn ChainClient {
        self.chains.outpost.as_ref()
    }
}

/// Registered scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    BridgingDisabled,
    ConvertOnHub,
    ConvertOnOutpost,
    TransferForBurning,
    BurnAccounting,
}

impl Scenario {
    /// Reporting order
    pub const ALL: [Scenario; 5] = [
        Self::BridgingDisabled,
        Self::ConvertOnHub,
        Self::ConvertOnOutpost,
        Self::TransferForBurning,
        Self::BurnAccounting,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BridgingDisabled => "bridging_disabled",
            Self::ConvertOnHub => "convert_on_hub",
            Self::ConvertOnOutpost => "convert_on_outpost",
            Self::TransferForBurning => "transfer_for_burning",
            Self::BurnAccounting => "burn_accounting",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub async fn run(&self, ctx: &ScenarioContext<'_>) -> TestResult {
        info!("Running scenario {}", self.name());
        match self {
            Self::BridgingDisabled => bridging_disabled(ctx).await,
            Self::ConvertOnHub => convert_on_hub(ctx).await,
            Self::ConvertOnOutpost => convert_on_outpost(ctx).await,
            Self::TransferForBurning => transfer_for_burning(ctx).await,
            Self::BurnAccounting => burn_accounting(ctx).await,
        }
    }
}

pub fn scenario_names() -> Vec<&'static str> {
    Scenario::ALL.iter().map(Scenario::name).collect()
}

/// Run every scenario in reporting order
pub async fn run_all_scenarios(ctx: &ScenarioContext<'_>) -> Vec<TestResult> {
    let mut results = Vec::with_capacity(Scenario::ALL.len());
    for scenario in Scenario::ALL {
        results.push(scenario.run(ctx).await);
    }
    results
}

/// Run one scenario by name; unknown names fail
pub async fn run_scenario(ctx: &ScenarioContext<'_>, name: &str) -> TestResult {
    match Scenario::from_name(name) {
        Some(scenario) => scenario.run(ctx).await,
        None => TestResult::fail(
            name,
            format!(
                "Unknown scenario (available: {})",
                scenario_names().join(", ")
            ),
            Duration::ZERO,
        ),
    }
}

/// Turn a scenario body into a [`TestResult`]
pub(crate) async fn conclude<Fut>(name: &str, body: Fut) -> TestResult
where
    Fut: Future<Output = eyre::Result<()>>,
{
    let start = Instant::now();
    match body.await {
        Ok(()) => TestResult::pass(name, start.elapsed()),
        Err(e) => TestResult::fail(name, format!("{:#}", e), start.elapsed()),
    }
}
