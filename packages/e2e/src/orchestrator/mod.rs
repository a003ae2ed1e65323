//! Migration orchestration
//!
//! The migration runs as four phases against the hub (chain A) and the
//! outpost (chain B):
//! 1. Deploy the legacy CW20 token and its CW20-ICS20 bridge on the hub
//! 2. Open the legacy `wasm.<bridge>` <> `transfer` channel
//! 3. Create and mint the token-factory asset, open a transfer<>transfer channel
//! 4. Deploy a converter on each chain
//!
//! Outputs are persisted after every phase, so a failed run resumes from the
//! phase that failed instead of redeploying everything.

mod converters;
mod legacy;
mod native;
pub mod stages;

use crate::chain::{ChainClient, ChainContext};
use crate::channel::{newest_sequence, select_for_ports, Channel};
use crate::config::{ArtifactsConfig, HarnessConfig, TokenConfig};
use crate::error::{MigrationError, Result};
use crate::record::{MigrationRecord, MigrationStore};
use crate::utils::poll_until;
use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub use stages::{
    Converters, LegacyContracts, LegacyDeployed, LegacyLinked, LegacyPath, Migrated, NativeAsset,
    NativeIssued, Snapshot,
};

/// Orchestration phases, in execution order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum MigrationStep {
    DeployLegacyContracts,
    EstablishLegacyChannel,
    MintNativeAsset,
    DeployConverters,
}

impl MigrationStep {
    pub const ALL: [MigrationStep; 4] = [
        Self::DeployLegacyContracts,
        Self::EstablishLegacyChannel,
        Self::MintNativeAsset,
        Self::DeployConverters,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DeployLegacyContracts => "Deploy Legacy Contracts",
            Self::EstablishLegacyChannel => "Establish Legacy Channel",
            Self::MintNativeAsset => "Mint Native Asset",
            Self::DeployConverters => "Deploy Converters",
        }
    }

    pub fn next(&self) -> Option<MigrationStep> {
        match self {
            Self::DeployLegacyContracts => Some(Self::EstablishLegacyChannel),
            Self::EstablishLegacyChannel => Some(Self::MintNativeAsset),
            Self::MintNativeAsset => Some(Self::DeployConverters),
            Self::DeployConverters => None,
        }
    }
}

/// Where a resumed run should begin; `None` once every phase is recorded
pub fn next_step(record: &MigrationRecord) -> Option<MigrationStep> {
    match record.last_completed {
        Some(step) => step.next(),
        None => Some(MigrationStep::DeployLegacyContracts),
    }
}

/// Outputs of the most recently completed phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Start,
    Deployed(LegacyDeployed),
    Linked(LegacyLinked),
    Issued(NativeIssued),
    Done(Migrated),
}

impl Progress {
    /// Rebuild the snapshot the phase `from` consumes
    pub fn resume(from: MigrationStep, record: &MigrationRecord) -> Result<Self> {
        Ok(match from {
            MigrationStep::DeployLegacyContracts => Self::Start,
            MigrationStep::EstablishLegacyChannel => {
                Self::Deployed(LegacyDeployed::try_from(record)?)
            }
            MigrationStep::MintNativeAsset => Self::Linked(LegacyLinked::try_from(record)?),
            MigrationStep::DeployConverters => Self::Issued(NativeIssued::try_from(record)?),
        })
    }

    /// Phase that advances from here
    pub fn pending_step(&self) -> Option<MigrationStep> {
        match self {
            Self::Start => Some(MigrationStep::DeployLegacyContracts),
            Self::Deployed(_) => Some(MigrationStep::EstablishLegacyChannel),
            Self::Linked(_) => Some(MigrationStep::MintNativeAsset),
            Self::Issued(_) => Some(MigrationStep::DeployConverters),
            Self::Done(_) => None,
        }
    }
}

/// Runs the migration phases and persists their outputs
pub struct MigrationOrchestrator {
    pub(crate) ctx: ChainContext,
    pub(crate) store: MigrationStore,
    pub(crate) artifacts: ArtifactsConfig,
    pub(crate) token: TokenConfig,
}

impl MigrationOrchestrator {
    pub fn new(
        ctx: ChainContext,
        store: MigrationStore,
        artifacts: ArtifactsConfig,
        token: TokenConfig,
    ) -> Self {
        Self {
            ctx,
            store,
            artifacts,
            token,
        }
    }

    pub fn from_config(ctx: ChainContext, config: &HarnessConfig) -> Self {
        Self::new(
            ctx,
            MigrationStore::new(config.state_path.clone()),
            config.artifacts.clone(),
            config.token.clone(),
        )
    }

    pub fn store(&self) -> &MigrationStore {
        &self.store
    }

    /// Run every phase from `from` onwards
    ///
    /// `on_step` is called with `(step, true)` when a phase starts and with
    /// `(step, succeeded)` when it ends.
    pub async fn run<F>(&self, from: MigrationStep, mut on_step: F) -> Result<Migrated>
    where
        F: FnMut(MigrationStep, bool),
    {
        info!("Starting migration from {}", from.name());
        let start = Instant::now();

        let record = self.store.load()?;
        let mut progress = Progress::resume(from, &record)?;

        loop {
            progress = match progress {
                Progress::Done(migrated) => {
                    info!("Migration completed in {:?}", start.elapsed());
                    return Ok(migrated);
                }
                pending => self.advance(pending, &mut on_step).await?,
            };
        }
    }

    /// Run exactly one phase, using the persisted outputs of earlier phases
    pub async fn run_step(&self, step: MigrationStep) -> Result<Progress> {
        let record = self.store.load()?;
        let progress = Progress::resume(step, &record)?;
        self.advance(progress, &mut |_, _| {}).await
    }

    async fn advance<F>(&self, progress: Progress, on_step: &mut F) -> Result<Progress>
    where
        F: FnMut(MigrationStep, bool),
    {
        match progress {
            Progress::Start => {
                let deployed = self
                    .run_phase(MigrationStep::DeployLegacyContracts, on_step, self.deploy_legacy_contracts())
                    .await?;
                Ok(Progress::Deployed(deployed))
            }
            Progress::Deployed(deployed) => {
                let linked = self
                    .run_phase(MigrationStep::EstablishLegacyChannel, on_step, self.establish_legacy_channel(deployed))
                    .await?;
                Ok(Progress::Linked(linked))
            }
            Progress::Linked(linked) => {
                let issued = self
                    .run_phase(MigrationStep::MintNativeAsset, on_step, self.mint_native_asset(linked))
                    .await?;
                Ok(Progress::Issued(issued))
            }
            Progress::Issued(issued) => {
                let migrated = self
                    .run_phase(MigrationStep::DeployConverters, on_step, self.deploy_converters(issued))
                    .await?;
                Ok(Progress::Done(migrated))
            }
            Progress::Done(migrated) => Ok(Progress::Done(migrated)),
        }
    }

    /// Run one phase and persist its snapshot
    ///
    /// `on_step` sees the phase start and, once the record is saved, its
    /// outcome.
    async fn run_phase<S, F, Fut>(&self, step: MigrationStep, on_step: &mut F, phase: Fut) -> Result<S>
    where
        S: Snapshot,
        F: FnMut(MigrationStep, bool),
        Fut: Future<Output = Result<S>>,
    {
        info!("=== {} ===", step.name());
        on_step(step, true);

        let result = match phase.await {
            Ok(snapshot) => self.persist(step, &snapshot).map(|()| snapshot),
            Err(e) => Err(e),
        };

        on_step(step, result.is_ok());
        result
    }

    /// Merge a snapshot into the stored record
    ///
    /// Fields owned by later phases are left as they are.
    fn persist(&self, step: MigrationStep, snapshot: &impl Snapshot) -> Result<()> {
        let mut record = self.store.load()?;
        snapshot.write_to(&mut record);
        record.last_completed = Some(step);
        record.updated_at = Some(Utc::now());
        self.store.save(&record)
    }

    /// Store and instantiate a contract, attributing any failure to `contract`
    pub(crate) async fn deploy_contract(
        &self,
        chain: &dyn ChainClient,
        contract: &str,
        wasm_path: &Path,
        init_msg: &serde_json::Value,
    ) -> Result<String> {
        let deploy = async {
            let code_id = chain.store_code(wasm_path).await?;
            chain.instantiate(code_id, init_msg, contract).await
        };

        let address = deploy
            .await
            .map_err(|e| MigrationError::deployment(contract, e))?;
        info!("{} deployed on {}: {}", contract, chain.chain_id(), address);
        Ok(address)
    }

    /// Ask the relayer for a new channel and wait until both chains report it
    ///
    /// Returns the hub-side and outpost-side channel ends.
    pub(crate) async fn open_channel(&self, port_a: &str, port_b: &str) -> Result<(Channel, Channel)> {
        let hub = self.ctx.hub.as_ref();
        let outpost = self.ctx.outpost.as_ref();

        let before_a = newest_sequence(&hub.list_channels().await?, port_a, port_b);
        let before_b = newest_sequence(&outpost.list_channels().await?, port_b, port_a);

        self.ctx
            .relayer
            .create_channel(hub.chain_id(), port_a, outpost.chain_id(), port_b)
            .await?;

        poll_until(
            &format!("channel {} <> {}", port_a, port_b),
            move || async move {
                let now_a = newest_sequence(&hub.list_channels().await?, port_a, port_b);
                let now_b = newest_sequence(&outpost.list_channels().await?, port_b, port_a);
                Ok(now_a > before_a && now_b > before_b)
            },
            self.ctx.timing.relay_timeout,
            self.ctx.timing.poll_interval,
        )
        .await?;

        let channel_a = select_for_ports(hub.chain_id(), hub.list_channels().await?, port_a, port_b)?;
        let channel_b =
            select_for_ports(outpost.chain_id(), outpost.list_channels().await?, port_b, port_a)?;

        info!(
            "Channel open: {} {} <> {} {}",
            hub.chain_id(),
            channel_a.channel_id,
            outpost.chain_id(),
            channel_b.channel_id
        );
        Ok((channel_a, channel_b))
    }
}
