//! External chain interfaces consumed by the orchestrator and scenarios
//!
//! The harness only sequences these calls. [`crate::cosmos::CosmosClient`]
//! and [`crate::relayer::HermesRelayer`] are the devnet implementations.

use crate::channel::Channel;
use crate::config::{HarnessConfig, TimingConfig};
use crate::cosmos::CosmosClient;
use crate::error::Result;
use crate::relayer::{HermesRelayer, Relayer};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Native coin amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Operations one chain must provide, signed by that chain's harness key
///
/// Every transaction method blocks until the transaction is included in a
/// block and fails with `TransactionFailed` when the chain rejects it.
#[async_trait]
pub trait ChainClient: Send + Sync {
    fn chain_id(&self) -> &str;

    /// Address of the signing key
    fn address(&self) -> &str;

    /// Denom used to pay fees and fund contract IBC sends
    fn fee_denom(&self) -> &str;

    async fn store_code(&self, wasm_path: &Path) -> Result<u64>;

    async fn instantiate(
        &self,
        code_id: u64,
        msg: &serde_json::Value,
        label: &str,
    ) -> Result<String>;

    async fn migrate(&self, contract: &str, code_id: u64, msg: &serde_json::Value) -> Result<()>;

    async fn execute(&self, contract: &str, msg: &serde_json::Value, funds: &[Coin]) -> Result<()>;

    async fn query_contract(
        &self,
        contract: &str,
        msg: &serde_json::Value,
    ) -> Result<serde_json::Value>;

    async fn query_balance(&self, address: &str, denom: &str) -> Result<u128>;

    async fn list_channels(&self) -> Result<Vec<Channel>>;

    /// Create a token-factory denom and return its full name
    async fn create_denom(&self, subdenom: &str) -> Result<String>;

    async fn mint(&self, denom: &str, amount: u128) -> Result<()>;

    async fn send(&self, to: &str, coins: &[Coin]) -> Result<()>;

    /// ICS20 transfer from the `transfer` port over `channel`
    async fn ibc_transfer(&self, channel: &str, coin: &Coin, receiver: &str) -> Result<()>;
}

/// Chain clients, relayer and timings shared by every operation of a run
///
/// Built once per process and passed by reference.
#[derive(Clone)]
pub struct ChainContext {
    /// Chain A: holds the CW20 token and the legacy bridge
    pub hub: Arc<dyn ChainClient>,
    /// Chain B: mints the migrated asset natively
    pub outpost: Arc<dyn ChainClient>,
    pub relayer: Arc<dyn Relayer>,
    pub timing: TimingConfig,
}

impl ChainContext {
    pub fn new(
        hub: Arc<dyn ChainClient>,
        outpost: Arc<dyn ChainClient>,
        relayer: Arc<dyn Relayer>,
        timing: TimingConfig,
    ) -> Self {
        Self {
            hub,
            outpost,
            relayer,
            timing,
        }
    }

    /// Wire the devnet CLI clients described by `config`
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(
            Arc::new(CosmosClient::new(&config.hub, &config.timing)),
            Arc::new(CosmosClient::new(&config.outpost, &config.timing)),
            Arc::new(HermesRelayer::new(&config.relayer)),
            config.timing.clone(),
        )
    }
}
