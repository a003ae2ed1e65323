//! Configuration for the migration harness
//!
//! Typed configuration loaded from environment variables (optionally via a
//! `.env` file loaded by the binary). Defaults target the local devnet:
//! LocalTerra as chain A, LocalNeutron as chain B and Hermes in a container
//! named `hermes`.

use crate::error::Result;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Root configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Chain A: legacy CW20 token and bridge
    pub hub: ChainConfig,
    /// Chain B: token-factory asset
    pub outpost: ChainConfig,
    pub relayer: RelayerConfig,
    pub artifacts: ArtifactsConfig,
    pub token: TokenConfig,
    pub timing: TimingConfig,
    /// Where the migration record is persisted
    pub state_path: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            hub: ChainConfig::hub_default(),
            outpost: ChainConfig::outpost_default(),
            relayer: RelayerConfig::default(),
            artifacts: ArtifactsConfig::default(),
            token: TokenConfig::default(),
            timing: TimingConfig::default(),
            state_path: PathBuf::from("migration_state.json"),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            hub: ChainConfig::from_env_with_prefix("HUB", ChainConfig::hub_default())?,
            outpost: ChainConfig::from_env_with_prefix("OUTPOST", ChainConfig::outpost_default())?,
            relayer: RelayerConfig::from_env(),
            artifacts: ArtifactsConfig::from_env(),
            token: TokenConfig::from_env(),
            timing: TimingConfig::from_env(),
            state_path: std::env::var("MIGRATION_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("migration_state.json")),
        })
    }
}

/// One chain and the key that signs for it
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain_id: String,
    pub lcd_url: Url,
    /// Docker container running the chain daemon
    pub container: String,
    /// Daemon binary inside the container (`terrad`, `neutrond`)
    pub binary: String,
    pub key_name: String,
    pub address: String,
    pub fee_denom: String,
    /// Flat fee attached to every transaction
    pub fees: String,
    pub gas_adjustment: String,
}

impl ChainConfig {
    pub fn hub_default() -> Self {
        Self {
            chain_id: "localterra-1".to_string(),
            lcd_url: Url::parse("http://localhost:1317").expect("valid default URL"),
            container: "localterra".to_string(),
            binary: "terrad".to_string(),
            key_name: "test1".to_string(),
            address: "terra1x46rqay4d3cssq8gxxvqz8xt6nwlz4td20k38v".to_string(),
            fee_denom: "uluna".to_string(),
            fees: "10000000uluna".to_string(),
            gas_adjustment: "1.5".to_string(),
        }
    }

    pub fn outpost_default() -> Self {
        Self {
            chain_id: "localneutron-1".to_string(),
            lcd_url: Url::parse("http://localhost:1316").expect("valid default URL"),
            container: "localneutron".to_string(),
            binary: "neutrond".to_string(),
            key_name: "demowallet1".to_string(),
            address: "neutron1m9l358xunhhwds0568za49mzhvuxx9ux8xafx2".to_string(),
            fee_denom: "untrn".to_string(),
            fees: "500000untrn".to_string(),
            gas_adjustment: "1.5".to_string(),
        }
    }

    /// Load from environment with a prefix (e.g. "HUB" reads `HUB_CHAIN_ID`)
    pub fn from_env_with_prefix(prefix: &str, defaults: Self) -> Result<Self> {
        let var = |name: &str| std::env::var(format!("{}_{}", prefix, name)).ok();

        let lcd_url = match var("LCD_URL") {
            Some(url) => Url::parse(&url)?,
            None => defaults.lcd_url,
        };

        Ok(Self {
            chain_id: var("CHAIN_ID").unwrap_or(defaults.chain_id),
            lcd_url,
            container: var("CONTAINER").unwrap_or(defaults.container),
            binary: var("BINARY").unwrap_or(defaults.binary),
            key_name: var("KEY_NAME").unwrap_or(defaults.key_name),
            address: var("ADDRESS").unwrap_or(defaults.address),
            fee_denom: var("FEE_DENOM").unwrap_or(defaults.fee_denom),
            fees: var("FEES").unwrap_or(defaults.fees),
            gas_adjustment: var("GAS_ADJUSTMENT").unwrap_or(defaults.gas_adjustment),
        })
    }
}

/// Hermes relayer container
#[derive(Debug, Clone)]
pub struct RelayerConfig {
    pub container: String,
    pub binary: String,
    pub channel_version: String,
}

impl Default for RelayerConfig {
    fn default() -> Self {
        Self {
            container: "hermes".to_string(),
            binary: "hermes".to_string(),
            channel_version: "ics20-1".to_string(),
        }
    }
}

impl RelayerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            container: std::env::var("RELAYER_CONTAINER").unwrap_or(defaults.container),
            binary: std::env::var("RELAYER_BINARY").unwrap_or(defaults.binary),
            channel_version: std::env::var("RELAYER_CHANNEL_VERSION")
                .unwrap_or(defaults.channel_version),
        }
    }
}

/// Location of the prebuilt WASM artifacts
#[derive(Debug, Clone)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
        }
    }
}

impl ArtifactsConfig {
    pub fn from_env() -> Self {
        Self {
            dir: std::env::var("CONTRACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| Self::default().dir),
        }
    }

    pub fn cw20_token(&self) -> PathBuf {
        self.dir.join("cw20_oro.wasm")
    }

    pub fn cw20_ics20(&self) -> PathBuf {
        self.dir.join("cw20_ics20.wasm")
    }

    /// Bridge build that refuses outgoing transfers of the legacy token
    pub fn cw20_ics20_disabled(&self) -> PathBuf {
        self.dir.join("new_cw20_ics20.wasm")
    }

    pub fn hub_converter(&self) -> PathBuf {
        self.dir.join("oro_token_converter.wasm")
    }

    pub fn outpost_converter(&self) -> PathBuf {
        self.dir.join("oro_token_converter_neutron.wasm")
    }
}

/// Legacy token and migrated asset parameters
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// CW20 balance minted to the hub signer
    pub initial_balance: u128,
    /// Token-factory subdenom on the outpost
    pub subdenom: String,
    /// Native supply minted to the outpost signer
    pub native_supply: u128,
    /// Default packet timeout of the legacy bridge, in seconds
    pub bridge_timeout_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Oro Token".to_string(),
            symbol: "ORO".to_string(),
            decimals: 6,
            initial_balance: 1_100_000_000_000_000,
            subdenom: "uoro".to_string(),
            native_supply: 1_100_000_000_000_000,
            bridge_timeout_secs: 300,
        }
    }
}

impl TokenConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: std::env::var("TOKEN_NAME").unwrap_or(defaults.name),
            symbol: std::env::var("TOKEN_SYMBOL").unwrap_or(defaults.symbol),
            decimals: parse_env("TOKEN_DECIMALS").unwrap_or(defaults.decimals),
            initial_balance: parse_env("TOKEN_INITIAL_BALANCE")
                .unwrap_or(defaults.initial_balance),
            subdenom: std::env::var("NATIVE_SUBDENOM").unwrap_or(defaults.subdenom),
            native_supply: parse_env("NATIVE_SUPPLY").unwrap_or(defaults.native_supply),
            bridge_timeout_secs: parse_env("BRIDGE_TIMEOUT_SECS")
                .unwrap_or(defaults.bridge_timeout_secs),
        }
    }
}

/// Polling bounds for asynchronous effects
///
/// Relaying and block production are observed only by re-querying, so every
/// wait is a poll with an upper bound.
#[derive(Debug, Clone)]
pub struct TimingConfig {
    pub poll_interval: Duration,
    /// Upper bound for a packet to be relayed or a channel to appear
    pub relay_timeout: Duration,
    /// Upper bound for a broadcast transaction to be included
    pub tx_timeout: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            relay_timeout: Duration::from_secs(60),
            tx_timeout: Duration::from_secs(30),
        }
    }
}

impl TimingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poll_interval: parse_env("POLL_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            relay_timeout: parse_env("RELAY_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.relay_timeout),
            tx_timeout: parse_env("TX_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.tx_timeout),
        }
    }
}

// --- Helper functions ---

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
