//! Cosmos SDK chain client for the devnet
//!
//! Transactions go through the chain daemon CLI inside its Docker container
//! (`docker exec <container> <binary> tx ...`) with sync broadcast, then are
//! confirmed by polling `query tx`. Balances and channels are read from the
//! LCD REST API.

use crate::chain::{ChainClient, Coin};
use crate::channel::Channel;
use crate::config::{ChainConfig, TimingConfig};
use crate::denom::factory_denom;
use crate::error::{MigrationError, Result};
use crate::utils::{poll_until, run_command};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Directory inside the chain container that receives WASM artifacts
const CONTAINER_WASM_DIR: &str = "/tmp/wasm";

pub struct CosmosClient {
    chain_id: String,
    lcd_url: Url,
    container: String,
    binary: String,
    key_name: String,
    address: String,
    fee_denom: String,
    fees: String,
    gas_adjustment: String,
    timing: TimingConfig,
    http: Client,
}

impl CosmosClient {
    pub fn new(config: &ChainConfig, timing: &TimingConfig) -> Self {
        Self {
            chain_id: config.chain_id.clone(),
            lcd_url: config.lcd_url.clone(),
            container: config.container.clone(),
            binary: config.binary.clone(),
            key_name: config.key_name.clone(),
            address: config.address.clone(),
            fee_denom: config.fee_denom.clone(),
            fees: config.fees.clone(),
            gas_adjustment: config.gas_adjustment.clone(),
            timing: timing.clone(),
            http: Client::new(),
        }
    }

    /// Check the LCD node_info endpoint
    pub async fn is_healthy(&self) -> Result<bool> {
        let url = self
            .lcd_url
            .join("cosmos/base/tendermint/v1beta1/node_info")?;

        match tokio::time::timeout(Duration::from_secs(5), self.http.get(url).send()).await {
            Ok(Ok(response)) => Ok(response.status().is_success()),
            Ok(Err(e)) => {
                debug!("{} LCD request failed: {}", self.chain_id, e);
                Ok(false)
            }
            Err(_) => Ok(false),
        }
    }

    /// Run the daemon binary inside the chain container
    async fn exec(&self, args: &[&str]) -> Result<String> {
        let mut full = vec!["exec", self.container.as_str(), self.binary.as_str()];
        full.extend_from_slice(args);
        run_command("docker", &full).await
    }

    /// Sign, broadcast and wait for inclusion of a `tx` subcommand
    ///
    /// Simulation failures (non-zero CLI exit), CheckTx rejections and
    /// DeliverTx failures all surface as `TransactionFailed`.
    async fn broadcast(&self, tx_args: &[&str]) -> Result<TxResponse> {
        let mut args = vec!["tx"];
        args.extend_from_slice(tx_args);
        args.extend_from_slice(&[
            "--from",
            self.key_name.as_str(),
            "--keyring-backend",
            "test",
            "--chain-id",
            self.chain_id.as_str(),
            "--gas",
            "auto",
            "--gas-adjustment",
            self.gas_adjustment.as_str(),
            "--fees",
            self.fees.as_str(),
            "--broadcast-mode",
            "sync",
            "-y",
            "-o",
            "json",
        ]);

        let output = self.exec(&args).await.map_err(|e| match e {
            MigrationError::Command { stderr, .. } => MigrationError::TransactionFailed {
                chain_id: self.chain_id.clone(),
                raw_log: stderr,
            },
            other => other,
        })?;

        let submitted: TxResponse = serde_json::from_str(output.trim())?;
        self.check_code(&submitted)?;
        debug!("{} tx submitted: {}", self.chain_id, submitted.txhash);

        let confirmed = self.wait_for_tx(&submitted.txhash).await?;
        self.check_code(&confirmed)?;
        Ok(confirmed)
    }

    fn check_code(&self, tx: &TxResponse) -> Result<()> {
        if tx.code != 0 {
            return Err(MigrationError::TransactionFailed {
                chain_id: self.chain_id.clone(),
                raw_log: tx.raw_log.clone(),
            });
        }
        Ok(())
    }

    /// Poll `query tx` until the transaction is included in a block
    async fn wait_for_tx(&self, tx_hash: &str) -> Result<TxResponse> {
        let found: Mutex<Option<TxResponse>> = Mutex::new(None);
        let slot = &found;
        let client = self;

        poll_until(
            &format!("tx {} on {}", tx_hash, self.chain_id),
            move || async move {
                let output = client
                    .exec(&["query", "tx", tx_hash, "-o", "json"])
                    .await?;
                let tx: TxResponse = serde_json::from_str(output.trim())?;
                let included = tx.height.parse::<u64>().map_or(false, |h| h > 0);
                if included {
                    if let Ok(mut guard) = slot.lock() {
                        *guard = Some(tx);
                    }
                }
                Ok(included)
            },
            self.timing.tx_timeout,
            self.timing.poll_interval,
        )
        .await?;

        found
            .into_inner()
            .ok()
            .flatten()
            .ok_or_else(|| MigrationError::Query(format!("tx {} vanished after inclusion", tx_hash)))
    }

    /// Copy a WASM artifact into the chain container
    async fn copy_wasm_to_container(&self, local_path: &Path) -> Result<String> {
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| MigrationError::Query(format!("not a file: {}", local_path.display())))?;
        let container_path = format!("{}/{}", CONTAINER_WASM_DIR, file_name);

        let source = local_path.to_string_lossy().into_owned();
        let target = format!("{}:{}", self.container, container_path);

        run_command(
            "docker",
            &["exec", self.container.as_str(), "mkdir", "-p", CONTAINER_WASM_DIR],
        )
        .await?;
        run_command("docker", &["cp", source.as_str(), target.as_str()]).await?;

        Ok(container_path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.lcd_url.join(path)?;
        let response = tokio::time::timeout(
            Duration::from_secs(10),
            self.http.get(url).query(query).send(),
        )
        .await
        .map_err(|_| MigrationError::Query(format!("timeout querying {} on {}", path, self.chain_id)))??;

        if !response.status().is_success() {
            return Err(MigrationError::Query(format!(
                "{} returned {} on {}",
                path,
                response.status(),
                self.chain_id
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ChainClient for CosmosClient {
    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn fee_denom(&self) -> &str {
        &self.fee_denom
    }

    async fn store_code(&self, wasm_path: &Path) -> Result<u64> {
        info!("Storing {} on {}", wasm_path.display(), self.chain_id);
        let container_path = self.copy_wasm_to_container(wasm_path).await?;

        let tx = self.broadcast(&["wasm", "store", container_path.as_str()]).await?;
        let code_id = tx
            .event_attribute("store_code", "code_id")
            .ok_or_else(|| MigrationError::Query(format!("no code_id in tx {}", tx.txhash)))?;

        let code_id = code_id
            .parse()
            .map_err(|_| MigrationError::Query(format!("invalid code_id '{}'", code_id)))?;
        info!("Stored code_id {} on {}", code_id, self.chain_id);
        Ok(code_id)
    }

    async fn instantiate(
        &self,
        code_id: u64,
        msg: &serde_json::Value,
        label: &str,
    ) -> Result<String> {
        info!("Instantiating code_id {} ({}) on {}", code_id, label, self.chain_id);
        let code_id = code_id.to_string();
        let msg = serde_json::to_string(msg)?;

        let tx = self
            .broadcast(&[
                "wasm",
                "instantiate",
                code_id.as_str(),
                msg.as_str(),
                "--label",
                label,
                "--admin",
                self.address.as_str(),
            ])
            .await?;

        let address = tx
            .event_attribute("instantiate", "_contract_address")
            .ok_or_else(|| {
                MigrationError::Query(format!("no contract address in tx {}", tx.txhash))
            })?;
        info!("{} instantiated at {}", label, address);
        Ok(address)
    }

    async fn migrate(&self, contract: &str, code_id: u64, msg: &serde_json::Value) -> Result<()> {
        info!("Migrating {} to code_id {} on {}", contract, code_id, self.chain_id);
        let code_id = code_id.to_string();
        let msg = serde_json::to_string(msg)?;
        self.broadcast(&["wasm", "migrate", contract, code_id.as_str(), msg.as_str()])
            .await?;
        Ok(())
    }

    async fn execute(&self, contract: &str, msg: &serde_json::Value, funds: &[Coin]) -> Result<()> {
        debug!("Executing {} on {}: {}", contract, self.chain_id, msg);
        let msg = serde_json::to_string(msg)?;
        let amount = join_coins(funds);

        let mut args = vec!["wasm", "execute", contract, msg.as_str()];
        if !funds.is_empty() {
            args.extend(["--amount", amount.as_str()]);
        }
        self.broadcast(&args).await?;
        Ok(())
    }

    async fn query_contract(
        &self,
        contract: &str,
        msg: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let msg = serde_json::to_string(msg)?;
        let output = self
            .exec(&[
                "query",
                "wasm",
                "contract-state",
                "smart",
                contract,
                msg.as_str(),
                "-o",
                "json",
            ])
            .await?;

        let mut response: serde_json::Value = serde_json::from_str(output.trim())?;
        Ok(response
            .get_mut("data")
            .map(serde_json::Value::take)
            .unwrap_or_default())
    }

    async fn query_balance(&self, address: &str, denom: &str) -> Result<u128> {
        let response: BalanceResponse = self
            .get_json(
                &format!("cosmos/bank/v1beta1/balances/{}/by_denom", address),
                &[("denom", denom)],
            )
            .await?;

        match response.balance {
            Some(coin) => coin
                .amount
                .parse()
                .map_err(|_| MigrationError::Query(format!("invalid amount '{}'", coin.amount))),
            None => Ok(0),
        }
    }

    async fn list_channels(&self) -> Result<Vec<Channel>> {
        let response: ChannelsResponse = self
            .get_json(
                "ibc/core/channel/v1/channels",
                &[("pagination.limit", "1000")],
            )
            .await?;

        Ok(response
            .channels
            .into_iter()
            .map(|c| Channel {
                channel_id: c.channel_id,
                port_id: c.port_id,
                state: c.state,
                counterparty_port_id: c.counterparty.port_id,
                counterparty_channel_id: c.counterparty.channel_id,
            })
            .collect())
    }

    async fn create_denom(&self, subdenom: &str) -> Result<String> {
        info!("Creating denom {} on {}", subdenom, self.chain_id);
        let tx = self
            .broadcast(&["tokenfactory", "create-denom", subdenom])
            .await?;

        Ok(tx
            .event_attribute("create_denom", "new_token_denom")
            .unwrap_or_else(|| factory_denom(&self.address, subdenom)))
    }

    async fn mint(&self, denom: &str, amount: u128) -> Result<()> {
        info!("Minting {}{} on {}", amount, denom, self.chain_id);
        let coin = Coin::new(amount, denom).to_string();
        self.broadcast(&["tokenfactory", "mint", coin.as_str()]).await?;
        Ok(())
    }

    async fn send(&self, to: &str, coins: &[Coin]) -> Result<()> {
        let amount = join_coins(coins);
        debug!("Sending {} to {} on {}", amount, to, self.chain_id);
        self.broadcast(&["bank", "send", self.key_name.as_str(), to, amount.as_str()])
            .await?;
        Ok(())
    }

    async fn ibc_transfer(&self, channel: &str, coin: &Coin, receiver: &str) -> Result<()> {
        debug!(
            "IBC transfer {} over {} to {} from {}",
            coin, channel, receiver, self.chain_id
        );
        let amount = coin.to_string();
        self.broadcast(&[
            "ibc-transfer",
            "transfer",
            "transfer",
            channel,
            receiver,
            amount.as_str(),
        ])
        .await?;
        Ok(())
    }
}

fn join_coins(coins: &[Coin]) -> String {
    coins
        .iter()
        .map(Coin::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// --- Response Types ---

#[derive(Debug, Clone, Deserialize)]
struct TxResponse {
    #[serde(default)]
    height: String,
    txhash: String,
    #[serde(default)]
    code: u32,
    #[serde(default)]
    raw_log: String,
    #[serde(default)]
    events: Vec<TxEvent>,
}

impl TxResponse {
    fn event_attribute(&self, event_type: &str, key: &str) -> Option<String> {
        self.events
            .iter()
            .filter(|e| e.type_ == event_type)
            .flat_map(|e| e.attributes.iter())
            .find(|a| a.key == key)
            .map(|a| a.value.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TxEvent {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    attributes: Vec<TxAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
struct TxAttribute {
    key: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceResponse {
    balance: Option<LcdCoin>,
}

#[derive(Debug, Clone, Deserialize)]
struct LcdCoin {
    amount: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChannelsResponse {
    channels: Vec<LcdChannel>,
}

#[derive(Debug, Clone, Deserialize)]
struct LcdChannel {
    #[serde(default)]
    state: String,
    counterparty: LcdCounterparty,
    port_id: String,
    channel_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LcdCounterparty {
    port_id: String,
    #[serde(default)]
    channel_id: String,
}
