//! In-memory chains and relayer for unit tests
//!
//! Both fake chains share one [`Network`]. Without a wired migration they
//! only record calls and hand out addresses; [`devnet`] wires the contracts
//! of a completed migration so conversions, bridge transfers and burns move
//! balances the way the deployed contracts do. Packets are relayed
//! instantly unless the relay is stalled.

use crate::chain::{ChainClient, ChainContext, Coin};
use crate::channel::Channel;
use crate::config::{ArtifactsConfig, TimingConfig, TokenConfig};
use crate::denom::factory_denom;
use crate::error::{MigrationError, Result};
use crate::orchestrator::{
    Converters, LegacyContracts, LegacyDeployed, LegacyPath, Migrated, MigrationOrchestrator,
    NativeAsset,
};
use crate::record::MigrationStore;
use crate::relayer::Relayer;
use crate::scenarios::ScenarioContext;
use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub(crate) const HUB_SIGNER: &str = "terra1signer";
pub(crate) const OUTPOST_SIGNER: &str = "neutron1signer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    Hub,
    Outpost,
}

#[derive(Default)]
struct ChainState {
    calls: Vec<String>,
    channels: Vec<Channel>,
    instantiated: HashMap<String, Value>,
    code_stems: HashMap<u64, String>,
    contracts: u64,
    fail_store: HashSet<String>,
    fail_instantiate: HashSet<String>,
    rejected: HashSet<String>,
}

/// Effect of an IBC packet on the receiving chain
#[derive(Clone)]
enum Packet {
    Bank {
        side: Side,
        address: String,
        denom: String,
        amount: u128,
    },
    /// Release of escrowed CW20 by the legacy bridge
    Unescrow {
        from: String,
        to: String,
        amount: u128,
    },
}

#[derive(Default, Clone)]
struct Ledger {
    bank: HashMap<(Side, String, String), u128>,
    cw20: HashMap<String, u128>,
    cw20_supply: u128,
    /// Packets with the number of queries left before they land
    in_flight: Vec<(u32, Packet)>,
}

#[derive(Default)]
struct Network {
    hub: ChainState,
    outpost: ChainState,
    ledger: Ledger,
    migrated: Option<Migrated>,
    bridge_disabled: bool,
    payout_shortfall: u128,
    relay_stalled: bool,
    relay_lag: u32,
}

type Raw<T = ()> = std::result::Result<T, String>;

impl Network {
    fn state(&mut self, side: Side) -> &mut ChainState {
        match side {
            Side::Hub => &mut self.hub,
            Side::Outpost => &mut self.outpost,
        }
    }

    fn balance(&self, side: Side, address: &str, denom: &str) -> u128 {
        self.ledger
            .bank
            .get(&(side, address.to_string(), denom.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn credit(&mut self, side: Side, address: &str, denom: &str, amount: u128) {
        *self
            .ledger
            .bank
            .entry((side, address.to_string(), denom.to_string()))
            .or_insert(0) += amount;
    }

    fn debit(&mut self, side: Side, address: &str, denom: &str, amount: u128) -> Raw {
        let balance = self.balance(side, address, denom);
        if balance < amount {
            return Err(format!(
                "insufficient funds: {}{} < {}{}",
                balance, denom, amount, denom
            ));
        }
        self.ledger
            .bank
            .insert((side, address.to_string(), denom.to_string()), balance - amount);
        Ok(())
    }

    fn cw20_balance(&self, address: &str) -> u128 {
        self.ledger.cw20.get(address).copied().unwrap_or(0)
    }

    fn cw20_move(&mut self, from: &str, to: &str, amount: u128) -> Raw {
        let balance = self.cw20_balance(from);
        if balance < amount {
            return Err(format!("cw20 overflow: {} < {}", balance, amount));
        }
        self.ledger.cw20.insert(from.to_string(), balance - amount);
        *self.ledger.cw20.entry(to.to_string()).or_insert(0) += amount;
        Ok(())
    }

    /// Send a packet; it lands after `relay_lag` queries, or never when stalled
    fn relay(&mut self, packet: Packet) {
        if self.relay_stalled {
            return;
        }
        if self.relay_lag == 0 {
            self.deliver(packet);
        } else {
            self.ledger.in_flight.push((self.relay_lag, packet));
        }
    }

    fn deliver(&mut self, packet: Packet) {
        match packet {
            Packet::Bank {
                side,
                address,
                denom,
                amount,
            } => self.credit(side, &address, &denom, amount),
            // An unescrow the bridge cannot cover fails its ack and moves nothing
            Packet::Unescrow { from, to, amount } => {
                let _ = self.cw20_move(&from, &to, amount);
            }
        }
    }

    /// Advance in-flight packets by one query
    fn tick(&mut self) {
        let (landed, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.ledger.in_flight)
            .into_iter()
            .map(|(left, packet)| (left.saturating_sub(1), packet))
            .partition(|(left, _)| *left == 0);
        self.ledger.in_flight = pending;
        for (_, packet) in landed {
            self.deliver(packet);
        }
    }

    /// Apply `op` and roll the ledger back when it is rejected
    fn transact<T>(&mut self, op: impl FnOnce(&mut Self) -> Raw<T>) -> Raw<T> {
        let snapshot = self.ledger.clone();
        let result = op(self);
        if result.is_err() {
            self.ledger = snapshot;
        }
        result
    }

    fn execute(
        &mut self,
        side: Side,
        sender: &str,
        contract: &str,
        msg: &Value,
        funds: &[Coin],
    ) -> Raw {
        for coin in funds {
            self.debit(side, sender, &coin.denom, coin.amount)?;
            self.credit(side, contract, &coin.denom, coin.amount);
        }

        let Some(m) = self.migrated.clone() else {
            return Ok(());
        };

        match (side, msg_name(msg)) {
            (Side::Hub, "send") if contract == m.legacy.token => {
                let send = &msg["send"];
                let target = send["contract"].as_str().unwrap_or_default();
                let amount = parse_amount(&send["amount"])?;

                if target == m.legacy.bridge {
                    if self.bridge_disabled {
                        return Err("outgoing transfers are disabled".to_string());
                    }
                    let hook = decode_hook(&send["msg"])?;
                    if hook["channel"] != m.legacy_path.channel_a.as_str() {
                        return Err(format!("unknown channel {}", hook["channel"]));
                    }
                    let receiver = hook["remote_address"].as_str().unwrap_or_default();
                    self.cw20_move(sender, &m.legacy.bridge, amount)?;
                    self.relay(Packet::Bank {
                        side: Side::Outpost,
                        address: receiver.to_string(),
                        denom: m.legacy_path.denom_on_b.clone(),
                        amount,
                    });
                } else if target == m.converters.a {
                    self.cw20_move(sender, &m.converters.a, amount)?;
                    let payout = amount.saturating_sub(self.payout_shortfall);
                    self.debit(Side::Hub, &m.converters.a, &m.native.denom_on_a, payout)?;
                    self.credit(Side::Hub, sender, &m.native.denom_on_a, payout);
                } else {
                    self.cw20_move(sender, target, amount)?;
                }
                Ok(())
            }
            (Side::Hub, "burn") if contract == m.converters.a => {
                let burned = self.ledger.cw20.remove(&m.converters.a).unwrap_or(0);
                self.ledger.cw20_supply -= burned;
                Ok(())
            }
            (Side::Outpost, "convert") if contract == m.converters.b => {
                let amount = match funds {
                    [coin] if coin.denom == m.legacy_path.denom_on_b => coin.amount,
                    _ => return Err("invalid funds".to_string()),
                };
                let payout = amount.saturating_sub(self.payout_shortfall);
                self.debit(Side::Outpost, &m.converters.b, &m.native.denom, payout)?;
                self.credit(Side::Outpost, sender, &m.native.denom, payout);
                Ok(())
            }
            (Side::Outpost, "transfer_for_burning") if contract == m.converters.b => {
                if self.balance(Side::Outpost, &m.converters.b, "untrn") == 0 {
                    return Err("converter cannot pay IBC fees".to_string());
                }
                let collected = self.balance(Side::Outpost, &m.converters.b, &m.legacy_path.denom_on_b);
                if collected == 0 {
                    return Err("nothing to transfer".to_string());
                }
                self.debit(Side::Outpost, &m.converters.b, &m.legacy_path.denom_on_b, collected)?;
                self.relay(Packet::Unescrow {
                    from: m.legacy.bridge.clone(),
                    to: m.converters.a.clone(),
                    amount: collected,
                });
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn ibc_transfer(
        &mut self,
        side: Side,
        sender: &str,
        channel: &str,
        coin: &Coin,
        receiver: &str,
    ) -> Raw {
        self.debit(side, sender, &coin.denom, coin.amount)?;

        let Some(m) = self.migrated.clone() else {
            return Ok(());
        };
        if side != Side::Outpost {
            return Err("hub transfers go through the legacy bridge".to_string());
        }

        if channel == m.legacy_path.channel_b && coin.denom == m.legacy_path.denom_on_b {
            self.relay(Packet::Unescrow {
                from: m.legacy.bridge.clone(),
                to: receiver.to_string(),
                amount: coin.amount,
            });
            Ok(())
        } else if channel == m.native.channel_b && coin.denom == m.native.denom {
            self.relay(Packet::Bank {
                side: Side::Hub,
                address: receiver.to_string(),
                denom: m.native.denom_on_a.clone(),
                amount: coin.amount,
            });
            Ok(())
        } else {
            Err(format!("no route for {} over {}", coin.denom, channel))
        }
    }

    fn query(&self, side: Side, contract: &str, msg: &Value) -> Raw<Value> {
        let token = self.migrated.as_ref().map(|m| m.legacy.token.as_str());
        if side != Side::Hub || token != Some(contract) {
            return Err(format!("no contract {}", contract));
        }

        match msg_name(msg) {
            "balance" => {
                let address = msg["balance"]["address"].as_str().unwrap_or_default();
                Ok(json!({ "balance": self.cw20_balance(address).to_string() }))
            }
            "token_info" => Ok(json!({
                "name": "Oro Token",
                "symbol": "ORO",
                "decimals": 6,
                "total_supply": self.ledger.cw20_supply.to_string(),
            })),
            other => Err(format!("unsupported query {}", other)),
        }
    }
}

fn msg_name(msg: &Value) -> &str {
    msg.as_object()
        .and_then(|o| o.keys().next())
        .map(String::as_str)
        .unwrap_or_default()
}

fn parse_amount(value: &Value) -> Raw<u128> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| format!("invalid amount {}", value))
}

fn decode_hook(value: &Value) -> Raw<Value> {
    let encoded = value.as_str().unwrap_or_default();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}

/// One side of the fake network
pub(crate) struct FakeChain {
    side: Side,
    chain_id: String,
    address: String,
    fee_denom: String,
    prefix: String,
    net: Arc<Mutex<Network>>,
}

impl FakeChain {
    /// Hub and outpost sharing a fresh network
    pub(crate) fn pair() -> (Arc<FakeChain>, Arc<FakeChain>) {
        let net = Arc::new(Mutex::new(Network::default()));
        let hub = FakeChain {
            side: Side::Hub,
            chain_id: "localterra-1".to_string(),
            address: HUB_SIGNER.to_string(),
            fee_denom: "uluna".to_string(),
            prefix: "terra".to_string(),
            net: net.clone(),
        };
        let outpost = FakeChain {
            side: Side::Outpost,
            chain_id: "localneutron-1".to_string(),
            address: OUTPOST_SIGNER.to_string(),
            fee_denom: "untrn".to_string(),
            prefix: "neutron".to_string(),
            net,
        };
        (Arc::new(hub), Arc::new(outpost))
    }

    fn lock(&self) -> MutexGuard<'_, Network> {
        self.net.lock().unwrap()
    }

    fn record_call(&self, call: String) {
        self.lock().state(self.side).calls.push(call);
    }

    fn rejection(&self, raw_log: String) -> MigrationError {
        MigrationError::TransactionFailed {
            chain_id: self.chain_id.clone(),
            raw_log,
        }
    }

    fn check_rejected(&self, op: &str) -> Result<()> {
        if self.lock().state(self.side).rejected.contains(op) {
            return Err(self.rejection(format!("{} rejected", op)));
        }
        Ok(())
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.lock().state(self.side).calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.lock().state(self.side).calls.clear();
    }

    pub(crate) fn add_channel(&self, channel: Channel) {
        self.lock().state(self.side).channels.push(channel);
    }

    pub(crate) fn channel(&self, channel_id: &str) -> Option<Channel> {
        self.lock()
            .state(self.side)
            .channels
            .iter()
            .find(|c| c.channel_id == channel_id)
            .cloned()
    }

    /// Next id the chain would assign to a new channel
    fn next_channel_id(&self) -> String {
        let next = self
            .lock()
            .state(self.side)
            .channels
            .iter()
            .filter_map(Channel::sequence)
            .max()
            .map_or(0, |s| s.saturating_add(1));
        format!("channel-{}", next)
    }

    pub(crate) fn instantiate_msg(&self, label: &str) -> Option<Value> {
        self.lock().state(self.side).instantiated.get(label).cloned()
    }

    /// Reject storing any artifact with this file stem
    pub(crate) fn fail_store(&self, stem: &str) {
        self.lock().state(self.side).fail_store.insert(stem.to_string());
    }

    pub(crate) fn fail_instantiate(&self, label: &str) {
        self.lock()
            .state(self.side)
            .fail_instantiate
            .insert(label.to_string());
    }

    /// Reject a client operation (`ibc_transfer`, `send`) or an execute message by name
    pub(crate) fn reject(&self, op: &str) {
        self.lock().state(self.side).rejected.insert(op.to_string());
    }

    pub(crate) fn fund(&self, address: &str, denom: &str, amount: u128) {
        self.lock().credit(self.side, address, denom, amount);
    }

    pub(crate) fn balance_of(&self, address: &str, denom: &str) -> u128 {
        self.lock().balance(self.side, address, denom)
    }
}

#[async_trait]
impl ChainClient for FakeChain {
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
        let file_name = wasm_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = wasm_path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.record_call(format!("store_code {}", file_name));

        let mut net = self.lock();
        let state = net.state(self.side);
        if state.fail_store.contains(&stem) {
            return Err(self.rejection(format!("failed to store {}", file_name)));
        }
        let code_id = state.code_stems.len() as u64 + 1;
        state.code_stems.insert(code_id, stem);
        Ok(code_id)
    }

    async fn instantiate(&self, code_id: u64, msg: &Value, label: &str) -> Result<String> {
        self.record_call(format!("instantiate {} {}", code_id, label));

        let mut net = self.lock();
        let state = net.state(self.side);
        if state.fail_instantiate.contains(label) {
            return Err(self.rejection(format!("failed to instantiate {}", label)));
        }
        state.contracts += 1;
        state.instantiated.insert(label.to_string(), msg.clone());
        Ok(format!("{}1contract{}", self.prefix, state.contracts))
    }

    async fn migrate(&self, contract: &str, code_id: u64, _msg: &Value) -> Result<()> {
        self.record_call(format!("migrate {} {}", contract, code_id));

        let mut net = self.lock();
        let stem = net.state(self.side).code_stems.get(&code_id).cloned();
        let bridge = net.migrated.as_ref().map(|m| m.legacy.bridge.clone());
        if self.side == Side::Hub
            && bridge.as_deref() == Some(contract)
            && stem.as_deref() == Some("new_cw20_ics20")
        {
            net.bridge_disabled = true;
        }
        Ok(())
    }

    async fn execute(&self, contract: &str, msg: &Value, funds: &[Coin]) -> Result<()> {
        let name = msg_name(msg).to_string();
        self.record_call(format!("execute {} {}", contract, name));
        self.check_rejected(&name)?;

        let side = self.side;
        let sender = self.address.clone();
        self.lock()
            .transact(|net| net.execute(side, &sender, contract, msg, funds))
            .map_err(|raw_log| self.rejection(raw_log))
    }

    async fn query_contract(&self, contract: &str, msg: &Value) -> Result<Value> {
        let mut net = self.lock();
        net.tick();
        let response = net.query(self.side, contract, msg);
        response.map_err(MigrationError::Query)
    }

    async fn query_balance(&self, address: &str, denom: &str) -> Result<u128> {
        let mut net = self.lock();
        net.tick();
        let balance = net.balance(self.side, address, denom);
        Ok(balance)
    }

    async fn list_channels(&self) -> Result<Vec<Channel>> {
        Ok(self.lock().state(self.side).channels.clone())
    }

    async fn create_denom(&self, subdenom: &str) -> Result<String> {
        self.record_call(format!("create_denom {}", subdenom));
        self.check_rejected("create_denom")?;
        Ok(factory_denom(&self.address, subdenom))
    }

    async fn mint(&self, denom: &str, amount: u128) -> Result<()> {
        self.record_call(format!("mint {}", Coin::new(amount, denom)));
        self.check_rejected("mint")?;
        self.fund(&self.address, denom, amount);
        Ok(())
    }

    async fn send(&self, to: &str, coins: &[Coin]) -> Result<()> {
        self.record_call(format!("send {}", to));
        self.check_rejected("send")?;

        let side = self.side;
        let sender = self.address.clone();
        self.lock()
            .transact(|net| {
                for coin in coins {
                    net.debit(side, &sender, &coin.denom, coin.amount)?;
                    net.credit(side, to, &coin.denom, coin.amount);
                }
                Ok(())
            })
            .map_err(|raw_log| self.rejection(raw_log))
    }

    async fn ibc_transfer(&self, channel: &str, coin: &Coin, receiver: &str) -> Result<()> {
        self.record_call(format!("ibc_transfer {} {}", channel, coin));
        self.check_rejected("ibc_transfer")?;

        let side = self.side;
        let sender = self.address.clone();
        self.lock()
            .transact(|net| net.ibc_transfer(side, &sender, channel, coin, receiver))
            .map_err(|raw_log| self.rejection(raw_log))
    }
}

/// Relayer that opens channels on both fakes immediately
pub(crate) struct FakeRelayer {
    hub: Arc<FakeChain>,
    outpost: Arc<FakeChain>,
    stalled: AtomicBool,
}

impl FakeRelayer {
    pub(crate) fn new(hub: Arc<FakeChain>, outpost: Arc<FakeChain>) -> Self {
        Self {
            hub,
            outpost,
            stalled: AtomicBool::new(false),
        }
    }

    /// Accept channel requests without ever completing the handshake
    pub(crate) fn stall(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Relayer for FakeRelayer {
    async fn create_channel(
        &self,
        _chain_a: &str,
        port_a: &str,
        _chain_b: &str,
        port_b: &str,
    ) -> Result<()> {
        if self.stalled.load(Ordering::SeqCst) {
            return Ok(());
        }

        let id_a = self.hub.next_channel_id();
        let id_b = self.outpost.next_channel_id();
        self.hub.add_channel(
            Channel::new(id_a.clone(), port_a).with_counterparty(port_b, id_b.clone()),
        );
        self.outpost
            .add_channel(Channel::new(id_b, port_b).with_counterparty(port_a, id_a));
        Ok(())
    }
}

pub(crate) fn fast_timing() -> TimingConfig {
    TimingConfig {
        poll_interval: Duration::from_millis(1),
        relay_timeout: Duration::from_millis(50),
        tx_timeout: Duration::from_millis(50),
    }
}

/// Orchestrator wired to fresh fakes and a temporary record store
pub(crate) struct Harness {
    pub orchestrator: MigrationOrchestrator,
    pub hub: Arc<FakeChain>,
    pub outpost: Arc<FakeChain>,
    pub relayer: Arc<FakeRelayer>,
    _dir: tempfile::TempDir,
}

pub(crate) fn harness() -> Harness {
    let (hub, outpost) = FakeChain::pair();
    let relayer = Arc::new(FakeRelayer::new(hub.clone(), outpost.clone()));
    let ctx = ChainContext::new(hub.clone(), outpost.clone(), relayer.clone(), fast_timing());

    let dir = tempfile::tempdir().unwrap();
    let store = MigrationStore::new(dir.path().join("migration.json"));
    let orchestrator = MigrationOrchestrator::new(
        ctx,
        store,
        ArtifactsConfig::default(),
        TokenConfig::default(),
    );

    Harness {
        orchestrator,
        hub,
        outpost,
        relayer,
        _dir: dir,
    }
}

pub(crate) fn sample_migrated() -> Migrated {
    LegacyDeployed::new(LegacyContracts {
        token: "terra1token".to_string(),
        bridge: "terra1bridge".to_string(),
    })
    .link(LegacyPath {
        channel_a: "channel-1".to_string(),
        channel_b: "channel-2".to_string(),
        denom_on_b: "ibc/LEGACY".to_string(),
    })
    .issue(NativeAsset {
        denom: factory_denom(OUTPOST_SIGNER, "uoro"),
        channel_a: "channel-3".to_string(),
        channel_b: "channel-4".to_string(),
        denom_on_a: "ibc/NATIVE".to_string(),
    })
    .complete(Converters {
        a: "terra1converter".to_string(),
        b: "neutron1converter".to_string(),
    })
}

/// Migrated network with contracts behaving like the deployed ones
pub(crate) struct Devnet {
    pub ctx: ChainContext,
    pub hub: Arc<FakeChain>,
    pub outpost: Arc<FakeChain>,
    pub migrated: Migrated,
    pub artifacts: ArtifactsConfig,
}

pub(crate) fn devnet() -> Devnet {
    let (hub, outpost) = FakeChain::pair();
    let relayer = Arc::new(FakeRelayer::new(hub.clone(), outpost.clone()));
    let ctx = ChainContext::new(hub.clone(), outpost.clone(), relayer, fast_timing());
    let migrated = sample_migrated();

    {
        let mut net = hub.lock();
        net.migrated = Some(migrated.clone());

        // State right after the orchestrator: the whole CW20 supply with the
        // hub signer, the minted native supply with the outpost signer and
        // nothing bridged yet
        let supply = 1_100_000_000_000_000;
        net.ledger.cw20.insert(HUB_SIGNER.to_string(), supply);
        net.ledger.cw20_supply = supply;

        net.credit(Side::Outpost, OUTPOST_SIGNER, &migrated.native.denom, supply);
        net.credit(Side::Outpost, OUTPOST_SIGNER, "untrn", 1_000_000_000_000);
        net.credit(Side::Hub, HUB_SIGNER, "uluna", 1_000_000_000_000);
    }

    Devnet {
        ctx,
        hub,
        outpost,
        migrated,
        artifacts: ArtifactsConfig::default(),
    }
}

impl Devnet {
    pub(crate) fn scenario_context(&self) -> ScenarioContext<'_> {
        ScenarioContext::new(&self.ctx, &self.migrated, &self.artifacts)
    }

    pub(crate) fn bridge_disabled(&self) -> bool {
        self.hub.lock().bridge_disabled
    }

    /// Make both converters pay out `shortfall` less than they receive
    pub(crate) fn set_payout_shortfall(&self, shortfall: u128) {
        self.hub.lock().payout_shortfall = shortfall;
    }

    /// Stop delivering packets between the chains
    pub(crate) fn stall_relay(&self) {
        self.hub.lock().relay_stalled = true;
    }

    /// Deliver each packet only after `queries` further balance or contract queries
    pub(crate) fn delay_relay(&self, queries: u32) {
        self.hub.lock().relay_lag = queries;
    }

    pub(crate) fn cw20_supply(&self) -> u128 {
        self.hub.lock().ledger.cw20_supply
    }
}
