//! Balance reads, delta assertions and the transactions scenarios share

use super::{ScenarioContext, SETUP_AMOUNT};
use crate::chain::{ChainClient, Coin};
use crate::error::{MigrationError, Result};
use crate::utils::{attempt_best_effort, poll_until};
use base64::Engine;
use eyre::{ensure, eyre};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Mutex;
use tracing::{debug, info};

/// CW20 balance of `address` on `token`
pub async fn cw20_balance(chain: &dyn ChainClient, token: &str, address: &str) -> Result<u128> {
    let response = chain
        .query_contract(token, &json!({ "balance": { "address": address } }))
        .await?;
    parse_amount(&response, "balance")
}

pub async fn cw20_total_supply(chain: &dyn ChainClient, token: &str) -> Result<u128> {
    let response = chain
        .query_contract(token, &json!({ "token_info": {} }))
        .await?;
    parse_amount(&response, "total_supply")
}

/// Read a Uint128 (JSON string) field from a contract response
fn parse_amount(response: &Value, field: &str) -> Result<u128> {
    response
        .get(field)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| MigrationError::Query(format!("no `{}` amount in {}", field, response)))
}

/// Check that a balance moved by exactly `expected`
pub fn assert_delta(label: &str, before: u128, after: u128, expected: i128) -> eyre::Result<()> {
    let signed = |balance: u128| {
        i128::try_from(balance).map_err(|_| eyre!("{}: balance {} out of range", label, balance))
    };
    let actual = signed(after)? - signed(before)?;
    ensure!(
        actual == expected,
        "{}: expected {:+}, got {:+} (before {}, after {})",
        label,
        expected,
        actual,
        before,
        after
    );
    debug!("{} moved by {:+}", label, actual);
    Ok(())
}

/// Base64 JSON payload for a CW20 `send` hook
pub fn encode_hook(msg: &Value) -> String {
    base64::engine::general_purpose::STANDARD.encode(msg.to_string())
}

impl ScenarioContext<'_> {
    /// Poll `read` until it returns something other than `before`
    pub async fn wait_for_change<F, Fut>(&self, description: &str, before: u128, read: F) -> Result<u128>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<u128>>,
    {
        let latest = Mutex::new(before);
        let slot = &latest;
        let read = &read;

        poll_until(
            description,
            move || async move {
                let now = read().await?;
                if let Ok(mut guard) = slot.lock() {
                    *guard = now;
                }
                Ok(now != before)
            },
            self.chains.timing.relay_timeout,
            self.chains.timing.poll_interval,
        )
        .await?;

        Ok(latest.into_inner().unwrap_or(before))
    }

    /// Convert legacy CW20 to the native asset through the hub converter
    pub async fn convert_on_hub(&self, amount: u128) -> Result<()> {
        let msg = json!({
            "send": {
                "contract": self.migrated.converters.a,
                "amount": amount.to_string(),
                "msg": encode_hook(&json!({})),
            }
        });
        self.hub()
            .execute(&self.migrated.legacy.token, &msg, &[])
            .await
    }

    /// Convert bridged legacy tokens to the native asset on the outpost
    pub async fn convert_on_outpost(&self, amount: u128) -> Result<()> {
        let funds = [Coin::new(amount, &self.migrated.legacy_path.denom_on_b)];
        self.outpost()
            .execute(&self.migrated.converters.b, &json!({ "convert": {} }), &funds)
            .await
    }

    /// Send legacy CW20 from the hub signer to the outpost through the bridge
    pub async fn legacy_transfer_to_outpost(&self, amount: u128, receiver: &str) -> Result<()> {
        let hook = json!({
            "channel": self.migrated.legacy_path.channel_a,
            "remote_address": receiver,
        });
        let msg = json!({
            "send": {
                "contract": self.migrated.legacy.bridge,
                "amount": amount.to_string(),
                "msg": encode_hook(&hook),
            }
        });
        self.hub()
            .execute(&self.migrated.legacy.token, &msg, &[])
            .await
    }

    /// Return bridged legacy tokens from the outpost signer to the hub
    pub async fn legacy_transfer_to_hub(&self, amount: u128, receiver: &str) -> Result<()> {
        let coin = Coin::new(amount, &self.migrated.legacy_path.denom_on_b);
        self.outpost()
            .ibc_transfer(&self.migrated.legacy_path.channel_b, &coin, receiver)
            .await
    }

    /// Bridge legacy CW20 to the outpost signer and wait for it to land
    pub async fn prime_outpost_legacy(&self, amount: u128) -> Result<()> {
        let outpost = self.outpost();
        let signer = outpost.address();
        let denom = self.migrated.legacy_path.denom_on_b.as_str();

        let before = outpost.query_balance(signer, denom).await?;
        self.legacy_transfer_to_outpost(amount, signer).await?;
        self.wait_for_change("legacy tokens on the outpost", before, move || {
            outpost.query_balance(signer, denom)
        })
        .await?;
        Ok(())
    }

    /// Make sure the outpost signer holds at least `needed` bridged legacy tokens
    ///
    /// Bridges [`SETUP_AMOUNT`] when short. Once the bridge is disabled the
    /// transfer is rejected and skipped, leaving the caller's own check to fail.
    pub async fn ensure_outpost_legacy(&self, needed: u128) -> Result<()> {
        let outpost = self.outpost();
        let held = outpost
            .query_balance(outpost.address(), &self.migrated.legacy_path.denom_on_b)
            .await?;
        if held >= needed {
            debug!("Outpost already holds {} legacy tokens", held);
            return Ok(());
        }
        attempt_best_effort(
            "legacy transfer to the outpost",
            self.prime_outpost_legacy(SETUP_AMOUNT),
        )
        .await
    }

    /// Give the outpost converter native liquidity to pay conversions with
    pub async fn fund_outpost_converter(&self, amount: u128) -> Result<()> {
        let coin = Coin::new(amount, &self.migrated.native.denom);
        self.outpost()
            .send(&self.migrated.converters.b, &[coin])
            .await
    }

    /// Migrate the legacy bridge to the build that refuses outgoing transfers
    pub async fn disable_bridge(&self) -> Result<()> {
        let hub = self.hub();
        let code_id = hub.store_code(&self.artifacts.cw20_ics20_disabled()).await?;
        hub.migrate(&self.migrated.legacy.bridge, code_id, &json!({}))
            .await?;
        info!("Legacy bridge {} migrated to code {}", self.migrated.legacy.bridge, code_id);
        Ok(())
    }

    /// Fund the outpost converter with fee tokens for its IBC sends
    pub async fn fund_converter_fees(&self, amount: u128) -> Result<()> {
        let outpost = self.outpost();
        let coin = Coin::new(amount, outpost.fee_denom());
        outpost.send(&self.migrated.converters.b, &[coin]).await
    }
}
