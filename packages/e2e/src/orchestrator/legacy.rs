//! Legacy token, bridge and channel on the hub

use super::stages::{LegacyContracts, LegacyDeployed, LegacyLinked, LegacyPath};
use super::MigrationOrchestrator;
use crate::denom::{cw20_denom, derive_ibc_denom, TRANSFER_PORT};
use crate::error::Result;
use serde_json::json;
use tracing::info;

impl MigrationOrchestrator {
    /// Deploy the CW20 token and the CW20-ICS20 bridge allowing it
    pub(super) async fn deploy_legacy_contracts(&self) -> Result<LegacyDeployed> {
        let hub = self.ctx.hub.as_ref();
        let token_config = &self.token;

        let token_msg = json!({
            "name": token_config.name,
            "symbol": token_config.symbol,
            "decimals": token_config.decimals,
            "initial_balances": [{
                "address": hub.address(),
                "amount": token_config.initial_balance.to_string(),
            }],
        });
        let token = self
            .deploy_contract(hub, "cw20_oro", &self.artifacts.cw20_token(), &token_msg)
            .await?;

        let bridge_msg = json!({
            "default_timeout": token_config.bridge_timeout_secs,
            "gov_contract": hub.address(),
            "allowlist": [{"contract": token}],
        });
        let bridge = self
            .deploy_contract(hub, "cw20_ics20", &self.artifacts.cw20_ics20(), &bridge_msg)
            .await?;

        Ok(LegacyDeployed::new(LegacyContracts { token, bridge }))
    }

    /// Open `wasm.<bridge>` <> `transfer` and derive the legacy denom on the outpost
    pub(super) async fn establish_legacy_channel(
        &self,
        deployed: LegacyDeployed,
    ) -> Result<LegacyLinked> {
        let bridge_port = format!("wasm.{}", deployed.legacy.bridge);
        let (channel_a, channel_b) = self.open_channel(&bridge_port, TRANSFER_PORT).await?;

        let denom_on_b = derive_ibc_denom(
            &channel_b.channel_id,
            &cw20_denom(&deployed.legacy.token),
        );
        info!(
            "Legacy token on {} for path transfer/{}: {}",
            self.ctx.outpost.chain_id(),
            channel_b.channel_id,
            denom_on_b
        );

        Ok(deployed.link(LegacyPath {
            channel_a: channel_a.channel_id,
            channel_b: channel_b.channel_id,
            denom_on_b,
        }))
    }
}
