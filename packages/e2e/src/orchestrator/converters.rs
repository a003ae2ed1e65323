//! Converter contracts on both chains

use super::stages::{Converters, Migrated, NativeIssued};
use super::MigrationOrchestrator;
use crate::error::Result;
use serde_json::json;

impl MigrationOrchestrator {
    /// Deploy the hub converter, then the outpost converter that forwards
    /// collected legacy tokens back to it for burning
    pub(super) async fn deploy_converters(&self, issued: NativeIssued) -> Result<Migrated> {
        let hub_msg = json!({
            "old_oro_asset_info": {"token": {"contract_addr": issued.legacy.token}},
            "new_oro_denom": issued.native.denom_on_a,
        });
        let converter_a = self
            .deploy_contract(
                self.ctx.hub.as_ref(),
                "converter_a",
                &self.artifacts.hub_converter(),
                &hub_msg,
            )
            .await?;

        let outpost_msg = json!({
            "old_oro_asset_info": {"native_token": {"denom": issued.legacy_path.denom_on_b}},
            "new_oro_denom": issued.native.denom,
            "outpost_burn_params": {
                "terra_burn_addr": converter_a,
                "old_oro_transfer_channel": issued.legacy_path.channel_b,
            },
        });
        let converter_b = self
            .deploy_contract(
                self.ctx.outpost.as_ref(),
                "converter_b",
                &self.artifacts.outpost_converter(),
                &outpost_msg,
            )
            .await?;

        Ok(issued.complete(Converters {
            a: converter_a,
            b: converter_b,
        }))
    }
}
