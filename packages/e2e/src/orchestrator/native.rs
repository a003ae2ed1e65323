//! Token-factory asset on the outpost and its transfer path to the hub

use super::stages::{LegacyLinked, NativeAsset, NativeIssued};
use super::MigrationOrchestrator;
use crate::denom::{derive_ibc_denom, TRANSFER_PORT};
use crate::error::Result;
use tracing::info;

impl MigrationOrchestrator {
    pub(super) async fn mint_native_asset(&self, linked: LegacyLinked) -> Result<NativeIssued> {
        let outpost = self.ctx.outpost.as_ref();

        let denom = outpost.create_denom(&self.token.subdenom).await?;
        outpost.mint(&denom, self.token.native_supply).await?;
        info!("Minted {}{} on {}", self.token.native_supply, denom, outpost.chain_id());

        let (channel_a, channel_b) = self.open_channel(TRANSFER_PORT, TRANSFER_PORT).await?;

        let denom_on_a = derive_ibc_denom(&channel_a.channel_id, &denom);
        info!(
            "Native asset on {} for path transfer/{}: {}",
            self.ctx.hub.chain_id(),
            channel_a.channel_id,
            denom_on_a
        );

        Ok(linked.issue(NativeAsset {
            denom,
            channel_a: channel_a.channel_id,
            channel_b: channel_b.channel_id,
            denom_on_a,
        }))
    }
}
