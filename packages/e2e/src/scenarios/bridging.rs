//! Legacy bridge shutdown

use super::helpers::{assert_delta, cw20_balance};
use super::{conclude, ScenarioContext, CHECK_AMOUNT, SETUP_AMOUNT};
use crate::utils::attempt_best_effort;
use crate::TestResult;
use eyre::bail;
use tracing::info;

/// Legacy tokens can still come home, but no longer leave the hub
///
/// Setup moves legacy tokens to the outpost, waits for them to arrive and
/// migrates the bridge to the disabled build. Both may already have happened
/// in an earlier run.
pub async fn bridging_disabled(ctx: &ScenarioContext<'_>) -> TestResult {
    conclude("bridging_disabled", check_bridging_disabled(ctx)).await
}

async fn check_bridging_disabled(ctx: &ScenarioContext<'_>) -> eyre::Result<()> {
    let hub = ctx.hub();
    let outpost = ctx.outpost();
    let token = ctx.migrated.legacy.token.as_str();

    attempt_best_effort(
        "legacy transfer to the outpost",
        ctx.prime_outpost_legacy(SETUP_AMOUNT),
    )
    .await?;
    attempt_best_effort("legacy bridge migration", ctx.disable_bridge()).await?;

    let before = cw20_balance(hub, token, hub.address()).await?;
    ctx.legacy_transfer_to_hub(CHECK_AMOUNT, hub.address()).await?;
    let after = ctx
        .wait_for_change("legacy tokens returned to the hub", before, move || {
            cw20_balance(hub, token, hub.address())
        })
        .await?;
    assert_delta("hub cw20 balance", before, after, CHECK_AMOUNT as i128)?;

    match ctx
        .legacy_transfer_to_outpost(CHECK_AMOUNT, outpost.address())
        .await
    {
        Ok(()) => bail!("legacy bridge still accepts transfers from the hub"),
        Err(e) if e.is_transaction_failure() => {
            info!("Outgoing legacy transfer rejected as expected: {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
