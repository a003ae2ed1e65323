//! Returning collected legacy tokens to the hub and burning them

use super::helpers::{assert_delta, cw20_balance, cw20_total_supply};
use super::{conclude, ScenarioContext, BURN_CONVERT_AMOUNT, CONVERTER_FEE_TOP_UP, SETUP_AMOUNT};
use crate::TestResult;
use eyre::ensure;
use serde_json::json;

/// The outpost converter ships every collected legacy token back to the hub
pub async fn transfer_for_burning(ctx: &ScenarioContext<'_>) -> TestResult {
    conclude("transfer_for_burning", check_transfer_for_burning(ctx)).await
}

/// Burning on the hub removes exactly the converter's balance from supply
pub async fn burn_accounting(ctx: &ScenarioContext<'_>) -> TestResult {
    conclude("burn_accounting", check_burn_accounting(ctx)).await
}

/// Leave legacy tokens in the outpost converter and fund its IBC fees
async fn collect_on_outpost(ctx: &ScenarioContext<'_>) -> eyre::Result<()> {
    ctx.ensure_outpost_legacy(BURN_CONVERT_AMOUNT).await?;
    ctx.fund_outpost_converter(SETUP_AMOUNT).await?;
    ctx.convert_on_outpost(BURN_CONVERT_AMOUNT).await?;
    ctx.fund_converter_fees(CONVERTER_FEE_TOP_UP).await?;
    Ok(())
}

async fn send_for_burning(ctx: &ScenarioContext<'_>) -> crate::error::Result<()> {
    ctx.outpost()
        .execute(
            &ctx.migrated.converters.b,
            &json!({ "transfer_for_burning": {} }),
            &[],
        )
        .await
}

async fn check_transfer_for_burning(ctx: &ScenarioContext<'_>) -> eyre::Result<()> {
    collect_on_outpost(ctx).await?;

    let outpost = ctx.outpost();
    let converter = &ctx.migrated.converters.b;
    let legacy_denom = &ctx.migrated.legacy_path.denom_on_b;

    let before = outpost.query_balance(converter, legacy_denom).await?;
    ensure!(before > 0, "outpost converter holds no legacy tokens to send");

    send_for_burning(ctx).await?;

    let after = outpost.query_balance(converter, legacy_denom).await?;
    ensure!(
        after == 0,
        "outpost converter still holds {} legacy tokens",
        after
    );
    Ok(())
}

async fn check_burn_accounting(ctx: &ScenarioContext<'_>) -> eyre::Result<()> {
    let hub = ctx.hub();
    let token = ctx.migrated.legacy.token.as_str();
    let converter = ctx.migrated.converters.a.as_str();

    collect_on_outpost(ctx).await?;
    let arrived_before = cw20_balance(hub, token, converter).await?;
    send_for_burning(ctx).await?;
    ctx.wait_for_change("legacy tokens on the hub converter", arrived_before, move || {
        cw20_balance(hub, token, converter)
    })
    .await?;

    let balance_before = cw20_balance(hub, token, converter).await?;
    ensure!(balance_before > 0, "hub converter holds no legacy tokens to burn");
    let supply_before = cw20_total_supply(hub, token).await?;

    hub.execute(converter, &json!({ "burn": {} }), &[]).await?;

    let balance_after = cw20_balance(hub, token, converter).await?;
    let supply_after = cw20_total_supply(hub, token).await?;

    ensure!(
        balance_after == 0,
        "hub converter still holds {} legacy tokens",
        balance_after
    );
    assert_delta(
        "cw20 total supply",
        supply_before,
        supply_after,
        -i128::try_from(balance_before)?,
    )?;
    Ok(())
}
