//! Legacy to native conversion on both chains

use super::helpers::{assert_delta, cw20_balance};
use super::{conclude, ScenarioContext, CHECK_AMOUNT, SETUP_AMOUNT};
use crate::chain::Coin;
use crate::error::Result;
use crate::utils::attempt_best_effort;
use crate::TestResult;

/// Converting legacy CW20 on the hub pays out the bridged native asset 1:1
pub async fn convert_on_hub(ctx: &ScenarioContext<'_>) -> TestResult {
    conclude("convert_on_hub", check_convert_on_hub(ctx)).await
}

/// Converting bridged legacy tokens on the outpost pays out the native asset 1:1
pub async fn convert_on_outpost(ctx: &ScenarioContext<'_>) -> TestResult {
    conclude("convert_on_outpost", check_convert_on_outpost(ctx)).await
}

/// Give both converters native liquidity to pay conversions with
async fn top_up_converters(ctx: &ScenarioContext<'_>) -> eyre::Result<()> {
    let coin = Coin::new(SETUP_AMOUNT, &ctx.migrated.native.denom);

    attempt_best_effort(
        "native transfer to the hub converter",
        fund_hub_converter(ctx, &coin),
    )
    .await?;
    ctx.fund_outpost_converter(SETUP_AMOUNT).await?;
    Ok(())
}

/// IBC the native asset to the hub converter and wait for it to land
async fn fund_hub_converter(ctx: &ScenarioContext<'_>, coin: &Coin) -> Result<()> {
    let hub = ctx.hub();
    let native = &ctx.migrated.native;
    let converter = ctx.migrated.converters.a.as_str();
    let denom = native.denom_on_a.as_str();

    let before = hub.query_balance(converter, denom).await?;
    ctx.outpost()
        .ibc_transfer(&native.channel_b, coin, converter)
        .await?;
    ctx.wait_for_change("native asset on the hub converter", before, move || {
        hub.query_balance(converter, denom)
    })
    .await?;
    Ok(())
}

async fn check_convert_on_hub(ctx: &ScenarioContext<'_>) -> eyre::Result<()> {
    top_up_converters(ctx).await?;

    let hub = ctx.hub();
    let signer = hub.address();
    let token = &ctx.migrated.legacy.token;
    let new_denom = &ctx.migrated.native.denom_on_a;

    let native_before = hub.query_balance(signer, new_denom).await?;
    let legacy_before = cw20_balance(hub, token, signer).await?;

    ctx.convert_on_hub(CHECK_AMOUNT).await?;

    let native_after = hub.query_balance(signer, new_denom).await?;
    let legacy_after = cw20_balance(hub, token, signer).await?;

    assert_delta("hub native balance", native_before, native_after, CHECK_AMOUNT as i128)?;
    assert_delta("hub cw20 balance", legacy_before, legacy_after, -(CHECK_AMOUNT as i128))?;
    Ok(())
}

async fn check_convert_on_outpost(ctx: &ScenarioContext<'_>) -> eyre::Result<()> {
    ctx.ensure_outpost_legacy(CHECK_AMOUNT).await?;
    top_up_converters(ctx).await?;

    let outpost = ctx.outpost();
    let signer = outpost.address();
    let new_denom = &ctx.migrated.native.denom;
    let old_denom = &ctx.migrated.legacy_path.denom_on_b;

    let new_before = outpost.query_balance(signer, new_denom).await?;
    let old_before = outpost.query_balance(signer, old_denom).await?;

    ctx.convert_on_outpost(CHECK_AMOUNT).await?;

    let new_after = outpost.query_balance(signer, new_denom).await?;
    let old_after = outpost.query_balance(signer, old_denom).await?;

    assert_delta("outpost native balance", new_before, new_after, CHECK_AMOUNT as i128)?;
    assert_delta("outpost legacy balance", old_before, old_after, -(CHECK_AMOUNT as i128))?;
    Ok(())
}
