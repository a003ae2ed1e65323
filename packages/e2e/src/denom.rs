//! IBC denom derivation
//!
//! A token arriving over IBC is known on the receiving chain as
//! `ibc/<HASH>`, where `HASH` is the uppercase hex SHA-256 of its trace path
//! `transfer/<channel>/<base_denom>`. The channel is the one on the
//! receiving side of the path. The result must match the chain's own
//! derivation byte for byte, so inputs are hashed exactly as given.

use sha2::{Digest, Sha256};

/// Port used by ICS20 on the receiving side of every path in this migration
pub const TRANSFER_PORT: &str = "transfer";

/// Compute the IBC denom for `base_denom` received over `channel`
///
/// Inputs are not validated: empty strings hash like any other input.
pub fn derive_ibc_denom(channel: &str, base_denom: &str) -> String {
    let trace = format!("{}/{}/{}", TRANSFER_PORT, channel, base_denom);
    let digest = Sha256::digest(trace.as_bytes());
    format!("ibc/{}", hex::encode_upper(digest))
}

/// Base denom the CW20-ICS20 bridge uses for a CW20 contract
pub fn cw20_denom(contract: &str) -> String {
    format!("cw20:{}", contract)
}

/// Full token-factory denom for `subdenom` created by `owner`
pub fn factory_denom(owner: &str, subdenom: &str) -> String {
    format!("factory/{}/{}", owner, subdenom)
}
