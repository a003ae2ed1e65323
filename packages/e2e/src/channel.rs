//! IBC channel model and canonical channel selection
//!
//! Repeated devnet runs leave several channels between the same ports. Only
//! the most recently created one is relayed, and a transfer over a stale
//! channel disappears without an on-chain error, so every consumer picks the
//! channel with the highest sequence number.

use crate::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};

/// A channel end as reported by one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: String,
    pub port_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub counterparty_port_id: String,
    #[serde(default)]
    pub counterparty_channel_id: String,
}

impl Channel {
    pub fn new(channel_id: impl Into<String>, port_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            port_id: port_id.into(),
            state: String::new(),
            counterparty_port_id: String::new(),
            counterparty_channel_id: String::new(),
        }
    }

    pub fn with_counterparty(
        mut self,
        port_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        self.counterparty_port_id = port_id.into();
        self.counterparty_channel_id = channel_id.into();
        self
    }

    /// Trailing run of digits in the channel id (`channel-12` -> 12)
    pub fn sequence(&self) -> Option<u64> {
        let id = self.channel_id.as_str();
        let digits_start = id
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        id[digits_start..].parse().ok()
    }
}

/// Pick the channel with the highest sequence number
///
/// Ids without trailing digits rank below every numbered channel.
pub fn select_canonical_channel(channels: Vec<Channel>) -> Result<Channel> {
    channels
        .into_iter()
        .max_by_key(Channel::sequence)
        .ok_or_else(|| MigrationError::NoChannelsFound {
            scope: "empty channel list".to_string(),
        })
}

/// Pick the newest channel on `chain_id` bound to `port_id` whose
/// counterparty is bound to `counterparty_port_id`
pub fn select_for_ports(
    chain_id: &str,
    channels: Vec<Channel>,
    port_id: &str,
    counterparty_port_id: &str,
) -> Result<Channel> {
    let matching: Vec<Channel> = channels
        .into_iter()
        .filter(|c| c.port_id == port_id && c.counterparty_port_id == counterparty_port_id)
        .collect();

    select_canonical_channel(matching).map_err(|_| MigrationError::NoChannelsFound {
        scope: format!(
            "{} for port pair {} <> {}",
            chain_id, port_id, counterparty_port_id
        ),
    })
}

/// Highest sequence among channels on the given port pair, if any
pub fn newest_sequence(channels: &[Channel], port_id: &str, counterparty_port_id: &str) -> Option<u64> {
    channels
        .iter()
        .filter(|c| c.port_id == port_id && c.counterparty_port_id == counterparty_port_id)
        .filter_map(Channel::sequence)
        .max()
}
