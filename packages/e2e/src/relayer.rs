//! IBC relayer interface and the Hermes implementation
//!
//! Channel creation is fire-and-observe: callers learn the new channel ids
//! by listing channels on each chain afterwards.

use crate::config::RelayerConfig;
use crate::error::Result;
use crate::utils::run_command;
use async_trait::async_trait;
use tracing::info;

#[async_trait]
pub trait Relayer: Send + Sync {
    /// Open a channel between `port_a` on `chain_a` and `port_b` on `chain_b`
    async fn create_channel(
        &self,
        chain_a: &str,
        port_a: &str,
        chain_b: &str,
        port_b: &str,
    ) -> Result<()>;
}

/// Hermes running in its own container
pub struct HermesRelayer {
    container: String,
    binary: String,
    channel_version: String,
}

impl HermesRelayer {
    pub fn new(config: &RelayerConfig) -> Self {
        Self {
            container: config.container.clone(),
            binary: config.binary.clone(),
            channel_version: config.channel_version.clone(),
        }
    }

    fn create_channel_args<'a>(
        &'a self,
        chain_a: &'a str,
        port_a: &'a str,
        chain_b: &'a str,
        port_b: &'a str,
    ) -> Vec<&'a str> {
        vec![
            "exec",
            self.container.as_str(),
            self.binary.as_str(),
            "create",
            "channel",
            "--a-chain",
            chain_a,
            "--new-client-connection",
            "--b-chain",
            chain_b,
            "--a-port",
            port_a,
            "--b-port",
            port_b,
            "--chan-version",
            self.channel_version.as_str(),
            "--yes",
        ]
    }
}

#[async_trait]
impl Relayer for HermesRelayer {
    async fn create_channel(
        &self,
        chain_a: &str,
        port_a: &str,
        chain_b: &str,
        port_b: &str,
    ) -> Result<()> {
        info!(
            "Creating channel {}:{} <> {}:{}",
            chain_a, port_a, chain_b, port_b
        );
        let args = self.create_channel_args(chain_a, port_a, chain_b, port_b);
        run_command("docker", &args).await?;
        Ok(())
    }
}
