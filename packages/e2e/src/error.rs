//! Error taxonomy for the migration harness
//!
//! Orchestration phases propagate every variant to the caller. Verification
//! setup steps swallow [`MigrationError::TransactionFailed`] only, see
//! [`crate::utils::attempt_best_effort`].

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    /// A store/instantiate/migrate call for a contract did not produce a usable result
    #[error("Deployment of {contract} failed: {source}")]
    DeploymentFailed {
        contract: String,
        #[source]
        source: Box<MigrationError>,
    },

    #[error("No channels found on {scope}")]
    NoChannelsFound { scope: String },

    /// The chain rejected a transaction (simulation, CheckTx or DeliverTx)
    #[error("Transaction rejected by {chain_id}: {raw_log}")]
    TransactionFailed { chain_id: String, raw_log: String },

    #[error("{what} not observed within {timeout:?}")]
    RelayTimeout { what: String, timeout: Duration },

    #[error("Migration record has no `{0}`; run the phase that produces it first")]
    MissingField(&'static str),

    #[error("Migration record version {found} is newer than supported version {supported}")]
    UnsupportedRecordVersion { found: u32, supported: u32 },

    #[error("Command `{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("Query failed: {0}")]
    Query(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl MigrationError {
    /// Wrap an error raised while deploying `contract`
    pub fn deployment(contract: impl Into<String>, source: MigrationError) -> Self {
        Self::DeploymentFailed {
            contract: contract.into(),
            source: Box::new(source),
        }
    }

    pub fn is_transaction_failure(&self) -> bool {
        matches!(self, Self::TransactionFailed { .. })
    }
}

pub type Result<T, E = MigrationError> = std::result::Result<T, E>;
