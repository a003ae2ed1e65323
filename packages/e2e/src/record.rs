//! Persisted migration record
//!
//! Each orchestration phase writes the addresses, channels and denoms it
//! produced into a [`MigrationRecord`] and saves it before the next phase
//! starts. Verification runs (often a separate process, days later) load the
//! same file read-only.

use crate::error::{MigrationError, Result};
use crate::orchestrator::MigrationStep;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Current on-disk schema version
pub const RECORD_VERSION: u32 = 1;

/// Accumulated outputs of the migration phases
///
/// Every output field is optional here; typed snapshots in
/// [`crate::orchestrator::stages`] turn a record into guaranteed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<MigrationStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// CW20 token on chain A
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_token: Option<String>,
    /// CW20-ICS20 bridge on chain A
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_bridge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_channel_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_channel_b: Option<String>,
    /// `ibc/...` denom of the CW20 token once it reaches chain B
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_legacy_denom_on_b: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_channel_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_channel_b: Option<String>,
    /// Token-factory denom on chain B
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_denom_b: Option<String>,
    /// `ibc/...` denom of the token-factory denom once it reaches chain A
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_native_denom_on_a: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter_b: Option<String>,
}

fn default_version() -> u32 {
    RECORD_VERSION
}

impl Default for MigrationRecord {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            last_completed: None,
            updated_at: None,
            source_token: None,
            legacy_bridge: None,
            legacy_channel_a: None,
            legacy_channel_b: None,
            derived_legacy_denom_on_b: None,
            new_channel_a: None,
            new_channel_b: None,
            native_denom_b: None,
            derived_native_denom_on_a: None,
            converter_a: None,
            converter_b: None,
        }
    }
}

/// Read a required field, failing fast when an earlier phase has not run
pub(crate) fn require(value: &Option<String>, field: &'static str) -> Result<String> {
    value
        .as_ref()
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or(MigrationError::MissingField(field))
}

/// JSON file holding a single [`MigrationRecord`]
#[derive(Debug, Clone)]
pub struct MigrationStore {
    path: PathBuf,
}

impl MigrationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, or an empty one if nothing has been saved yet
    pub fn load(&self) -> Result<MigrationRecord> {
        if !self.path.exists() {
            debug!("No migration record at {:?}, starting empty", self.path);
            return Ok(MigrationRecord::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let record: MigrationRecord = serde_json::from_str(&content)?;

        if record.version > RECORD_VERSION {
            return Err(MigrationError::UnsupportedRecordVersion {
                found: record.version,
                supported: RECORD_VERSION,
            });
        }

        Ok(record)
    }

    /// Replace the persisted record
    ///
    /// The content goes to a sibling swap file which is synced and then
    /// renamed over the target, so the previous record survives a failed
    /// write.
    pub fn save(&self, record: &MigrationRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let swap = self.swap_path();
        let json = serde_json::to_vec_pretty(record)?;

        let mut file = std::fs::File::create(&swap)?;
        file.write_all(&json)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&swap, &self.path)?;
        info!("Migration record saved to {:?}", self.path);
        Ok(())
    }

    fn swap_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "migration.json".into());
        name.push(".swp");
        self.path.with_file_name(name)
    }
}
