//! Typed migration snapshots
//!
//! Each phase consumes the snapshot of the phase before it, so a converter
//! cannot be deployed before the native asset exists. Snapshots can also be
//! rebuilt from a persisted [`MigrationRecord`] to resume a later phase.

use crate::error::Result;
use crate::record::{require, MigrationRecord};

/// Legacy CW20 token and its CW20-ICS20 bridge on the hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyContracts {
    pub token: String,
    pub bridge: String,
}

/// Channel between the legacy bridge and the outpost transfer port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyPath {
    pub channel_a: String,
    pub channel_b: String,
    /// Legacy token as seen on the outpost
    pub denom_on_b: String,
}

/// Token-factory asset and its transfer<>transfer path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAsset {
    pub denom: String,
    pub channel_a: String,
    pub channel_b: String,
    /// Native asset as seen on the hub
    pub denom_on_a: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converters {
    pub a: String,
    pub b: String,
}

/// Fields a snapshot owns in the persisted record
pub trait Snapshot {
    fn write_to(&self, record: &mut MigrationRecord);

    /// A fresh record holding only this snapshot's fields
    fn record(&self) -> MigrationRecord {
        let mut record = MigrationRecord::default();
        self.write_to(&mut record);
        record
    }
}

impl LegacyContracts {
    fn from_record(record: &MigrationRecord) -> Result<Self> {
        Ok(Self {
            token: require(&record.source_token, "source_token")?,
            bridge: require(&record.legacy_bridge, "legacy_bridge")?,
        })
    }

    fn write_to(&self, record: &mut MigrationRecord) {
        record.source_token = Some(self.token.clone());
        record.legacy_bridge = Some(self.bridge.clone());
    }
}

impl LegacyPath {
    fn from_record(record: &MigrationRecord) -> Result<Self> {
        Ok(Self {
            channel_a: require(&record.legacy_channel_a, "legacy_channel_a")?,
            channel_b: require(&record.legacy_channel_b, "legacy_channel_b")?,
            denom_on_b: require(&record.derived_legacy_denom_on_b, "derived_legacy_denom_on_b")?,
        })
    }

    fn write_to(&self, record: &mut MigrationRecord) {
        record.legacy_channel_a = Some(self.channel_a.clone());
        record.legacy_channel_b = Some(self.channel_b.clone());
        record.derived_legacy_denom_on_b = Some(self.denom_on_b.clone());
    }
}

impl NativeAsset {
    fn from_record(record: &MigrationRecord) -> Result<Self> {
        Ok(Self {
            denom: require(&record.native_denom_b, "native_denom_b")?,
            channel_a: require(&record.new_channel_a, "new_channel_a")?,
            channel_b: require(&record.new_channel_b, "new_channel_b")?,
            denom_on_a: require(&record.derived_native_denom_on_a, "derived_native_denom_on_a")?,
        })
    }

    fn write_to(&self, record: &mut MigrationRecord) {
        record.native_denom_b = Some(self.denom.clone());
        record.new_channel_a = Some(self.channel_a.clone());
        record.new_channel_b = Some(self.channel_b.clone());
        record.derived_native_denom_on_a = Some(self.denom_on_a.clone());
    }
}

impl Converters {
    fn from_record(record: &MigrationRecord) -> Result<Self> {
        Ok(Self {
            a: require(&record.converter_a, "converter_a")?,
            b: require(&record.converter_b, "converter_b")?,
        })
    }

    fn write_to(&self, record: &mut MigrationRecord) {
        record.converter_a = Some(self.a.clone());
        record.converter_b = Some(self.b.clone());
    }
}

/// After `DeployLegacyContracts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyDeployed {
    pub legacy: LegacyContracts,
}

impl LegacyDeployed {
    pub fn new(legacy: LegacyContracts) -> Self {
        Self { legacy }
    }

    pub fn link(self, legacy_path: LegacyPath) -> LegacyLinked {
        LegacyLinked {
            legacy: self.legacy,
            legacy_path,
        }
    }
}

/// After `EstablishLegacyChannel`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyLinked {
    pub legacy: LegacyContracts,
    pub legacy_path: LegacyPath,
}

impl LegacyLinked {
    pub fn issue(self, native: NativeAsset) -> NativeIssued {
        NativeIssued {
            legacy: self.legacy,
            legacy_path: self.legacy_path,
            native,
        }
    }
}

/// After `MintNativeAsset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeIssued {
    pub legacy: LegacyContracts,
    pub legacy_path: LegacyPath,
    pub native: NativeAsset,
}

impl NativeIssued {
    pub fn complete(self, converters: Converters) -> Migrated {
        Migrated {
            legacy: self.legacy,
            legacy_path: self.legacy_path,
            native: self.native,
            converters,
        }
    }
}

/// Every migration output; required by the verification scenarios
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migrated {
    pub legacy: LegacyContracts,
    pub legacy_path: LegacyPath,
    pub native: NativeAsset,
    pub converters: Converters,
}

impl Snapshot for LegacyDeployed {
    fn write_to(&self, record: &mut MigrationRecord) {
        self.legacy.write_to(record);
    }
}

impl Snapshot for LegacyLinked {
    fn write_to(&self, record: &mut MigrationRecord) {
        self.legacy.write_to(record);
        self.legacy_path.write_to(record);
    }
}

impl Snapshot for NativeIssued {
    fn write_to(&self, record: &mut MigrationRecord) {
        self.legacy.write_to(record);
        self.legacy_path.write_to(record);
        self.native.write_to(record);
    }
}

impl Snapshot for Migrated {
    fn write_to(&self, record: &mut MigrationRecord) {
        self.legacy.write_to(record);
        self.legacy_path.write_to(record);
        self.native.write_to(record);
        self.converters.write_to(record);
    }
}

impl TryFrom<&MigrationRecord> for LegacyDeployed {
    type Error = crate::error::MigrationError;

    fn try_from(record: &MigrationRecord) -> Result<Self> {
        Ok(Self::new(LegacyContracts::from_record(record)?))
    }
}

impl TryFrom<&MigrationRecord> for LegacyLinked {
    type Error = crate::error::MigrationError;

    fn try_from(record: &MigrationRecord) -> Result<Self> {
        Ok(LegacyDeployed::try_from(record)?.link(LegacyPath::from_record(record)?))
    }
}

impl TryFrom<&MigrationRecord> for NativeIssued {
    type Error = crate::error::MigrationError;

    fn try_from(record: &MigrationRecord) -> Result<Self> {
        Ok(LegacyLinked::try_from(record)?.issue(NativeAsset::from_record(record)?))
    }
}

impl TryFrom<&MigrationRecord> for Migrated {
    type Error = crate::error::MigrationError;

    fn try_from(record: &MigrationRecord) -> Result<Self> {
        Ok(NativeIssued::try_from(record)?.complete(Converters::from_record(record)?))
    }
}
