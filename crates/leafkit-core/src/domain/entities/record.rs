//! Installation records.
//!
//! A leaf's copied `leaf.json` says what the leaf *is*; an [`InstallRecord`]
//! says what was *installed*, and when. Records live in the project's ledger
//! file (see [`LeafLayout::ledger_path`](crate::domain::LeafLayout)) so they
//! survive a leaf shipping a broken or missing manifest.
//!
//! ```json
//! {
//!   "leafs": {
//!     "leaf-auth": {
//!       "id": "4f1c…",
//!       "name": "leaf-auth",
//!       "version": "1.2.0",
//!       "installed_at": "2026-02-13T10:00:00Z"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, LeafName};

/// One installation of one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRecord {
    /// Unique per installation; a re-install gets a new id.
    pub id: Uuid,
    pub name: LeafName,
    /// Catalog version at install time; empty when the leaf had no manifest.
    pub version: String,
    pub installed_at: DateTime<Utc>,
}

impl InstallRecord {
    /// Create a record stamped now, with a random id.
    pub fn new(name: LeafName, version: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            version: version.into(),
            installed_at: Utc::now(),
        }
    }

    /// Validate the record integrity.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.is_nil() {
            return Err(DomainError::InvalidManifest(format!(
                "install record for '{}' has a nil id",
                self.name
            )));
        }
        Ok(())
    }
}

/// All install records of one project, keyed by leaf name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallLedger {
    #[serde(default)]
    pub leafs: BTreeMap<String, InstallRecord>,
}

impl InstallLedger {
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    pub fn get(&self, name: &LeafName) -> Option<&InstallRecord> {
        self.leafs.get(name.as_str())
    }

    /// Insert or replace the record for `record.name`.
    pub fn upsert(&mut self, record: InstallRecord) {
        self.leafs.insert(record.name.to_string(), record);
    }

    pub fn remove(&mut self, name: &LeafName) -> Option<InstallRecord> {
        self.leafs.remove(name.as_str())
    }

    pub fn len(&self) -> usize {
        self.leafs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leafs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> LeafName {
        LeafName::parse(name).unwrap()
    }

    #[test]
    fn reinstall_replaces_record() {
        let mut ledger = InstallLedger::default();
        let first = InstallRecord::new(leaf("leaf-a"), "1.0.0");
        let first_id = first.id;
        ledger.upsert(first);
        ledger.upsert(InstallRecord::new(leaf("leaf-a"), "1.1.0"));

        assert_eq!(ledger.len(), 1);
        let current = ledger.get(&leaf("leaf-a")).unwrap();
        assert_eq!(current.version, "1.1.0");
        assert_ne!(current.id, first_id);
    }

    #[test]
    fn ledger_survives_json() {
        let mut ledger = InstallLedger::default();
        ledger.upsert(InstallRecord::new(leaf("leaf-a"), "1.0.0"));

        let raw = ledger.to_json_pretty().unwrap();
        assert_eq!(InstallLedger::from_json(&raw).unwrap(), ledger);
    }

    #[test]
    fn empty_object_is_empty_ledger() {
        assert!(InstallLedger::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn nil_id_is_invalid() {
        let mut record = InstallRecord::new(leaf("leaf-a"), "1.0.0");
        assert!(record.validate().is_ok());
        record.id = Uuid::nil();
        assert!(record.validate().is_err());
    }
}
