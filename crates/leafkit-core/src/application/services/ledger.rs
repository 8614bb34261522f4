//! Install ledger persistence (`.leafkit/installed.json`).

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::{DomainValidator, InstallLedger, InstallRecord, LeafLayout, LeafName};
use crate::error::LeafkitResult;

/// Reads and writes a project's [`InstallLedger`].
///
/// The ledger only says what was installed and when. Whether a leaf is
/// installed is still decided by its directory.
#[derive(Clone)]
pub struct LedgerStore {
    fs: Arc<dyn Filesystem>,
    layout: LeafLayout,
}

impl LedgerStore {
    pub fn new(fs: Arc<dyn Filesystem>, layout: LeafLayout) -> Self {
        Self { fs, layout }
    }

    /// The project's ledger; empty when the file does not exist yet.
    pub fn load(&self, project: &Path) -> LeafkitResult<InstallLedger> {
        let path = self.layout.ledger_file(project);
        if !self.fs.is_file(&path) {
            return Ok(InstallLedger::default());
        }

        let raw = self.fs.read_to_string(&path)?;
        InstallLedger::from_json(&raw).map_err(|e| {
            ApplicationError::LedgerCorrupt {
                path: path.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Record for one leaf, if the ledger is readable and has one.
    pub fn get(&self, project: &Path, name: &LeafName) -> Option<InstallRecord> {
        self.load(project).ok()?.get(name).cloned()
    }

    pub fn record(&self, project: &Path, record: InstallRecord) -> LeafkitResult<()> {
        DomainValidator::validate_install_record(&record)?;

        let mut ledger = self.load(project)?;
        debug!(leaf = %record.name, version = %record.version, "Recording install");
        ledger.upsert(record);
        self.save(project, &ledger)
    }

    /// Drop the record for `name`. A project without a ledger is left alone.
    pub fn forget(&self, project: &Path, name: &LeafName) -> LeafkitResult<()> {
        if !self.fs.is_file(&self.layout.ledger_file(project)) {
            return Ok(());
        }

        let mut ledger = self.load(project)?;
        if ledger.remove(name).is_some() {
            debug!(leaf = %name, "Forgetting install");
            self.save(project, &ledger)?;
        }
        Ok(())
    }

    fn save(&self, project: &Path, ledger: &InstallLedger) -> LeafkitResult<()> {
        let path = self.layout.ledger_file(project);
        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write_file(&path, &ledger.to_json_pretty()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::MockFs;
    use crate::error::ErrorCategory;
    use std::path::PathBuf;

    #[test]
    fn corrupt_ledger_is_reported() {
        let mut fs = MockFs::new();
        fs.expect_is_file().returning(|_| true);
        fs.expect_read_to_string()
            .returning(|_| Ok("not json".to_string()));

        let store = LedgerStore::new(Arc::new(fs), LeafLayout::default());
        let err = store.load(Path::new("/app")).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains(".leafkit"));
        assert!(store
            .get(Path::new("/app"), &LeafName::parse("leaf-a").unwrap())
            .is_none());
    }

    #[test]
    fn forget_without_ledger_writes_nothing() {
        let mut fs = MockFs::new();
        fs.expect_is_file().returning(|_| false);
        fs.expect_write_file().never();

        let store = LedgerStore::new(Arc::new(fs), LeafLayout::default());
        store
            .forget(Path::new("/app"), &LeafName::parse("leaf-a").unwrap())
            .unwrap();
    }

    #[test]
    fn first_record_creates_ledger_directory() {
        let mut fs = MockFs::new();
        fs.expect_is_file().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|p| p.to_path_buf() == PathBuf::from("/app/.leafkit"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| {
                p.to_path_buf() == PathBuf::from("/app/.leafkit/installed.json") && content.contains("\"leaf-a\"")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let store = LedgerStore::new(Arc::new(fs), LeafLayout::default());
        let record = InstallRecord::new(LeafName::parse("leaf-a").unwrap(), "1.0.0");
        store.record(Path::new("/app"), record).unwrap();
    }
}
