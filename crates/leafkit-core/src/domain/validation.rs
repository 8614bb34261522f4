use crate::domain::{
    entities::{InstallRecord, LeafManifest},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Structural checks serde cannot express.
    pub fn validate_manifest(manifest: &LeafManifest) -> Result<(), DomainError> {
        if manifest.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if manifest.version.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "version" });
        }
        if let Some(req) = manifest.requirements.iter().find(|r| r.name.trim().is_empty()) {
            return Err(DomainError::InvalidManifest(format!(
                "{} requirement without a name",
                req.kind
            )));
        }
        if let Some(var) = manifest.env.iter().find(|v| v.key.trim().is_empty()) {
            return Err(DomainError::InvalidManifest(format!(
                "env entry without a key ({})",
                var.description
            )));
        }
        Ok(())
    }

    pub fn validate_install_record(record: &InstallRecord) -> Result<(), DomainError> {
        record.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Requirement;

    #[test]
    fn accepts_minimal_manifest() {
        let m = LeafManifest::new("leaf-a", "1.0.0");
        assert!(DomainValidator::validate_manifest(&m).is_ok());
    }

    #[test]
    fn rejects_blank_version() {
        let m = LeafManifest::new("leaf-a", " ");
        assert_eq!(
            DomainValidator::validate_manifest(&m),
            Err(DomainError::MissingRequiredField { field: "version" })
        );
    }

    #[test]
    fn rejects_unnamed_requirement() {
        let m = LeafManifest::new("leaf-a", "1.0.0").with_requirement(Requirement::model(""));
        assert!(matches!(
            DomainValidator::validate_manifest(&m),
            Err(DomainError::InvalidManifest(_))
        ));
    }
}
