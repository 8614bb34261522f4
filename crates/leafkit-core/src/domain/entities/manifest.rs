//! The leaf manifest (`leaf.json`) and its parts.
//!
//! # `leaf.json` format
//!
//! ```json
//! {
//!   "name": "leaf-auth",
//!   "version": "1.2.0",
//!   "description": "Session based authentication",
//!   "author": "Jane Doe",
//!   "dependencies": ["leaf-mail"],
//!   "requirements": [
//!     { "type": "model", "name": "User", "description": "Account owner",
//!       "hint": "Create src/models/User.ts first" },
//!     { "type": "file", "name": "config/auth.json", "path": "config/auth.json" }
//!   ],
//!   "npmDependencies": { "bcrypt": "^5.1.0" },
//!   "env": [
//!     { "key": "AUTH_SECRET", "description": "Signing key", "required": true,
//!       "example": "change-me" }
//!   ],
//!   "config": { "import": "leaf-auth/config", "example": "auth: { ttl: 3600 }" },
//!   "models": ["Session"],
//!   "routes": [{ "method": "POST", "path": "/login" }],
//!   "services": [],
//!   "commands": ["auth:purge"]
//! }
//! ```
//!
//! `models`, `routes`, `services` and `commands` only describe what the leaf
//! contributes; nothing here interprets them, so they are kept as raw JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DomainError, LeafName, RequirementKind, Version};

/// Declarative description of one leaf package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Other leafs this one needs, in declaration order. May contain
    /// duplicates.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    /// External packages the leaf expects; informational only.
    #[serde(default)]
    pub npm_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigSnippet>,
    #[serde(default)]
    pub models: Vec<Value>,
    #[serde(default)]
    pub routes: Vec<Value>,
    #[serde(default)]
    pub services: Vec<Value>,
    #[serde(default)]
    pub commands: Vec<Value>,
}

impl LeafManifest {
    /// Minimal manifest, mostly useful for tests and fixtures.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            author: None,
            dependencies: Vec::new(),
            requirements: Vec::new(),
            npm_dependencies: BTreeMap::new(),
            env: Vec::new(),
            config: None,
            models: Vec::new(),
            routes: Vec::new(),
            services: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parse `leaf.json` content.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    pub fn version(&self) -> Version {
        Version::new(self.version.clone())
    }

    /// Declared dependencies that are valid leaf names, deduplicated, in
    /// declaration order. Invalid names are returned separately.
    pub fn dependency_names(&self) -> (Vec<LeafName>, Vec<String>) {
        let mut valid: Vec<LeafName> = Vec::new();
        let mut invalid = Vec::new();

        for raw in &self.dependencies {
            match LeafName::parse(raw.as_str()) {
                Ok(name) if !valid.contains(&name) => valid.push(name),
                Ok(_) => {}
                Err(_) => invalid.push(raw.clone()),
            }
        }

        (valid, invalid)
    }

    /// Environment variables the host must define.
    pub fn required_env(&self) -> impl Iterator<Item = &EnvVar> {
        self.env.iter().filter(|v| v.required)
    }
}

/// A prerequisite a leaf declares against the host project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    pub name: String,
    /// Explicit location; when set, only this path is checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub description: String,
    /// Human remediation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Requirement {
    pub fn new(kind: RequirementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            path: None,
            description: String::new(),
            hint: None,
        }
    }

    pub fn model(name: impl Into<String>) -> Self {
        Self::new(RequirementKind::Model, name)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(RequirementKind::File, name)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(RequirementKind::Directory, name)
    }

    pub fn at(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// An environment variable the leaf reads at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// How the host wires the leaf in. Both fields are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnippet {
    #[serde(default)]
    pub import: String,
    #[serde(default)]
    pub example: String,
}

/// Outcome of looking for a manifest on disk.
///
/// Keeps "there is no manifest" apart from "there is one but it is broken";
/// [`ManifestLookup::into_option`] collapses both when the caller does not
/// care.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestLookup {
    Found(LeafManifest),
    NotFound,
    Malformed { path: PathBuf, detail: String },
}

impl ManifestLookup {
    pub fn into_option(self) -> Option<LeafManifest> {
        match self {
            Self::Found(manifest) => Some(manifest),
            Self::NotFound | Self::Malformed { .. } => None,
        }
    }

    pub fn as_found(&self) -> Option<&LeafManifest> {
        match self {
            Self::Found(manifest) => Some(manifest),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "name": "leaf-auth",
        "version": "v1.2.0",
        "description": "Authentication",
        "author": "Jane",
        "dependencies": ["leaf-mail", "leaf-mail", "../escape"],
        "requirements": [
            { "type": "model", "name": "User", "description": "owner", "hint": "add it" },
            { "type": "directory", "name": "public", "path": "static/public" }
        ],
        "npmDependencies": { "bcrypt": "^5.1.0" },
        "env": [
            { "key": "AUTH_SECRET", "description": "key", "required": true, "example": "x" },
            { "key": "AUTH_TTL", "example": "3600", "default": "3600" }
        ],
        "config": { "import": "leaf-auth/config", "example": "auth: {}" },
        "models": ["Session"],
        "routes": [{ "method": "POST", "path": "/login" }],
        "commands": ["auth:purge"],
        "somethingUnknown": 42
    }"#;

    #[test]
    fn parses_full_manifest() {
        let m = LeafManifest::from_json(FULL).unwrap();
        assert_eq!(m.name, "leaf-auth");
        assert_eq!(m.author.as_deref(), Some("Jane"));
        assert_eq!(m.requirements.len(), 2);
        assert_eq!(m.requirements[0].kind, RequirementKind::Model);
        assert_eq!(
            m.requirements[1].path.as_deref(),
            Some(std::path::Path::new("static/public"))
        );
        assert_eq!(m.npm_dependencies.get("bcrypt").map(String::as_str), Some("^5.1.0"));
        assert_eq!(m.required_env().count(), 1);
        assert_eq!(m.env[1].default.as_deref(), Some("3600"));
        assert_eq!(m.config.as_ref().unwrap().import, "leaf-auth/config");
        assert_eq!(m.routes.len(), 1);
        assert!(m.services.is_empty());
    }

    #[test]
    fn minimal_manifest_uses_defaults() {
        let m = LeafManifest::from_json(r#"{ "name": "leaf-x", "version": "1.0.0" }"#).unwrap();
        assert!(m.dependencies.is_empty());
        assert!(m.requirements.is_empty());
        assert!(m.config.is_none());
        assert_eq!(m.description, "");
    }

    #[test]
    fn missing_version_is_invalid() {
        let err = LeafManifest::from_json(r#"{ "name": "leaf-x" }"#).unwrap_err();
        assert!(matches!(err, DomainError::InvalidManifest(_)));
    }

    #[test]
    fn dependency_names_dedupes_and_splits_invalid() {
        let m = LeafManifest::from_json(FULL).unwrap();
        let (valid, invalid) = m.dependency_names();
        assert_eq!(valid, vec![LeafName::parse("leaf-mail").unwrap()]);
        assert_eq!(invalid, vec!["../escape".to_string()]);
    }

    #[test]
    fn lookup_collapses_to_option() {
        let found = ManifestLookup::Found(LeafManifest::new("leaf-a", "1.0.0"));
        assert!(found.is_found());
        assert!(found.into_option().is_some());

        let malformed = ManifestLookup::Malformed {
            path: PathBuf::from("leaf.json"),
            detail: "expected value".into(),
        };
        assert!(malformed.is_malformed());
        assert!(malformed.into_option().is_none());
        assert!(ManifestLookup::NotFound.into_option().is_none());
    }
}
