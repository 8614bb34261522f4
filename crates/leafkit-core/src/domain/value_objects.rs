//! Domain value objects: LeafName, RequirementKind.
//!
//! # Design
//!
//! These are pure value types, equality-by-value, no identity. They carry
//! their string representations and parsers, nothing else.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── LeafName ─────────────────────────────────────────────────────────────────

/// Identifier of a leaf, which doubles as its directory name.
///
/// Invariant: a single, non-hidden path component. Enforced at construction.
///
/// The catalog naming prefix (see [`LeafLayout`](crate::domain::LeafLayout))
/// is deliberately not part of this invariant: a manifest may declare a
/// dependency on a non-conforming name, which then simply never resolves to
/// a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LeafName(String);

impl LeafName {
    /// Validate and wrap a leaf name.
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidLeafName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name != name.trim() {
            return Err(invalid("name cannot have surrounding whitespace"));
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LeafName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LeafName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for LeafName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl FromStr for LeafName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LeafName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LeafName> for String {
    fn from(name: LeafName) -> Self {
        name.0
    }
}

impl PartialEq<str> for LeafName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LeafName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ── RequirementKind ──────────────────────────────────────────────────────────

/// What kind of artefact a requirement asks the host project to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    Model,
    File,
    Directory,
}

impl RequirementKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "model" => Ok(Self::Model),
            "file" => Ok(Self::File),
            "directory" | "dir" => Ok(Self::Directory),
            other => Err(DomainError::InvalidManifest(format!(
                "unknown requirement type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_name_accepts_plain_names() {
        for name in ["leaf-auth", "leaf_mail", "leaf-2fa", "A"] {
            assert!(LeafName::parse(name).is_ok(), "rejected: {name}");
        }
    }

    #[test]
    fn leaf_name_rejects_paths_and_hidden() {
        assert!(LeafName::parse("").is_err());
        assert!(LeafName::parse("   ").is_err());
        assert!(LeafName::parse(".hidden").is_err());
        assert!(LeafName::parse("..").is_err());
        assert!(LeafName::parse("a/b").is_err());
        assert!(LeafName::parse("a\\b").is_err());
        assert!(LeafName::parse(" leaf-a").is_err());
    }

    #[test]
    fn leaf_name_deserializes_with_validation() {
        let ok: LeafName = serde_json::from_str("\"leaf-auth\"").unwrap();
        assert_eq!(ok, "leaf-auth");

        let bad: Result<LeafName, _> = serde_json::from_str("\"../etc\"");
        assert!(bad.is_err());
    }

    #[test]
    fn requirement_kind_parses() {
        assert_eq!(
            RequirementKind::from_str("Model").unwrap(),
            RequirementKind::Model
        );
        assert_eq!(
            RequirementKind::from_str("dir").unwrap(),
            RequirementKind::Directory
        );
        assert!(RequirementKind::from_str("socket").is_err());
    }
}
