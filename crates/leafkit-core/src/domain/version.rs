//! Leaf version comparison.
//!
//! Versions are dot-separated numeric segments with an optional leading `v`
//! (`1.2.0`, `v2.0`). This is a strict subset of semantic versioning: there
//! is no notion of pre-release or build metadata.
//!
//! The comparator is total over arbitrary input. A segment that is not an
//! unsigned integer (`1.x`, `2.0-beta`, or one too large for `u64`) counts
//! as `0`, and missing trailing segments count as `0`, so `1.2 == 1.2.0`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Compare two version strings segment by segment.
///
/// ```
/// use std::cmp::Ordering;
/// use leafkit_core::domain::version::compare;
///
/// assert_eq!(compare("1.2.0", "1.10.0"), Ordering::Less);
/// assert_eq!(compare("v2.0", "1.9.9"), Ordering::Greater);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }

    Ordering::Equal
}

/// [`compare`] expressed as `-1`, `0` or `1`.
pub fn compare_i8(a: &str, b: &str) -> i8 {
    match compare(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// `true` when `candidate` is strictly newer than `current`.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    compare(candidate, current) == Ordering::Greater
}

fn segments(raw: &str) -> Vec<u64> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    if body.is_empty() {
        return Vec::new();
    }

    body.split('.')
        .map(|segment| segment.trim().parse::<u64>().unwrap_or(0))
        .collect()
}

/// A version string ordered with [`compare`].
///
/// Equality follows the ordering, so `Version::from("1.0") ==
/// Version::from("v1.0.0")`; `Display` keeps the original spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_newer_than(&self, other: &Version) -> bool {
        self > other
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        compare(&self.0, &other.0) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "0", "0.0.1", "0.1", "1", "1.0", "1.0.0", "v1.0.1", "1.2.0", "1.10.0", "v2.0", "1.9.9",
        "2.0.0.1", "10.0", "1.x", "", "abc", "V3",
    ];

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(compare("1.2.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_i8("1.2.0", "1.10.0"), -1);
    }

    #[test]
    fn leading_v_is_ignored() {
        assert_eq!(compare("v2.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_i8("v2.0", "1.9.9"), 1);
        assert_eq!(compare("v1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare("V1.2.3", "v1.2.3"), Ordering::Equal);
    }

    #[test]
    fn missing_segments_are_zero() {
        assert_eq!(compare("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare("1", "1.0.0.0"), Ordering::Equal);
        assert_eq!(compare("1.0.1", "1"), Ordering::Greater);
    }

    #[test]
    fn non_numeric_segments_are_zero() {
        assert_eq!(compare("1.x", "1.0"), Ordering::Equal);
        assert_eq!(compare("abc", "0"), Ordering::Equal);
        assert_eq!(compare("2.0-beta", "2.0"), Ordering::Equal);
        assert_eq!(compare("", "0.0"), Ordering::Equal);
    }

    #[test]
    fn huge_segment_does_not_panic() {
        assert_eq!(
            compare("99999999999999999999999.1", "0.1"),
            Ordering::Equal
        );
    }

    #[test]
    fn antisymmetric_over_samples() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(
                    compare_i8(a, b),
                    -compare_i8(b, a),
                    "antisymmetry broken for {a:?} / {b:?}"
                );
            }
        }
    }

    #[test]
    fn transitive_over_samples() {
        for a in SAMPLES {
            for b in SAMPLES {
                for c in SAMPLES {
                    if compare(a, b) != Ordering::Greater && compare(b, c) != Ordering::Greater {
                        assert_ne!(
                            compare(a, c),
                            Ordering::Greater,
                            "transitivity broken for {a:?} <= {b:?} <= {c:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn version_sorts_numerically() {
        let mut versions: Vec<Version> = ["1.10.0", "v1.2", "1.9.9", "0.9"]
            .into_iter()
            .map(Version::from)
            .collect();
        versions.sort();

        let order: Vec<&str> = versions.iter().map(Version::as_str).collect();
        assert_eq!(order, ["0.9", "v1.2", "1.9.9", "1.10.0"]);
    }

    #[test]
    fn is_newer_is_strict() {
        assert!(is_newer("1.1.0", "1.0.0"));
        assert!(!is_newer("1.0.0", "1.0.0"));
        assert!(!is_newer("1.0", "v1.0.0"));
        assert!(Version::from("2").is_newer_than(&Version::from("1.99")));
    }
}
