use crate::error::{ReleaseKitError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version with an optional beta prerelease index
///
/// String form is `v{major}.{minor}.{patch}`, optionally suffixed
/// `-beta.{index}` for prerelease tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub beta: Option<u32>,
}

impl Version {
    /// Create a new stable version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            beta: None,
        }
    }

    /// Create a new beta version
    pub fn beta(major: u32, minor: u32, patch: u32, index: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            beta: Some(index),
        }
    }

    /// Parse a version from a tag string (e.g. "v1.2.3" or "v1.2.3-beta.4")
    ///
    /// Tags that look like versions but do not parse cleanly are rejected
    /// rather than coerced.
    pub fn parse(tag: &str) -> Result<Self> {
        // Remove 'v' or 'V' prefix
        let clean_tag = tag.trim_start_matches('v').trim_start_matches('V');

        let (base, beta) = match clean_tag.split_once("-beta.") {
            Some((base, index)) => {
                let index = index.parse::<u32>().map_err(|_| {
                    ReleaseKitError::version(format!("Invalid beta index in '{}'", tag))
                })?;
                (base, Some(index))
            }
            None => (clean_tag, None),
        };

        let parts: Vec<&str> = base.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseKitError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                tag
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| ReleaseKitError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| ReleaseKitError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| ReleaseKitError::version(format!("Invalid patch version: {}", parts[2])))?;

        Ok(Version {
            major,
            minor,
            patch,
            beta,
        })
    }

    /// The stable base of this version, with any prerelease stripped
    pub fn base(&self) -> Self {
        Version {
            beta: None,
            ..*self
        }
    }

    /// Bump the base triple according to bump level, producing a stable version
    pub fn bump(&self, level: BumpLevel) -> Self {
        match level {
            BumpLevel::Major => Version::new(self.major + 1, 0, 0),
            BumpLevel::Minor => Version::new(self.major, self.minor + 1, 0),
            BumpLevel::Patch => Version::new(self.major, self.minor, self.patch + 1),
        }
    }

    /// Replace the beta index, keeping the base triple
    pub fn with_beta(&self, index: u32) -> Self {
        Version {
            beta: Some(index),
            ..*self
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(index) = self.beta {
            write!(f, "-beta.{}", index)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            // A stable version outranks any beta of the same triple
            .then_with(|| match (self.beta, other.beta) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Degree of version increment derived from commit analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
}

impl BumpLevel {
    /// Parse a bump keyword, falling back to patch for anything unrecognized
    pub fn from_keyword(s: &str) -> Self {
        match s {
            "major" => BumpLevel::Major,
            "minor" => BumpLevel::Minor,
            _ => BumpLevel::Patch,
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpLevel::Major => write!(f, "major"),
            BumpLevel::Minor => write!(f, "minor"),
            BumpLevel::Patch => write!(f, "patch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_without_v() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_beta() {
        let v = Version::parse("v1.3.0-beta.2").unwrap();
        assert_eq!(v, Version::beta(1, 3, 0, 2));
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("v1.2").is_err());
        assert!(Version::parse("v1.2.3.4").is_err());
        assert!(Version::parse("v1.x.3").is_err());
        assert!(Version::parse("v1.2.3-beta.x").is_err());
        assert!(Version::parse("v1.2.3-alpha.1").is_err());
    }

    #[test]
    fn test_version_display_round_trip() {
        for s in ["v1.2.3", "v0.0.0", "v10.20.30", "v1.3.0-beta.0", "v2.0.1-beta.12"] {
            let v = Version::parse(s).unwrap();
            assert_eq!(v.to_string(), s);
            assert_eq!(Version::parse(&v.to_string()).unwrap(), v);
        }
    }

    #[test]
    fn test_version_bump_major() {
        assert_eq!(Version::new(1, 2, 3).bump(BumpLevel::Major), Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        assert_eq!(Version::new(1, 2, 3).bump(BumpLevel::Minor), Version::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        assert_eq!(Version::new(1, 2, 3).bump(BumpLevel::Patch), Version::new(1, 2, 4));
    }

    #[test]
    fn test_version_bump_is_monotonic() {
        let v = Version::parse("v1.2.3-beta.4").unwrap();
        for level in [BumpLevel::Major, BumpLevel::Minor, BumpLevel::Patch] {
            assert!(v.bump(level) > v, "bump {} should increase {}", level, v);
        }
    }

    #[test]
    fn test_version_bump_drops_beta() {
        let v = Version::beta(1, 2, 3, 5);
        assert_eq!(v.bump(BumpLevel::Patch).beta, None);
    }

    #[test]
    fn test_version_order_triple_precedence() {
        assert!(Version::new(2, 0, 0) > Version::new(1, 9, 9));
        assert!(Version::new(1, 3, 0) > Version::new(1, 2, 9));
        assert!(Version::new(1, 2, 4) > Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_order_stable_beats_beta() {
        let stable = Version::new(1, 2, 3);
        let beta = Version::beta(1, 2, 3, 99);
        assert!(stable > beta);
        assert!(Version::beta(1, 2, 3, 1) > Version::beta(1, 2, 3, 0));
        // but a beta of a higher triple still wins
        assert!(Version::beta(1, 3, 0, 0) > Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_order_is_antisymmetric() {
        let a = Version::beta(1, 2, 3, 0);
        let b = Version::new(1, 2, 3);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn test_bump_level_from_keyword() {
        assert_eq!(BumpLevel::from_keyword("major"), BumpLevel::Major);
        assert_eq!(BumpLevel::from_keyword("minor"), BumpLevel::Minor);
        assert_eq!(BumpLevel::from_keyword("patch"), BumpLevel::Patch);
        assert_eq!(BumpLevel::from_keyword("unknown"), BumpLevel::Patch);
    }
}
