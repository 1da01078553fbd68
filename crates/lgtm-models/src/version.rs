use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version: '{0}'")]
    InvalidVersion(String),

    #[error("Version '{0}' has no next patch")]
    PatchOverflow(String),
}

/// Release version, ordered by major, minor then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn next_patch(&self) -> Result<Self, VersionError> {
        let patch = self
            .patch
            .checked_add(1)
            .ok_or_else(|| VersionError::PatchOverflow(self.to_string()))?;

        Ok(Self { patch, ..*self })
    }

    /// Greatest version among tags, ignoring tags that are not versions.
    pub fn max_of_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        tags.iter()
            .filter_map(|t| t.as_ref().parse::<Version>().ok())
            .max()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Accepts `v?MAJOR[.MINOR[.PATCH]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidVersion(s.into());
        let trimmed = s.strip_prefix(&['v', 'V'][..]).unwrap_or(s);

        let segments = trimmed
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    Err(invalid())
                } else {
                    segment.parse::<u64>().map_err(|_| invalid())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        match segments[..] {
            [major] => Ok(Self::new(major, 0, 0)),
            [major, minor] => Ok(Self::new(major, minor, 0)),
            [major, minor, patch] => Ok(Self::new(major, minor, patch)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse() {
        assert_eq!("1.2.3".parse::<Version>(), Ok(Version::new(1, 2, 3)));
        assert_eq!("v0.1".parse::<Version>(), Ok(Version::new(0, 1, 0)));
        assert_eq!("7".parse::<Version>(), Ok(Version::new(7, 0, 0)));
        assert!("".parse::<Version>().is_err());
        assert!("a".parse::<Version>().is_err());
        assert!("1..2".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("1.2.3-beta".parse::<Version>().is_err());
        assert!("+1.2".parse::<Version>().is_err());
    }

    #[test]
    fn ordering() {
        assert!(Version::new(0, 1, 0) > Version::new(0, 0, 9));
        assert!(Version::new(1, 0, 0) > Version::new(0, 10, 10));
        assert_eq!(Version::new(0, 0, 1).next_patch(), Ok(Version::new(0, 0, 2)));
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn next_patch_overflow() {
        let last = Version::max_of_tags(&["0.0.18446744073709551615"]);
        assert_eq!(last, Version::new(0, 0, u64::MAX));
        assert_eq!(
            last.next_patch(),
            Err(VersionError::PatchOverflow("0.0.18446744073709551615".into()))
        );
    }

    #[test]
    fn max_of_tags() {
        assert_eq!(
            Version::max_of_tags(&["a", "0.1.0", "0.0.1"]),
            Version::new(0, 1, 0)
        );
        assert_eq!(Version::max_of_tags(&["a", "b", "c"]), Version::new(0, 0, 0));
        assert_eq!(Version::max_of_tags::<&str>(&[]), Version::default());
    }
}
