//! Product version numbers of the analysis server and analysis tools.
//!
//! Both conventional `major.minor.patch[.hotfix]` numbers and the date-style
//! `YYYY.MM` release numbers are accepted; a date-style release maps to
//! `YYYY.MM.0.0`, so it orders after every conventional release.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)\.(\d+)(?:\.(\d+))?|(\d{4})\.(\d{2})")
        .expect("version pattern is a valid regex")
});

/// A comparable product version number.
///
/// Ordering is lexicographic over `(major, minor, patch, hotfix)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub hotfix: u32,
}

impl ProductVersion {
    /// The 7.7.0 release.
    pub const INDIO: Self = Self::new(7, 7, 0, 0);
    /// The 8.0.0 release.
    pub const JASPER: Self = Self::new(8, 0, 0, 0);
    /// Oldest server release the client supports.
    pub const MINIMUM_SUPPORTED: Self = Self::INDIO;

    pub const fn new(major: u32, minor: u32, patch: u32, hotfix: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            hotfix,
        }
    }

    /// Creates a date-style release number (`YYYY.MM`).
    pub const fn release(year: u32, month: u32) -> Self {
        Self::new(year, month, 0, 0)
    }

    /// Finds the first version number anywhere in `s`.
    ///
    /// Returns `None` when `s` contains no version number, or when a
    /// component does not fit in a `u32`.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = VERSION_PATTERN.captures(s)?;
        let group = |i: usize| -> Option<u32> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        if caps.get(5).is_some() && caps.get(6).is_some() {
            Some(Self::release(group(5)?, group(6)?))
        } else {
            Some(Self::new(group(1)?, group(2)?, group(3)?, group(4)?))
        }
    }

    /// Returns `true` if this version is at least `analysis`, comparing major
    /// and minor numbers only.
    ///
    /// Used to check that a server can accept results from a given analysis
    /// release; patch and hotfix differences never matter.
    pub fn compare_to_analysis(&self, analysis: &ProductVersion) -> bool {
        if self.major == analysis.major {
            self.minor >= analysis.minor
        } else {
            self.major > analysis.major
        }
    }

    /// Returns `true` if this version is at least [`Self::MINIMUM_SUPPORTED`].
    pub fn is_supported(&self) -> bool {
        *self >= Self::MINIMUM_SUPPORTED
    }
}

impl std::fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.hotfix > 0 {
            write!(f, ".{}", self.hotfix)?;
        }
        Ok(())
    }
}

/// Error returned when a string contains no recognisable version number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no version number found in '{0}'")]
pub struct ParseVersionError(String);

impl FromStr for ProductVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseVersionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conventional_versions() {
        assert_eq!(ProductVersion::parse("8.7.1"), Some(ProductVersion::new(8, 7, 1, 0)));
        assert_eq!(ProductVersion::parse("7.7.0.4"), Some(ProductVersion::new(7, 7, 0, 4)));
    }

    #[test]
    fn test_parse_release_numbers() {
        assert_eq!(ProductVersion::parse("2018.12"), Some(ProductVersion::release(2018, 12)));
    }

    #[test]
    fn test_parse_finds_version_inside_text() {
        let v = ProductVersion::parse("Coverity Connect version 8.5.0.3 (build 1)");
        assert_eq!(v, Some(ProductVersion::new(8, 5, 0, 3)));
    }

    #[test]
    fn test_parse_rejects_text_without_version() {
        assert_eq!(ProductVersion::parse("unknown"), None);
        assert_eq!(ProductVersion::parse("8.7"), None);
        assert!("latest".parse::<ProductVersion>().is_err());
    }

    #[test]
    fn test_ordering_uses_every_component() {
        let v = |s: &str| ProductVersion::parse(s).unwrap();
        assert!(v("8.7.1") < v("8.7.1.1"));
        assert!(v("8.7.1.9") < v("8.7.2"));
        assert!(v("7.7.0") < v("8.0.0"));
        assert!(v("8.7.1") < v("2017.07"));
        assert_eq!(v("8.0.0"), ProductVersion::JASPER);
    }

    #[test]
    fn test_display_omits_zero_hotfix() {
        assert_eq!(ProductVersion::new(8, 7, 1, 0).to_string(), "8.7.1");
        assert_eq!(ProductVersion::new(8, 7, 1, 2).to_string(), "8.7.1.2");
        assert_eq!(ProductVersion::release(2018, 12).to_string(), "2018.12.0");
    }

    #[test]
    fn test_compare_to_analysis_ignores_patch_and_hotfix() {
        let server = ProductVersion::new(8, 7, 0, 0);
        assert!(server.compare_to_analysis(&ProductVersion::new(8, 7, 9, 9)));
        assert!(server.compare_to_analysis(&ProductVersion::new(8, 5, 0, 0)));
        assert!(server.compare_to_analysis(&ProductVersion::new(7, 9, 0, 0)));
        assert!(!server.compare_to_analysis(&ProductVersion::new(8, 8, 0, 0)));
        assert!(!server.compare_to_analysis(&ProductVersion::release(2018, 12)));
    }

    #[test]
    fn test_minimum_supported_version() {
        assert!(ProductVersion::INDIO.is_supported());
        assert!(ProductVersion::JASPER.is_supported());
        assert!(!ProductVersion::new(7, 6, 1, 0).is_supported());
    }
}
