//! VIS version enumeration and string forms.

use std::fmt;
use std::str::FromStr;

/// Error raised when a VIS version string or value is rejected.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The string matched none of the accepted surface forms.
    #[error("invalid VIS version string: {0}")]
    InvalidVersionString(String),

    /// An operation required a valid version but got `Unknown`.
    #[error("invalid VIS version: {0:?}")]
    InvalidVersion(VisVersion),
}

/// A release of the DNV Vessel Information Structure.
///
/// The ordering is total and matches release order, so `V3_4a < V3_6a`
/// holds. `Unknown` sorts before every valid version and fails
/// [`VisVersion::is_valid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisVersion {
    #[default]
    Unknown,
    V3_4a,
    V3_5a,
    V3_6a,
    V3_7a,
    V3_8a,
}

impl VisVersion {
    /// The most recent VIS release.
    pub const LATEST: VisVersion = VisVersion::V3_8a;

    /// All valid versions in release order.
    pub fn all() -> &'static [VisVersion] {
        &[
            VisVersion::V3_4a,
            VisVersion::V3_5a,
            VisVersion::V3_6a,
            VisVersion::V3_7a,
            VisVersion::V3_8a,
        ]
    }

    /// Returns `true` for every version except `Unknown`.
    pub fn is_valid(self) -> bool {
        !matches!(self, VisVersion::Unknown)
    }

    /// The release immediately after this one, if any.
    pub fn next(self) -> Option<VisVersion> {
        match self {
            VisVersion::V3_4a => Some(VisVersion::V3_5a),
            VisVersion::V3_5a => Some(VisVersion::V3_6a),
            VisVersion::V3_6a => Some(VisVersion::V3_7a),
            VisVersion::V3_7a => Some(VisVersion::V3_8a),
            VisVersion::V3_8a | VisVersion::Unknown => None,
        }
    }

    /// The release immediately before this one, if any.
    pub fn prev(self) -> Option<VisVersion> {
        match self {
            VisVersion::V3_5a => Some(VisVersion::V3_4a),
            VisVersion::V3_6a => Some(VisVersion::V3_5a),
            VisVersion::V3_7a => Some(VisVersion::V3_6a),
            VisVersion::V3_8a => Some(VisVersion::V3_7a),
            VisVersion::V3_4a | VisVersion::Unknown => None,
        }
    }

    /// Tries to parse any of the accepted surface forms.
    ///
    /// Accepted: `3.4a`, `3-4a`, `vis-3-4a`, `vis-3.4a` (and so on for the
    /// other releases). The emitted form is always `3-4a`.
    pub fn try_parse(s: &str) -> Option<VisVersion> {
        let tail = s.strip_prefix("vis-").unwrap_or(s);
        match tail {
            "3-4a" | "3.4a" => Some(VisVersion::V3_4a),
            "3-5a" | "3.5a" => Some(VisVersion::V3_5a),
            "3-6a" | "3.6a" => Some(VisVersion::V3_6a),
            "3-7a" | "3.7a" => Some(VisVersion::V3_7a),
            "3-8a" | "3.8a" => Some(VisVersion::V3_8a),
            _ => None,
        }
    }

    /// Parses a version string, failing with [`VersionError`] on unknown
    /// forms.
    pub fn parse(s: &str) -> Result<VisVersion, VersionError> {
        Self::try_parse(s).ok_or_else(|| VersionError::InvalidVersionString(s.to_string()))
    }
}

impl fmt::Display for VisVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VisVersion::Unknown => "unknown",
            VisVersion::V3_4a => "3-4a",
            VisVersion::V3_5a => "3-5a",
            VisVersion::V3_6a => "3-6a",
            VisVersion::V3_7a => "3-7a",
            VisVersion::V3_8a => "3-8a",
        };
        f.write_str(s)
    }
}

impl FromStr for VisVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisVersion::parse(s)
    }
}
