//! Error types for the vista-versioning crate.

use vista_gmod::GmodError;
use vista_types::VisVersion;

/// Errors raised by the versioning engine.
///
/// A conversion that cannot produce a valid target is not an error; it
/// is a `None` result (and a cacheable one). These variants cover caller
/// mistakes and broken resources.
#[derive(Debug, thiserror::Error)]
pub enum VersioningError {
    /// A version argument was `Unknown`.
    #[error("invalid VIS version: {0}")]
    InvalidVersion(VisVersion),

    /// The target version is not newer than the source version.
    #[error("target version {target} must be newer than source version {from_version}")]
    InvalidVersionPair {
        from_version: VisVersion,
        target: VisVersion,
    },

    /// The path handed in was parsed under a different version than the
    /// stated source.
    #[error("path version {path} does not match source version {from_version}")]
    PathVersionMismatch {
        path: VisVersion,
        from_version: VisVersion,
    },

    /// The versioning resource keyed a table with an unparseable
    /// version string.
    #[error("invalid VIS version string in versioning resource: {0}")]
    InvalidVersionString(String),

    /// The versioning resource named an unknown operation.
    #[error("unknown conversion operation: {0}")]
    UnknownOperation(String),

    /// A graph-layer failure while resolving converted nodes.
    #[error(transparent)]
    Gmod(#[from] GmodError),
}
