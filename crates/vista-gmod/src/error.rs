//! Error types for the vista-gmod crate.

use vista_types::VisVersion;

/// Errors raised by GMOD construction and lookup.
#[derive(Debug, thiserror::Error)]
pub enum GmodError {
    /// No GMOD resource is available for the requested version.
    #[error("no GMOD resource for VIS version {0}")]
    VersionNotAvailable(VisVersion),

    /// No node with the requested code exists in this GMOD.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// The GMOD has no root node; the resource did not contain 'VE'.
    #[error("GMOD is not initialized: root node 'VE' not found")]
    Uninitialized,

    /// The GMOD resource carried two items with the same code.
    #[error("duplicate node code in GMOD resource: {0}")]
    DuplicateCode(String),

    /// A path was constructed from a node sequence that is not a
    /// root-to-target chain.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// An individualizable set was built from indices that violate the
    /// set rules.
    #[error("invalid individualizable set: {0}")]
    InvalidSet(String),
}

/// Why a parent chain failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// The chain has no parents at all.
    Empty,
    /// The first parent is not the root node.
    NotRooted,
    /// The link between index `0` and its successor is missing.
    MissingLink(usize),
}

/// Errors produced by the two path parsers.
///
/// Tolerant front-ends fold these into `None`; the strict entry points
/// surface them directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GmodPathParseError {
    /// Input was empty or whitespace.
    #[error("path is empty")]
    Empty,

    /// A full path did not begin with the root code.
    #[error("path must start with the root code '{0}'")]
    MissingRoot(String),

    /// A segment's code resolved to no GMOD node.
    #[error("failed to get GMOD node for segment '{0}'")]
    NodeLookup(String),

    /// A segment's location suffix failed the location grammar.
    #[error("failed to parse location '{0}'")]
    LocationParse(String),

    /// The node sequence is not a chained path; when known, the index of
    /// the broken link is carried.
    #[error("sequence of nodes is invalid{}", .missing_link_at.map(|i| format!(" at index {i}")).unwrap_or_default())]
    InvalidSequence { missing_link_at: Option<usize> },

    /// Locations on the parsed nodes contradict the individualizable
    /// sets of the path.
    #[error("{0}")]
    InvalidIndividualization(String),

    /// The GMOD and Locations arguments come from different VIS
    /// versions.
    #[error("got different VIS versions for Gmod and Locations arguments")]
    VersionMismatch,

    /// The short-path traversal never reached the target.
    #[error("failed to find path after traversal")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        assert_eq!(GmodPathParseError::Empty.to_string(), "path is empty");
        assert_eq!(
            GmodPathParseError::NodeLookup("X99".into()).to_string(),
            "failed to get GMOD node for segment 'X99'"
        );
        assert_eq!(
            GmodPathParseError::InvalidSequence {
                missing_link_at: Some(3)
            }
            .to_string(),
            "sequence of nodes is invalid at index 3"
        );
        assert_eq!(
            GmodPathParseError::InvalidSequence {
                missing_link_at: None
            }
            .to_string(),
            "sequence of nodes is invalid"
        );
    }

    #[test]
    fn test_gmod_error_display() {
        assert_eq!(
            GmodError::NodeNotFound("411.1".into()).to_string(),
            "node not found: 411.1"
        );
        assert_eq!(
            GmodError::Uninitialized.to_string(),
            "GMOD is not initialized: root node 'VE' not found"
        );
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GmodError>();
        assert_send_sync::<GmodPathParseError>();
    }
}
