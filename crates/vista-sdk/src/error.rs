//! Error type for the facade crate.

use vista_gmod::GmodError;
use vista_locations::LocationError;
use vista_types::VisVersion;
use vista_versioning::VersioningError;

/// Errors surfaced by the [`crate::Vis`] facade.
#[derive(Debug, thiserror::Error)]
pub enum VisError {
    /// The resource provider has no GMOD for the requested version.
    #[error("no GMOD resource for VIS version {0}")]
    GmodResourceNotFound(VisVersion),

    /// The resource provider has no location table for the requested
    /// version.
    #[error("no locations resource for VIS version {0}")]
    LocationsResourceNotFound(VisVersion),

    #[error(transparent)]
    Gmod(#[from] GmodError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Versioning(#[from] VersioningError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            VisError::GmodResourceNotFound(VisVersion::V3_7a).to_string(),
            "no GMOD resource for VIS version 3-7a"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VisError>();
    }
}
