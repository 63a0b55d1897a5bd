//! The seam between the facade and the resource layer.

use std::collections::HashMap;

use vista_gmod::GmodDto;
use vista_locations::LocationsDto;
use vista_types::VisVersion;
use vista_versioning::GmodVersioningDto;

/// Supplies the decoded resource DTOs the facade builds its models
/// from.
///
/// All inputs are plain data held in memory by the caller, typically
/// decoded from the embedded VIS resource files. The facade calls each
/// accessor at most once per version and memoizes the built model.
pub trait VisResources: Send + Sync {
    /// The GMOD resource of `version`, if that release is available.
    fn gmod_dto(&self, version: VisVersion) -> Option<GmodDto>;

    /// The relative-location resource of `version`, if available.
    fn locations_dto(&self, version: VisVersion) -> Option<LocationsDto>;

    /// Every versioning table, keyed by release string (e.g. "3-5a").
    fn gmod_versioning_dtos(&self) -> HashMap<String, GmodVersioningDto>;
}
