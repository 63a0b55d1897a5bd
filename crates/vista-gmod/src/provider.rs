//! Seam between the graph layer and whoever owns the per-version GMODs.

use std::sync::Arc;

use vista_types::VisVersion;

use crate::error::GmodError;
use crate::gmod::Gmod;

/// Supplies the GMOD for a VIS version.
///
/// The versioning engine steps node conversions through adjacent
/// releases and needs the graph of every intermediate version; the
/// facade implements this trait, tests implement it over fixtures.
pub trait GmodProvider: Send + Sync {
    /// The GMOD of `version`, building it on first use if necessary.
    fn gmod(&self, version: VisVersion) -> Result<Arc<Gmod>, GmodError>;
}
