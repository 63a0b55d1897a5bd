//! DNV Vessel Information Structure (VIS) SDK.
//!
//! The facade crate: [`Vis`] is the process-wide entry point that
//! memoizes the per-version GMOD and location tables, owns the version
//! conversion engine, and re-exports the whole SDK surface.
//!
//! Resource DTOs are supplied by the caller through [`VisResources`];
//! decoding embedded resource files stays outside this crate.

mod error;
mod resources;
mod vis;

pub use error::VisError;
pub use resources::VisResources;
pub use vis::Vis;

pub use vista_gmod::{
    ChainError, ChdDictionary, Gmod, GmodDto, GmodError, GmodIndividualizableSet, GmodNode,
    GmodNodeDto, GmodNodeMetadata, GmodPath, GmodPathParseError, GmodProvider, NodeId,
    TraversalOptions, TraverseControl, traversal,
};
pub use vista_locations::{
    Location, LocationBuilder, LocationError, LocationGroup, LocationParsingErrorBuilder,
    LocationValidationResult, Locations, LocationsDto, RelativeLocation, RelativeLocationDto,
};
pub use vista_types::{
    LocalIdParsingErrorBuilder, LocalIdParsingState, ParsingError, ParsingErrors, VersionError,
    VisVersion,
};
pub use vista_versioning::{
    CacheStats, ConversionType, GmodNodeConversion, GmodNodeConversionDto, GmodVersioning,
    GmodVersioningDto, GmodVersioningNode, MemoryCache, MemoryCacheOptions, PathConversionCache,
    VersioningError,
};
