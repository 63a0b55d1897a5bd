//! Shared primitive types for the VIS (Vessel Information Structure) SDK.
//!
//! This is the leaf crate of the workspace: the VIS version enumeration,
//! the ordered parsing-error accumulator, and the Local ID parsing stages
//! live here so every other layer can speak the same vocabulary.

mod errors;
mod local_id;
mod version;

pub use errors::{ParsingError, ParsingErrors};
pub use local_id::{LocalIdParsingErrorBuilder, LocalIdParsingState};
pub use version::{VersionError, VisVersion};
