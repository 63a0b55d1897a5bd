//! Location grammar for the VIS SDK.
//!
//! A location is a short alphanumeric code qualifying where on the vessel
//! a component instance sits: an optional leading number followed by at
//! most one character from each of the side, vertical, transverse and
//! longitudinal groups, in alphabetical order (e.g. `2`, `PS`, `1FU`).
//!
//! [`Locations`] validates and parses location strings for one VIS
//! version; [`LocationBuilder`] composes them axis by axis. Parsing and
//! building are inverses.

mod builder;
mod dto;
mod error;
mod error_builder;
mod location;
mod locations;

pub use builder::LocationBuilder;
pub use dto::{LocationsDto, RelativeLocationDto};
pub use error::LocationError;
pub use error_builder::{LocationParsingErrorBuilder, LocationValidationResult};
pub use location::{Location, LocationGroup, RelativeLocation};
pub use locations::Locations;
