//! Generic Product Model (GMOD) graph for the VIS SDK.
//!
//! The GMOD is a large directed graph of vessel components, one per VIS
//! release. This crate owns the graph data model and everything that
//! walks it:
//!
//! - [`ChdDictionary`]: the static perfect-hash map nodes live in,
//! - [`GmodNode`] / [`Gmod`]: nodes, metadata and the wired graph,
//! - [`traversal`]: depth-first visiting with an occurrence budget and a
//!   skip/stop/continue protocol,
//! - [`GmodPath`]: immutable root-to-target sequences with
//!   individualization-set analysis,
//! - the two-mode path parser (terse and fully qualified).

mod chd;
mod dto;
mod error;
mod gmod;
mod node;
mod parse;
mod path;
mod provider;
pub mod traversal;

pub use chd::ChdDictionary;
pub use dto::{GmodDto, GmodNodeDto};
pub use error::{ChainError, GmodError, GmodPathParseError};
pub use gmod::Gmod;
pub use node::{GmodNode, GmodNodeMetadata, NodeId};
pub use path::{GmodIndividualizableSet, GmodPath};
pub use provider::GmodProvider;
pub use traversal::{TraversalOptions, TraverseControl};
