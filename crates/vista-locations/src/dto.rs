//! Resource DTOs for the relative-location table.
//!
//! Field names are a resource-compatibility contract; renaming any of
//! them breaks decoding of the published location resources.

use serde::{Deserialize, Serialize};

/// The location resource for one VIS release.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsDto {
    /// VIS release string, e.g. "3-4a".
    pub vis_release: String,
    /// Relative-location entries.
    pub items: Vec<RelativeLocationDto>,
}

/// One relative location: a single character code plus naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeLocationDto {
    /// Single-character code, e.g. 'P'.
    pub code: char,
    /// Human-readable name, e.g. "Port".
    pub name: String,
    /// Optional definition text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}
