//! Resource DTOs for GMOD versioning data.
//!
//! Field names are a resource-compatibility contract; renaming any of
//! them breaks decoding of the published versioning resources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The versioning resource for one target VIS release: every conversion
/// applying on the step into that release, keyed by source node code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmodVersioningDto {
    /// VIS release string the table converts into, e.g. "3-5a".
    pub vis_release: String,
    /// Source code to conversion mapping.
    pub items: HashMap<String, GmodNodeConversionDto>,
}

/// One node conversion entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmodNodeConversionDto {
    /// Operation names, e.g. `["changeCode"]`.
    pub operations: Vec<String>,
    /// The code in the source release.
    pub source: String,
    /// The code in the target release, when the code changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// The assignment being replaced, for assignment operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_assignment: Option<String>,
    /// The replacement assignment, for assignment operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_assignment: Option<String>,
    /// Whether the assignment is removed outright.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_assignment: Option<bool>,
}
