//! Resource DTOs for the GMOD.
//!
//! Field names are a resource-compatibility contract; renaming any of
//! them breaks decoding of the published GMOD resources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The GMOD resource for one VIS release: the node list plus the
/// parent/child relation pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmodDto {
    /// VIS release string, e.g. "3-4a".
    pub vis_release: String,
    /// Every node of the model, in resource order.
    pub items: Vec<GmodNodeDto>,
    /// `[parent code, child code]` pairs.
    pub relations: Vec<Vec<String>>,
}

/// One GMOD node as carried by the resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmodNodeDto {
    /// Category classification, e.g. "ASSET FUNCTION".
    pub category: String,
    /// Type within the category, e.g. "LEAF".
    #[serde(rename = "type")]
    pub node_type: String,
    /// Unique node code, e.g. "411.1".
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Optional common name or alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// Optional definition text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Optional common definition text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_definition: Option<String>,
    /// When `false`, traversal skips this node's subtree by convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_substructure: Option<bool>,
    /// Child code to assigned-name mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_assignment_names: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_gmod_resource() {
        let json = r#"{
            "visRelease": "3-4a",
            "items": [
                {
                    "category": "ASSET",
                    "type": "TYPE",
                    "code": "VE",
                    "name": "Vessel"
                },
                {
                    "category": "ASSET FUNCTION",
                    "type": "LEAF",
                    "code": "411.1",
                    "name": "Propulsion engine",
                    "commonName": "Main engine",
                    "installSubstructure": false,
                    "normalAssignmentNames": { "C101": "propulsion engine" }
                }
            ],
            "relations": [["VE", "411.1"]]
        }"#;
        let dto: GmodDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.vis_release, "3-4a");
        assert_eq!(dto.items.len(), 2);
        assert_eq!(dto.items[0].node_type, "TYPE");
        assert_eq!(dto.items[1].common_name.as_deref(), Some("Main engine"));
        assert_eq!(dto.items[1].install_substructure, Some(false));
        assert_eq!(
            dto.items[1]
                .normal_assignment_names
                .as_ref()
                .unwrap()
                .get("C101")
                .map(String::as_str),
            Some("propulsion engine")
        );
        assert_eq!(dto.relations, vec![vec!["VE".to_string(), "411.1".to_string()]]);
    }

    #[test]
    fn test_serialize_uses_resource_field_names() {
        let dto = GmodNodeDto {
            category: "PRODUCT".into(),
            node_type: "SELECTION".into(),
            code: "CS1".into(),
            name: "Propulsion engine selection".into(),
            common_name: None,
            definition: None,
            common_definition: None,
            install_substructure: None,
            normal_assignment_names: None,
        };
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"type\":\"SELECTION\""));
        assert!(json.contains("\"code\":\"CS1\""));
        assert!(!json.contains("node_type"));
    }
}
