//! The Generic Product Model graph.

use tracing::{error, warn};
use vista_locations::Locations;
use vista_types::VisVersion;

use crate::chd::ChdDictionary;
use crate::dto::GmodDto;
use crate::error::{GmodError, GmodPathParseError};
use crate::node::{GmodNode, GmodNodeMetadata, NodeId};
use crate::parse;
use crate::path::GmodPath;

const NODE_CATEGORY_PRODUCT: &str = "PRODUCT";
const NODE_CATEGORY_FUNCTION: &str = "FUNCTION";
const NODE_CATEGORY_ASSET: &str = "ASSET";
const NODE_CATEGORY_ASSET_FUNCTION: &str = "ASSET FUNCTION";

const NODE_TYPE_SELECTION: &str = "SELECTION";
const NODE_TYPE_TYPE: &str = "TYPE";

/// Full types classified as leaf nodes.
const LEAF_TYPES: [&str; 2] = ["ASSET FUNCTION LEAF", "PRODUCT FUNCTION LEAF"];

/// Types that open a potential-parent scope during path analysis.
const POTENTIAL_PARENT_TYPES: [&str; 3] = ["SELECTION", "GROUP", "LEAF"];

/// The Generic Product Model for one VIS version.
///
/// Owns every node in a perfect-hash dictionary keyed by code; relations
/// are wired as [`NodeId`] handles during construction and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct Gmod {
    vis_version: VisVersion,
    node_map: ChdDictionary<GmodNode>,
    root: Option<NodeId>,
}

impl Gmod {
    /// Builds the graph from the GMOD resource of `version`.
    ///
    /// Relations naming unknown codes are skipped with a diagnostic;
    /// a resource without the root node yields a degenerate GMOD whose
    /// [`Self::root_node`] fails.
    pub fn new(version: VisVersion, dto: &GmodDto) -> Result<Self, GmodError> {
        let pairs: Vec<(String, GmodNode)> = dto
            .items
            .iter()
            .map(|item| (item.code.clone(), GmodNode::from_dto(version, item)))
            .collect();
        let mut node_map = ChdDictionary::new(pairs)?;

        for relation in &dto.relations {
            if relation.len() < 2 {
                warn!(size = relation.len(), "relation with insufficient size, skipping");
                continue;
            }
            let parent_code = &relation[0];
            let child_code = &relation[1];

            let Some(parent_index) = node_map.index_of(parent_code) else {
                warn!(parent = %parent_code, "relation parent not found, skipping");
                continue;
            };
            let Some(child_index) = node_map.index_of(child_code) else {
                warn!(child = %child_code, "relation child not found, skipping");
                continue;
            };

            node_map
                .value_at_mut(parent_index)
                .add_child(NodeId(child_index as u32), child_code);
            node_map
                .value_at_mut(child_index)
                .add_parent(NodeId(parent_index as u32));
        }

        for node in node_map.values_mut() {
            node.trim();
        }

        let root = node_map.index_of("VE").map(|index| NodeId(index as u32));
        if root.is_none() {
            error!(version = %version, "root node 'VE' not found, GMOD is degenerate");
        }

        Ok(Self {
            vis_version: version,
            node_map,
            root,
        })
    }

    pub fn vis_version(&self) -> VisVersion {
        self.vis_version
    }

    //----------------------------------------------
    // Lookup
    //----------------------------------------------

    /// Node lookup that fails with [`GmodError::NodeNotFound`].
    pub fn get(&self, code: &str) -> Result<&GmodNode, GmodError> {
        self.node_map.get(code)
    }

    /// Tolerant node lookup.
    pub fn try_get_node(&self, code: &str) -> Option<&GmodNode> {
        self.node_map.try_get_value(code)
    }

    /// Resolves a handle issued by this GMOD.
    pub fn node(&self, id: NodeId) -> &GmodNode {
        self.node_map.value_at(id.0 as usize)
    }

    /// The root node "VE"; fails when the resource did not carry it.
    pub fn root_node(&self) -> Result<&GmodNode, GmodError> {
        self.root
            .map(|id| self.node(id))
            .ok_or(GmodError::Uninitialized)
    }

    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    //----------------------------------------------
    // Path parsing
    //----------------------------------------------

    /// Parses a terse path like `411.1/C101.31-2`.
    pub fn parse_path(
        &self,
        item: &str,
        locations: &Locations,
    ) -> Result<GmodPath, GmodPathParseError> {
        parse::parse_internal(item, self, locations)
    }

    /// Tolerant variant of [`Self::parse_path`].
    pub fn try_parse_path(&self, item: &str, locations: &Locations) -> Option<GmodPath> {
        self.parse_path(item, locations).ok()
    }

    /// Parses an absolute path rooted at `VE`.
    pub fn parse_from_full_path(
        &self,
        item: &str,
        locations: &Locations,
    ) -> Result<GmodPath, GmodPathParseError> {
        parse::parse_full_path_internal(item, self, locations)
    }

    /// Tolerant variant of [`Self::parse_from_full_path`].
    pub fn try_parse_from_full_path(
        &self,
        item: &str,
        locations: &Locations,
    ) -> Option<GmodPath> {
        self.parse_from_full_path(item, locations).ok()
    }

    //----------------------------------------------
    // Static classifiers
    //----------------------------------------------

    /// Whether `node_type` opens a potential-parent scope.
    pub fn is_potential_parent(node_type: &str) -> bool {
        POTENTIAL_PARENT_TYPES.contains(&node_type)
    }

    pub fn is_leaf_node(metadata: &GmodNodeMetadata) -> bool {
        LEAF_TYPES.contains(&metadata.full_type())
    }

    pub fn is_function_node(metadata: &GmodNodeMetadata) -> bool {
        metadata.category() != NODE_CATEGORY_PRODUCT && metadata.category() != NODE_CATEGORY_ASSET
    }

    pub fn is_product_selection(metadata: &GmodNodeMetadata) -> bool {
        metadata.category() == NODE_CATEGORY_PRODUCT
            && metadata.node_type() == NODE_TYPE_SELECTION
    }

    pub fn is_product_type(metadata: &GmodNodeMetadata) -> bool {
        metadata.category() == NODE_CATEGORY_PRODUCT && metadata.node_type() == NODE_TYPE_TYPE
    }

    pub fn is_asset(metadata: &GmodNodeMetadata) -> bool {
        metadata.category() == NODE_CATEGORY_ASSET
    }

    pub fn is_asset_function_node(metadata: &GmodNodeMetadata) -> bool {
        metadata.category() == NODE_CATEGORY_ASSET_FUNCTION
    }

    //----------------------------------------------
    // Relational predicates
    //----------------------------------------------

    /// Function parent with a product-type child.
    pub fn is_product_type_assignment(
        parent: Option<&GmodNode>,
        child: Option<&GmodNode>,
    ) -> bool {
        let (Some(parent), Some(child)) = (parent, child) else {
            return false;
        };
        parent.metadata().category().contains(NODE_CATEGORY_FUNCTION)
            && child.metadata().category() == NODE_CATEGORY_PRODUCT
            && child.metadata().node_type() == NODE_TYPE_TYPE
    }

    /// Function parent with a product-selection child.
    pub fn is_product_selection_assignment(
        parent: Option<&GmodNode>,
        child: Option<&GmodNode>,
    ) -> bool {
        let (Some(parent), Some(child)) = (parent, child) else {
            return false;
        };
        parent.metadata().category().contains(NODE_CATEGORY_FUNCTION)
            && child.metadata().category().contains(NODE_CATEGORY_PRODUCT)
            && child.metadata().node_type() == NODE_TYPE_SELECTION
    }

    //----------------------------------------------
    // Enumeration
    //----------------------------------------------

    /// Every node in dictionary order (deterministic, not topological).
    pub fn iter(&self) -> impl Iterator<Item = &GmodNode> {
        self.node_map.iter().map(|(_, node)| node)
    }
}
