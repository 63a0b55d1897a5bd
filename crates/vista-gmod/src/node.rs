//! GMOD nodes and their metadata.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use vista_locations::{Location, LocationError, Locations};
use vista_types::VisVersion;

use crate::dto::GmodNodeDto;
use crate::gmod::Gmod;

/// Handle to a node inside the [`Gmod`] that issued it.
///
/// Handles index the GMOD's node dictionary; resolving one against a
/// different GMOD instance is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// Immutable descriptive data of a GMOD node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmodNodeMetadata {
    category: String,
    node_type: String,
    full_type: String,
    name: String,
    common_name: Option<String>,
    definition: Option<String>,
    common_definition: Option<String>,
    install_substructure: Option<bool>,
    normal_assignment_names: HashMap<String, String>,
}

impl GmodNodeMetadata {
    pub(crate) fn from_dto(dto: &GmodNodeDto) -> Self {
        Self {
            category: dto.category.clone(),
            node_type: dto.node_type.clone(),
            full_type: format!("{} {}", dto.category, dto.node_type),
            name: dto.name.clone(),
            common_name: dto.common_name.clone(),
            definition: dto.definition.clone(),
            common_definition: dto.common_definition.clone(),
            install_substructure: dto.install_substructure,
            normal_assignment_names: dto.normal_assignment_names.clone().unwrap_or_default(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Category and type joined with a space, e.g. "ASSET FUNCTION LEAF".
    pub fn full_type(&self) -> &str {
        &self.full_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn common_definition(&self) -> Option<&str> {
        self.common_definition.as_deref()
    }

    pub fn install_substructure(&self) -> Option<bool> {
        self.install_substructure
    }

    /// Child code to assigned-name mapping.
    pub fn normal_assignment_names(&self) -> &HashMap<String, String> {
        &self.normal_assignment_names
    }
}

/// A node of the Generic Product Model.
///
/// Relationship vectors hold [`NodeId`] handles into the owning GMOD;
/// the GMOD owns every node, paths carry value copies. Equality and
/// hashing use `(code, location)` only, so a path-local copy with a
/// location differs from the graph node it was cloned from.
#[derive(Debug, Clone)]
pub struct GmodNode {
    code: String,
    location: Option<Location>,
    vis_version: VisVersion,
    metadata: Arc<GmodNodeMetadata>,
    children: Vec<NodeId>,
    parents: Vec<NodeId>,
    children_set: HashSet<String>,
}

impl GmodNode {
    pub(crate) fn from_dto(version: VisVersion, dto: &GmodNodeDto) -> Self {
        Self {
            code: dto.code.clone(),
            location: None,
            vis_version: version,
            metadata: Arc::new(GmodNodeMetadata::from_dto(dto)),
            children: Vec::new(),
            parents: Vec::new(),
            children_set: HashSet::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn vis_version(&self) -> VisVersion {
        self.vis_version
    }

    pub fn metadata(&self) -> &GmodNodeMetadata {
        &self.metadata
    }

    /// Handles of direct children, in relation order.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }

    /// Handles of direct parents, in relation order.
    pub fn parent_ids(&self) -> &[NodeId] {
        &self.parents
    }

    //----------------------------------------------
    // Location variants
    //----------------------------------------------

    /// A copy of this node without any location.
    pub fn without_location(&self) -> Self {
        let mut node = self.clone();
        node.location = None;
        node
    }

    /// A copy of this node carrying `location`.
    pub fn with_location(&self, location: Location) -> Self {
        let mut node = self.clone();
        node.location = Some(location);
        node
    }

    /// A copy with the parsed location, failing on grammar violations.
    pub fn with_location_str(
        &self,
        location: &str,
        locations: &Locations,
    ) -> Result<Self, LocationError> {
        Ok(self.with_location(locations.parse(location)?))
    }

    /// A copy carrying `location` when given, otherwise an unchanged
    /// copy. Never fails.
    pub fn try_with_location(&self, location: Option<Location>) -> Self {
        match location {
            Some(location) => self.with_location(location),
            None => self.clone(),
        }
    }

    //----------------------------------------------
    // Classification
    //----------------------------------------------

    /// Whether this node may carry a location in the given context.
    pub fn is_individualizable(&self, is_target_node: bool, is_in_set: bool) -> bool {
        if self.metadata.node_type == "GROUP" {
            return false;
        }
        if self.metadata.node_type == "SELECTION" {
            return false;
        }
        if self.is_product_type() {
            return false;
        }
        if self.metadata.category == "ASSET" && self.metadata.node_type == "TYPE" {
            return false;
        }
        if self.is_function_composition() {
            return self.code.ends_with('i') || is_in_set || is_target_node;
        }
        true
    }

    /// Asset or product function with type COMPOSITION.
    pub fn is_function_composition(&self) -> bool {
        (self.metadata.category == "ASSET FUNCTION"
            || self.metadata.category == "PRODUCT FUNCTION")
            && self.metadata.node_type == "COMPOSITION"
    }

    /// Whether this node can carry metadata in a Local ID.
    pub fn is_mappable(&self, gmod: &Gmod) -> bool {
        if self.product_type(gmod).is_some() {
            return false;
        }
        if self.product_selection(gmod).is_some() {
            return false;
        }
        if self.is_product_selection() {
            return false;
        }
        if self.is_asset() {
            return false;
        }
        !matches!(self.code.chars().last(), Some('a') | Some('s'))
    }

    pub fn is_product_selection(&self) -> bool {
        Gmod::is_product_selection(&self.metadata)
    }

    pub fn is_product_type(&self) -> bool {
        Gmod::is_product_type(&self.metadata)
    }

    pub fn is_asset(&self) -> bool {
        Gmod::is_asset(&self.metadata)
    }

    pub fn is_leaf_node(&self) -> bool {
        Gmod::is_leaf_node(&self.metadata)
    }

    pub fn is_function_node(&self) -> bool {
        Gmod::is_function_node(&self.metadata)
    }

    pub fn is_asset_function_node(&self) -> bool {
        Gmod::is_asset_function_node(&self.metadata)
    }

    /// The root node carries the code "VE".
    pub fn is_root(&self) -> bool {
        self.code == "VE"
    }

    //----------------------------------------------
    // Product assignments
    //----------------------------------------------

    /// The single product-type child of this function node, if any.
    pub fn product_type<'g>(&self, gmod: &'g Gmod) -> Option<&'g GmodNode> {
        if self.children.len() != 1 {
            return None;
        }
        if !self.metadata.category.contains("FUNCTION") {
            return None;
        }
        let child = gmod.node(self.children[0]);
        if child.metadata.category != "PRODUCT" || child.metadata.node_type != "TYPE" {
            return None;
        }
        Some(child)
    }

    /// The single product-selection child of this function node, if any.
    pub fn product_selection<'g>(&self, gmod: &'g Gmod) -> Option<&'g GmodNode> {
        if self.children.len() != 1 {
            return None;
        }
        if !self.metadata.category.contains("FUNCTION") {
            return None;
        }
        let child = gmod.node(self.children[0]);
        if !child.metadata.category.contains("PRODUCT")
            || child.metadata.node_type != "SELECTION"
        {
            return None;
        }
        Some(child)
    }

    //----------------------------------------------
    // Relationship queries
    //----------------------------------------------

    /// O(1) direct-child check by node.
    pub fn is_child(&self, node: &GmodNode) -> bool {
        self.is_child_code(&node.code)
    }

    /// O(1) direct-child check by code.
    pub fn is_child_code(&self, code: &str) -> bool {
        self.children_set.contains(code)
    }

    //----------------------------------------------
    // Construction-scoped mutation (used by the Gmod builder)
    //----------------------------------------------

    pub(crate) fn add_child(&mut self, child: NodeId, code: &str) {
        self.children.push(child);
        self.children_set.insert(code.to_string());
    }

    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        self.parents.push(parent);
    }

    pub(crate) fn trim(&mut self) {
        self.children.shrink_to_fit();
        self.parents.shrink_to_fit();
        self.children_set.shrink_to_fit();
    }
}

impl PartialEq for GmodNode {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.location == other.location
    }
}

impl Eq for GmodNode {}

impl Hash for GmodNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.location.hash(state);
    }
}

impl fmt::Display for GmodNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}-{}", self.code, location),
            None => f.write_str(&self.code),
        }
    }
}
