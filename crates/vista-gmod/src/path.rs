//! Paths through the GMOD and individualization-set analysis.

use std::fmt;
use std::fmt::Write as _;

use vista_locations::Location;
use vista_types::VisVersion;

use crate::error::{ChainError, GmodError};
use crate::gmod::Gmod;
use crate::node::GmodNode;

/// An immutable root-to-target sequence of GMOD nodes.
///
/// The path owns value copies of its nodes so locations can be installed
/// per path without touching the graph. Equality is pairwise node
/// equality, i.e. `(code, location)` along the whole chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmodPath {
    vis_version: VisVersion,
    parents: Vec<GmodNode>,
    node: GmodNode,
}

impl GmodPath {
    /// Builds a path after validating the chain against the graph.
    ///
    /// An empty parent list is allowed and describes the root-only path.
    pub fn new(node: GmodNode, parents: Vec<GmodNode>) -> Result<Self, GmodError> {
        if !parents.is_empty() {
            let parent_refs: Vec<&GmodNode> = parents.iter().collect();
            if let Err(issue) = Self::validate_chain(&parent_refs, &node) {
                return Err(GmodError::InvalidPath(match issue {
                    ChainError::Empty => "no parents".to_string(),
                    ChainError::NotRooted => {
                        format!("first parent '{}' is not the root", parents[0].code())
                    }
                    ChainError::MissingLink(index) => {
                        format!("missing link at index {index}")
                    }
                }));
            }
        }
        Ok(Self::new_unchecked(node, parents))
    }

    /// Builds a path whose chain has already been verified.
    pub(crate) fn new_unchecked(node: GmodNode, parents: Vec<GmodNode>) -> Self {
        Self {
            vis_version: node.vis_version(),
            parents,
            node,
        }
    }

    pub fn vis_version(&self) -> VisVersion {
        self.vis_version
    }

    /// The target node.
    pub fn node(&self) -> &GmodNode {
        &self.node
    }

    /// The parent chain from the root to the target's parent.
    pub fn parents(&self) -> &[GmodNode] {
        &self.parents
    }

    /// Parents plus target.
    pub fn length(&self) -> usize {
        self.parents.len() + 1
    }

    /// The node at `depth`; depth 0 is the root, the last depth the
    /// target.
    pub fn get(&self, depth: usize) -> Option<&GmodNode> {
        if depth < self.parents.len() {
            self.parents.get(depth)
        } else if depth == self.parents.len() {
            Some(&self.node)
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, depth: usize) -> Option<&mut GmodNode> {
        let parent_count = self.parents.len();
        if depth < parent_count {
            self.parents.get_mut(depth)
        } else if depth == parent_count {
            Some(&mut self.node)
        } else {
            None
        }
    }

    /// `(depth, node)` pairs from `from_depth` to the target.
    pub fn iter_from(
        &self,
        from_depth: usize,
    ) -> impl Iterator<Item = (usize, &GmodNode)> + '_ {
        (from_depth..self.length()).map(move |depth| {
            (depth, self.get(depth).expect("depth bounded by length"))
        })
    }

    /// `(depth, node)` pairs for the whole path.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &GmodNode)> + '_ {
        self.iter_from(0)
    }

    //----------------------------------------------
    // Chain validation
    //----------------------------------------------

    /// Validates that `parents` starts at the root and every consecutive
    /// pair is linked, reporting the first broken index.
    pub fn validate_chain(parents: &[&GmodNode], target: &GmodNode) -> Result<(), ChainError> {
        if parents.is_empty() {
            return Err(ChainError::Empty);
        }
        if !parents[0].is_root() {
            return Err(ChainError::NotRooted);
        }
        for index in 0..parents.len() {
            let parent = parents[index];
            let child = if index + 1 < parents.len() {
                parents[index + 1]
            } else {
                target
            };
            if !parent.is_child(child) {
                return Err(ChainError::MissingLink(index));
            }
        }
        Ok(())
    }

    /// Whether `parents` plus `target` forms a valid rooted chain.
    pub fn is_valid(parents: &[&GmodNode], target: &GmodNode) -> bool {
        Self::validate_chain(parents, target).is_ok()
    }

    //----------------------------------------------
    // Rendering
    //----------------------------------------------

    /// Writes the terse form: leaf parents and the target, `/`-joined.
    pub fn write_string(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for parent in &self.parents {
            if !Gmod::is_leaf_node(parent.metadata()) {
                continue;
            }
            write!(out, "{parent}/")?;
        }
        write!(out, "{}", self.node)
    }

    /// The absolute chain from the root, `/`-joined.
    pub fn to_full_path_string(&self) -> String {
        let mut out = String::new();
        for parent in &self.parents {
            let _ = write!(out, "{parent}/");
        }
        let _ = write!(out, "{}", self.node);
        out
    }

    //----------------------------------------------
    // Manipulation
    //----------------------------------------------

    /// A copy with every node's location cleared.
    pub fn without_locations(&self) -> Self {
        Self {
            vis_version: self.vis_version,
            parents: self.parents.iter().map(GmodNode::without_location).collect(),
            node: self.node.without_location(),
        }
    }

    //----------------------------------------------
    // Names
    //----------------------------------------------

    /// The assignment name of the node at `depth`, keyed by the deepest
    /// path node present in its `normal_assignment_names`.
    pub fn normal_assignment_name(&self, depth: usize) -> Option<&str> {
        let node = self.get(depth)?;
        let names = node.metadata().normal_assignment_names();
        if names.is_empty() {
            return None;
        }
        for index in (0..self.length()).rev() {
            let child = self.get(index).expect("index bounded by length");
            if let Some(name) = names.get(child.code()) {
                return Some(name.as_str());
            }
        }
        None
    }

    /// `(depth, name)` for every function node that is a leaf or the
    /// target; the name prefers the common name, then the metadata name,
    /// then a deeper node's assignment name.
    pub fn common_names(&self) -> Vec<(usize, String)> {
        let mut result = Vec::new();
        for (depth, node) in self.iter() {
            let is_target = depth == self.parents.len();
            if !(node.is_leaf_node() || is_target) || !node.is_function_node() {
                continue;
            }

            let mut name = match node.metadata().common_name() {
                Some(common) if !common.is_empty() => common.to_string(),
                _ => node.metadata().name().to_string(),
            };

            let assignments = node.metadata().normal_assignment_names();
            if !assignments.is_empty() {
                if let Some(assigned) = assignments.get(self.node.code()) {
                    name = assigned.clone();
                }
                for index in (depth..self.parents.len()).rev() {
                    if let Some(assigned) = assignments.get(self.parents[index].code()) {
                        name = assigned.clone();
                        break;
                    }
                }
            }

            result.push((depth, name));
        }
        result
    }

    //----------------------------------------------
    // Individualization
    //----------------------------------------------

    /// Scans the path and returns its individualizable sets.
    pub fn individualizable_sets(&self) -> Vec<GmodIndividualizableSet> {
        let mut result = Vec::new();
        let mut visitor = LocationSetsVisitor::new();
        for depth in 0..self.length() {
            let node = self.get(depth).expect("depth bounded by length");
            let Some((start, end, _)) = visitor.visit(node, depth, &self.parents, &self.node)
            else {
                continue;
            };
            let indices: Vec<usize> = (start..=end).collect();
            result.push(
                GmodIndividualizableSet::new(indices, self.clone())
                    .expect("set emitted by the visitor is valid"),
            );
        }
        result
    }

    /// Whether any individualizable set exists on this path.
    pub fn is_individualizable(&self) -> bool {
        let mut visitor = LocationSetsVisitor::new();
        for depth in 0..self.length() {
            let node = self.get(depth).expect("depth bounded by length");
            if visitor
                .visit(node, depth, &self.parents, &self.node)
                .is_some()
            {
                return true;
            }
        }
        false
    }

    /// Whether the target can carry Local ID metadata.
    pub fn is_mappable(&self, gmod: &Gmod) -> bool {
        self.node.is_mappable(gmod)
    }
}

impl fmt::Display for GmodPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_string(f)
    }
}

impl std::ops::Index<usize> for GmodPath {
    type Output = GmodNode;

    fn index(&self, depth: usize) -> &GmodNode {
        self.get(depth).expect("path depth out of bounds")
    }
}

/// Stateful scan locating contiguous runs of nodes that individualize
/// together.
///
/// Mirrors the path grammar: a run opens at a potential-parent node and
/// closes at the next potential parent or the target; a candidate run is
/// emitted when it carries at most one location, skips no individualizable
/// node mid-run, and contains a leaf or the target.
///
/// # Panics
///
/// Panics on mapping invariants: different locations inside one run, or
/// an individualizable node skipped in the middle of a run. Parsed paths
/// never reach these states; hand-built ones can.
pub(crate) struct LocationSetsVisitor {
    current_parent_start: Option<usize>,
}

impl LocationSetsVisitor {
    pub(crate) fn new() -> Self {
        Self {
            current_parent_start: None,
        }
    }

    pub(crate) fn visit(
        &mut self,
        node: &GmodNode,
        index: usize,
        parents: &[GmodNode],
        target: &GmodNode,
    ) -> Option<(usize, usize, Option<Location>)> {
        let is_parent = Gmod::is_potential_parent(node.metadata().node_type());
        let is_target = index == parents.len();

        let Some(start) = self.current_parent_start else {
            if is_parent {
                self.current_parent_start = Some(index);
            }
            if node.is_individualizable(is_target, false) {
                return Some((index, index, node.location().cloned()));
            }
            return None;
        };

        if is_parent || is_target {
            let mut nodes: Option<(usize, usize, Option<Location>)> = None;

            if start + 1 == index {
                // Only a potential-parent boundary advanced by one:
                // a single-node set when that node individualizes.
                if node.is_individualizable(is_target, false) {
                    nodes = Some((index, index, node.location().cloned()));
                }
            } else {
                let mut skipped_one: Option<usize> = None;
                let mut has_composition = false;

                for j in (start + 1)..=index {
                    let set_node = if j < parents.len() { &parents[j] } else { target };

                    if !set_node.is_individualizable(j == parents.len(), true) {
                        if nodes.is_some() {
                            skipped_one = Some(j);
                        }
                        continue;
                    }

                    if let Some((_, _, Some(location))) = &nodes {
                        if let Some(set_location) = set_node.location() {
                            assert!(
                                location == set_location,
                                "mapping error: different locations in the same nodeset"
                            );
                        }
                    }
                    assert!(
                        skipped_one.is_none(),
                        "can't skip in the middle of individualizable set"
                    );

                    if set_node.is_function_composition() {
                        has_composition = true;
                    }

                    let location = match &nodes {
                        Some((_, _, Some(location))) => Some(location.clone()),
                        _ => set_node.location().cloned(),
                    };
                    let run_start = nodes.map_or(j, |(s, _, _)| s);
                    nodes = Some((run_start, j, location));
                }

                let collapses_to_composition =
                    has_composition && matches!(&nodes, Some((s, e, _)) if s == e);
                if collapses_to_composition {
                    nodes = None;
                }
            }

            self.current_parent_start = Some(index);

            if let Some((s, e, location)) = nodes {
                let mut has_leaf = false;
                for j in s..=e {
                    let set_node = if j < parents.len() { &parents[j] } else { target };
                    if set_node.is_leaf_node() || j == parents.len() {
                        has_leaf = true;
                        break;
                    }
                }
                if has_leaf {
                    return Some((s, e, location));
                }
            }
        }

        if is_target && node.is_individualizable(true, false) {
            return Some((index, index, node.location().cloned()));
        }

        None
    }
}

/// A contiguous run of path indices that individualize together.
///
/// Building consumes the set, so a set can install its location exactly
/// once; the consumed-by-value `build` is the move-only contract.
#[derive(Debug)]
pub struct GmodIndividualizableSet {
    node_indices: Vec<usize>,
    path: GmodPath,
}

impl GmodIndividualizableSet {
    /// Validates the indices against the path and captures a working
    /// copy.
    pub fn new(node_indices: Vec<usize>, path: GmodPath) -> Result<Self, GmodError> {
        if node_indices.is_empty() {
            return Err(GmodError::InvalidSet("node indices cannot be empty".into()));
        }

        for &index in &node_indices {
            let Some(node) = path.get(index) else {
                return Err(GmodError::InvalidSet(format!(
                    "node index {index} is out of bounds for path length {}",
                    path.length()
                )));
            };
            let is_target = index == path.length() - 1;
            let is_in_set = node_indices.len() > 1;
            if !node.is_individualizable(is_target, is_in_set) {
                return Err(GmodError::InvalidSet(format!(
                    "node '{}' at index {index} is not individualizable in the given context",
                    node.code()
                )));
            }
        }

        if node_indices.len() > 1 {
            let expected = path[node_indices[0]].location();
            for &index in &node_indices[1..] {
                if path[index].location() != expected {
                    return Err(GmodError::InvalidSet(format!(
                        "node '{}' at index {index} has a different location than the first node in the set",
                        path[index].code()
                    )));
                }
            }
        }

        let has_short_path_node = node_indices.iter().any(|&index| {
            let node = &path[index];
            node == path.node() || node.is_leaf_node()
        });
        if !has_short_path_node {
            return Err(GmodError::InvalidSet(
                "no nodes in the set are part of the short path (final node or leaf node)".into(),
            ));
        }

        Ok(Self { node_indices, path })
    }

    pub fn node_indices(&self) -> &[usize] {
        &self.node_indices
    }

    pub fn nodes(&self) -> Vec<&GmodNode> {
        self.node_indices
            .iter()
            .map(|&index| &self.path[index])
            .collect()
    }

    /// The set's current location (all members share it).
    pub fn location(&self) -> Option<Location> {
        self.path[self.node_indices[0]].location().cloned()
    }

    /// Installs (or clears) the location on every member.
    pub fn set_location(&mut self, location: Option<Location>) {
        for i in 0..self.node_indices.len() {
            let index = self.node_indices[i];
            if let Some(node) = self.path.get_mut(index) {
                *node = match &location {
                    Some(location) => node.with_location(location.clone()),
                    None => node.without_location(),
                };
            }
        }
    }

    /// Yields the path with the installed locations.
    pub fn build(self) -> GmodPath {
        self.path
    }
}

impl fmt::Display for GmodIndividualizableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (j, &index) in self.node_indices.iter().enumerate() {
            let node = &self.path[index];
            if node.is_leaf_node() || j == self.node_indices.len() - 1 {
                if !first {
                    f.write_char('/')?;
                }
                write!(f, "{node}")?;
                first = false;
            }
        }
        Ok(())
    }
}
