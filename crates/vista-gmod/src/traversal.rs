//! Depth-first GMOD traversal with an occurrence budget.
//!
//! The same node can be reached through multiple parent chains, so plain
//! depth-first search would revisit shared subtrees without bound. Each
//! invocation tracks how often a code already sits on the parent stack
//! and skips a subtree once the budget is reached; product-selection
//! assignments bypass the check because the selection subtree legally
//! reappears under every selecting function.

use std::collections::HashMap;

use crate::error::GmodError;
use crate::gmod::Gmod;
use crate::node::GmodNode;

/// Flow control returned by traversal handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraverseControl {
    /// Abort the whole traversal.
    Stop,
    /// Do not descend into the current node's subtree.
    SkipSubtree,
    /// Keep going.
    #[default]
    Continue,
}

/// Traversal configuration.
#[derive(Debug, Clone, Copy)]
pub struct TraversalOptions {
    /// How many times a code may appear on the parent stack before its
    /// subtree is skipped.
    pub max_traversal_occurrence: usize,
}

impl TraversalOptions {
    pub const DEFAULT_MAX_TRAVERSAL_OCCURRENCE: usize = 1;
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_traversal_occurrence: Self::DEFAULT_MAX_TRAVERSAL_OCCURRENCE,
        }
    }
}

/// Parent stack with per-code occurrence counts.
///
/// Owned by one traversal invocation; handlers see it as a slice.
struct Parents<'g> {
    stack: Vec<&'g GmodNode>,
    occurrences: HashMap<&'g str, usize>,
}

impl<'g> Parents<'g> {
    fn new() -> Self {
        Self {
            stack: Vec::with_capacity(64),
            occurrences: HashMap::new(),
        }
    }

    fn push(&mut self, parent: &'g GmodNode) {
        self.stack.push(parent);
        *self.occurrences.entry(parent.code()).or_insert(0) += 1;
    }

    fn pop(&mut self) {
        let Some(parent) = self.stack.pop() else {
            return;
        };
        if let Some(count) = self.occurrences.get_mut(parent.code()) {
            *count -= 1;
            if *count == 0 {
                self.occurrences.remove(parent.code());
            }
        }
    }

    fn occurrences_of(&self, node: &GmodNode) -> usize {
        self.occurrences.get(node.code()).copied().unwrap_or(0)
    }

    fn last(&self) -> Option<&'g GmodNode> {
        self.stack.last().copied()
    }

    fn as_slice(&self) -> &[&'g GmodNode] {
        &self.stack
    }
}

fn traverse_node<'g, S, F>(
    gmod: &'g Gmod,
    parents: &mut Parents<'g>,
    state: &mut S,
    handler: &mut F,
    max_occurrence: usize,
    node: &'g GmodNode,
) -> TraverseControl
where
    F: FnMut(&mut S, &[&'g GmodNode], &'g GmodNode) -> TraverseControl,
{
    // Subtrees flagged as not installed are pruned by convention,
    // without visiting the node itself.
    if node.metadata().install_substructure() == Some(false) {
        return TraverseControl::Continue;
    }

    let result = handler(state, parents.as_slice(), node);
    if matches!(result, TraverseControl::Stop | TraverseControl::SkipSubtree) {
        return result;
    }

    let skip_occurrence_check =
        Gmod::is_product_selection_assignment(parents.last(), Some(node));
    if !skip_occurrence_check {
        let occurrence = parents.occurrences_of(node);
        if occurrence == max_occurrence {
            return TraverseControl::SkipSubtree;
        }
        assert!(
            occurrence < max_occurrence,
            "invalid state - node '{}' occurred more than expected during traversal",
            node.code()
        );
    }

    parents.push(node);
    for &child_id in node.child_ids() {
        let child = gmod.node(child_id);
        match traverse_node(gmod, parents, state, handler, max_occurrence, child) {
            TraverseControl::Stop => return TraverseControl::Stop,
            TraverseControl::SkipSubtree | TraverseControl::Continue => continue,
        }
    }
    parents.pop();

    TraverseControl::Continue
}

/// Traverses the whole GMOD from its root with a stateful handler.
///
/// Returns `Ok(true)` when the traversal ran to completion, `Ok(false)`
/// when a handler stopped it.
pub fn traverse<'g, S, F>(
    gmod: &'g Gmod,
    state: &mut S,
    handler: F,
    options: &TraversalOptions,
) -> Result<bool, GmodError>
where
    F: FnMut(&mut S, &[&'g GmodNode], &'g GmodNode) -> TraverseControl,
{
    let root = gmod.root_node()?;
    Ok(traverse_from(gmod, root, state, handler, options))
}

/// Traverses the subtree rooted at `start` with a stateful handler.
pub fn traverse_from<'g, S, F>(
    gmod: &'g Gmod,
    start: &'g GmodNode,
    state: &mut S,
    mut handler: F,
    options: &TraversalOptions,
) -> bool
where
    F: FnMut(&mut S, &[&'g GmodNode], &'g GmodNode) -> TraverseControl,
{
    let mut parents = Parents::new();
    traverse_node(
        gmod,
        &mut parents,
        state,
        &mut handler,
        options.max_traversal_occurrence,
        start,
    ) == TraverseControl::Continue
}

/// Stateless wrapper over [`traverse`].
pub fn traverse_stateless<'g, F>(
    gmod: &'g Gmod,
    mut handler: F,
    options: &TraversalOptions,
) -> Result<bool, GmodError>
where
    F: FnMut(&[&'g GmodNode], &'g GmodNode) -> TraverseControl,
{
    traverse(
        gmod,
        &mut (),
        |_, parents, node| handler(parents, node),
        options,
    )
}

/// Checks whether `to` is reachable below `from_path` and returns the
/// parents between them.
///
/// The search starts at the last asset-function ancestor of `from_path`
/// (or the root) and compares each candidate's absolute chain — rebuilt
/// by walking unique-parent links — against `from_path` as a prefix.
///
/// # Panics
///
/// Panics when the reconstruction hits a node with multiple parents;
/// callers crossing non-tree regions of the model must be aware.
pub fn path_exists_between<'g>(
    gmod: &'g Gmod,
    from_path: &[&GmodNode],
    to: &GmodNode,
) -> Result<(bool, Vec<&'g GmodNode>), GmodError> {
    let last_asset_function = from_path
        .iter()
        .rev()
        .find(|node| Gmod::is_asset_function_node(node.metadata()));

    struct State<'g> {
        remaining: Vec<&'g GmodNode>,
    }

    let mut state = State {
        remaining: Vec::new(),
    };

    let start = match last_asset_function {
        // Re-resolve in the graph so the handle-bearing node is used.
        Some(node) => gmod.get(node.code())?,
        None => gmod.root_node()?,
    };

    let completed = traverse_from(
        gmod,
        start,
        &mut state,
        |state: &mut State<'g>, parents: &[&'g GmodNode], node: &'g GmodNode| {
            if node.code() != to.code() {
                return TraverseControl::Continue;
            }

            let mut absolute: Vec<&'g GmodNode> = parents.to_vec();
            if let Some(first) = absolute.first().copied() {
                if !first.is_root() {
                    let mut prefix: Vec<&'g GmodNode> = Vec::new();
                    let mut head = first;
                    while !head.is_root() {
                        let parent_ids = head.parent_ids();
                        if parent_ids.is_empty() {
                            break;
                        }
                        assert!(
                            parent_ids.len() == 1,
                            "invalid state - expected one parent during path reconstruction"
                        );
                        head = gmod.node(parent_ids[0]);
                        prefix.insert(0, head);
                    }
                    prefix.extend(absolute);
                    absolute = prefix;
                }
            }

            if absolute.len() < from_path.len() {
                return TraverseControl::Continue;
            }

            let matches = from_path
                .iter()
                .zip(absolute.iter())
                .all(|(a, b)| a.code() == b.code());
            if matches {
                state.remaining = absolute[from_path.len()..].to_vec();
                return TraverseControl::Stop;
            }
            TraverseControl::Continue
        },
        &TraversalOptions::default(),
    );

    Ok((!completed, state.remaining))
}
