//! The two-mode GMOD path parser.
//!
//! The full-path parser consumes the absolute chain from the root and
//! validates every link. The short-path parser consumes a terse chain
//! seeded near the target and discovers the full chain by traversal,
//! then reconstructs the prefix above the seed by walking unique-parent
//! links. Both finish with the individualization pass that spreads a
//! chosen location across its set and rejects incoherent inputs.

use std::collections::HashMap;

use vista_locations::{Location, Locations};

use crate::error::{ChainError, GmodPathParseError};
use crate::gmod::Gmod;
use crate::node::GmodNode;
use crate::path::{GmodPath, LocationSetsVisitor};
use crate::traversal::{self, TraversalOptions, TraverseControl};

/// Splits a path segment into its code and optional location part.
fn split_segment(segment: &str) -> (&str, Option<&str>) {
    match segment.split_once('-') {
        Some((code, location)) => (code, Some(location)),
        None => (segment, None),
    }
}

/// Resolves one segment against the GMOD and location table.
fn resolve_segment(
    segment: &str,
    gmod: &Gmod,
    locations: &Locations,
) -> Result<GmodNode, GmodPathParseError> {
    let (code, location) = split_segment(segment);
    let node = gmod
        .try_get_node(code)
        .ok_or_else(|| GmodPathParseError::NodeLookup(segment.to_string()))?;
    match location {
        Some(location) => {
            let parsed = locations
                .try_parse(location)
                .ok_or_else(|| GmodPathParseError::LocationParse(location.to_string()))?;
            Ok(node.with_location(parsed))
        }
        None => Ok(node.clone()),
    }
}

pub(crate) fn parse_full_path_internal(
    item: &str,
    gmod: &Gmod,
    locations: &Locations,
) -> Result<GmodPath, GmodPathParseError> {
    if item.is_empty() {
        return Err(GmodPathParseError::Empty);
    }

    let root_code = gmod
        .root_node()
        .map_err(|_| GmodPathParseError::NotFound)?
        .code()
        .to_string();
    if !item.starts_with(root_code.as_str()) {
        return Err(GmodPathParseError::MissingRoot(root_code));
    }

    let mut nodes: Vec<GmodNode> = Vec::with_capacity(item.len() / 3);
    for segment in item.split('/') {
        if segment.is_empty() {
            continue;
        }
        nodes.push(resolve_segment(segment, gmod, locations)?);
    }

    if nodes.is_empty() {
        return Err(GmodPathParseError::Empty);
    }

    let mut end_node = nodes.pop().expect("nodes is non-empty");
    if nodes.is_empty() {
        return Ok(GmodPath::new_unchecked(end_node, nodes));
    }

    if !nodes[0].is_root() {
        return Err(GmodPathParseError::InvalidSequence {
            missing_link_at: None,
        });
    }

    {
        let parent_refs: Vec<&GmodNode> = nodes.iter().collect();
        if let Err(issue) = GmodPath::validate_chain(&parent_refs, &end_node) {
            return Err(GmodPathParseError::InvalidSequence {
                missing_link_at: match issue {
                    ChainError::MissingLink(index) => Some(index),
                    ChainError::Empty | ChainError::NotRooted => None,
                },
            });
        }
    }

    let has_locations =
        end_node.location().is_some() || nodes.iter().any(|node| node.location().is_some());
    if !has_locations {
        return Ok(GmodPath::new_unchecked(end_node, nodes));
    }

    // Individualization pass: spread each set's location across its
    // members, and remember the set ranges for the coherence check.
    let mut visitor = LocationSetsVisitor::new();
    let mut prev_non_null_location: Option<usize> = None;
    let mut sets: Vec<(usize, usize)> = Vec::new();

    for i in 0..=nodes.len() {
        let node = if i < nodes.len() { &nodes[i] } else { &end_node };
        let set = visitor.visit(node, i, &nodes, &end_node);

        let Some((set_start, set_end, location)) = set else {
            if prev_non_null_location.is_none() && node.location().is_some() {
                prev_non_null_location = Some(i);
            }
            continue;
        };

        if let Some(prev) = prev_non_null_location {
            for j in prev..set_start {
                let located = if j < nodes.len() { &nodes[j] } else { &end_node };
                if located.location().is_some() {
                    return Err(GmodPathParseError::InvalidIndividualization(
                        "expected all nodes in the set to be without individualization".into(),
                    ));
                }
            }
        }
        prev_non_null_location = None;

        sets.push((set_start, set_end));
        if set_start == set_end {
            continue;
        }

        for j in set_start..=set_end {
            if j < nodes.len() {
                nodes[j] = nodes[j].try_with_location(location.clone());
            } else {
                end_node = end_node.try_with_location(location.clone());
            }
        }
    }

    // Coherence: inside a set every node matches the set's location,
    // outside any set no node carries one.
    let mut current_set: Option<(usize, usize)> = None;
    let mut set_cursor = 0usize;
    for i in 0..=nodes.len() {
        while set_cursor < sets.len()
            && current_set.map_or(true, |(_, end)| end < i)
        {
            current_set = Some(sets[set_cursor]);
            set_cursor += 1;
        }

        let inside = current_set.is_some_and(|(start, end)| i >= start && i <= end);
        let node = if i < nodes.len() { &nodes[i] } else { &end_node };

        if inside {
            let (_, end) = current_set.expect("inside implies a set");
            let expected = if end < nodes.len() { &nodes[end] } else { &end_node };
            if node.location() != expected.location() {
                return Err(GmodPathParseError::InvalidIndividualization(
                    "expected all nodes in the set to be individualized the same".into(),
                ));
            }
        } else if node.location().is_some() {
            return Err(GmodPathParseError::InvalidIndividualization(
                "expected all nodes in the set to be without individualization".into(),
            ));
        }
    }

    Ok(GmodPath::new_unchecked(end_node, nodes))
}

/// One tokenized segment of a short path.
struct PathNode {
    code: String,
    location: Option<Location>,
}

pub(crate) fn parse_internal(
    item: &str,
    gmod: &Gmod,
    locations: &Locations,
) -> Result<GmodPath, GmodPathParseError> {
    if gmod.vis_version() != locations.vis_version() {
        return Err(GmodPathParseError::VersionMismatch);
    }

    let mut item = item.trim();
    if item.is_empty() {
        return Err(GmodPathParseError::Empty);
    }
    if let Some(stripped) = item.strip_prefix('/') {
        item = stripped;
    }

    let mut path_nodes: Vec<PathNode> = Vec::new();
    for segment in item.split('/') {
        if segment.is_empty() {
            continue;
        }
        let (code, location) = split_segment(segment);
        if gmod.try_get_node(code).is_none() {
            return Err(GmodPathParseError::NodeLookup(segment.to_string()));
        }
        let location = match location {
            Some(location) => Some(
                locations
                    .try_parse(location)
                    .ok_or_else(|| GmodPathParseError::LocationParse(location.to_string()))?,
            ),
            None => None,
        };
        path_nodes.push(PathNode {
            code: code.to_string(),
            location,
        });
    }

    if path_nodes.is_empty() {
        return Err(GmodPathParseError::Empty);
    }

    let seed = &path_nodes[0];
    let base_node = gmod
        .try_get_node(&seed.code)
        .ok_or_else(|| GmodPathParseError::NodeLookup(seed.code.clone()))?;

    struct ParseContext<'a> {
        path_nodes: &'a [PathNode],
        current_index: usize,
        current_code: String,
        current_location: Option<Location>,
        collected_locations: HashMap<String, Location>,
        path: Option<GmodPath>,
    }

    let mut context = ParseContext {
        path_nodes: &path_nodes,
        current_index: 1,
        current_code: seed.code.clone(),
        current_location: seed.location.clone(),
        collected_locations: HashMap::new(),
        path: None,
    };

    traversal::traverse_from(
        gmod,
        base_node,
        &mut context,
        |ctx: &mut ParseContext<'_>, parents, current| {
            let found = current.code() == ctx.current_code;

            if !found && Gmod::is_leaf_node(current.metadata()) {
                return TraverseControl::SkipSubtree;
            }
            if !found {
                return TraverseControl::Continue;
            }

            if let Some(location) = &ctx.current_location {
                ctx.collected_locations
                    .insert(ctx.current_code.clone(), location.clone());
            }

            if ctx.current_index < ctx.path_nodes.len() {
                let next = &ctx.path_nodes[ctx.current_index];
                ctx.current_index += 1;
                ctx.current_code = next.code.clone();
                ctx.current_location = next.location.clone();
                return TraverseControl::Continue;
            }

            // The chain is complete: materialize the parents seen so
            // far, then climb unique-parent links up to the root.
            let mut path_parents: Vec<GmodNode> = parents
                .iter()
                .map(|parent| match ctx.collected_locations.get(parent.code()) {
                    Some(location) => parent.with_location(location.clone()),
                    None => (*parent).clone(),
                })
                .collect();

            let mut end_node = match &ctx.current_location {
                Some(location) => current.with_location(location.clone()),
                None => current.clone(),
            };

            let start_id = if let Some(first) = path_parents.first() {
                match first.parent_ids() {
                    [only] => Some(*only),
                    _ => None,
                }
            } else {
                match end_node.parent_ids() {
                    [only] => Some(*only),
                    _ => None,
                }
            };
            let Some(start_id) = start_id else {
                return TraverseControl::Stop;
            };

            let mut start = gmod.node(start_id);
            if start.parent_ids().len() > 1 {
                return TraverseControl::Stop;
            }
            loop {
                path_parents.insert(0, start.clone());
                match start.parent_ids() {
                    [] => break,
                    [only] => {
                        start = gmod.node(*only);
                        if start.parent_ids().len() > 1 {
                            return TraverseControl::Stop;
                        }
                    }
                    _ => return TraverseControl::Stop,
                }
            }

            // The climb stops at the root, which entered the prefix on
            // its final iteration; a seed directly under the root makes
            // the first inserted node the root itself.
            if !path_parents
                .first()
                .is_some_and(|first| first.is_root())
            {
                return TraverseControl::Stop;
            }

            // Individualization pass over the reconstructed chain.
            let mut visitor = LocationSetsVisitor::new();
            for i in 0..=path_parents.len() {
                let node = if i < path_parents.len() {
                    &path_parents[i]
                } else {
                    &end_node
                };
                let set = visitor.visit(node, i, &path_parents, &end_node);
                let Some((set_start, set_end, location)) = set else {
                    if node.location().is_some() {
                        return TraverseControl::Stop;
                    }
                    continue;
                };
                if set_start == set_end {
                    continue;
                }
                for j in set_start..=set_end {
                    if j < path_parents.len() {
                        path_parents[j] = path_parents[j].try_with_location(location.clone());
                    } else {
                        end_node = end_node.try_with_location(location.clone());
                    }
                }
            }

            ctx.path = Some(GmodPath::new_unchecked(end_node, path_parents));
            TraverseControl::Stop
        },
        &TraversalOptions::default(),
    );

    context.path.ok_or(GmodPathParseError::NotFound)
}
