//! The version conversion engine.

use std::collections::HashMap;

use tracing::debug;
use vista_gmod::traversal;
use vista_gmod::{GmodNode, GmodPath, GmodProvider};
use vista_types::VisVersion;

use crate::conversion::GmodVersioningNode;
use crate::dto::GmodVersioningDto;
use crate::error::VersioningError;
use crate::path_cache::{CacheStats, PathConversionCache};

/// Applies per-release rewrite tables to GMOD nodes and paths.
///
/// Tables are keyed by *target* version: the table stored under `3-5a`
/// describes the step from `3-4a` into `3-5a`. Conversions across more
/// than one release step through every adjacent pair.
pub struct GmodVersioning {
    versionings: HashMap<VisVersion, GmodVersioningNode>,
    path_cache: PathConversionCache,
}

impl GmodVersioning {
    /// Builds the engine from the versioning resources, keyed by
    /// release string.
    pub fn new(dtos: &HashMap<String, GmodVersioningDto>) -> Result<Self, VersioningError> {
        let mut versionings = HashMap::with_capacity(dtos.len());
        for (release, dto) in dtos {
            let version = VisVersion::try_parse(release)
                .ok_or_else(|| VersioningError::InvalidVersionString(release.clone()))?;
            versionings.insert(version, GmodVersioningNode::new(version, dto)?);
        }
        Ok(Self {
            versionings,
            path_cache: PathConversionCache::new(),
        })
    }

    fn validate_source_and_target(
        &self,
        source: VisVersion,
        target: VisVersion,
    ) -> Result<(), VersioningError> {
        if !source.is_valid() {
            return Err(VersioningError::InvalidVersion(source));
        }
        if !target.is_valid() {
            return Err(VersioningError::InvalidVersion(target));
        }
        if source >= target {
            return Err(VersioningError::InvalidVersionPair {
                from_version: source,
                target,
            });
        }
        Ok(())
    }

    //----------------------------------------------
    // Node conversion
    //----------------------------------------------

    /// Converts a node from `source_version` to `target_version`.
    ///
    /// `Ok(None)` means the node has no valid counterpart in the target
    /// release. Nodes without a table entry pass through unchanged, but
    /// are still re-resolved against each step's GMOD.
    pub fn convert_node(
        &self,
        source_version: VisVersion,
        node: &GmodNode,
        target_version: VisVersion,
        gmods: &dyn GmodProvider,
    ) -> Result<Option<GmodNode>, VersioningError> {
        self.validate_source_and_target(source_version, target_version)?;

        let mut current = node.clone();
        let mut version = source_version;
        while version < target_version {
            let next = version
                .next()
                .ok_or(VersioningError::InvalidVersion(version))?;
            match self.convert_node_step(&current, next, gmods)? {
                Some(converted) => current = converted,
                None => return Ok(None),
            }
            version = next;
        }
        Ok(Some(current))
    }

    /// One adjacent step: rewrite the code per the target's table and
    /// re-resolve the node in the target GMOD, keeping its location.
    fn convert_node_step(
        &self,
        node: &GmodNode,
        target_version: VisVersion,
        gmods: &dyn GmodProvider,
    ) -> Result<Option<GmodNode>, VersioningError> {
        let next_code = self
            .versionings
            .get(&target_version)
            .and_then(|table| table.try_get_code_changes(node.code()))
            .and_then(|change| change.target.as_deref())
            .unwrap_or_else(|| node.code());

        let gmod = gmods.gmod(target_version)?;
        let Some(target_node) = gmod.try_get_node(next_code) else {
            debug!(
                code = node.code(),
                target = %target_version,
                "node has no counterpart in target release"
            );
            return Ok(None);
        };
        Ok(Some(
            target_node.try_with_location(node.location().cloned()),
        ))
    }

    //----------------------------------------------
    // Path conversion
    //----------------------------------------------

    /// Converts a whole path, consulting the conversion cache first.
    ///
    /// `Ok(None)` means no valid path exists in the target release;
    /// negative outcomes are cached like positive ones.
    pub fn convert_path(
        &self,
        source_version: VisVersion,
        path: &GmodPath,
        target_version: VisVersion,
        gmods: &dyn GmodProvider,
    ) -> Result<Option<GmodPath>, VersioningError> {
        self.validate_source_and_target(source_version, target_version)?;
        if path.vis_version() != source_version {
            return Err(VersioningError::PathVersionMismatch {
                path: path.vis_version(),
                from_version: source_version,
            });
        }

        let path_string = path.to_string();
        if let Some(cached) = self
            .path_cache
            .try_get(source_version, target_version, &path_string)
        {
            return Ok(cached);
        }

        let result = self.convert_path_internal(source_version, path, target_version, gmods)?;
        self.path_cache
            .put(source_version, target_version, &path_string, result.clone());
        Ok(result)
    }

    fn convert_path_internal(
        &self,
        source_version: VisVersion,
        path: &GmodPath,
        target_version: VisVersion,
        gmods: &dyn GmodProvider,
    ) -> Result<Option<GmodPath>, VersioningError> {
        let Some(target_end) =
            self.convert_node(source_version, path.node(), target_version, gmods)?
        else {
            return Ok(None);
        };
        if target_end.is_root() {
            return Ok(Some(
                GmodPath::new(target_end, Vec::new()).expect("root-only path is valid"),
            ));
        }

        let gmod = gmods.gmod(target_version)?;

        // Convert every node of the absolute chain.
        let mut qualifying: Vec<GmodNode> = Vec::with_capacity(path.length());
        for (_, node) in path.iter() {
            match self.convert_node(source_version, node, target_version, gmods)? {
                Some(converted) => qualifying.push(converted),
                None => return Ok(None),
            }
        }

        // Merges and tail contractions leave consecutive duplicates;
        // collapse them, keeping any location either copy carries.
        qualifying.dedup_by(|next, kept| {
            if kept.code() != next.code() {
                return false;
            }
            if kept.location().is_none() && next.location().is_some() {
                *kept = next.clone();
            }
            true
        });

        if !qualifying[0].is_root() {
            return Ok(None);
        }

        // Re-link the chain in the target model, discovering nodes that
        // conversions introduced between two known neighbors.
        let mut chain: Vec<GmodNode> = Vec::with_capacity(qualifying.len());
        chain.push(qualifying[0].clone());
        for node in &qualifying[1..] {
            let linked = chain.last().expect("chain is non-empty").is_child(node);
            if !linked {
                let chain_refs: Vec<&GmodNode> = chain.iter().collect();
                let (found, remaining) =
                    traversal::path_exists_between(&gmod, &chain_refs, node)?;
                if !found {
                    debug!(code = node.code(), "no chain to converted node in target release");
                    return Ok(None);
                }
                chain.extend(remaining.into_iter().cloned());
            }
            chain.push(node.clone());
        }

        let target_node = chain.pop().expect("chain contains at least the root");
        Ok(GmodPath::new(target_node, chain).ok())
    }

    //----------------------------------------------
    // Cache access
    //----------------------------------------------

    pub fn path_cache_stats(&self) -> CacheStats {
        self.path_cache.stats()
    }

    pub fn clear_path_cache(&self) {
        self.path_cache.clear();
    }
}
