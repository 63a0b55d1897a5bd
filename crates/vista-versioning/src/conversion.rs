//! Node-conversion tables.

use std::collections::{HashMap, HashSet};

use vista_types::VisVersion;

use crate::dto::{GmodNodeConversionDto, GmodVersioningDto};
use crate::error::VersioningError;

/// A single conversion operation named by the versioning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionType {
    ChangeCode,
    Merge,
    Move,
    AssignmentChange,
    AssignmentDelete,
}

impl ConversionType {
    /// Parses the resource's operation name.
    pub fn parse(operation: &str) -> Result<Self, VersioningError> {
        match operation {
            "changeCode" => Ok(Self::ChangeCode),
            "merge" => Ok(Self::Merge),
            "move" => Ok(Self::Move),
            "assignmentChange" => Ok(Self::AssignmentChange),
            "assignmentDelete" => Ok(Self::AssignmentDelete),
            other => Err(VersioningError::UnknownOperation(other.to_string())),
        }
    }
}

/// The rewrite applied to one source code on a version step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmodNodeConversion {
    pub operations: HashSet<ConversionType>,
    pub source: String,
    pub target: Option<String>,
    pub old_assignment: Option<String>,
    pub new_assignment: Option<String>,
    pub delete_assignment: Option<bool>,
}

impl GmodNodeConversion {
    fn from_dto(dto: &GmodNodeConversionDto) -> Result<Self, VersioningError> {
        let operations = dto
            .operations
            .iter()
            .map(|operation| ConversionType::parse(operation))
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self {
            operations,
            source: dto.source.clone(),
            target: dto.target.clone(),
            old_assignment: dto.old_assignment.clone(),
            new_assignment: dto.new_assignment.clone(),
            delete_assignment: dto.delete_assignment,
        })
    }
}

/// The full conversion table for the step into one VIS version.
#[derive(Debug, Clone)]
pub struct GmodVersioningNode {
    vis_version: VisVersion,
    changes: HashMap<String, GmodNodeConversion>,
}

impl GmodVersioningNode {
    pub fn new(
        vis_version: VisVersion,
        dto: &GmodVersioningDto,
    ) -> Result<Self, VersioningError> {
        let mut changes = HashMap::with_capacity(dto.items.len());
        for (code, entry) in &dto.items {
            changes.insert(code.clone(), GmodNodeConversion::from_dto(entry)?);
        }
        Ok(Self {
            vis_version,
            changes,
        })
    }

    /// The version this table converts into.
    pub fn vis_version(&self) -> VisVersion {
        self.vis_version
    }

    /// The conversion for `code`, if the step rewrites it.
    pub fn try_get_code_changes(&self, code: &str) -> Option<&GmodNodeConversion> {
        self.changes.get(code)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
