//! Local ID parsing stages and the stage-tagged error builder.
//!
//! The Local ID composite identifier itself is layered on top of this
//! workspace; the parsing stages and the accumulator live here because
//! they are part of the shared error vocabulary.

use crate::errors::{ParsingError, ParsingErrors};

/// The stage or aspect of Local ID parsing an error belongs to.
///
/// Values 0–99 are sequential parsing stages, 100–199 structural errors,
/// and 200+ validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum LocalIdParsingState {
    NamingRule = 0,
    VisVersion = 1,
    PrimaryItem = 2,
    SecondaryItem = 3,
    ItemDescription = 4,
    MetaQuantity = 5,
    MetaContent = 6,
    MetaCalculation = 7,
    MetaState = 8,
    MetaCommand = 9,
    MetaType = 10,
    MetaPosition = 11,
    MetaDetail = 12,

    EmptyState = 100,
    Formatting = 101,
    Completeness = 102,

    NamingEntity = 200,
    IMONumber = 201,
}

impl LocalIdParsingState {
    /// The stage tag used in accumulated errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::NamingRule => "NamingRule",
            Self::VisVersion => "VisVersion",
            Self::PrimaryItem => "PrimaryItem",
            Self::SecondaryItem => "SecondaryItem",
            Self::ItemDescription => "ItemDescription",
            Self::MetaQuantity => "MetaQuantity",
            Self::MetaContent => "MetaContent",
            Self::MetaCalculation => "MetaCalculation",
            Self::MetaState => "MetaState",
            Self::MetaCommand => "MetaCommand",
            Self::MetaType => "MetaType",
            Self::MetaPosition => "MetaPosition",
            Self::MetaDetail => "MetaDetail",
            Self::EmptyState => "EmptyState",
            Self::Formatting => "Formatting",
            Self::Completeness => "Completeness",
            Self::NamingEntity => "NamingEntity",
            Self::IMONumber => "IMONumber",
        }
    }

    /// The message substituted when an error is added without one.
    fn default_message(self) -> &'static str {
        match self {
            Self::NamingRule => "Missing or invalid naming rule",
            Self::VisVersion => "Missing or invalid vis version",
            Self::PrimaryItem => "Invalid or missing Primary item. Local IDs require at least primary item and 1 metadata tag.",
            Self::SecondaryItem => "Invalid secondary item",
            Self::ItemDescription => "Missing or invalid /meta prefix",
            Self::MetaQuantity => "Invalid metadata tag: Quantity",
            Self::MetaContent => "Invalid metadata tag: Content",
            Self::MetaCalculation => "Invalid metadata tag: Calculation",
            Self::MetaState => "Invalid metadata tag: State",
            Self::MetaCommand => "Invalid metadata tag: Command",
            Self::MetaType => "Invalid metadata tag: Type",
            Self::MetaPosition => "Invalid metadata tag: Position",
            Self::MetaDetail => "Invalid metadata tag: Detail",
            Self::EmptyState => "Missing primary path or metadata",
            Self::Formatting => "Formatting error in Local ID string",
            Self::Completeness => "Incomplete Local ID",
            Self::NamingEntity => "Invalid naming entity",
            Self::IMONumber => "Invalid IMO number",
        }
    }
}

/// Move-only accumulator for Local ID parsing errors.
///
/// `build()` consumes the builder and flattens the collected entries into
/// a [`ParsingErrors`]; an empty build equals the canonical empty
/// instance.
#[derive(Debug, Default)]
pub struct LocalIdParsingErrorBuilder {
    errors: Vec<ParsingError>,
}

impl LocalIdParsingErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Appends an error with the stage's predefined message.
    pub fn add_error(&mut self, state: LocalIdParsingState) -> &mut Self {
        self.errors
            .push(ParsingError::new(state.name(), state.default_message()));
        self
    }

    /// Appends an error with a custom message.
    pub fn add_error_with_message(
        &mut self,
        state: LocalIdParsingState,
        message: impl Into<String>,
    ) -> &mut Self {
        self.errors.push(ParsingError::new(state.name(), message));
        self
    }

    pub fn build(self) -> ParsingErrors {
        ParsingErrors::new(self.errors)
    }
}
