//! Stage-tagged accumulation of location parsing errors.

use vista_types::{ParsingError, ParsingErrors};

/// Outcome category of a location string validation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationValidationResult {
    Invalid,
    InvalidCode,
    InvalidOrder,
    NullOrWhiteSpace,
    Valid,
}

impl LocationValidationResult {
    pub fn name(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::InvalidCode => "InvalidCode",
            Self::InvalidOrder => "InvalidOrder",
            Self::NullOrWhiteSpace => "NullOrWhiteSpace",
            Self::Valid => "Valid",
        }
    }
}

/// Move-only accumulator used by the tolerant location parser.
#[derive(Debug, Default)]
pub struct LocationParsingErrorBuilder {
    errors: Vec<ParsingError>,
}

impl LocationParsingErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn add_error(
        &mut self,
        result: LocationValidationResult,
        message: impl Into<String>,
    ) -> &mut Self {
        self.errors.push(ParsingError::new(result.name(), message));
        self
    }

    pub fn build(self) -> ParsingErrors {
        ParsingErrors::new(self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_build_equals_empty_instance() {
        let builder = LocationParsingErrorBuilder::new();
        assert!(!builder.has_error());
        assert_eq!(builder.build(), ParsingErrors::empty());
    }

    #[test]
    fn test_add_error_records_stage_and_message() {
        let mut builder = LocationParsingErrorBuilder::new();
        builder.add_error(LocationValidationResult::InvalidCode, "bad char");
        assert!(builder.has_error());
        let errors = builder.build();
        assert!(errors.has_error_type("InvalidCode"));
        assert_eq!(errors.iter().next().unwrap().message, "bad char");
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(LocationValidationResult::NullOrWhiteSpace.name(), "NullOrWhiteSpace");
        assert_eq!(LocationValidationResult::InvalidOrder.name(), "InvalidOrder");
        assert_eq!(LocationValidationResult::Valid.name(), "Valid");
    }
}
