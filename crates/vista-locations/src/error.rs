//! Error types for the vista-locations crate.

use vista_types::ParsingErrors;

use crate::location::LocationGroup;

/// Errors raised by the strict location parser and the builder.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// The string failed the location grammar.
    #[error("invalid location: {value}")]
    Parse {
        value: String,
        errors: ParsingErrors,
    },

    /// A builder number below 1.
    #[error("value should be greater than 0")]
    InvalidNumber,

    /// A character handed to a group-specific builder setter that does
    /// not belong to that group.
    #[error("the value '{value}' is an invalid {group} value")]
    InvalidGroupValue { value: char, group: LocationGroup },

    /// A character handed to the builder that belongs to no group.
    #[error("the value '{0}' is an invalid location value")]
    InvalidValue(char),

    /// A relative-location resource entry with a character outside the
    /// known table.
    #[error("unsupported location code: '{0}'")]
    UnsupportedCode(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_group_value() {
        let err = LocationError::InvalidGroupValue {
            value: 'P',
            group: LocationGroup::Vertical,
        };
        assert_eq!(err.to_string(), "the value 'P' is an invalid Vertical value");
    }

    #[test]
    fn test_error_display_invalid_number() {
        assert_eq!(
            LocationError::InvalidNumber.to_string(),
            "value should be greater than 0"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocationError>();
    }
}
