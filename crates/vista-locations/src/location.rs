//! Location value objects.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A validated location string.
///
/// Two locations are equal when their strings are equal. Instances are
/// produced by [`crate::Locations`] parsing or [`crate::LocationBuilder`];
/// the wrapped string always satisfies the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    value: String,
}

impl Location {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// The axis a location character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationGroup {
    Number,
    Side,
    Vertical,
    Transverse,
    Longitudinal,
}

impl LocationGroup {
    pub fn name(self) -> &'static str {
        match self {
            LocationGroup::Number => "Number",
            LocationGroup::Side => "Side",
            LocationGroup::Vertical => "Vertical",
            LocationGroup::Transverse => "Transverse",
            LocationGroup::Longitudinal => "Longitudinal",
        }
    }
}

impl fmt::Display for LocationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the relative-location table for a VIS version.
///
/// Equality and hashing use the character code only.
#[derive(Debug, Clone)]
pub struct RelativeLocation {
    code: char,
    name: String,
    location: Location,
    definition: Option<String>,
}

impl RelativeLocation {
    pub(crate) fn new(
        code: char,
        name: impl Into<String>,
        location: Location,
        definition: Option<String>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            location,
            definition,
        }
    }

    pub fn code(&self) -> char {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The single-character location equivalent to this code.
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }
}

impl PartialEq for RelativeLocation {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for RelativeLocation {}

impl Hash for RelativeLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_equality_is_string_equality() {
        let a = Location::new("1PU");
        let b = Location::new("1PU");
        let c = Location::new("2PU");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "1PU");
    }

    #[test]
    fn test_relative_location_equality_uses_code_only() {
        let a = RelativeLocation::new('P', "Port", Location::new("P"), None);
        let b = RelativeLocation::new('P', "Portside", Location::new("P"), Some("left".into()));
        let c = RelativeLocation::new('S', "Starboard", Location::new("S"), None);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_group_names() {
        assert_eq!(LocationGroup::Side.name(), "Side");
        assert_eq!(LocationGroup::Longitudinal.to_string(), "Longitudinal");
    }
}
