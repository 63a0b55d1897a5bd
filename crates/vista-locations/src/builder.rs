//! Immutable fluent construction of locations.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vista_types::VisVersion;

use crate::error::LocationError;
use crate::location::{Location, LocationGroup};
use crate::locations::Locations;

/// Composes a location axis by axis.
///
/// Every setter returns a new builder; the source is left untouched.
/// Group setters validate membership through the version's reversed-group
/// table, so `with_side('U')` fails where `with_vertical('U')` succeeds.
/// [`Self::build`] emits the number followed by the set characters,
/// sorted to satisfy the grammar, so parsing a built location always
/// succeeds.
#[derive(Debug, Clone)]
pub struct LocationBuilder {
    vis_version: VisVersion,
    number: Option<i32>,
    side: Option<char>,
    vertical: Option<char>,
    transverse: Option<char>,
    longitudinal: Option<char>,
    reversed_groups: Arc<HashMap<char, LocationGroup>>,
}

impl LocationBuilder {
    /// Creates an empty builder bound to the version's character table.
    pub fn create(locations: &Locations) -> Self {
        Self {
            vis_version: locations.vis_version(),
            number: None,
            side: None,
            vertical: None,
            transverse: None,
            longitudinal: None,
            reversed_groups: Arc::clone(locations.reversed_groups()),
        }
    }

    pub fn vis_version(&self) -> VisVersion {
        self.vis_version
    }

    pub fn number(&self) -> Option<i32> {
        self.number
    }

    pub fn side(&self) -> Option<char> {
        self.side
    }

    pub fn vertical(&self) -> Option<char> {
        self.vertical
    }

    pub fn transverse(&self) -> Option<char> {
        self.transverse
    }

    pub fn longitudinal(&self) -> Option<char> {
        self.longitudinal
    }

    fn group_of(&self, value: char) -> Option<LocationGroup> {
        self.reversed_groups.get(&value).copied()
    }

    fn checked_group(
        &self,
        value: char,
        expected: LocationGroup,
    ) -> Result<(), LocationError> {
        match self.group_of(value) {
            Some(group) if group == expected => Ok(()),
            _ => Err(LocationError::InvalidGroupValue {
                value,
                group: expected,
            }),
        }
    }

    /// Sets the instance number; numbers start at 1.
    pub fn with_number(&self, number: i32) -> Result<Self, LocationError> {
        if number < 1 {
            return Err(LocationError::InvalidNumber);
        }
        let mut result = self.clone();
        result.number = Some(number);
        Ok(result)
    }

    pub fn without_number(&self) -> Self {
        let mut result = self.clone();
        result.number = None;
        result
    }

    pub fn with_side(&self, side: char) -> Result<Self, LocationError> {
        self.checked_group(side, LocationGroup::Side)?;
        let mut result = self.clone();
        result.side = Some(side);
        Ok(result)
    }

    pub fn without_side(&self) -> Self {
        let mut result = self.clone();
        result.side = None;
        result
    }

    pub fn with_vertical(&self, vertical: char) -> Result<Self, LocationError> {
        self.checked_group(vertical, LocationGroup::Vertical)?;
        let mut result = self.clone();
        result.vertical = Some(vertical);
        Ok(result)
    }

    pub fn without_vertical(&self) -> Self {
        let mut result = self.clone();
        result.vertical = None;
        result
    }

    pub fn with_transverse(&self, transverse: char) -> Result<Self, LocationError> {
        self.checked_group(transverse, LocationGroup::Transverse)?;
        let mut result = self.clone();
        result.transverse = Some(transverse);
        Ok(result)
    }

    pub fn without_transverse(&self) -> Self {
        let mut result = self.clone();
        result.transverse = None;
        result
    }

    pub fn with_longitudinal(&self, longitudinal: char) -> Result<Self, LocationError> {
        self.checked_group(longitudinal, LocationGroup::Longitudinal)?;
        let mut result = self.clone();
        result.longitudinal = Some(longitudinal);
        Ok(result)
    }

    pub fn without_longitudinal(&self) -> Self {
        let mut result = self.clone();
        result.longitudinal = None;
        result
    }

    /// Sets a character on whichever group it belongs to.
    pub fn with_value(&self, value: char) -> Result<Self, LocationError> {
        match self.group_of(value) {
            Some(LocationGroup::Side) => self.with_side(value),
            Some(LocationGroup::Vertical) => self.with_vertical(value),
            Some(LocationGroup::Transverse) => self.with_transverse(value),
            Some(LocationGroup::Longitudinal) => self.with_longitudinal(value),
            Some(LocationGroup::Number) | None => Err(LocationError::InvalidValue(value)),
        }
    }

    /// Numeric alias of [`Self::with_number`].
    pub fn with_value_number(&self, value: i32) -> Result<Self, LocationError> {
        self.with_number(value)
    }

    /// Clears whichever component belongs to `group`.
    pub fn without_value(&self, group: LocationGroup) -> Self {
        match group {
            LocationGroup::Number => self.without_number(),
            LocationGroup::Side => self.without_side(),
            LocationGroup::Vertical => self.without_vertical(),
            LocationGroup::Transverse => self.without_transverse(),
            LocationGroup::Longitudinal => self.without_longitudinal(),
        }
    }

    /// Ingests an already-validated location, component by component.
    pub fn with_location(&self, location: &Location) -> Result<Self, LocationError> {
        let value = location.as_str();
        let digits_end = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());

        let mut builder = self.clone();
        for ch in value[digits_end..].chars() {
            builder = builder.with_value(ch)?;
        }
        if digits_end > 0 {
            let number = value[..digits_end]
                .parse::<i32>()
                .map_err(|_| LocationError::InvalidNumber)?;
            builder = builder.with_number(number)?;
        }
        Ok(builder)
    }

    pub fn build(&self) -> Location {
        Location::new(self.to_string())
    }
}

impl fmt::Display for LocationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars: Vec<char> = Vec::with_capacity(8);
        if let Some(number) = self.number {
            chars.extend(number.to_string().chars());
        }
        chars.extend(self.side);
        chars.extend(self.vertical);
        chars.extend(self.transverse);
        chars.extend(self.longitudinal);
        chars.sort_unstable();
        for ch in chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
