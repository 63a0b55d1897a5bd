//! Per-version location parsing and validation.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use vista_types::{ParsingErrors, VisVersion};

use crate::dto::LocationsDto;
use crate::error::LocationError;
use crate::error_builder::{LocationParsingErrorBuilder, LocationValidationResult};
use crate::location::{Location, LocationGroup, RelativeLocation};

/* Special characters of the relative-location table. */
const CHAR_NUMBER: char = 'N';
const CHAR_HORIZONTAL: char = 'H';
const CHAR_VERTICAL: char = 'V';

/* Side group */
const CHAR_PORT: char = 'P';
const CHAR_CENTER: char = 'C';
const CHAR_STARBOARD: char = 'S';

/* Vertical group */
const CHAR_UPPER: char = 'U';
const CHAR_MIDDLE: char = 'M';
const CHAR_LOWER: char = 'L';

/* Transverse group */
const CHAR_INBOARD: char = 'I';
const CHAR_OUTBOARD: char = 'O';

/* Longitudinal group */
const CHAR_FORWARD: char = 'F';
const CHAR_AFT: char = 'A';

/// One slot per non-number group, enforcing at most one character each.
#[derive(Debug, Default)]
struct LocationCharDict {
    table: [Option<char>; 4],
}

impl LocationCharDict {
    fn slot(group: LocationGroup) -> usize {
        match group {
            LocationGroup::Side => 0,
            LocationGroup::Vertical => 1,
            LocationGroup::Transverse => 2,
            LocationGroup::Longitudinal => 3,
            LocationGroup::Number => unreachable!("number group carries no characters"),
        }
    }

    /// Records `value` for `group`; on an occupied slot returns the
    /// already-stored character.
    fn try_add(&mut self, group: LocationGroup, value: char) -> Result<(), char> {
        let slot = &mut self.table[Self::slot(group)];
        match slot {
            Some(existing) => Err(*existing),
            None => {
                *slot = Some(value);
                Ok(())
            }
        }
    }
}

/// The relative-location table for one VIS version, with parsing.
///
/// `H` and `V` appear among [`Self::relative_locations`] but never enter
/// the grouped character table; a location string containing them fails
/// with `InvalidCode`, as does the number marker `N`.
#[derive(Debug, Clone)]
pub struct Locations {
    vis_version: VisVersion,
    relative_locations: Vec<RelativeLocation>,
    groups: HashMap<LocationGroup, Vec<RelativeLocation>>,
    reversed_groups: Arc<HashMap<char, LocationGroup>>,
}

impl Locations {
    /// Builds the table from the location resource of `version`.
    pub fn new(version: VisVersion, dto: &LocationsDto) -> Result<Self, LocationError> {
        let mut relative_locations = Vec::with_capacity(dto.items.len());
        let mut groups: HashMap<LocationGroup, Vec<RelativeLocation>> = HashMap::new();
        let mut reversed_groups: HashMap<char, LocationGroup> = HashMap::new();

        for item in &dto.items {
            let code = item.code;
            let location = Location::new(code.to_string());
            let relative = RelativeLocation::new(
                code,
                item.name.clone(),
                location,
                item.definition.clone(),
            );
            relative_locations.push(relative.clone());

            if code == CHAR_HORIZONTAL || code == CHAR_VERTICAL {
                continue;
            }

            let group = match code {
                CHAR_NUMBER => LocationGroup::Number,
                CHAR_PORT | CHAR_CENTER | CHAR_STARBOARD => LocationGroup::Side,
                CHAR_UPPER | CHAR_MIDDLE | CHAR_LOWER => LocationGroup::Vertical,
                CHAR_INBOARD | CHAR_OUTBOARD => LocationGroup::Transverse,
                CHAR_FORWARD | CHAR_AFT => LocationGroup::Longitudinal,
                other => return Err(LocationError::UnsupportedCode(other)),
            };

            let members = groups.entry(group).or_default();
            if group == LocationGroup::Number {
                continue;
            }

            reversed_groups.insert(code, group);
            members.push(relative);
        }

        Ok(Self {
            vis_version: version,
            relative_locations,
            groups,
            reversed_groups: Arc::new(reversed_groups),
        })
    }

    pub fn vis_version(&self) -> VisVersion {
        self.vis_version
    }

    /// Every entry of the relative-location resource, including `H` and
    /// `V`.
    pub fn relative_locations(&self) -> &[RelativeLocation] {
        &self.relative_locations
    }

    pub fn groups(&self) -> &HashMap<LocationGroup, Vec<RelativeLocation>> {
        &self.groups
    }

    /// Character-to-group table over the grouped (non-number) characters.
    pub fn reversed_groups(&self) -> &Arc<HashMap<char, LocationGroup>> {
        &self.reversed_groups
    }

    /// Strict parse; fails with the accumulated grammar errors.
    pub fn parse(&self, value: &str) -> Result<Location, LocationError> {
        let mut builder = LocationParsingErrorBuilder::new();
        match self.try_parse_internal(value, &mut builder) {
            Some(location) => Ok(location),
            None => Err(LocationError::Parse {
                value: value.to_string(),
                errors: builder.build(),
            }),
        }
    }

    /// Tolerant parse; `None` on any grammar violation.
    pub fn try_parse(&self, value: &str) -> Option<Location> {
        let mut builder = LocationParsingErrorBuilder::new();
        self.try_parse_internal(value, &mut builder)
    }

    /// Tolerant parse that also surfaces the accumulated errors.
    pub fn try_parse_with_errors(&self, value: &str) -> (Option<Location>, ParsingErrors) {
        let mut builder = LocationParsingErrorBuilder::new();
        let location = self.try_parse_internal(value, &mut builder);
        (location, builder.build())
    }

    fn try_parse_internal(
        &self,
        value: &str,
        errors: &mut LocationParsingErrorBuilder,
    ) -> Option<Location> {
        if value.trim().is_empty() {
            errors.add_error(
                LocationValidationResult::NullOrWhiteSpace,
                "Invalid location: contains only whitespace",
            );
            return None;
        }

        let chars: Vec<char> = value.chars().collect();
        let mut char_dict = LocationCharDict::default();

        let mut prev_digit_index: Option<usize> = None;
        let mut chars_start_index: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            if ch.is_ascii_digit() {
                if prev_digit_index.is_some_and(|prev| prev + 1 != i) {
                    errors.add_error(
                        LocationValidationResult::Invalid,
                        format!(
                            "Invalid location: cannot have multiple separated digits in location: '{value}'"
                        ),
                    );
                    return None;
                }
                if chars_start_index.is_some() {
                    errors.add_error(
                        LocationValidationResult::InvalidOrder,
                        format!(
                            "Invalid location: numeric location should start before location code(s) in location: '{value}'"
                        ),
                    );
                    return None;
                }
                prev_digit_index = Some(i);
                continue;
            }

            if chars_start_index.is_none() {
                chars_start_index = Some(i);
            }

            let Some(&group) = self.reversed_groups.get(&ch) else {
                let mut invalid = String::new();
                let mut first = true;
                for c in value.chars() {
                    if !c.is_ascii_digit() && !self.reversed_groups.contains_key(&c) {
                        if !first {
                            invalid.push(',');
                        }
                        first = false;
                        let _ = write!(invalid, "'{c}'");
                    }
                }
                errors.add_error(
                    LocationValidationResult::InvalidCode,
                    format!(
                        "Invalid location code: '{value}' with invalid location code(s): {invalid}"
                    ),
                );
                return None;
            };

            if let Err(existing) = char_dict.try_add(group, ch) {
                errors.add_error(
                    LocationValidationResult::Invalid,
                    format!(
                        "Invalid location: Multiple '{}' values. Got both '{existing}' and '{ch}' in '{value}'",
                        group.name()
                    ),
                );
                return None;
            }

            if chars_start_index != Some(i) {
                let prev = chars[i - 1];
                if !prev.is_ascii_digit() && ch < prev {
                    errors.add_error(
                        LocationValidationResult::InvalidOrder,
                        format!("Invalid location: '{value}' not alphabetically sorted"),
                    );
                    return None;
                }
            }
        }

        Some(Location::new(value))
    }
}
