//! Address component parsing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::AddressComponent;

/// Field of a [`ParsedAddress`] that a component can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    /// City, taken from the long name
    City,
    /// State or province, taken from the short name
    State,
    /// Country, taken from the long name
    Country,
}

impl AddressField {
    /// Key of the field as used by [`ParsedAddress::components`].
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Country => "country",
        }
    }

    fn value_of<'a>(&self, component: &'a AddressComponent) -> &'a str {
        match self {
            AddressField::State => &component.short_name,
            AddressField::City | AddressField::Country => &component.long_name,
        }
    }

    fn slot<'a>(&self, parsed: &'a mut ParsedAddress) -> &'a mut Option<String> {
        match self {
            AddressField::City => &mut parsed.city,
            AddressField::State => &mut parsed.state,
            AddressField::Country => &mut parsed.country,
        }
    }
}

/// Classification rules, checked in order. The first matching tag wins.
const RULES: &[(&str, AddressField)] = &[
    ("locality", AddressField::City),
    ("administrative_area_level_1", AddressField::State),
    ("country", AddressField::Country),
];

/// Reduces the tagged components of a geocoded result to city, state and country.
///
/// The parser is stateless; a single instance can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressComponentParser;

impl AddressComponentParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Determine which field a component maps to, if any.
    pub fn classify(&self, component: &AddressComponent) -> Option<AddressField> {
        RULES
            .iter()
            .find(|(tag, _)| component.has_type(tag))
            .map(|(_, field)| *field)
    }

    /// Parse a sequence of components into a [`ParsedAddress`].
    ///
    /// Components are visited in order. Later components overwrite fields set by
    /// earlier ones, and components without a known tag are skipped. This never
    /// fails; an empty input yields an empty address.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geocode_address::{AddressComponent, AddressComponentParser};
    ///
    /// let components = vec![
    ///     AddressComponent::new("New York", "NY", ["locality", "political"]),
    ///     AddressComponent::new("New York", "NY", ["administrative_area_level_1"]),
    ///     AddressComponent::new("United States", "US", ["country"]),
    /// ];
    ///
    /// let parsed = AddressComponentParser::new().parse(&components);
    /// assert_eq!(parsed.city.as_deref(), Some("New York"));
    /// assert_eq!(parsed.state.as_deref(), Some("NY"));
    /// assert_eq!(parsed.country.as_deref(), Some("United States"));
    /// ```
    pub fn parse(&self, components: &[AddressComponent]) -> ParsedAddress {
        let mut parsed = ParsedAddress::default();

        for component in components {
            if let Some(field) = self.classify(component) {
                *field.slot(&mut parsed) = Some(field.value_of(component).to_string());
            }
        }

        parsed
    }
}

/// City, state and country extracted from a geocoded result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// City/locality (e.g. "New York")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State/province short name (e.g. "NY")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country (e.g. "United States")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ParsedAddress {
    /// Create a ParsedAddress from provider components.
    pub fn from_components(components: &[AddressComponent]) -> Self {
        AddressComponentParser::new().parse(components)
    }

    /// Get all set fields as a map.
    pub fn components(&self) -> HashMap<String, String> {
        [
            (AddressField::City, &self.city),
            (AddressField::State, &self.state),
            (AddressField::Country, &self.country),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_ref()
                .map(|value| (field.as_str().to_string(), value.clone()))
        })
        .collect()
    }

    /// Check if no field was set.
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.country.is_none()
    }
}
