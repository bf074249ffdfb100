mod comparator;

pub use comparator::DiffComparator;

use std::fmt;

use crate::property::PropertyValue;

/// One property whose values differ between two compared instances.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    property_name: String,
    first_value: PropertyValue,
    last_value: PropertyValue,
}

impl DiffEntry {
    pub fn new(property_name: &str, first_value: PropertyValue, last_value: PropertyValue) -> Self {
        Self {
            property_name: property_name.to_string(),
            first_value,
            last_value,
        }
    }
    pub fn property_name(&self) -> &str {
        &self.property_name
    }
    pub fn first_value(&self) -> &PropertyValue {
        &self.first_value
    }
    pub fn last_value(&self) -> &PropertyValue {
        &self.last_value
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.property_name, self.first_value, self.last_value
        )
    }
}
