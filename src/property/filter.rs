use std::collections::BTreeSet;

use crate::property::{PropertyDescriptor, PropertyList};

/// Selects the properties to compare.
///
/// An empty `included` set selects every property; otherwise only the
/// included ones. Excluded names are always removed, even when they are also
/// included. The result keeps the order of `all`.
pub fn effective<'a, T>(
    all: &'a PropertyList<T>,
    included: &BTreeSet<String>,
    excluded: &BTreeSet<String>,
) -> Vec<&'a PropertyDescriptor<T>> {
    all.iter()
        .filter(|d| included.is_empty() || included.contains(d.name()))
        .filter(|d| !excluded.contains(d.name()))
        .collect()
}
