use std::{cmp::Ordering, collections::BTreeSet};

use rayon::prelude::*;

use crate::{
    diff::DiffEntry,
    err::DiffError,
    property::{ComparatorRegistry, PropertyList, PropertyValue, Reflect, effective},
};

/// Compares two instances of `T` property by property.
///
/// Configure it first with [`include_properties`](Self::include_properties),
/// [`exclude_properties`](Self::exclude_properties) and
/// [`set_comparator`](Self::set_comparator), then share it by reference for
/// any number of [`diff_compare`](Self::diff_compare) calls.
#[derive(Debug, Clone)]
pub struct DiffComparator<T> {
    properties: PropertyList<T>,
    included: BTreeSet<String>,
    excluded: BTreeSet<String>,
    registry: ComparatorRegistry,
}

impl<T: Reflect> Default for DiffComparator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reflect> DiffComparator<T> {
    pub fn new() -> Self {
        Self::with_properties(T::properties().clone())
    }
}

impl<T> DiffComparator<T> {
    pub fn with_properties(properties: PropertyList<T>) -> Self {
        Self {
            properties,
            included: BTreeSet::new(),
            excluded: BTreeSet::new(),
            registry: ComparatorRegistry::new(),
        }
    }

    /// Restricts the comparison to the given properties. Calling it again adds
    /// to the set; an empty set means every property.
    pub fn include_properties<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included.extend(names.into_iter().map(Into::into));
        self
    }

    /// Never compares the given properties, even if they are included.
    pub fn exclude_properties<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn set_comparator<F>(&mut self, name: &str, comparator: F) -> &mut Self
    where
        F: Fn(&PropertyValue, &PropertyValue) -> Ordering + Send + Sync + 'static,
    {
        self.registry.set_comparator(name, comparator);
        self
    }

    pub fn registry(&self) -> &ComparatorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComparatorRegistry {
        &mut self.registry
    }

    /// Names of the properties a comparison currently looks at, in
    /// enumeration order.
    pub fn effective_properties(&self) -> Vec<&str> {
        effective(&self.properties, &self.included, &self.excluded)
            .into_iter()
            .map(|d| d.name())
            .collect()
    }

    /// Lists the properties whose values differ between `first` and `last`.
    ///
    /// Entries follow property enumeration order. Passing the same instance
    /// twice always yields an empty list without reading any property.
    /// Accessor failures are returned as errors; a panicking comparator
    /// unwinds through this call.
    pub fn diff_compare(&self, first: &T, last: &T) -> Result<Vec<DiffEntry>, DiffError> {
        if std::ptr::eq(first, last) {
            log::trace!("same instance, skip comparing");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for property in effective(&self.properties, &self.included, &self.excluded) {
            let first_value = property.read(first)?;
            let last_value = property.read(last)?;
            let cmp = self.registry.get_comparator(property.name());
            if cmp(&first_value, &last_value) != Ordering::Equal {
                log::trace!(
                    "property `{}` differs: {} -> {}",
                    property.name(),
                    first_value,
                    last_value
                );
                entries.push(DiffEntry::new(property.name(), first_value, last_value));
            }
        }
        log::debug!("{} properties differ", entries.len());
        Ok(entries)
    }

    /// Runs [`diff_compare`](Self::diff_compare) for every pair in parallel.
    /// Results keep the order of `pairs`; on failure the error of the
    /// lowest failing pair is returned.
    pub fn diff_compare_all(&self, pairs: &[(T, T)]) -> Result<Vec<Vec<DiffEntry>>, DiffError>
    where
        T: Sync,
    {
        log::debug!("comparing {} pairs", pairs.len());
        let results: Vec<Result<Vec<DiffEntry>, DiffError>> = pairs
            .par_iter()
            .map(|(first, last)| self.diff_compare(first, last))
            .collect();
        results.into_iter().collect()
    }
}
