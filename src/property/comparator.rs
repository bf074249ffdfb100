use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use crate::property::PropertyValue;

pub type Comparator = Arc<dyn Fn(&PropertyValue, &PropertyValue) -> Ordering + Send + Sync>;

/// Null-safe natural ordering of property values. Nulls come first, numbers
/// compare across `Int`/`UInt`/`Float`, lists and maps compare entry by entry.
pub fn null_safe_compare(a: &PropertyValue, b: &PropertyValue) -> Ordering {
    use PropertyValue::*;

    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,
        (Int(_) | UInt(_) | Float(_), Int(_) | UInt(_) | Float(_)) => compare_numbers(a, b),
        (Bool(a), Bool(b)) => a.cmp(b),
        (Char(a), Char(b)) => a.cmp(b),
        (Str(a), Str(b)) => a.cmp(b),
        (Bytes(a), Bytes(b)) => a.cmp(b),
        (Timestamp(a), Timestamp(b)) => a.cmp(b),
        (List(a), List(b)) => a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| null_safe_compare(x, y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        // entries are visited in key order, so this is lexicographic over
        // (key, value) pairs
        (Map(a), Map(b)) => a
            .iter()
            .zip(b.iter())
            .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| null_safe_compare(va, vb)))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &PropertyValue) -> u8 {
    match value {
        PropertyValue::Null => 0,
        PropertyValue::Bool(_) => 1,
        PropertyValue::Int(_) | PropertyValue::UInt(_) | PropertyValue::Float(_) => 2,
        PropertyValue::Char(_) => 3,
        PropertyValue::Str(_) => 4,
        PropertyValue::Bytes(_) => 5,
        PropertyValue::Timestamp(_) => 6,
        PropertyValue::List(_) => 7,
        PropertyValue::Map(_) => 8,
    }
}

fn compare_numbers(a: &PropertyValue, b: &PropertyValue) -> Ordering {
    use PropertyValue::*;

    match (a, b) {
        (Int(a), Int(b)) => a.cmp(b),
        (UInt(a), UInt(b)) => a.cmp(b),
        (Int(a), UInt(b)) => compare_int_uint(*a, *b),
        (UInt(a), Int(b)) => compare_int_uint(*b, *a).reverse(),
        (Float(a), Float(b)) => compare_floats(*a, *b),
        (Float(a), Int(b)) => compare_floats(*a, *b as f64),
        (Float(a), UInt(b)) => compare_floats(*a, *b as f64),
        (Int(a), Float(b)) => compare_floats(*a as f64, *b),
        (UInt(a), Float(b)) => compare_floats(*a as f64, *b),
        _ => unreachable!("compare_numbers called with non-numeric values"),
    }
}

fn compare_int_uint(a: i64, b: u64) -> Ordering {
    u64::try_from(a).map_or(Ordering::Less, |a| a.cmp(&b))
}

// NaN has no natural position, fall back to the IEEE total order for it
fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

fn default_comparator() -> Comparator {
    static DEFAULT: OnceLock<Comparator> = OnceLock::new();
    Arc::clone(DEFAULT.get_or_init(|| Arc::new(null_safe_compare) as Comparator))
}

// Overrides may name properties the compared type does not have.
#[derive(Clone)]
pub struct ComparatorRegistry {
    overrides: HashMap<String, Comparator>,
    default: Comparator,
}

impl Default for ComparatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.overrides.keys().collect();
        names.sort();
        f.debug_struct("ComparatorRegistry")
            .field("overrides", &names)
            .finish_non_exhaustive()
    }
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            default: default_comparator(),
        }
    }

    pub fn get_comparator(&self, name: &str) -> &Comparator {
        self.overrides.get(name).unwrap_or(&self.default)
    }

    pub fn set_comparator<F>(&mut self, name: &str, comparator: F)
    where
        F: Fn(&PropertyValue, &PropertyValue) -> Ordering + Send + Sync + 'static,
    {
        log::debug!("set comparator for property `{}`", name);
        self.overrides.insert(name.to_string(), Arc::new(comparator));
    }

    pub fn remove_comparator(&mut self, name: &str) -> bool {
        self.overrides.remove(name).is_some()
    }

    pub fn has_override(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }
}
