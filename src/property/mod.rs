mod comparator;
mod filter;
mod reflect;
mod value;

pub use comparator::{Comparator, ComparatorRegistry, null_safe_compare};
pub use filter::effective;
pub use reflect::{PropertyDescriptor, PropertyList, PropertyListBuilder, Reflect};
pub use value::PropertyValue;
