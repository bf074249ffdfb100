use std::{fmt, sync::Arc};

use crate::{err::DiffError, property::PropertyValue};

type Accessor<T> = Arc<dyn Fn(&T) -> Result<PropertyValue, DiffError> + Send + Sync>;

pub struct PropertyDescriptor<T> {
    name: String,
    // 0 for properties declared on `T` itself, +1 per inherited level
    depth: u32,
    read: Accessor<T>,
}

impl<T> PropertyDescriptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read(&self, instance: &T) -> Result<PropertyValue, DiffError> {
        (self.read)(instance)
    }
}

impl<T> Clone for PropertyDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            depth: self.depth,
            read: Arc::clone(&self.read),
        }
    }
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

/// The ordered, duplicate-free list of comparable properties of `T`.
#[derive(Debug)]
pub struct PropertyList<T> {
    descriptors: Vec<PropertyDescriptor<T>>,
}

impl<T> Clone for PropertyList<T> {
    fn clone(&self) -> Self {
        Self {
            descriptors: self.descriptors.clone(),
        }
    }
}

impl<T: 'static> PropertyList<T> {
    pub fn builder() -> PropertyListBuilder<T> {
        PropertyListBuilder {
            descriptors: Vec::new(),
        }
    }
}

impl<T> PropertyList<T> {
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor<T>> {
        self.descriptors.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name())
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor<T>> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

pub struct PropertyListBuilder<T> {
    descriptors: Vec<PropertyDescriptor<T>>,
}

impl<T: 'static> PropertyListBuilder<T> {
    pub fn field<V, F>(mut self, name: &str, read: F) -> Self
    where
        V: Into<PropertyValue>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.descriptors.push(PropertyDescriptor {
            name: name.to_string(),
            depth: 0,
            read: Arc::new(move |instance: &T| -> Result<PropertyValue, DiffError> {
                Ok(read(instance).into())
            }),
        });
        self
    }

    /// Registers a property whose accessor may fail for some instances.
    pub fn try_field<V, E, F>(mut self, name: &str, read: F) -> Self
    where
        V: Into<PropertyValue>,
        E: ToString,
        F: Fn(&T) -> Result<V, E> + Send + Sync + 'static,
    {
        let property = name.to_string();
        self.descriptors.push(PropertyDescriptor {
            name: property.clone(),
            depth: 0,
            read: Arc::new(move |instance: &T| -> Result<PropertyValue, DiffError> {
                read(instance)
                    .map(Into::into)
                    .map_err(|e| DiffError::property_read(&property, e))
            }),
        });
        self
    }

    pub fn inherit<P, F>(mut self, parent: &PropertyList<P>, project: F) -> Self
    where
        P: 'static,
        F: Fn(&T) -> &P + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        for descriptor in parent.iter() {
            let project = Arc::clone(&project);
            let read = Arc::clone(&descriptor.read);
            self.descriptors.push(PropertyDescriptor {
                name: descriptor.name.clone(),
                depth: descriptor.depth + 1,
                read: Arc::new(move |instance: &T| read(project(instance))),
            });
        }
        self
    }

    // a shadowing registration takes the slot of the first one with that name
    pub fn build(self) -> PropertyList<T> {
        let mut descriptors: Vec<PropertyDescriptor<T>> = Vec::with_capacity(self.descriptors.len());
        for descriptor in self.descriptors {
            match descriptors.iter_mut().find(|d| d.name == descriptor.name) {
                Some(existing) => {
                    if descriptor.depth <= existing.depth {
                        log::trace!(
                            "property `{}` (depth {}) shadows depth {}",
                            descriptor.name,
                            descriptor.depth,
                            existing.depth
                        );
                        *existing = descriptor;
                    }
                }
                None => descriptors.push(descriptor),
            }
        }
        PropertyList { descriptors }
    }
}

pub trait Reflect: Sized + 'static {
    fn properties() -> &'static PropertyList<Self>;
}

/// Implements [`Reflect`] for a struct by listing its fields.
///
/// ```
/// use shape_diff::reflect_properties;
///
/// #[derive(Clone)]
/// struct Base { id: u32 }
/// #[derive(Clone)]
/// struct User { base: Base, name: String, email: Option<String> }
///
/// reflect_properties!(Base { id });
/// reflect_properties!(User: Base => base { name, email });
/// ```
#[macro_export]
macro_rules! reflect_properties {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::property::Reflect for $ty {
            fn properties() -> &'static $crate::property::PropertyList<Self> {
                static PROPERTIES: ::std::sync::OnceLock<$crate::property::PropertyList<$ty>> =
                    ::std::sync::OnceLock::new();
                PROPERTIES.get_or_init(|| {
                    $crate::property::PropertyList::<$ty>::builder()
                        $(.field(stringify!($field), |v: &$ty| v.$field.clone()))*
                        .build()
                })
            }
        }
    };
    ($ty:ty : $parent:ty => $via:ident { $($field:ident),* $(,)? }) => {
        impl $crate::property::Reflect for $ty {
            fn properties() -> &'static $crate::property::PropertyList<Self> {
                static PROPERTIES: ::std::sync::OnceLock<$crate::property::PropertyList<$ty>> =
                    ::std::sync::OnceLock::new();
                PROPERTIES.get_or_init(|| {
                    $crate::property::PropertyList::<$ty>::builder()
                        .inherit(
                            <$parent as $crate::property::Reflect>::properties(),
                            |v: &$ty| &v.$via,
                        )
                        $(.field(stringify!($field), |v: &$ty| v.$field.clone()))*
                        .build()
                })
            }
        }
    };
}
