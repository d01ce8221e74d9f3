//! Declared method parameters.

use std::collections::BTreeMap;

use crate::binding::model::Type;

/// One declared method parameter, immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDescriptor {
    /// Ordinal position in the declared parameter list
    pub position: usize,
    /// Declared type
    pub ty: Type,
    /// Declared name, if the signature carries one
    pub name: Option<String>,
    /// Free-form annotation metadata attached to the declaration
    pub attrs: BTreeMap<String, String>,
}

impl ParameterDescriptor {
    /// Creates an anonymous descriptor
    pub fn new(position: usize, ty: Type) -> Self {
        Self {
            position,
            ty,
            name: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Creates a descriptor with a declared name
    pub fn named(position: usize, ty: Type, name: impl Into<String>) -> Self {
        Self {
            position,
            ty,
            name: Some(name.into()),
            attrs: BTreeMap::new(),
        }
    }

    /// Attaches one annotation attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}
