//! Startup registration of structured type descriptors.

use std::collections::HashMap;

use super::types::Type;

/// Registry of structured type descriptors, keyed by type name.
///
/// Applications register a descriptor per structured parameter type at
/// startup and build their parameter descriptors from it, so resolution
/// never needs runtime reflection.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, Type>,
}

impl TypeRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under the given type name
    pub fn register(&mut self, name: impl Into<String>, descriptor: Type) {
        self.types.insert(name.into(), descriptor);
    }

    /// Retrieves a registered descriptor by name, if it exists
    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}
