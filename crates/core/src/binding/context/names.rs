//! Logical parameter naming.

use super::descriptor::ParameterDescriptor;

/// Maps ordinal positions to logical parameter names and answers whether a
/// string is reserved as a parameter name.
///
/// The names a provider hands out are the ones statement templates
/// reference; they also suppress bare-property expansion for any property
/// whose name collides with them.
pub trait NameProvider {
    /// Logical name of the parameter at the given position
    fn parameter_name(&self, position: usize) -> String;

    /// Whether the given string is already taken as a parameter name
    fn is_parameter_name(&self, name: &str) -> bool;
}

/// Stock name provider: declared names where present, 1-based ordinal
/// strings otherwise.
#[derive(Debug, Clone)]
pub struct DeclaredNames {
    names: Vec<String>,
}

impl DeclaredNames {
    pub fn new(descriptors: &[ParameterDescriptor]) -> Self {
        let names = descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| {
                descriptor
                    .name
                    .clone()
                    .unwrap_or_else(|| (position + 1).to_string())
            })
            .collect();
        Self { names }
    }
}

impl NameProvider for DeclaredNames {
    fn parameter_name(&self, position: usize) -> String {
        self.names
            .get(position)
            .cloned()
            .unwrap_or_else(|| (position + 1).to_string())
    }

    fn is_parameter_name(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| candidate == name)
    }
}
