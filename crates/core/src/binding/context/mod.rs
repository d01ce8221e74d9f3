//! The per-signature parameter binding context.
//!
//! A [`ParameterContext`] is built once per distinct method signature and
//! read-shared by every invocation of that signature afterwards. At
//! construction it normalizes the declared parameter list (collapsing the
//! single iterable parameter of a batch update into its element type),
//! indexes logical names against declared types, and records which
//! parameters expose which bare property names. After construction the
//! only mutable state is the monotonic resolution cache.

mod descriptor;
mod names;

pub use descriptor::ParameterDescriptor;
pub use names::{DeclaredNames, NameProvider};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::binding::error::{BindError, BindResult};
use crate::binding::model::{Type, TypeKind};
use crate::binding::operator::OperatorKind;

#[derive(Debug)]
pub struct ParameterContext {
    descriptors: Vec<ParameterDescriptor>,
    /// Logical parameter name -> declared type; never mutated after build
    types: HashMap<String, Type>,
    /// Bare property name -> owning parameter names, in ordinal order
    properties: HashMap<String, Vec<String>>,
    /// (parameter, path) -> resolved type; grows monotonically, entries
    /// are pure functions of the immutable indexes above
    cache: DashMap<String, Type>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ParameterContext {
    /// Builds a context for one method signature.
    ///
    /// For [`OperatorKind::BatchUpdate`] the declared list must contain
    /// exactly one iterable parameter; it is replaced by a synthetic
    /// descriptor typed as the iterable's element, so downstream consumers
    /// always see one logical row.
    pub fn new(
        descriptors: Vec<ParameterDescriptor>,
        names: &dyn NameProvider,
        kind: OperatorKind,
    ) -> BindResult<Self> {
        let descriptors = if kind == OperatorKind::BatchUpdate {
            normalize_batch(descriptors)?
        } else {
            descriptors
        };

        let mut types = HashMap::new();
        let mut properties: HashMap<String, Vec<String>> = HashMap::new();

        for (position, descriptor) in descriptors.iter().enumerate() {
            let parameter_name = names.parameter_name(position);
            types.insert(parameter_name.clone(), descriptor.ty.clone());

            if descriptor.ty.is_single_column() || descriptor.ty.is_iterable() {
                continue;
            }
            let Some(fields) = descriptor.ty.properties() else {
                continue;
            };
            for property_name in fields.keys() {
                // A property shadowed by a parameter name is not expanded.
                if names.is_parameter_name(property_name) {
                    continue;
                }
                properties
                    .entry(property_name.clone())
                    .or_default()
                    .push(parameter_name.clone());
            }
        }

        debug!(
            parameters = descriptors.len(),
            properties = properties.len(),
            "built parameter context"
        );
        Ok(Self {
            descriptors,
            types,
            properties,
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Resolves the declared type reachable at `parameter` plus a dotted
    /// property `path` (which may be empty).
    ///
    /// Results are cached per (parameter, path) pair; a hit never repeats
    /// the property walk. Fails with [`BindError::NotReadableParameter`]
    /// when the name is not declared, or [`BindError::NotReadableProperty`]
    /// when a path segment has no readable property, carrying the longest
    /// resolvable prefix and its type.
    pub fn resolve_type(&self, parameter: &str, path: &str) -> BindResult<Type> {
        let key = cache_key(parameter, path);
        if let Some(cached) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(%key, "resolution cache hit");
            return Ok(cached.clone());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let base = self
            .types
            .get(parameter)
            .ok_or_else(|| BindError::NotReadableParameter(parameter.to_string()))?;
        let resolved = match base.resolve_path(path) {
            Ok(ty) => ty.clone(),
            Err(walk) => {
                return Err(BindError::NotReadableProperty {
                    parameter: parameter.to_string(),
                    path: path.to_string(),
                    parent_path: walk.parent_path,
                    parent_type: walk.parent_type,
                })
            }
        };

        self.cache.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Finds the parameter owning a bare property name.
    ///
    /// Returns `None` when no structured parameter exposes the property
    /// (the caller should then try the name as a literal parameter name).
    /// Fails with [`BindError::AmbiguousProperty`] when more than one
    /// parameter owns it; expansion is refused rather than guessed.
    pub fn owner_of(&self, property: &str) -> BindResult<Option<&str>> {
        match self.properties.get(property) {
            None => Ok(None),
            Some(owners) if owners.len() == 1 => Ok(Some(owners[0].as_str())),
            Some(owners) => Err(BindError::AmbiguousProperty {
                property: property.to_string(),
                parameters: owners.clone(),
            }),
        }
    }

    /// The normalized parameter descriptors, in ordinal order
    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.descriptors
    }

    /// Declared type of a logical parameter name, if it exists
    pub fn parameter_type(&self, parameter: &str) -> Option<&Type> {
        self.types.get(parameter)
    }

    /// Point-in-time counters for the resolution cache
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the resolution cache counters.
#[derive(Clone, Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

fn normalize_batch(descriptors: Vec<ParameterDescriptor>) -> BindResult<Vec<ParameterDescriptor>> {
    if descriptors.len() != 1 {
        return Err(BindError::IncorrectParameterCount {
            found: descriptors.len(),
        });
    }
    let declared = &descriptors[0];
    let element = match declared.ty.element() {
        Some(element) if element.kind != TypeKind::Unknown => element.clone(),
        _ => {
            return Err(BindError::IncorrectParameterType {
                found: declared.ty.clone(),
            })
        }
    };
    Ok(vec![ParameterDescriptor {
        position: 0,
        ty: element,
        name: declared.name.clone(),
        attrs: declared.attrs.clone(),
    }])
}

fn cache_key(parameter: &str, path: &str) -> String {
    if path.is_empty() {
        parameter.to_string()
    } else {
        format!("{parameter}.{path}")
    }
}
