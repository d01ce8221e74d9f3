use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a parameter or of a property reachable from one.
#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    /// The fundamental type classification
    pub kind: TypeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    // Single-column kinds
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    String,
    Bytes,
    Timestamp,
    Uuid,

    // Iterable kinds
    List(Box<Type>),
    Set(Box<Type>),

    // Structured kind: readable properties and their declared types
    Object(BTreeMap<String, Type>),

    // Special kinds
    Any,
    Unknown,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self { kind }
    }

    // Helper constructors
    pub fn null() -> Self { Self::new(TypeKind::Null) }
    pub fn bool() -> Self { Self::new(TypeKind::Bool) }
    pub fn int() -> Self { Self::new(TypeKind::Int) }
    pub fn float() -> Self { Self::new(TypeKind::Float) }
    pub fn decimal() -> Self { Self::new(TypeKind::Decimal) }
    pub fn string() -> Self { Self::new(TypeKind::String) }
    pub fn bytes() -> Self { Self::new(TypeKind::Bytes) }
    pub fn timestamp() -> Self { Self::new(TypeKind::Timestamp) }
    pub fn uuid() -> Self { Self::new(TypeKind::Uuid) }
    pub fn any() -> Self { Self::new(TypeKind::Any) }
    pub fn unknown() -> Self { Self::new(TypeKind::Unknown) }

    pub fn list(inner: Type) -> Self {
        Self::new(TypeKind::List(Box::new(inner)))
    }

    pub fn set(inner: Type) -> Self {
        Self::new(TypeKind::Set(Box::new(inner)))
    }

    pub fn empty_object() -> Self {
        Self::object(BTreeMap::new())
    }

    pub fn object_with(fields: Vec<(&str, Type)>) -> Self {
        Self::object(fields.into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect())
    }

    pub fn object(fields: BTreeMap<String, Type>) -> Self {
        Self::new(TypeKind::Object(fields))
    }

    /// Whether the type binds directly to a single SQL column.
    pub fn is_single_column(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Bool
                | TypeKind::Int
                | TypeKind::Float
                | TypeKind::Decimal
                | TypeKind::String
                | TypeKind::Bytes
                | TypeKind::Timestamp
                | TypeKind::Uuid
        )
    }

    pub fn is_iterable(&self) -> bool {
        matches!(self.kind, TypeKind::List(_) | TypeKind::Set(_))
    }

    /// Element type of an iterable, if there is one.
    pub fn element(&self) -> Option<&Type> {
        match &self.kind {
            TypeKind::List(inner) | TypeKind::Set(inner) => Some(inner),
            _ => None,
        }
    }

    /// Readable properties of a structured type.
    pub fn properties(&self) -> Option<&BTreeMap<String, Type>> {
        match &self.kind {
            TypeKind::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Type> {
        self.properties().and_then(|fields| fields.get(name))
    }

    /// Walks a dotted property path against this type, stopping at the
    /// first segment that is not a readable property. The error carries
    /// the longest resolvable prefix and the type it reached, so callers
    /// can report exactly where the walk failed.
    pub fn resolve_path(&self, path: &str) -> Result<&Type, PathError> {
        if path.is_empty() {
            return Ok(self);
        }
        let mut current = self;
        let mut resolved: Vec<&str> = Vec::new();
        for segment in path.split('.') {
            match current.property(segment) {
                Some(next) => {
                    resolved.push(segment);
                    current = next;
                }
                None => {
                    return Err(PathError {
                        parent_path: resolved.join("."),
                        parent_type: current.clone(),
                    })
                }
            }
        }
        Ok(current)
    }
}

/// Failure context of a property-path walk.
#[derive(Clone, Debug, PartialEq)]
pub struct PathError {
    /// Longest prefix of the path that did resolve (empty if the first
    /// segment already failed)
    pub parent_path: String,
    /// Type reached at the end of that prefix
    pub parent_type: Type,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Null => f.write_str("null"),
            TypeKind::Bool => f.write_str("bool"),
            TypeKind::Int => f.write_str("int"),
            TypeKind::Float => f.write_str("float"),
            TypeKind::Decimal => f.write_str("decimal"),
            TypeKind::String => f.write_str("string"),
            TypeKind::Bytes => f.write_str("bytes"),
            TypeKind::Timestamp => f.write_str("timestamp"),
            TypeKind::Uuid => f.write_str("uuid"),
            TypeKind::List(inner) => write!(f, "list<{inner}>"),
            TypeKind::Set(inner) => write!(f, "set<{inner}>"),
            TypeKind::Object(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                let mut first = true;
                for (name, field_type) in fields {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {field_type}")?;
                    first = false;
                }
                f.write_str(" }")
            }
            TypeKind::Any => f.write_str("any"),
            TypeKind::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Type {
        Type::object_with(vec![
            ("city", Type::string()),
            ("zip", Type::int()),
        ])
    }

    #[test]
    fn classification() {
        assert!(Type::int().is_single_column());
        assert!(Type::bytes().is_single_column());
        assert!(!Type::list(Type::int()).is_single_column());
        assert!(!address().is_single_column());

        assert!(Type::list(Type::int()).is_iterable());
        assert!(Type::set(Type::string()).is_iterable());
        assert!(!address().is_iterable());

        assert_eq!(Type::list(Type::int()).element(), Some(&Type::int()));
        assert_eq!(address().element(), None);
    }

    #[test]
    fn path_walk_resolves_nested_properties() {
        let user = Type::object_with(vec![
            ("name", Type::string()),
            ("address", address()),
        ]);

        assert_eq!(user.resolve_path(""), Ok(&user));
        assert_eq!(user.resolve_path("name"), Ok(&Type::string()));
        assert_eq!(user.resolve_path("address.city"), Ok(&Type::string()));
    }

    #[test]
    fn path_walk_reports_resolvable_parent() {
        let user = Type::object_with(vec![("address", address())]);

        let err = user.resolve_path("address.country").unwrap_err();
        assert_eq!(err.parent_path, "address");
        assert_eq!(err.parent_type, address());

        // First segment failing leaves an empty parent path.
        let err = user.resolve_path("missing.city").unwrap_err();
        assert_eq!(err.parent_path, "");
        assert_eq!(err.parent_type, user);

        // Scalars have no readable properties at all.
        let err = Type::string().resolve_path("length").unwrap_err();
        assert_eq!(err.parent_type, Type::string());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Type::int().to_string(), "int");
        assert_eq!(Type::list(Type::string()).to_string(), "list<string>");
        assert_eq!(Type::empty_object().to_string(), "{}");
        assert_eq!(address().to_string(), "{ city: string, zip: int }");
    }
}
