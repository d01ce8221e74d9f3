use thiserror::Error;

use crate::binding::model::Type;

/// Result type for binding operations
pub type BindResult<T> = Result<T, BindError>;

/// Result type for operator execution
pub type OperatorResult<T> = Result<T, OperatorError>;

/// Errors raised while building a parameter binding context or resolving
/// names and property paths against it.
///
/// Every variant indicates a static mismatch between a statement template
/// and the method signature it is bound to; none of them is retryable.
#[derive(Debug, Error)]
pub enum BindError {
    /// Batch update declared with more or fewer than one parameter
    #[error("batch update expected one and only one parameter but {found}")]
    IncorrectParameterCount { found: usize },

    /// Batch update parameter is not iterable or its element type cannot
    /// be determined
    #[error("parameter of batch update expected an array, list or set with a determinable element type but {found}")]
    IncorrectParameterType { found: Type },

    /// A referenced logical name has no corresponding declared parameter
    #[error("parameter :{0} is not readable")]
    NotReadableParameter(String),

    /// A property-path segment could not be resolved
    #[error(
        "property {} is not readable, the type of {} is {}",
        full_name(.parameter, .path),
        full_name(.parameter, .parent_path),
        .parent_type
    )]
    NotReadableProperty {
        parameter: String,
        /// Full dotted path that was requested
        path: String,
        /// Longest prefix of the path that did resolve
        parent_path: String,
        /// Type reached at the end of that prefix
        parent_type: Type,
    },

    /// A bare property name maps to more than one declared parameter
    #[error("parameters {parameters:?} all have the property '{property}', so it can't be expanded")]
    AmbiguousProperty {
        property: String,
        parameters: Vec<String>,
    },
}

impl BindError {
    /// Creates a property resolution error with its full walk context
    pub fn not_readable_property(
        parameter: impl Into<String>,
        path: impl Into<String>,
        parent_path: impl Into<String>,
        parent_type: Type,
    ) -> Self {
        Self::NotReadableProperty {
            parameter: parameter.into(),
            path: path.into(),
            parent_path: parent_path.into(),
            parent_type,
        }
    }

    /// Returns true if this error indicates an invalid batch-update
    /// declaration
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Self::IncorrectParameterCount { .. } | Self::IncorrectParameterType { .. }
        )
    }

    /// Returns true if this error indicates a name or path that does not
    /// resolve against the signature
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::NotReadableParameter(_)
                | Self::NotReadableProperty { .. }
                | Self::AmbiguousProperty { .. }
        )
    }

    pub fn report(&self) -> String {
        match self {
            Self::IncorrectParameterCount { .. } => {
                format!(
                    "{self}\n\
                     Suggestion: declare exactly one iterable parameter on batch update methods."
                )
            }
            Self::IncorrectParameterType { .. } => {
                format!(
                    "{self}\n\
                     Suggestion: declare the batch parameter as an array, list or set of the row type."
                )
            }
            Self::NotReadableParameter(_) => {
                format!(
                    "{self}\n\
                     Suggestion: check the referenced name against the declared parameter names."
                )
            }
            Self::NotReadableProperty { .. } => {
                format!(
                    "{self}\n\
                     Suggestion: check the property spelling or add it to the type descriptor."
                )
            }
            Self::AmbiguousProperty { .. } => {
                format!(
                    "{self}\n\
                     Suggestion: qualify the property with its parameter name."
                )
            }
        }
    }
}

/// Formats a parameter reference with an optional property path.
fn full_name(parameter: &str, path: &str) -> String {
    if path.is_empty() {
        format!(":{parameter}")
    } else {
        format!(":{parameter}.{path}")
    }
}

/// Errors raised while executing a statement operator.
#[derive(Debug, Error)]
pub enum OperatorError {
    /// Name or property resolution failed while rendering the statement
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The template evaluator rejected the statement
    #[error("failed to render statement: {0}")]
    Render(String),

    /// Runtime arguments do not match the operator's calling convention
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// No data source could be resolved for the invocation
    #[error("data source resolution failed: {0}")]
    DataSource(String),

    /// The resolved data source failed while executing the statement
    #[error("execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl OperatorError {
    /// Wraps a driver-level failure raised by a connection
    pub fn execution(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Execution(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_walk_context() {
        let err = BindError::not_readable_property(
            "user",
            "address.city.length",
            "address.city",
            Type::string(),
        );
        assert_eq!(
            err.to_string(),
            "property :user.address.city.length is not readable, \
             the type of :user.address.city is string"
        );

        let err = BindError::NotReadableProperty {
            parameter: "user".to_string(),
            path: "missing".to_string(),
            parent_path: String::new(),
            parent_type: Type::empty_object(),
        };
        assert_eq!(
            err.to_string(),
            "property :user.missing is not readable, the type of :user is {}"
        );
    }

    #[test]
    fn classification_predicates() {
        assert!(BindError::IncorrectParameterCount { found: 2 }.is_declaration_error());
        assert!(BindError::NotReadableParameter("x".to_string()).is_resolution_error());
        assert!(!BindError::NotReadableParameter("x".to_string()).is_declaration_error());
    }

    #[test]
    fn reports_append_a_suggestion() {
        let err = BindError::AmbiguousProperty {
            property: "name".to_string(),
            parameters: vec!["user".to_string(), "company".to_string()],
        };
        let report = err.report();
        assert!(report.starts_with(&err.to_string()));
        assert!(report.contains("Suggestion:"));
    }
}
