//! Sqlbind is the parameter-binding core of a SQL mapping layer.
//!
//! # Overview
//!
//! Given a mapped method's declared parameters, this crate resolves every
//! logical name a statement template may reference to its declared type,
//! including nested property paths on structured arguments (for example
//! `user.address.city`), and provides the operator composition root that
//! drives statement execution around those answers.
//!
//! # Key Features
//!
//! - One addressing scheme over scalar, structured and batch parameters
//! - Cached property-path resolution against explicit type descriptors
//! - Bare property name expansion with lazy ambiguity detection
//! - Query / update / batch-update operators with pluggable data-source
//!   routing and execution statistics
//!
//! # Quick Start
//!
//! ```rust
//! use sqlbind_core::prelude::*;
//!
//! // Describe the signature `find(id: bigint, user: { name, age })`.
//! let user = Type::object_with(vec![
//!     ("name", Type::string()),
//!     ("age", Type::int()),
//! ]);
//! let descriptors = vec![
//!     ParameterDescriptor::named(0, Type::int(), "id"),
//!     ParameterDescriptor::named(1, user, "user"),
//! ];
//!
//! let names = DeclaredNames::new(&descriptors);
//! let context = ParameterContext::new(descriptors, &names, OperatorKind::Query)
//!     .expect("signature should be bindable");
//!
//! assert_eq!(context.resolve_type("user", "name").unwrap(), Type::string());
//! assert_eq!(context.owner_of("age").unwrap(), Some("user"));
//! ```

pub mod binding;
pub mod prelude;
