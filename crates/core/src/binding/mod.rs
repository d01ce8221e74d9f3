//! Parameter binding for templated SQL statements.
//!
//! The binding layer normalizes the heterogeneous calling conventions of
//! mapped methods (scalar parameters, structured parameters, iterable batch
//! parameters) into one addressing scheme, resolves dotted property paths
//! against declared types, and composes statement operators around the
//! shared resolution context.
//!
//! # Architecture
//!
//! The layer is divided into several key components:
//!
//! - [`model`]: structural type descriptors and runtime argument values
//! - [`context`]: the per-signature parameter binding context
//! - [`operator`]: statement-kind operators and their collaborators
//! - [`error`]: typed binding and execution errors

pub mod context;
pub mod error;
pub mod model;
pub mod operator;
