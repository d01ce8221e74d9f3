//! Convenience re-exports of the public binding surface.

pub use crate::binding::context::{
    CacheStats, DeclaredNames, NameProvider, ParameterContext, ParameterDescriptor,
};
pub use crate::binding::error::{BindError, BindResult, OperatorError, OperatorResult};
pub use crate::binding::model::{Type, TypeKind, TypeRegistry, Value};
pub use crate::binding::operator::{
    BatchUpdateOperator, BoundStatement, Connection, DataSourceRouter, ExecutionResult,
    ExecutionStats, Operator, OperatorKind, Outcome, QueryOperator, StatementRenderer, StatsSink,
    StatsSnapshot, UpdateOperator,
};
