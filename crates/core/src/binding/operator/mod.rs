//! Statement operators and their collaborators.
//!
//! An operator is the composition root driven once per mapped method call:
//! it renders the statement through the shared [`ParameterContext`], picks
//! a data source for the invocation, executes the rendered statement, and
//! records the outcome. One implementation exists per statement kind:
//!
//! - [`QueryOperator`]: yields the query's result value
//! - [`UpdateOperator`]: yields the affected-row count
//! - [`BatchUpdateOperator`]: treats its single list argument as row
//!   parameter sets and yields one affected-row count per row
//!
//! Operators hold no per-call state; their collaborators are injected at
//! composition and never reassigned, so one instance is safely shared
//! across invocation threads.

pub mod batch;
pub mod query;
pub mod stats;
pub mod update;

pub use batch::BatchUpdateOperator;
pub use query::QueryOperator;
pub use stats::{ExecutionStats, Outcome, StatsSink, StatsSnapshot};
pub use update::UpdateOperator;

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::binding::context::ParameterContext;
use crate::binding::error::OperatorResult;
use crate::binding::model::Value;

/// Statement kinds an operator can implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorKind {
    Query,
    Update,
    BatchUpdate,
}

/// A rendered statement: SQL text plus its bind values in order.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Result of one operator execution, shaped by the statement kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecutionResult {
    /// Query result value
    Value(Value),
    /// Affected-row count of a single update
    Affected(u64),
    /// Affected-row counts of a batch update, one per row
    Batch(Vec<u64>),
}

/// The SQL-template evaluator.
///
/// Implemented outside this crate; it consumes the binding context while
/// rendering each statement and may fail with any resolution error the
/// context raises.
pub trait StatementRenderer: Send + Sync {
    fn render(&self, context: &ParameterContext, args: &[Value])
        -> OperatorResult<BoundStatement>;
}

/// Connection-like handle a data-source strategy resolves to.
pub trait Connection: Send + Sync {
    fn query(&self, statement: &BoundStatement) -> OperatorResult<Value>;

    fn update(&self, statement: &BoundStatement) -> OperatorResult<u64>;

    fn batch_update(&self, statements: &[BoundStatement]) -> OperatorResult<Vec<u64>>;
}

/// Picks a connection for an invocation, e.g. by shard key or read/write
/// role.
pub trait DataSourceRouter: Send + Sync {
    fn route(&self, args: &[Value]) -> OperatorResult<Arc<dyn Connection>>;
}

/// A statement-kind implementation driven once per method call.
pub trait Operator: Send + Sync {
    fn execute(&self, args: &[Value]) -> OperatorResult<ExecutionResult>;
}

/// Collaborators shared by every operator kind, injected once at
/// composition.
pub(crate) struct OperatorCore {
    pub context: Arc<ParameterContext>,
    pub renderer: Box<dyn StatementRenderer>,
    pub router: Box<dyn DataSourceRouter>,
    pub stats: Arc<dyn StatsSink>,
}

impl OperatorCore {
    /// Runs one execution, recording outcome and latency in the stats sink
    /// whether it succeeds or fails at any stage.
    pub fn observe<F>(&self, kind: OperatorKind, run: F) -> OperatorResult<ExecutionResult>
    where
        F: FnOnce() -> OperatorResult<ExecutionResult>,
    {
        let started = Instant::now();
        let result = run();
        let outcome = if result.is_ok() {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        self.stats.record(outcome, started.elapsed());
        debug!(?kind, ?outcome, elapsed = ?started.elapsed(), "operator executed");
        result
    }
}
