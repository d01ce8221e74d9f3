use std::sync::Arc;

use crate::binding::context::ParameterContext;
use crate::binding::error::OperatorResult;
use crate::binding::model::Value;

use super::{
    DataSourceRouter, ExecutionResult, Operator, OperatorCore, OperatorKind, StatementRenderer,
    StatsSink,
};

/// Executes a query statement and yields its result value.
pub struct QueryOperator {
    core: OperatorCore,
}

impl QueryOperator {
    pub fn new(
        context: Arc<ParameterContext>,
        renderer: Box<dyn StatementRenderer>,
        router: Box<dyn DataSourceRouter>,
        stats: Arc<dyn StatsSink>,
    ) -> Self {
        Self {
            core: OperatorCore {
                context,
                renderer,
                router,
                stats,
            },
        }
    }
}

impl Operator for QueryOperator {
    fn execute(&self, args: &[Value]) -> OperatorResult<ExecutionResult> {
        self.core.observe(OperatorKind::Query, || {
            let statement = self.core.renderer.render(&self.core.context, args)?;
            let connection = self.core.router.route(args)?;
            connection.query(&statement).map(ExecutionResult::Value)
        })
    }
}
