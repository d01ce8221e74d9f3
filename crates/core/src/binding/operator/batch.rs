use std::sync::Arc;

use crate::binding::context::ParameterContext;
use crate::binding::error::{OperatorError, OperatorResult};
use crate::binding::model::Value;

use super::{
    DataSourceRouter, ExecutionResult, Operator, OperatorCore, OperatorKind, StatementRenderer,
    StatsSink,
};

/// Executes a batch update: the single list argument is treated as row
/// parameter sets, one statement is rendered per row, and the result is
/// one affected-row count per row.
pub struct BatchUpdateOperator {
    core: OperatorCore,
}

impl BatchUpdateOperator {
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

impl Operator for BatchUpdateOperator {
    fn execute(&self, args: &[Value]) -> OperatorResult<ExecutionResult> {
        self.core.observe(OperatorKind::BatchUpdate, || {
            let rows = match args {
                [Value::List(rows)] => rows.as_slice(),
                _ => {
                    return Err(OperatorError::InvalidArguments(
                        "batch update takes a single list of row parameter sets".to_string(),
                    ))
                }
            };

            // Each row is rendered as the sole logical argument, matching
            // the context's normalized one-row view of the signature.
            let mut statements = Vec::with_capacity(rows.len());
            for row in rows {
                statements.push(
                    self.core
                        .renderer
                        .render(&self.core.context, std::slice::from_ref(row))?,
                );
            }

            let connection = self.core.router.route(args)?;
            connection
                .batch_update(&statements)
                .map(ExecutionResult::Batch)
        })
    }
}
