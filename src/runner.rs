//! Task runner: the harness core.
//!
//! [`TaskRunner::run`] is a total function from task descriptor to result
//! descriptor. Every failure past descriptor parsing, whether structural
//! (missing blocks), credential (session construction) or logic (the tool
//! itself), is caught here, printed to stderr for the operator, and folded
//! into a failure result the scheduler can consume. Nothing escapes.

use crate::descriptor::{ResultDescriptor, TaskDescriptor};
use crate::error::HarnessError;
use crate::params::Parameters;
use crate::storage::SessionFactory;
use crate::tool::{Tool, ToolContext, ToolOutcome};
use std::sync::Arc;

pub struct TaskRunner {
    sessions: Arc<dyn SessionFactory>,
    tool: Box<dyn Tool>,
}

impl TaskRunner {
    pub fn new(sessions: Arc<dyn SessionFactory>, tool: Box<dyn Tool>) -> Self {
        Self { sessions, tool }
    }

    /// Executes one task. Always returns a well-formed result descriptor.
    pub async fn run(&self, descriptor: TaskDescriptor) -> ResultDescriptor {
        match self.execute(descriptor).await {
            Ok(outcome) => ResultDescriptor::success(outcome.outputs, outcome.metrics),
            Err(err) => {
                let diagnostic = err.diagnostic();
                eprintln!(
                    "tool '{}' failed in the {} phase:\n{diagnostic}",
                    self.tool.name(),
                    err.phase()
                );
                ResultDescriptor::failure(diagnostic)
            }
        }
    }

    async fn execute(&self, descriptor: TaskDescriptor) -> Result<ToolOutcome, HarnessError> {
        let TaskDescriptor {
            parameters,
            inputs,
            outputs,
            secrets,
            minio,
        } = descriptor;

        // Credentials first: a session scoped to this task is constructed
        // before any tool code runs, and dropped when the run ends.
        let credentials = minio.ok_or(HarnessError::MissingCredentials)?;
        let store = self.sessions.connect(&credentials)?;

        let params = Parameters::new(parameters.ok_or(HarnessError::MissingParameters)?);

        let ctx = ToolContext {
            params: &params,
            inputs: &inputs,
            outputs: &outputs,
            secrets: &secrets,
            store: &store,
        };
        self.tool.execute(ctx).await.map_err(HarnessError::Logic)
    }
}
