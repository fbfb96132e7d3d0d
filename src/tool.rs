//! Tool logic seam.
//!
//! The harness is generic over the actual computation: anything implementing
//! [`Tool`] can be wired into the runner. A tool receives a [`ToolContext`]
//! with everything one invocation may touch and returns a [`ToolOutcome`]
//! or an error; the runner owns turning either into a result descriptor.
//!
//! [`AddTool`] is the template placeholder: it adds the `x` and `y`
//! parameters and records the sum as the `z` metric.

use crate::descriptor::MetricValue;
use crate::params::Parameters;
use crate::storage::ObjectStore;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Borrowed view of one invocation, handed to the tool by the runner.
pub struct ToolContext<'a> {
    pub params: &'a Parameters,
    /// Logical input name to storage paths the tool may read.
    pub inputs: &'a BTreeMap<String, Vec<String>>,
    /// Logical output name to the destination the platform expects.
    pub outputs: &'a BTreeMap<String, String>,
    pub secrets: &'a BTreeMap<String, String>,
    /// Storage session scoped to this task's credentials.
    pub store: &'a Arc<dyn ObjectStore>,
}

/// What a successful tool run produced.
#[derive(Debug, Default)]
pub struct ToolOutcome {
    /// Logical output name to the storage path actually written.
    pub outputs: BTreeMap<String, String>,
    /// Observability scalars attached to the task record.
    pub metrics: BTreeMap<String, MetricValue>,
}

impl ToolOutcome {
    pub fn with_metric(mut self, name: &str, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(name.to_string(), value.into());
        self
    }

    pub fn with_output(mut self, name: &str, path: &str) -> Self {
        self.outputs.insert(name.to_string(), path.to_string());
        self
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    async fn execute(&self, ctx: ToolContext<'_>) -> anyhow::Result<ToolOutcome>;
}

/// Placeholder tool: `z = x + y`.
pub struct AddTool;

#[derive(Debug, Deserialize)]
struct AddParams {
    x: serde_json::Number,
    y: serde_json::Number,
}

impl AddParams {
    fn sum(&self) -> MetricValue {
        // Integer inputs keep an integer sum; anything else goes to float.
        if let (Some(x), Some(y)) = (self.x.as_i64(), self.y.as_i64()) {
            if let Some(z) = x.checked_add(y) {
                return MetricValue::Int(z);
            }
        }
        let x = self.x.as_f64().unwrap_or(f64::NAN);
        let y = self.y.as_f64().unwrap_or(f64::NAN);
        MetricValue::Float(x + y)
    }
}

#[async_trait]
impl Tool for AddTool {
    fn name(&self) -> &str {
        "add"
    }

    async fn execute(&self, ctx: ToolContext<'_>) -> anyhow::Result<ToolOutcome> {
        let params: AddParams = ctx.params.deserialize()?;
        Ok(ToolOutcome::default().with_metric("z", params.sum()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use serde_json::json;

    async fn run_add(params_json: serde_json::Value) -> anyhow::Result<ToolOutcome> {
        let params = match params_json {
            serde_json::Value::Object(map) => Parameters::new(map),
            _ => panic!("test fixture must be a JSON object"),
        };
        let inputs = BTreeMap::new();
        let outputs = BTreeMap::new();
        let secrets = BTreeMap::new();
        let store: Arc<dyn ObjectStore> =
            Arc::new(InMemoryStore::new("https://minio.example.org"));
        AddTool
            .execute(ToolContext {
                params: &params,
                inputs: &inputs,
                outputs: &outputs,
                secrets: &secrets,
                store: &store,
            })
            .await
    }

    #[tokio::test]
    async fn adds_integers_to_an_integer_metric() {
        let outcome = run_add(json!({"x": 5, "y": 2})).await.unwrap();
        assert_eq!(outcome.metrics["z"], MetricValue::Int(7));
        assert!(outcome.outputs.is_empty());
    }

    #[tokio::test]
    async fn adds_floats_to_a_float_metric() {
        let outcome = run_add(json!({"x": 0.5, "y": 2})).await.unwrap();
        assert_eq!(outcome.metrics["z"], MetricValue::Float(2.5));
    }

    #[tokio::test]
    async fn integer_overflow_falls_back_to_float() {
        let outcome = run_add(json!({"x": i64::MAX, "y": 1})).await.unwrap();
        assert!(matches!(outcome.metrics["z"], MetricValue::Float(_)));
    }

    #[tokio::test]
    async fn missing_operand_is_an_error_naming_the_key() {
        let err = run_add(json!({"x": 5})).await.unwrap_err();
        assert!(format!("{err:?}").contains("missing field `y`"));
    }

    #[tokio::test]
    async fn non_numeric_operand_is_an_error() {
        assert!(run_add(json!({"x": "five", "y": 2})).await.is_err());
    }
}
