//! Harness error taxonomy.
//!
//! Everything that can go wrong between a parsed task descriptor and a
//! result descriptor is one of these variants. Each knows which phase of
//! the run it belongs to; the runner uses the phase tag to prefix the
//! diagnostic text it embeds in the failure result.

use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The descriptor parsed but carries no `minio` credential block.
    #[error("task descriptor has no 'minio' credentials block")]
    MissingCredentials,

    /// The descriptor parsed but carries no `parameters` block.
    #[error("task descriptor has no 'parameters' block")]
    MissingParameters,

    /// The storage session could not be established from the supplied
    /// credentials.
    #[error("storage session: {0}")]
    Session(#[from] StorageError),

    /// A single parameter key is missing or has the wrong shape.
    #[error("parameter '{key}': {message}")]
    Parameter { key: String, message: String },

    /// The parameter bag as a whole does not match the tool's schema.
    #[error("parameters do not match the tool's schema")]
    InvalidParameters(#[source] serde_json::Error),

    /// The tool's own logic failed; the full chain is preserved.
    #[error(transparent)]
    Logic(anyhow::Error),
}

impl HarnessError {
    pub fn missing_parameter(key: &str) -> Self {
        HarnessError::Parameter {
            key: key.to_string(),
            message: "required parameter is missing".to_string(),
        }
    }

    /// Which phase of the run produced this error.
    pub fn phase(&self) -> &'static str {
        match self {
            HarnessError::MissingCredentials | HarnessError::MissingParameters => "structural",
            HarnessError::Session(_) => "credentials",
            HarnessError::Parameter { .. } | HarnessError::InvalidParameters(_) => "parameters",
            HarnessError::Logic(_) => "logic",
        }
    }

    /// Full diagnostic text for the result's `error` field: the phase tag
    /// followed by the whole error chain. This is the closest equivalent of
    /// a stack trace the result schema carries.
    pub fn diagnostic(&self) -> String {
        match self {
            // anyhow's alternate Debug already renders the chain.
            HarnessError::Logic(err) => format!("[logic] {err:?}"),
            other => {
                let mut text = format!("[{}] {}", other.phase(), other);
                let mut source = std::error::Error::source(other);
                while let Some(err) = source {
                    text.push_str("\ncaused by: ");
                    text.push_str(&err.to_string());
                    source = err.source();
                }
                text
            }
        }
    }
}

impl From<anyhow::Error> for HarnessError {
    fn from(err: anyhow::Error) -> Self {
        HarnessError::Logic(err)
    }
}
