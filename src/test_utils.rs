//! Shared fixtures and doubles for unit tests.

use crate::descriptor::{StorageCredentials, TaskDescriptor};
use crate::storage::{ObjectStore, SessionFactory, StorageError};
use std::sync::Arc;

/// A well-formed descriptor for the placeholder add tool.
pub fn descriptor(x: i64, y: i64) -> TaskDescriptor {
    serde_json::from_value(serde_json::json!({
        "parameters": {"x": x, "y": y},
        "inputs": {},
        "outputs": {},
        "secrets": {},
        "minio": {
            "endpoint_url": "minio.example.org",
            "id": "AKIA",
            "key": "secret",
            "skey": "token",
        },
    }))
    .expect("test descriptor must parse")
}

/// Drops a top-level block (`minio` or `parameters`) from a descriptor.
pub fn strip(mut descriptor: TaskDescriptor, block: &str) -> TaskDescriptor {
    match block {
        "minio" => descriptor.minio = None,
        "parameters" => descriptor.parameters = None,
        other => panic!("unknown descriptor block '{other}'"),
    }
    descriptor
}

/// Session factory that refuses every credential block, as a real backend
/// would when the platform's scoped token has expired.
pub struct RejectingSessionFactory;

impl SessionFactory for RejectingSessionFactory {
    fn connect(
        &self,
        credentials: &StorageCredentials,
    ) -> Result<Arc<dyn ObjectStore>, StorageError> {
        Err(StorageError::Connection(format!(
            "credentials rejected by {}",
            credentials.endpoint_url
        )))
    }
}
