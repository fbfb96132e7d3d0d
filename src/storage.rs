//! Object-storage session seam.
//!
//! The harness never talks to storage directly; it builds one session per
//! invocation from the descriptor's scoped credentials and passes it to the
//! tool. The [`ObjectStore`] trait is the whole contract the harness relies
//! on, so deployments swap in a real MinIO/S3 backend by providing their own
//! [`SessionFactory`]. The crate ships an in-memory backend for development
//! and tests.

use crate::descriptor::StorageCredentials;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(StoragePath),
    #[error("access denied for scoped credentials: {0}")]
    AccessDenied(StoragePath),
    #[error("write failed for {path}: {message}")]
    Write { path: StoragePath, message: String },
    #[error("cannot establish storage session: {0}")]
    Connection(String),
    #[error("invalid storage path '{0}': expected '<bucket>/<key>'")]
    InvalidPath(String),
}

/// Bucket-qualified object key, the path form the platform hands out
/// (e.g. `XXXXXXXX-bucket/temp1.csv`). A leading slash is tolerated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoragePath {
    bucket: String,
    key: String,
}

impl StoragePath {
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let trimmed = raw.trim_start_matches('/');
        let (bucket, key) = trimmed
            .split_once('/')
            .ok_or_else(|| StorageError::InvalidPath(raw.to_string()))?;
        if bucket.is_empty() || key.is_empty() {
            return Err(StorageError::InvalidPath(raw.to_string()));
        }
        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

impl FromStr for StoragePath {
    type Err = StorageError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

/// Read/write contract the harness and tools depend on. Retry policy,
/// multipart handling and path normalization are the backend's problem.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug {
    async fn get_object(&self, path: &StoragePath) -> Result<Vec<u8>, StorageError>;

    /// Writes the content and returns the canonical path it landed at.
    async fn put_object(
        &self,
        path: &StoragePath,
        content: Vec<u8>,
    ) -> Result<StoragePath, StorageError>;
}

/// Builds one storage session per invocation from a scoped credential block.
pub trait SessionFactory: Send + Sync {
    fn connect(&self, credentials: &StorageCredentials) -> Result<Arc<dyn ObjectStore>, StorageError>;
}

/// Default factory: validates the credential block and binds a session to
/// it. Transport is secure (https) unless the endpoint explicitly carries a
/// scheme of its own.
pub struct ScopedSessionFactory {
    secure: bool,
}

impl ScopedSessionFactory {
    pub fn new() -> Self {
        Self { secure: true }
    }

    /// Insecure transport, for local development instances only.
    #[allow(dead_code)]
    pub fn insecure() -> Self {
        Self { secure: false }
    }

    /// Endpoint URL the session will be bound to, with the scheme implied
    /// by the transport setting when the credential block carries none.
    pub fn session_endpoint(&self, credentials: &StorageCredentials) -> String {
        let endpoint = credentials.endpoint_url.trim();
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if self.secure {
            format!("https://{endpoint}")
        } else {
            format!("http://{endpoint}")
        }
    }
}

impl Default for ScopedSessionFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFactory for ScopedSessionFactory {
    fn connect(&self, credentials: &StorageCredentials) -> Result<Arc<dyn ObjectStore>, StorageError> {
        if credentials.endpoint_url.trim().is_empty() {
            return Err(StorageError::Connection(
                "credential block has an empty endpoint_url".to_string(),
            ));
        }
        if credentials.id.trim().is_empty() || credentials.key.trim().is_empty() {
            return Err(StorageError::Connection(
                "credential block is missing access key material".to_string(),
            ));
        }
        Ok(Arc::new(InMemoryStore::new(
            self.session_endpoint(credentials),
        )))
    }
}

/// In-memory object store standing in for the platform backend during
/// development and tests.
#[derive(Debug)]
pub struct InMemoryStore {
    endpoint: String,
    objects: Mutex<BTreeMap<StoragePath, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Seeds an object, for tests that need pre-existing inputs.
    pub fn insert(&self, path: StoragePath, content: Vec<u8>) {
        self.objects
            .lock()
            .expect("object map lock poisoned")
            .insert(path, content);
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn get_object(&self, path: &StoragePath) -> Result<Vec<u8>, StorageError> {
        self.objects
            .lock()
            .expect("object map lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.clone()))
    }

    async fn put_object(
        &self,
        path: &StoragePath,
        content: Vec<u8>,
    ) -> Result<StoragePath, StorageError> {
        self.objects
            .lock()
            .expect("object map lock poisoned")
            .insert(path.clone(), content);
        Ok(path.clone())
    }
}
