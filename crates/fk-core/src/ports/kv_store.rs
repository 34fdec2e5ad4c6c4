//! Key-value store port backing the API.
//!
//! Values are JSON documents. Keys follow [`crate::tracking::keys`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvStoreError {
    #[error("kv storage error: {0}")]
    Storage(String),

    #[error("kv value corrupt for key {key}: {message}")]
    Corrupt { key: String, message: String },
}

#[async_trait]
pub trait KvStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, KvStoreError>;

    /// Insert or replace.
    async fn set(&self, key: &str, value: &Value) -> Result<(), KvStoreError>;

    async fn del(&self, key: &str) -> Result<(), KvStoreError>;

    /// Every value whose key starts with `prefix`, in key order.
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, KvStoreError>;
}
