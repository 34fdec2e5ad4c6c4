use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use fk_core::ports::{KvStoreError, KvStorePort};

/// Ordered in-memory KV store for tests and throwaway servers.
#[derive(Default)]
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStorePort for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, KvStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), KvStoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), KvStoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, KvStoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, value)| value.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn prefix_scan_stops_at_first_non_match() {
        let kv = InMemoryKvStore::new();
        kv.set("user:1:chat:2", &json!("b")).await.unwrap();
        kv.set("user:1:chat:1", &json!("a")).await.unwrap();
        kv.set("user:1:food:1", &json!("f")).await.unwrap();
        kv.set("user:2:chat:1", &json!("x")).await.unwrap();

        assert_eq!(
            kv.get_by_prefix("user:1:chat:").await.unwrap(),
            vec![json!("a"), json!("b")]
        );
    }
}
