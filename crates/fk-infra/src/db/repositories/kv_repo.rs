use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use serde_json::Value;

use fk_core::ports::{ClockPort, KvStoreError, KvStorePort};

use crate::db::models::{KvRow, NewKvRow};
use crate::db::pool::DbPool;
use crate::db::schema::t_kv_store::dsl::*;

/// SQLite-backed KV store. Values are stored as JSON text.
pub struct DieselKvStore {
    pool: DbPool,
    clock: Arc<dyn ClockPort>,
}

impl DieselKvStore {
    pub fn new(pool: DbPool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }

    fn conn(
        &self,
    ) -> Result<
        diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>,
        KvStoreError,
    > {
        self.pool
            .get()
            .map_err(|e| KvStoreError::Storage(e.to_string()))
    }
}

/// Escape `LIKE` wildcards so the prefix matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn decode(row: KvRow) -> Result<Value, KvStoreError> {
    serde_json::from_str(&row.value).map_err(|e| KvStoreError::Corrupt {
        key: row.key,
        message: e.to_string(),
    })
}

#[async_trait]
impl KvStorePort for DieselKvStore {
    async fn get(&self, lookup: &str) -> Result<Option<Value>, KvStoreError> {
        let mut conn = self.conn()?;

        let row = t_kv_store
            .filter(key.eq(lookup))
            .select(KvRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| KvStoreError::Storage(e.to_string()))?;

        row.map(decode).transpose()
    }

    async fn set(&self, target: &str, document: &Value) -> Result<(), KvStoreError> {
        let mut conn = self.conn()?;
        let json = document.to_string();
        let now = self.clock.now_ms();

        diesel::insert_into(t_kv_store)
            .values(&NewKvRow {
                key: target,
                value: &json,
                updated_at: now,
            })
            .on_conflict(key)
            .do_update()
            .set((value.eq(&json), updated_at.eq(now)))
            .execute(&mut conn)
            .map_err(|e| KvStoreError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn del(&self, target: &str) -> Result<(), KvStoreError> {
        let mut conn = self.conn()?;

        diesel::delete(t_kv_store.filter(key.eq(target)))
            .execute(&mut conn)
            .map_err(|e| KvStoreError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, KvStoreError> {
        let mut conn = self.conn()?;

        let rows = t_kv_store
            .filter(key.like(like_prefix(prefix)).escape('\\'))
            .order(key.asc())
            .select(KvRow::as_select())
            .load(&mut conn)
            .map_err(|e| KvStoreError::Storage(e.to_string()))?;

        rows.into_iter().map(decode).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db_pool;
    use crate::time::SystemClock;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, DieselKvStore) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("kv.db");
        let pool = init_db_pool(db_path.to_str().unwrap()).unwrap();
        (temp_dir, DieselKvStore::new(pool, Arc::new(SystemClock)))
    }

    #[test]
    fn like_prefix_escapes_wildcards() {
        assert_eq!(like_prefix("user:a_b:"), "user:a\\_b:%");
        assert_eq!(like_prefix("100%"), "100\\%%");
    }

    #[tokio::test]
    async fn set_get_and_overwrite() {
        let (_dir, kv) = store();

        kv.set("user:1:profile", &json!({"name": "Sam"})).await.unwrap();
        kv.set("user:1:profile", &json!({"name": "Alex"})).await.unwrap();

        assert_eq!(
            kv.get("user:1:profile").await.unwrap(),
            Some(json!({"name": "Alex"}))
        );
        assert_eq!(kv.get("user:2:profile").await.unwrap(), None);
    }

    #[tokio::test]
    async fn prefix_scan_is_literal_and_ordered() {
        let (_dir, kv) = store();

        kv.set("user:1:food:2", &json!(2)).await.unwrap();
        kv.set("user:1:food:1", &json!(1)).await.unwrap();
        kv.set("user:1:weight:1", &json!("w")).await.unwrap();
        kv.set("user:1_x:food:1", &json!("other user")).await.unwrap();
        kv.set("user:11:food:1", &json!("another user")).await.unwrap();

        let values = kv.get_by_prefix("user:1:food:").await.unwrap();
        assert_eq!(values, vec![json!(1), json!(2)]);

        let values = kv.get_by_prefix("user:1_").await.unwrap();
        assert_eq!(values, vec![json!("other user")]);
    }

    #[tokio::test]
    async fn delete_removes_key() {
        let (_dir, kv) = store();

        kv.set("k", &json!(true)).await.unwrap();
        kv.del("k").await.unwrap();
        kv.del("missing").await.unwrap();

        assert_eq!(kv.get("k").await.unwrap(), None);
    }
}
