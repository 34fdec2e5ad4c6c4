use std::collections::HashMap;
use std::sync::Mutex;

use fk_core::ports::{FlagStoreError, FlagStorePort};

/// Process-local flag store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryFlagStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FlagStorePort for InMemoryFlagStore {
    fn get(&self, key: &str) -> Result<Option<String>, FlagStoreError> {
        let values = self.values.lock().map_err(|_| FlagStoreError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), FlagStoreError> {
        let mut values = self.values.lock().map_err(|_| FlagStoreError::Unavailable)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), FlagStoreError> {
        let mut values = self.values.lock().map_err(|_| FlagStoreError::Unavailable)?;
        values.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), FlagStoreError> {
        let mut values = self.values.lock().map_err(|_| FlagStoreError::Unavailable)?;
        values.clear();
        Ok(())
    }
}
