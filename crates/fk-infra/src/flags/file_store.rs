//! File-backed flag store
//!
//! Persists all flags as one JSON object. Writes go to a temporary sibling
//! file that is then renamed over the original.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fk_core::ports::{FlagStoreError, FlagStorePort};
use tracing::warn;

pub const DEFAULT_FLAGS_FILE: &str = "auth_flags.json";

type FlagMap = BTreeMap<String, String>;

pub struct FileFlagStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl FileFlagStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn with_defaults(base_dir: &Path) -> Self {
        Self::new(base_dir.join(DEFAULT_FLAGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<FlagMap, FlagStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(FlagMap::new()),
            Err(err) => return Err(FlagStoreError::Io(err.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(FlagMap::new());
        }

        serde_json::from_str(&content).map_err(|e| FlagStoreError::Corrupt(e.to_string()))
    }

    fn write_map(&self, map: &FlagMap) -> Result<(), FlagStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FlagStoreError::Io(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(map)
            .map_err(|e| FlagStoreError::Corrupt(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).map_err(|e| FlagStoreError::Io(e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| FlagStoreError::Io(e.to_string()))?;
        file.sync_all().map_err(|e| FlagStoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| FlagStoreError::Io(e.to_string()))?;

        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut FlagMap)) -> Result<(), FlagStoreError> {
        let _guard = self.lock.lock().map_err(|_| FlagStoreError::Unavailable)?;
        let mut map = match self.read_map() {
            Err(FlagStoreError::Corrupt(reason)) => self.quarantine(&reason)?,
            other => other?,
        };
        f(&mut map);
        self.write_map(&map)
    }

    /// Move an unparseable file aside so writes can start over.
    fn quarantine(&self, reason: &str) -> Result<FlagMap, FlagStoreError> {
        let aside = self.path.with_extension("json.corrupt");
        warn!(path = %self.path.display(), aside = %aside.display(), reason, "flag file corrupt, starting empty");
        fs::rename(&self.path, &aside).map_err(|e| FlagStoreError::Io(e.to_string()))?;
        Ok(FlagMap::new())
    }
}

impl FlagStorePort for FileFlagStore {
    fn get(&self, key: &str) -> Result<Option<String>, FlagStoreError> {
        let _guard = self.lock.lock().map_err(|_| FlagStoreError::Unavailable)?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), FlagStoreError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), FlagStoreError> {
        self.update(|map| {
            map.remove(key);
        })
    }

    fn clear(&self) -> Result<(), FlagStoreError> {
        let _guard = self.lock.lock().map_err(|_| FlagStoreError::Unavailable)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(FlagStoreError::Io(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileFlagStore::new(temp_dir.path().join("nonexistent.json"));

        assert_eq!(store.get("onboarding_completed").unwrap(), None);
    }

    #[test]
    fn values_survive_a_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/flags.json");

        FileFlagStore::new(path.clone())
            .set("onboarding_completed", "true")
            .unwrap();

        let reopened = FileFlagStore::new(path);
        assert_eq!(
            reopened.get("onboarding_completed").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn remove_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileFlagStore::with_defaults(temp_dir.path());

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        store.remove("never-set").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));

        store.clear().unwrap();
        assert_eq!(store.get("b").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flags.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileFlagStore::new(path);
        assert!(matches!(store.get("a"), Err(FlagStoreError::Corrupt(_))));
    }

    #[test]
    fn write_after_corruption_recovers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flags.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileFlagStore::new(path.clone());

        store.set("onboarding_completed", "true").unwrap();
        store.set("signup_prefill", "{}").unwrap();

        assert_eq!(
            store.get("onboarding_completed").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(store.get("signup_prefill").unwrap().as_deref(), Some("{}"));
        assert_eq!(
            std::fs::read_to_string(path.with_extension("json.corrupt")).unwrap(),
            "{not json"
        );
    }
}
