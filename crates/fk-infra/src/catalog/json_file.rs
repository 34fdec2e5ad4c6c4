//! Workout catalog loaded from a JSON file.
//!
//! The file holds an array of workouts (or `{"workouts": [...]}`), and is
//! read once at construction.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use fk_core::ports::{CatalogError, WorkoutCatalogPort};
use fk_core::Workout;

pub const DEFAULT_CATALOG_FILE: &str = "workouts.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Workout>),
    Wrapped { workouts: Vec<Workout> },
}

pub struct JsonWorkoutCatalog {
    workouts: Vec<Workout>,
}

impl JsonWorkoutCatalog {
    pub fn from_workouts(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        let workouts = match file {
            CatalogFile::List(workouts) | CatalogFile::Wrapped { workouts } => workouts,
        };
        Ok(Self::from_workouts(workouts))
    }

    /// A missing file yields an empty catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no workout catalog file, serving empty catalog");
                return Ok(Self::from_workouts(Vec::new()));
            }
            Err(err) => return Err(CatalogError::Unavailable(err.to_string())),
        };
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), count = catalog.workouts.len(), "workout catalog loaded");
        Ok(catalog)
    }
}

impl WorkoutCatalogPort for JsonWorkoutCatalog {
    fn list(&self) -> Result<Vec<Workout>, CatalogError> {
        Ok(self.workouts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ONE_WORKOUT: &str = r#"[{"id":"2","name":"Cardio Blast","category":"Cardio",
        "duration":20,"difficulty":"Intermediate","calories":300,"exerciseCount":1,
        "exercises":[{"name":"Burpees","reps":15,"sets":4,"tips":"Land softly"}]}]"#;

    #[test]
    fn accepts_list_and_wrapped_forms() {
        let list = JsonWorkoutCatalog::from_json(ONE_WORKOUT).unwrap();
        let wrapped =
            JsonWorkoutCatalog::from_json(&format!(r#"{{"workouts":{ONE_WORKOUT}}}"#)).unwrap();

        assert_eq!(list.list().unwrap(), wrapped.list().unwrap());
        assert_eq!(list.list().unwrap()[0].exercises[0].reps, Some(15));
    }

    #[test]
    fn missing_file_is_empty_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = JsonWorkoutCatalog::load(&temp_dir.path().join("none.json")).unwrap();
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_corrupt() {
        assert!(matches!(
            JsonWorkoutCatalog::from_json("{\"workouts\": 3}"),
            Err(CatalogError::Corrupt(_))
        ));
    }
}
