mod json_file;

pub use json_file::{JsonWorkoutCatalog, DEFAULT_CATALOG_FILE};
