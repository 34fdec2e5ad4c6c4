use thiserror::Error;

use crate::tracking::Workout;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("workout catalog unavailable: {0}")]
    Unavailable(String),

    #[error("workout catalog corrupt: {0}")]
    Corrupt(String),
}

pub trait WorkoutCatalogPort: Send + Sync {
    fn list(&self) -> Result<Vec<Workout>, CatalogError>;
}
