use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CalculationRecord, NewCalculationRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Storage collaborator for calculation history.
///
/// Records are keyed by an auto-incrementing id and stamped with their
/// creation time by the implementation. The engine persists best-effort: a
/// failing implementation never fails a calculation.
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    async fn save_calculation(
        &self,
        record: NewCalculationRecord,
    ) -> Result<CalculationRecord, RepositoryError>;

    async fn get_calculation(&self, id: i64) -> Result<CalculationRecord, RepositoryError>;

    /// Newest first.
    async fn list_calculations(&self) -> Result<Vec<CalculationRecord>, RepositoryError>;

    async fn delete_calculation(&self, id: i64) -> Result<(), RepositoryError>;
}
