pub mod repository;

pub use repository::{CalculationRepository, RepositoryError};
