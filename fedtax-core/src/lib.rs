pub mod calculations;
pub mod db;
pub mod engine;
pub mod models;
pub mod rates;
pub mod validate;

pub use db::repository::{CalculationRepository, RepositoryError};
pub use engine::{EngineError, FullTaxCalculationResult, TaxEngine};
pub use models::*;
pub use validate::{InputError, parse_filing_status, validate_return};
