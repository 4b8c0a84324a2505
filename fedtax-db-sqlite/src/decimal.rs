//! Decimal column helpers.
//!
//! Monetary columns are stored as TEXT so that values round-trip exactly;
//! REAL storage would break the half-up rounding guarantees the core makes.

use fedtax_core::RepositoryError;
use rust_decimal::Decimal;
use sqlx::Row;

/// Parses a decimal stored as TEXT.
pub(crate) fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.parse::<Decimal>().map_err(|e| {
        RepositoryError::Database(format!("Failed to parse decimal '{}': {}", s, e))
    })
}

/// Reads a TEXT decimal column from a row.
pub(crate) fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let raw: String = row
        .try_get(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;
    parse_decimal(&raw)
}
