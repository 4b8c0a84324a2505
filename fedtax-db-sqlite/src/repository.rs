use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fedtax_core::{
    CalculationRecord, CalculationRepository, FilingStatus, NewCalculationRecord, RepositoryError,
};
use sqlx::{Row, sqlite::SqlitePool};

use crate::decimal::get_decimal;

/// SQLite-backed calculation history.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<CalculationRecord, RepositoryError> {
    let status_code: String = row
        .try_get("filing_status")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let filing_status = FilingStatus::parse(&status_code).ok_or_else(|| {
        RepositoryError::Database(format!("Invalid filing status code: {}", status_code))
    })?;

    Ok(CalculationRecord {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        filing_status,
        total_income: get_decimal(row, "total_income")?,
        agi: get_decimal(row, "agi")?,
        taxable_income: get_decimal(row, "taxable_income")?,
        total_tax: get_decimal(row, "total_tax")?,
        effective_rate: get_decimal(row, "effective_rate")?,
        marginal_rate: get_decimal(row, "marginal_rate")?,
        refund_or_owed: get_decimal(row, "refund_or_owed")?,
        input_json: row
            .try_get("input_json")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        result_json: row
            .try_get("result_json")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
    })
}

const SELECT_COLUMNS: &str =
    "SELECT id, created_at, filing_status, total_income, agi, taxable_income,
            total_tax, effective_rate, marginal_rate, refund_or_owed,
            input_json, result_json
     FROM tax_calculations";

#[async_trait]
impl CalculationRepository for SqliteRepository {
    async fn save_calculation(
        &self,
        record: NewCalculationRecord,
    ) -> Result<CalculationRecord, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO tax_calculations (
                created_at, filing_status, total_income, agi, taxable_income,
                total_tax, effective_rate, marginal_rate, refund_or_owed,
                input_json, result_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(now)
        .bind(record.filing_status.as_str())
        .bind(record.total_income.to_string())
        .bind(record.agi.to_string())
        .bind(record.taxable_income.to_string())
        .bind(record.total_tax.to_string())
        .bind(record.effective_rate.to_string())
        .bind(record.marginal_rate.to_string())
        .bind(record.refund_or_owed.to_string())
        .bind(&record.input_json)
        .bind(&record.result_json)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_calculation(id).await
    }

    async fn get_calculation(&self, id: i64) -> Result<CalculationRecord, RepositoryError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_record(&row)
    }

    async fn list_calculations(&self) -> Result<Vec<CalculationRecord>, RepositoryError> {
        let rows = sqlx::query(&format!("{} ORDER BY id DESC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn delete_calculation(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tax_calculations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fedtax_core::engine::{FullTaxCalculationResult, TaxEngine};
    use fedtax_core::models::{TaxReturnInput, W2};
    use fedtax_core::rates::year2024;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRepository::new_with_pool(pool);
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn wage_return(wages: rust_decimal::Decimal) -> TaxReturnInput {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2 {
            wages,
            federal_withholding: dec!(5000),
        });
        input
    }

    fn calculated_record(wages: rust_decimal::Decimal) -> NewCalculationRecord {
        let engine = TaxEngine::new(year2024::rate_table()).expect("valid 2024 table");
        let input = wage_return(wages);
        let result = engine.calculate(&input).expect("calculation succeeds");
        NewCalculationRecord::from_calculation(&input, &result).expect("serializable result")
    }

    #[tokio::test]
    async fn save_assigns_an_id_and_timestamp() {
        let repo = setup_test_db().await;

        let before = Utc::now();
        let saved = repo
            .save_calculation(calculated_record(dec!(50000)))
            .await
            .expect("Should save calculation");

        assert!(saved.id > 0);
        assert!(saved.created_at >= before - chrono::Duration::seconds(1));
        assert_eq!(saved.filing_status, FilingStatus::Single);
        assert_eq!(saved.total_income, dec!(50000.00));
        assert_eq!(saved.total_tax, dec!(7841.00));
    }

    #[tokio::test]
    async fn get_round_trips_every_column_exactly() {
        let repo = setup_test_db().await;

        let saved = repo
            .save_calculation(calculated_record(dec!(123456.78)))
            .await
            .expect("Should save calculation");

        let fetched = repo
            .get_calculation(saved.id)
            .await
            .expect("Should fetch calculation");

        assert_eq!(fetched, saved);

        // The stored result blob deserializes back into the full bundle.
        let bundle: FullTaxCalculationResult =
            serde_json::from_str(&fetched.result_json).expect("result blob parses");
        assert_eq!(bundle.summary.total_tax, fetched.total_tax);
    }

    #[tokio::test]
    async fn get_missing_record_is_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_calculation(99999).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = setup_test_db().await;

        repo.save_calculation(calculated_record(dec!(40000)))
            .await
            .expect("Should save calculation");
        repo.save_calculation(calculated_record(dec!(80000)))
            .await
            .expect("Should save calculation");

        let all = repo
            .list_calculations()
            .await
            .expect("Should list calculations");

        assert_eq!(all.len(), 2);
        assert!(all[0].id > all[1].id);
        assert_eq!(all[0].total_income, dec!(80000.00));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let repo = setup_test_db().await;

        let saved = repo
            .save_calculation(calculated_record(dec!(50000)))
            .await
            .expect("Should save calculation");

        repo.delete_calculation(saved.id)
            .await
            .expect("Should delete calculation");

        assert_eq!(
            repo.get_calculation(saved.id).await,
            Err(RepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn delete_missing_record_is_not_found() {
        let repo = setup_test_db().await;

        let result = repo.delete_calculation(99999).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn engine_auto_persists_through_the_repository() {
        let repo = setup_test_db().await;
        let engine = TaxEngine::new(year2024::rate_table()).expect("valid 2024 table");
        let input = wage_return(dec!(50000));

        let result = engine
            .calculate_and_record(&repo, &input)
            .await
            .expect("calculation succeeds");

        let all = repo
            .list_calculations()
            .await
            .expect("Should list calculations");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].total_tax, result.summary.total_tax);

        let stored_input: TaxReturnInput =
            serde_json::from_str(&all[0].input_json).expect("input blob parses");
        assert_eq!(stored_input, input);
    }
}
