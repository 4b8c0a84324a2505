use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::FullTaxCalculationResult;
use crate::models::{FilingStatus, TaxReturnInput};

/// One stored calculation: headline figures in columns, the originating
/// input and the full result bundle as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub filing_status: FilingStatus,
    pub total_income: Decimal,
    pub agi: Decimal,
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub refund_or_owed: Decimal,
    pub input_json: String,
    pub result_json: String,
}

/// For creating new records (no id or timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCalculationRecord {
    pub filing_status: FilingStatus,
    pub total_income: Decimal,
    pub agi: Decimal,
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub refund_or_owed: Decimal,
    pub input_json: String,
    pub result_json: String,
}

impl NewCalculationRecord {
    /// Snapshots a finished calculation and its input for storage.
    pub fn from_calculation(
        input: &TaxReturnInput,
        result: &FullTaxCalculationResult,
    ) -> Result<Self, serde_json::Error> {
        let summary = &result.summary;
        Ok(Self {
            filing_status: summary.filing_status,
            total_income: summary.total_income,
            agi: summary.agi,
            taxable_income: summary.taxable_income,
            total_tax: summary.total_tax,
            effective_rate: summary.effective_rate,
            marginal_rate: summary.marginal_rate,
            refund_or_owed: summary.refund_or_owed,
            input_json: serde_json::to_string(input)?,
            result_json: serde_json::to_string(result)?,
        })
    }
}
