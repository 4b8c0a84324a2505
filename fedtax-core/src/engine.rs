//! The orchestrator: a fixed-order, pure composition of the stage
//! calculators.
//!
//! Pipeline order: income aggregation → FICA (the half-SE deduction must
//! exist before AGI) → AGI → deduction selection → bracket + preferential
//! + NIIT computation → credits → summary. No stage reads or writes anything
//! outside its arguments, so identical input always yields identical output
//! and any number of calculations may run concurrently.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fedtax_core::engine::TaxEngine;
//! use fedtax_core::models::{FilingStatus, TaxReturnInput, W2};
//! use fedtax_core::rates::year2024;
//!
//! let engine = TaxEngine::new(year2024::rate_table()).unwrap();
//!
//! let mut input = TaxReturnInput::new(FilingStatus::Single);
//! input.w2s.push(W2 {
//!     wages: dec!(50000),
//!     federal_withholding: dec!(6000),
//! });
//!
//! let result = engine.calculate(&input).unwrap();
//! assert_eq!(result.summary.taxable_income, dec!(35400.00));
//! assert_eq!(result.summary.total_income_tax_before_credits, dec!(4016.00));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::agi::{AgiResult, calculate_agi};
use crate::calculations::credits::{CreditsApplier, CreditsResult};
use crate::calculations::deduction::{DeductionResult, DeductionSelector};
use crate::calculations::fica::{FicaCalculator, FicaResult};
use crate::calculations::income::{IncomeResult, aggregate_income};
use crate::calculations::summary::{SummaryComposer, TaxSummary};
use crate::calculations::tax_computation::{
    TaxComputation, TaxComputationError, TaxComputationResult,
};
use crate::db::repository::CalculationRepository;
use crate::models::{NewCalculationRecord, TaxReturnInput};
use crate::rates::{RateTable, RateTableError};
use crate::validate::{InputError, validate_return};

/// Complete result bundle: every intermediate stage output plus the final
/// summary, self-describing and directly serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTaxCalculationResult {
    pub income: IncomeResult,
    pub fica: FicaResult,
    pub agi: AgiResult,
    pub deductions: DeductionResult,
    pub tax_computation: TaxComputationResult,
    pub credits: CreditsResult,
    pub summary: TaxSummary,
}

/// Errors from a full calculation. [`EngineError::Input`] is a caller error;
/// a computation error indicates a defect and is not expected with the table
/// validated by [`TaxEngine::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Computation(#[from] TaxComputationError),
}

/// The engine: an injected rate table plus the fixed stage order.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    rates: RateTable,
}

impl TaxEngine {
    /// Validates the rate table once; the calculators assume it afterwards.
    pub fn new(rates: RateTable) -> Result<Self, RateTableError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Read-only reference-data surface: the injected rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Runs the full pipeline for one validated return.
    pub fn calculate(
        &self,
        input: &TaxReturnInput,
    ) -> Result<FullTaxCalculationResult, EngineError> {
        validate_return(input)?;

        let status = input.filing_status;

        let income = aggregate_income(input);

        let fica = FicaCalculator::new(&self.rates.fica).calculate(
            status,
            income.wages,
            income.self_employment_income,
        );

        let agi = calculate_agi(&income, &input.above_the_line, fica.se_tax_deduction)?;

        let deductions =
            DeductionSelector::new(&self.rates.standard_deduction).select(input, &income, &agi);

        let tax_computation =
            TaxComputation::new(&self.rates).calculate(status, &income, &agi, &deductions)?;

        let credits = CreditsApplier::new(&self.rates.child_tax_credit).apply(
            status,
            input.credits.qualifying_children,
            agi.agi,
            tax_computation.total_income_tax,
        );

        let summary = SummaryComposer::new(&self.rates)
            .compose(
                input,
                &income,
                &agi,
                &deductions,
                &tax_computation,
                &credits,
                &fica,
            )
            .map_err(TaxComputationError::from)?;

        Ok(FullTaxCalculationResult {
            income,
            fica,
            agi,
            deductions,
            tax_computation,
            credits,
            summary,
        })
    }

    /// Calculates, then hands the result to the storage collaborator.
    ///
    /// Persistence is best-effort: a storage (or serialization) failure is
    /// logged and the calculation is still returned.
    pub async fn calculate_and_record(
        &self,
        repository: &dyn CalculationRepository,
        input: &TaxReturnInput,
    ) -> Result<FullTaxCalculationResult, EngineError> {
        let result = self.calculate(input)?;

        match NewCalculationRecord::from_calculation(input, &result) {
            Ok(record) => {
                if let Err(err) = repository.save_calculation(record).await {
                    warn!(error = %err, "failed to persist calculation history");
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to serialize calculation for history");
            }
        }

        Ok(result)
    }
}
