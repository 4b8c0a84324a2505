//! Adjusted Gross Income: gross income minus above-the-line deductions.
//!
//! The half-SE-tax deduction is injected here from the FICA stage output,
//! which is why FICA must run first. A return whose deductions exceed gross
//! income would produce a negative AGI; the model does not cover that, so it
//! is rejected rather than floored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::calculations::income::IncomeResult;
use crate::models::AboveTheLineDeductions;
use crate::validate::InputError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgiResult {
    pub total_gross_income: Decimal,

    /// All above-the-line deductions, including the half-SE-tax deduction.
    pub total_above_the_line_deductions: Decimal,

    pub agi: Decimal,
}

/// Computes AGI from aggregated income, the filer's above-the-line
/// deductions, and the SE deduction produced by the FICA stage.
pub fn calculate_agi(
    income: &IncomeResult,
    deductions: &AboveTheLineDeductions,
    se_tax_deduction: Decimal,
) -> Result<AgiResult, InputError> {
    let total_deductions = round_half_up(
        deductions.hsa
            + deductions.student_loan_interest
            + deductions.educator_expenses
            + deductions.ira
            + deductions.self_employed_health_insurance
            + se_tax_deduction,
    );

    let agi = income.total_gross_income - total_deductions;
    if agi < Decimal::ZERO {
        return Err(InputError::UnsupportedScenario(format!(
            "adjusted gross income is negative ({agi}); \
             deductions exceeding gross income are not supported"
        )));
    }

    Ok(AgiResult {
        total_gross_income: income.total_gross_income,
        total_above_the_line_deductions: total_deductions,
        agi: round_half_up(agi),
    })
}
