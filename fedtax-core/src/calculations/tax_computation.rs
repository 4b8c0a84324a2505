//! Federal income-tax computation: bracket tax plus preferential stacking
//! plus NIIT.
//!
//! Order of computation:
//! 1. bracket tax on ordinary taxable income;
//! 2. long-term gain stacked directly on ordinary income;
//! 3. qualified dividends stacked on ordinary income plus the long-term gain
//!    counted ahead of them;
//! 4. NIIT on net investment income over the MAGI threshold.
//!
//! Because tranche widths are additive, steps 2 and 3 together tax exactly
//! the combined preferential pool stacked once: separate reporting without
//! double-taxing the overlap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::agi::AgiResult;
use crate::calculations::bracket::{BracketTax, BracketTaxError};
use crate::calculations::common::round_half_up;
use crate::calculations::deduction::DeductionResult;
use crate::calculations::income::IncomeResult;
use crate::calculations::niit::net_investment_income_tax;
use crate::calculations::preferential::{PreferentialStackError, PreferentialStacker};
use crate::models::FilingStatus;
use crate::rates::RateTable;

/// Errors from the tax-computation stage. With a validated rate table and
/// validated input these indicate a defect, not a user error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxComputationError {
    #[error(transparent)]
    Bracket(#[from] BracketTaxError),

    #[error(transparent)]
    Stack(#[from] PreferentialStackError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    /// Bracket tax on ordinary taxable income.
    pub ordinary_tax: Decimal,

    /// Tax on qualified dividends at 0/15/20%, stacked above ordinary income
    /// and long-term gain.
    pub qualified_dividend_tax: Decimal,

    /// Tax on net long-term gain at 0/15/20%, stacked above ordinary income.
    pub capital_gains_tax: Decimal,

    pub niit: Decimal,

    /// Total income tax before credits.
    pub total_income_tax: Decimal,
}

/// Composes the bracket calculator, the stacker, and NIIT into one stage.
#[derive(Debug, Clone)]
pub struct TaxComputation<'a> {
    table: &'a RateTable,
}

impl<'a> TaxComputation<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    pub fn calculate(
        &self,
        status: FilingStatus,
        income: &IncomeResult,
        agi: &AgiResult,
        deductions: &DeductionResult,
    ) -> Result<TaxComputationResult, TaxComputationError> {
        let ordinary_income = deductions.ordinary_taxable_income;

        let bracket = BracketTax::new(self.table.brackets(status));
        let ordinary = bracket.tax_on(ordinary_income)?;

        let stacker = PreferentialStacker::new(self.table.capital_gains(status));
        let capital_gains = stacker.stack(ordinary_income, deductions.preferential_long_term_gain)?;
        let qualified_dividends = stacker.stack(
            ordinary_income + deductions.preferential_long_term_gain,
            deductions.preferential_qualified_dividends,
        )?;

        // MAGI is AGI here; no foreign-income addbacks are modeled.
        let niit = net_investment_income_tax(
            &self.table.niit,
            status,
            agi.agi,
            income.net_investment_income,
        );

        let total_income_tax = round_half_up(
            ordinary.total_tax + qualified_dividends.tax + capital_gains.tax + niit.niit,
        );

        Ok(TaxComputationResult {
            ordinary_tax: ordinary.total_tax,
            qualified_dividend_tax: qualified_dividends.tax,
            capital_gains_tax: capital_gains.tax,
            niit: niit.niit,
            total_income_tax,
        })
    }
}
