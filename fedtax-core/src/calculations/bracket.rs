//! Progressive bracket tax on ordinary income.
//!
//! Walks the filing status's ordered tier list and taxes the portion of
//! income strictly within `[lower, upper)` at that tier's rate; the top tier
//! is unbounded. The result is monotonic non-decreasing in income and
//! continuous at every boundary (no cliff beyond the rate change itself).
//!
//! The calculator also answers the marginal-rate query: the rate of the tier
//! containing the given income, where income exactly at a boundary belongs to
//! the tier it completes, not the next one.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fedtax_core::calculations::bracket::BracketTax;
//! use fedtax_core::models::FilingStatus;
//! use fedtax_core::rates::year2024;
//!
//! let table = year2024::rate_table();
//! let calc = BracketTax::new(table.brackets(FilingStatus::Single));
//!
//! // $35,400 taxable: $11,600 × 10% + $23,800 × 12% = $4,016.00
//! let outcome = calc.tax_on(dec!(35400)).unwrap();
//! assert_eq!(outcome.total_tax, dec!(4016.00));
//! assert_eq!(outcome.marginal_rate, dec!(0.12));
//!
//! // Income exactly at a boundary belongs to the tier it completes.
//! assert_eq!(calc.marginal_rate_at(dec!(11600)).unwrap(), dec!(0.10));
//! assert_eq!(calc.marginal_rate_at(dec!(11600.01)).unwrap(), dec!(0.12));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::rates::TaxBracket;

/// Errors from the bracket tax calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTaxError {
    /// The bracket schedule is empty.
    #[error("no tax brackets provided")]
    EmptySchedule,

    /// Taxable income was negative; the pipeline never produces this.
    #[error("taxable income must be non-negative, got {0}")]
    NegativeIncome(Decimal),
}

/// One tier of the progressive breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub rate: Decimal,
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub taxable_in_tier: Decimal,
    pub tax_in_tier: Decimal,
}

/// Result of a progressive bracket-tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxOutcome {
    pub taxable_income: Decimal,
    pub total_tax: Decimal,

    /// Rate of the highest tier reached.
    pub marginal_rate: Decimal,

    pub tiers: Vec<BracketSlice>,
}

/// Marginal-rate tax calculator over an ordered, contiguous tier schedule.
#[derive(Debug, Clone)]
pub struct BracketTax<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketTax<'a> {
    /// Brackets must be sorted by `lower`, contiguous from zero, with the
    /// final tier unbounded; [`crate::rates::RateTable::validate`] enforces
    /// this once at engine construction.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Tax owed on non-negative ordinary taxable income, with the per-tier
    /// breakdown. Each tier's tax is rounded half-up; the total is the
    /// rounded sum of tiers.
    pub fn tax_on(
        &self,
        taxable_income: Decimal,
    ) -> Result<BracketTaxOutcome, BracketTaxError> {
        if self.brackets.is_empty() {
            return Err(BracketTaxError::EmptySchedule);
        }
        if taxable_income < Decimal::ZERO {
            return Err(BracketTaxError::NegativeIncome(taxable_income));
        }

        let mut tiers = Vec::new();
        let mut total_tax = Decimal::ZERO;
        let mut marginal_rate = self.brackets[0].rate;

        for bracket in self.brackets {
            if taxable_income <= bracket.lower {
                break;
            }

            let taxable_in_tier = match bracket.upper {
                Some(upper) => taxable_income.min(upper) - bracket.lower,
                None => taxable_income - bracket.lower,
            };
            let tax_in_tier = round_half_up(taxable_in_tier * bracket.rate);

            tiers.push(BracketSlice {
                rate: bracket.rate,
                lower: bracket.lower,
                upper: bracket.upper,
                taxable_in_tier,
                tax_in_tier,
            });

            total_tax += tax_in_tier;
            marginal_rate = bracket.rate;
        }

        Ok(BracketTaxOutcome {
            taxable_income,
            total_tax: round_half_up(total_tax),
            marginal_rate,
            tiers,
        })
    }

    /// Rate of the tier containing `income`. Income exactly at a boundary
    /// belongs to the tier it completes; zero income reports the lowest rate.
    pub fn marginal_rate_at(
        &self,
        income: Decimal,
    ) -> Result<Decimal, BracketTaxError> {
        if self.brackets.is_empty() {
            return Err(BracketTaxError::EmptySchedule);
        }
        if income < Decimal::ZERO {
            return Err(BracketTaxError::NegativeIncome(income));
        }
        if income == Decimal::ZERO {
            return Ok(self.brackets[0].rate);
        }

        let rate = self
            .brackets
            .iter()
            .find(|b| income > b.lower && b.upper.is_none_or(|upper| income <= upper))
            .map(|b| b.rate)
            // Unreachable with a validated schedule: the top tier is unbounded.
            .unwrap_or(self.brackets[self.brackets.len() - 1].rate);

        Ok(rate)
    }
}
