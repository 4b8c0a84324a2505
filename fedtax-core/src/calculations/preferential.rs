//! Preferential-rate stacking for qualified dividends and long-term gains.
//!
//! Preferential income is not taxed from dollar zero: it is stacked directly
//! on top of ordinary taxable income, so ordinary income has already filled
//! the lower breakpoint tiers. For a stacking base `O` and preferential
//! amount `P`, the interval `[O, O+P)` is cut against the 0%/15%/20%
//! breakpoints; each tranche is the overlap with one tier, taxed at that
//! tier's rate.
//!
//! Tranche widths are additive over consecutive segments, so taxing
//! long-term gain stacked on `O` and then qualified dividends stacked on
//! `O + gain` yields exactly the tax of the combined pool stacked once, so
//! the two components can be reported separately without double-taxing the
//! overlap.
//!
//! Edge behavior: a zero (or negative) amount owes nothing, leaving plain
//! bracket tax on the ordinary income; a base already past the top
//! breakpoint puts the entire amount in the 20% tier.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fedtax_core::calculations::preferential::PreferentialStacker;
//! use fedtax_core::models::FilingStatus;
//! use fedtax_core::rates::year2024;
//!
//! let table = year2024::rate_table();
//! let stacker = PreferentialStacker::new(
//!     table.capital_gains(FilingStatus::MarriedFilingJointly),
//! );
//!
//! // $20,000 long-term gain on top of $80,000 ordinary income (0% tier ends
//! // at $94,050): $14,050 at 0%, $5,950 at 15%.
//! let outcome = stacker.stack(dec!(80000), dec!(20000)).unwrap();
//! assert_eq!(outcome.tax, dec!(892.50));
//! assert_eq!(outcome.tranches.len(), 2);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, round_half_up};
use crate::rates::CapitalGainsBracket;

/// Errors from the preferential stacker.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferentialStackError {
    /// The breakpoint schedule is empty.
    #[error("no capital gains breakpoints provided")]
    EmptySchedule,

    /// The stacking base was negative; the pipeline never produces this.
    #[error("stacking base must be non-negative, got {0}")]
    NegativeBase(Decimal),
}

/// One tranche of stacked preferential income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferentialTranche {
    pub rate: Decimal,

    /// Total-income position where this tranche starts.
    pub lower: Decimal,

    /// Breakpoint ceiling of the tier, `None` for the unbounded top tier.
    pub upper: Option<Decimal>,

    pub taxable_in_tranche: Decimal,
    pub tax_in_tranche: Decimal,
}

/// Result of stacking one preferential amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedTaxOutcome {
    pub tax: Decimal,
    pub tranches: Vec<PreferentialTranche>,
}

/// Applies 0/15/20% breakpoint rates to income stacked above a base.
#[derive(Debug, Clone)]
pub struct PreferentialStacker<'a> {
    breakpoints: &'a [CapitalGainsBracket],
}

impl<'a> PreferentialStacker<'a> {
    /// Breakpoints must be ascending with the final tier unbounded;
    /// [`crate::rates::RateTable::validate`] enforces this once.
    pub fn new(breakpoints: &'a [CapitalGainsBracket]) -> Self {
        Self { breakpoints }
    }

    /// Taxes `amount` stacked directly above `base`, cutting `[base,
    /// base+amount)` against the breakpoint tiers. Amounts of zero or less
    /// owe nothing.
    pub fn stack(
        &self,
        base: Decimal,
        amount: Decimal,
    ) -> Result<StackedTaxOutcome, PreferentialStackError> {
        if self.breakpoints.is_empty() {
            return Err(PreferentialStackError::EmptySchedule);
        }
        if base < Decimal::ZERO {
            return Err(PreferentialStackError::NegativeBase(base));
        }
        if amount <= Decimal::ZERO {
            return Ok(StackedTaxOutcome {
                tax: Decimal::ZERO,
                tranches: Vec::new(),
            });
        }

        let mut tranches = Vec::new();
        let mut total_tax = Decimal::ZERO;
        let mut remaining = amount;
        // Cursor tracking how much total income has been placed so far.
        let mut placed = base;

        for tier in self.breakpoints {
            if remaining <= Decimal::ZERO {
                break;
            }

            let room = match tier.upper {
                Some(upper) => max(upper - placed, Decimal::ZERO),
                None => remaining,
            };
            if room <= Decimal::ZERO {
                // The base already fills this tier.
                if let Some(upper) = tier.upper {
                    placed = max(placed, upper);
                }
                continue;
            }

            let taxable_in_tranche = remaining.min(room);
            let tax_in_tranche = round_half_up(taxable_in_tranche * tier.rate);

            tranches.push(PreferentialTranche {
                rate: tier.rate,
                lower: placed,
                upper: tier.upper,
                taxable_in_tranche,
                tax_in_tranche,
            });

            total_tax += tax_in_tranche;
            remaining -= taxable_in_tranche;
            placed += taxable_in_tranche;
        }

        Ok(StackedTaxOutcome {
            tax: round_half_up(total_tax),
            tranches,
        })
    }
}
