//! Year-keyed rate-table configuration.
//!
//! Everything here is pure data: bracket schedules, deduction amounts, and
//! thresholds are supplied to the engine at startup and passed by reference
//! into every calculator. No module-level state, so multiple tax years (or
//! test fixtures) can coexist in one process.

pub mod year2024;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::FilingStatus;

/// One value per filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerStatus<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub married_filing_separately: T,
    pub head_of_household: T,
    pub qualifying_surviving_spouse: T,
}

impl<T> PerStatus<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
            FilingStatus::QualifyingSurvivingSpouse => &self.qualifying_surviving_spouse,
        }
    }
}

/// One ordinary-income tax tier. Income strictly within `[lower, upper)` is
/// taxed at `rate`; the top tier has `upper: None` and is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// One preferential-rate breakpoint tier (0% / 15% / 20%). `upper` is the
/// taxable-income ceiling for the tier; the top tier has `upper: None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsBracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// Standard-deduction amounts plus the per-condition add-ons for age/blindness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeductionTable {
    pub base: PerStatus<Decimal>,

    /// Add-on per qualifying condition for Single / Head of Household.
    pub additional_single_hoh: Decimal,

    /// Add-on per qualifying condition for MFJ / MFS / QSS.
    pub additional_married: Decimal,
}

impl StandardDeductionTable {
    /// The add-on amount one qualifying condition (over 65, blind) is worth
    /// for the given filing status. Each condition adds independently.
    pub fn additional_per_condition(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        match status {
            FilingStatus::Single | FilingStatus::HeadOfHousehold => self.additional_single_hoh,
            _ => self.additional_married,
        }
    }
}

/// Net Investment Income Tax parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiitRates {
    pub rate: Decimal,
    pub threshold: PerStatus<Decimal>,
}

/// Payroll and self-employment tax parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaRates {
    /// Annual cap on earnings subject to the Social Security portion.
    pub ss_wage_base: Decimal,

    /// Employee-side Social Security rate (6.2%).
    pub ss_rate_employee: Decimal,

    /// Employee-side Medicare rate (1.45%), uncapped.
    pub medicare_rate_employee: Decimal,

    /// Additional Medicare rate (0.9%) above the filing-status threshold.
    pub additional_medicare_rate: Decimal,

    pub additional_medicare_threshold: PerStatus<Decimal>,

    /// Fraction of net SE income subject to SE tax (92.35%).
    pub se_taxable_fraction: Decimal,

    /// Combined employer+employee Social Security rate for SE income (12.4%).
    pub se_ss_rate: Decimal,

    /// Combined employer+employee Medicare rate for SE income (2.9%).
    pub se_medicare_rate: Decimal,

    /// Fraction of SE tax deductible above the line (50%).
    pub se_deductible_fraction: Decimal,
}

/// Child Tax Credit parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxCreditRates {
    pub per_child: Decimal,

    /// Refundable (Additional CTC) cap per child.
    pub refundable_cap_per_child: Decimal,

    pub phaseout_threshold: PerStatus<Decimal>,

    /// AGI excess is counted in units of this size ($1,000).
    pub phaseout_step: Decimal,

    /// Credit reduction per phase-out unit ($50).
    pub phaseout_per_step: Decimal,
}

/// Errors detected by [`RateTable::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("tax bracket schedule for {0} is empty")]
    EmptyBrackets(FilingStatus),

    #[error("tax bracket schedule for {0} is not contiguous from zero")]
    NonContiguousBrackets(FilingStatus),

    #[error("tax bracket schedule for {0} must end with an unbounded tier")]
    BoundedTopBracket(FilingStatus),

    #[error("capital gains schedule for {0} is empty")]
    EmptyCapitalGains(FilingStatus),

    #[error("capital gains schedule for {0} must have ascending breakpoints ending unbounded")]
    InvalidCapitalGains(FilingStatus),
}

/// Complete per-year configuration, injected into every calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub tax_year: i32,
    pub brackets: PerStatus<Vec<TaxBracket>>,
    pub standard_deduction: StandardDeductionTable,
    pub capital_gains: PerStatus<Vec<CapitalGainsBracket>>,
    pub niit: NiitRates,
    pub fica: FicaRates,
    pub child_tax_credit: ChildTaxCreditRates,
}

impl RateTable {
    /// Ordinary-income bracket schedule for a filing status.
    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> &[TaxBracket] {
        self.brackets.get(status)
    }

    /// Preferential-rate breakpoint schedule for a filing status.
    pub fn capital_gains(
        &self,
        status: FilingStatus,
    ) -> &[CapitalGainsBracket] {
        self.capital_gains.get(status)
    }

    /// Base standard deduction (before age/blindness add-ons).
    pub fn standard_deduction_base(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        *self.standard_deduction.base.get(status)
    }

    /// Structural validation: schedules must be non-empty, contiguous from
    /// zero, and end with an unbounded tier. Run once at engine construction;
    /// the calculators assume a valid table afterwards.
    pub fn validate(&self) -> Result<(), RateTableError> {
        for status in FilingStatus::ALL {
            let brackets = self.brackets.get(status);
            if brackets.is_empty() {
                return Err(RateTableError::EmptyBrackets(status));
            }
            let mut expected_lower = Decimal::ZERO;
            for (i, bracket) in brackets.iter().enumerate() {
                if bracket.lower != expected_lower {
                    return Err(RateTableError::NonContiguousBrackets(status));
                }
                match bracket.upper {
                    Some(upper) if upper > bracket.lower => expected_lower = upper,
                    Some(_) => return Err(RateTableError::NonContiguousBrackets(status)),
                    None if i + 1 == brackets.len() => {}
                    None => return Err(RateTableError::NonContiguousBrackets(status)),
                }
            }
            if brackets.last().is_some_and(|b| b.upper.is_some()) {
                return Err(RateTableError::BoundedTopBracket(status));
            }

            let gains = self.capital_gains.get(status);
            if gains.is_empty() {
                return Err(RateTableError::EmptyCapitalGains(status));
            }
            let mut prev_upper = Decimal::ZERO;
            for (i, tier) in gains.iter().enumerate() {
                match tier.upper {
                    Some(upper) if upper > prev_upper => prev_upper = upper,
                    Some(_) => return Err(RateTableError::InvalidCapitalGains(status)),
                    None if i + 1 == gains.len() => {}
                    None => return Err(RateTableError::InvalidCapitalGains(status)),
                }
            }
            if gains.last().is_some_and(|t| t.upper.is_some()) {
                return Err(RateTableError::InvalidCapitalGains(status));
            }
        }
        Ok(())
    }
}
