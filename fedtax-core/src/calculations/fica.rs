//! FICA and self-employment tax: Schedule SE and the employee-side payroll
//! taxes.
//!
//! Covers:
//! - employee-side Social Security (6.2%, capped at the wage base) and
//!   Medicare (1.45%, uncapped) on W-2 wages;
//! - self-employment tax on 92.35% of net SE income: 12.4% Social Security
//!   on the wage-base room left after W-2 wages, plus 2.9% Medicare uncapped;
//! - Additional Medicare Tax, 0.9% evaluated once against the combined W-2
//!   wage + SE base over the filing-status threshold (never per-source, so
//!   the threshold is not double-counted);
//! - the half-SE-tax deduction consumed by the AGI stage.
//!
//! This stage must run before AGI; the SE deduction is above-the-line. That
//! ordering is fixed in the orchestrator; nothing here reads AGI.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fedtax_core::calculations::fica::FicaCalculator;
//! use fedtax_core::models::FilingStatus;
//! use fedtax_core::rates::year2024;
//!
//! let table = year2024::rate_table();
//! let calc = FicaCalculator::new(&table.fica);
//!
//! // $100,000 net SE income, no wages:
//! // base = $92,350; SS = $11,451.40; Medicare = $2,678.15
//! let result = calc.calculate(FilingStatus::Single, dec!(0), dec!(100000));
//! assert_eq!(result.self_employment_tax, dec!(14129.55));
//! assert_eq!(result.se_tax_deduction, dec!(7064.78));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{max, round_half_up};
use crate::models::FilingStatus;
use crate::rates::FicaRates;

/// Payroll and self-employment tax breakdown.
///
/// `social_security_tax` and `medicare_tax` each combine the W-2 and SE
/// components of that program; `self_employment_tax` is the Schedule SE
/// total on its own, so the two views overlap by design. `total_fica` adds
/// each component exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaResult {
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub additional_medicare_tax: Decimal,
    pub self_employment_tax: Decimal,

    /// Half of SE tax, exposed as an above-the-line deduction for AGI.
    pub se_tax_deduction: Decimal,

    pub total_fica: Decimal,
}

/// Calculator for payroll and self-employment taxes.
#[derive(Debug, Clone)]
pub struct FicaCalculator<'a> {
    rates: &'a FicaRates,
}

impl<'a> FicaCalculator<'a> {
    pub fn new(rates: &'a FicaRates) -> Self {
        Self { rates }
    }

    /// Computes the full FICA breakdown for validated, non-negative wage and
    /// SE income totals.
    pub fn calculate(
        &self,
        status: FilingStatus,
        wages: Decimal,
        se_income: Decimal,
    ) -> FicaResult {
        let rates = self.rates;

        // Employee side: SS capped at the wage base, Medicare uncapped.
        let ss_wages = wages.min(rates.ss_wage_base);
        if wages > rates.ss_wage_base {
            warn!(
                wages = %wages,
                wage_base = %rates.ss_wage_base,
                "wages exceed the Social Security wage base; SS tax is capped"
            );
        }
        let w2_ss_tax = round_half_up(ss_wages * rates.ss_rate_employee);
        let w2_medicare_tax = round_half_up(wages * rates.medicare_rate_employee);

        // Self-employment: SS on the wage-base room left after W-2 wages,
        // Medicare on the full base.
        let mut se_base = Decimal::ZERO;
        let mut se_ss_tax = Decimal::ZERO;
        let mut se_medicare_tax = Decimal::ZERO;
        if se_income > Decimal::ZERO {
            se_base = round_half_up(se_income * rates.se_taxable_fraction);
            let remaining_ss_base = max(rates.ss_wage_base - wages, Decimal::ZERO);
            let se_ss_wages = se_base.min(remaining_ss_base);
            se_ss_tax = round_half_up(se_ss_wages * rates.se_ss_rate);
            se_medicare_tax = round_half_up(se_base * rates.se_medicare_rate);
        }
        let self_employment_tax = round_half_up(se_ss_tax + se_medicare_tax);

        // Additional Medicare: once, against the combined wage + SE base.
        let threshold = *rates.additional_medicare_threshold.get(status);
        let excess = max(wages + se_base - threshold, Decimal::ZERO);
        let additional_medicare_tax = round_half_up(excess * rates.additional_medicare_rate);

        let se_tax_deduction = round_half_up(self_employment_tax * rates.se_deductible_fraction);

        let total_fica = round_half_up(
            w2_ss_tax + w2_medicare_tax + self_employment_tax + additional_medicare_tax,
        );

        FicaResult {
            social_security_tax: round_half_up(w2_ss_tax + se_ss_tax),
            medicare_tax: round_half_up(w2_medicare_tax + se_medicare_tax),
            additional_medicare_tax,
            self_employment_tax,
            se_tax_deduction,
            total_fica,
        }
    }
}
