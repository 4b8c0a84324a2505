//! Final summary: headline figures, rates, and the refund/owed bottom line.
//!
//! Total tax is income tax after credits plus total FICA. The effective rate
//! divides total tax by total income (zero when there is no income, never a
//! division by zero). The marginal rate is the ordinary-bracket rate that one
//! additional dollar of ordinary income would bear; crossing into NIIT or
//! additional-Medicare territory is deliberately not modeled here.
//!
//! Refund-or-owed = total payments + refundable credit − total tax; positive
//! means a refund.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::agi::AgiResult;
use crate::calculations::bracket::{BracketTax, BracketTaxError};
use crate::calculations::common::{round_half_up, round_rate};
use crate::calculations::credits::CreditsResult;
use crate::calculations::deduction::DeductionResult;
use crate::calculations::fica::FicaResult;
use crate::calculations::income::IncomeResult;
use crate::calculations::tax_computation::TaxComputationResult;
use crate::models::{FilingStatus, TaxReturnInput};
use crate::rates::RateTable;

/// The bottom line of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub filing_status: FilingStatus,
    pub total_income: Decimal,
    pub agi: Decimal,
    pub deduction_amount: Decimal,
    pub taxable_income: Decimal,

    pub total_income_tax_before_credits: Decimal,
    pub total_credits_applied: Decimal,
    pub income_tax_after_credits: Decimal,
    pub total_fica: Decimal,

    /// Income tax after credits plus total FICA.
    pub total_tax: Decimal,

    /// Total tax ÷ total income; zero for zero income.
    pub effective_rate: Decimal,

    /// Ordinary-bracket rate on one more dollar of ordinary income.
    pub marginal_rate: Decimal,

    pub total_withholding: Decimal,
    pub estimated_payments: Decimal,
    pub total_payments: Decimal,

    /// Positive = refund, negative = amount owed.
    pub refund_or_owed: Decimal,
}

/// Assembles the final summary from all upstream stage results.
#[derive(Debug, Clone)]
pub struct SummaryComposer<'a> {
    table: &'a RateTable,
}

impl<'a> SummaryComposer<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn compose(
        &self,
        input: &TaxReturnInput,
        income: &IncomeResult,
        agi: &AgiResult,
        deductions: &DeductionResult,
        tax: &TaxComputationResult,
        credits: &CreditsResult,
        fica: &FicaResult,
    ) -> Result<TaxSummary, BracketTaxError> {
        let total_withholding =
            round_half_up(input.w2s.iter().map(|w2| w2.federal_withholding).sum());
        let total_payments = round_half_up(total_withholding + input.estimated_payments);

        let total_tax = round_half_up(credits.tax_after_credits + fica.total_fica);

        let effective_rate = if income.total_gross_income > Decimal::ZERO {
            round_rate(total_tax / income.total_gross_income)
        } else {
            Decimal::ZERO
        };

        let marginal_rate = BracketTax::new(self.table.brackets(input.filing_status))
            .marginal_rate_at(deductions.ordinary_taxable_income)?;

        let refund_or_owed =
            round_half_up(total_payments + credits.refundable_applied - total_tax);

        Ok(TaxSummary {
            filing_status: input.filing_status,
            total_income: income.total_gross_income,
            agi: agi.agi,
            deduction_amount: deductions.deduction_amount,
            taxable_income: deductions.taxable_income,
            total_income_tax_before_credits: tax.total_income_tax,
            total_credits_applied: credits.total_credits_applied,
            income_tax_after_credits: credits.tax_after_credits,
            total_fica: fica.total_fica,
            total_tax,
            effective_rate,
            marginal_rate,
            total_withholding,
            estimated_payments: input.estimated_payments,
            total_payments,
            refund_or_owed,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::agi::calculate_agi;
    use crate::calculations::credits::CreditsApplier;
    use crate::calculations::deduction::DeductionSelector;
    use crate::calculations::fica::FicaCalculator;
    use crate::calculations::income::aggregate_income;
    use crate::calculations::tax_computation::TaxComputation;
    use crate::models::{FilingStatus, W2};
    use crate::rates::year2024;

    fn compose(input: &TaxReturnInput) -> TaxSummary {
        let table = year2024::rate_table();
        let income = aggregate_income(input);
        let fica = FicaCalculator::new(&table.fica).calculate(
            input.filing_status,
            income.wages,
            income.self_employment_income,
        );
        let agi = calculate_agi(&income, &input.above_the_line, fica.se_tax_deduction).unwrap();
        let deductions =
            DeductionSelector::new(&table.standard_deduction).select(input, &income, &agi);
        let tax = TaxComputation::new(&table)
            .calculate(input.filing_status, &income, &agi, &deductions)
            .unwrap();
        let credits = CreditsApplier::new(&table.child_tax_credit).apply(
            input.filing_status,
            input.credits.qualifying_children,
            agi.agi,
            tax.total_income_tax,
        );
        SummaryComposer::new(&table)
            .compose(input, &income, &agi, &deductions, &tax, &credits, &fica)
            .unwrap()
    }

    #[test]
    fn wage_earner_bottom_line() {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2 {
            wages: dec!(50000),
            federal_withholding: dec!(5000),
        });
        input.estimated_payments = dec!(1000);

        let summary = compose(&input);

        assert_eq!(summary.total_income, dec!(50000.00));
        assert_eq!(summary.taxable_income, dec!(35400.00));
        assert_eq!(summary.income_tax_after_credits, dec!(4016.00));
        assert_eq!(summary.total_fica, dec!(3825.00));
        assert_eq!(summary.total_tax, dec!(7841.00));
        assert_eq!(summary.total_payments, dec!(6000.00));
        // 6000 − 7841: still owes 1841.
        assert_eq!(summary.refund_or_owed, dec!(-1841.00));
        // 7841 / 50000
        assert_eq!(summary.effective_rate, dec!(0.15682));
        assert_eq!(summary.marginal_rate, dec!(0.12));
    }

    #[test]
    fn overwithholding_produces_a_refund() {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2 {
            wages: dec!(50000),
            federal_withholding: dec!(9000),
        });

        let summary = compose(&input);

        assert_eq!(summary.refund_or_owed, dec!(1159.00));
    }

    #[test]
    fn refundable_credit_counts_toward_the_refund() {
        let mut input = TaxReturnInput::new(FilingStatus::HeadOfHousehold);
        input.w2s.push(W2 {
            wages: dec!(30000),
            federal_withholding: dec!(500),
        });
        input.credits.qualifying_children = 2;

        let summary = compose(&input);

        // Taxable 8100 → tax 810, fully offset by CTC; refundable adds to
        // payments against FICA.
        assert_eq!(summary.income_tax_after_credits, dec!(0.00));
        assert_eq!(summary.total_fica, dec!(2295.00));
        assert_eq!(summary.refund_or_owed, dec!(1395.00));
    }

    #[test]
    fn zero_income_has_zero_effective_rate() {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2::default());

        let summary = compose(&input);

        assert_eq!(summary.total_income, dec!(0.00));
        assert_eq!(summary.effective_rate, dec!(0));
        assert_eq!(summary.marginal_rate, dec!(0.10));
    }

    #[test]
    fn marginal_rate_tracks_ordinary_income_only() {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2 {
            wages: dec!(60000),
            federal_withholding: dec!(0),
        });
        input.forms_1099_b.push(crate::models::Form1099B {
            short_term_gain: dec!(0),
            long_term_gain: dec!(100000),
        });

        let summary = compose(&input);

        // Ordinary taxable is 45400; the gain does not push the marginal rate.
        assert_eq!(summary.marginal_rate, dec!(0.12));
    }
}
