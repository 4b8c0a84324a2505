//! Income aggregation, the first pipeline stage.
//!
//! Sums each record list into category totals, computes total gross income,
//! and pre-computes net investment income for NIIT. Capital losses net by
//! holding period and may drive a category (or net investment income)
//! negative here; flooring, where it applies, happens at NIIT evaluation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::TaxReturnInput;

/// Category totals derived solely from the return. Never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeResult {
    pub wages: Decimal,
    pub self_employment_income: Decimal,
    pub interest_income: Decimal,
    pub ordinary_dividends: Decimal,
    pub qualified_dividends: Decimal,
    pub short_term_gain: Decimal,
    pub long_term_gain: Decimal,

    /// Sum of all income categories (losses reduce it).
    pub total_gross_income: Decimal,

    /// Interest + ordinary dividends + net capital gain. Not floored here.
    pub net_investment_income: Decimal,
}

/// Aggregates all income records into category totals.
pub fn aggregate_income(input: &TaxReturnInput) -> IncomeResult {
    let wages: Decimal = input.w2s.iter().map(|w2| w2.wages).sum();
    let self_employment_income: Decimal = input
        .forms_1099_nec
        .iter()
        .map(|nec| nec.compensation)
        .sum();
    let interest_income: Decimal = input.forms_1099_int.iter().map(|int| int.interest).sum();
    let ordinary_dividends: Decimal = input
        .forms_1099_div
        .iter()
        .map(|div| div.ordinary_dividends)
        .sum();
    let qualified_dividends: Decimal = input
        .forms_1099_div
        .iter()
        .map(|div| div.qualified_dividends)
        .sum();
    let short_term_gain: Decimal = input.forms_1099_b.iter().map(|b| b.short_term_gain).sum();
    let long_term_gain: Decimal = input.forms_1099_b.iter().map(|b| b.long_term_gain).sum();

    let total_gross_income = wages
        + self_employment_income
        + interest_income
        + ordinary_dividends
        + short_term_gain
        + long_term_gain;

    let net_investment_income =
        interest_income + ordinary_dividends + short_term_gain + long_term_gain;

    IncomeResult {
        wages: round_half_up(wages),
        self_employment_income: round_half_up(self_employment_income),
        interest_income: round_half_up(interest_income),
        ordinary_dividends: round_half_up(ordinary_dividends),
        qualified_dividends: round_half_up(qualified_dividends),
        short_term_gain: round_half_up(short_term_gain),
        long_term_gain: round_half_up(long_term_gain),
        total_gross_income: round_half_up(total_gross_income),
        net_investment_income: round_half_up(net_investment_income),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{
        FilingStatus, Form1099B, Form1099Div, Form1099Int, Form1099Nec, TaxReturnInput, W2,
    };

    fn return_with_everything() -> TaxReturnInput {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2 {
            wages: dec!(60000),
            federal_withholding: dec!(7000),
        });
        input.w2s.push(W2 {
            wages: dec!(15000),
            federal_withholding: dec!(1200),
        });
        input.forms_1099_nec.push(Form1099Nec {
            compensation: dec!(20000),
        });
        input.forms_1099_int.push(Form1099Int {
            interest: dec!(1500),
        });
        input.forms_1099_div.push(Form1099Div {
            ordinary_dividends: dec!(4000),
            qualified_dividends: dec!(3000),
        });
        input.forms_1099_b.push(Form1099B {
            short_term_gain: dec!(2000),
            long_term_gain: dec!(8000),
        });
        input
    }

    #[test]
    fn sums_every_category_across_records() {
        let income = aggregate_income(&return_with_everything());

        assert_eq!(income.wages, dec!(75000.00));
        assert_eq!(income.self_employment_income, dec!(20000.00));
        assert_eq!(income.interest_income, dec!(1500.00));
        assert_eq!(income.ordinary_dividends, dec!(4000.00));
        assert_eq!(income.qualified_dividends, dec!(3000.00));
        assert_eq!(income.short_term_gain, dec!(2000.00));
        assert_eq!(income.long_term_gain, dec!(8000.00));
        assert_eq!(income.total_gross_income, dec!(110500.00));
    }

    #[test]
    fn net_investment_income_is_interest_dividends_and_net_gains() {
        let income = aggregate_income(&return_with_everything());

        // 1500 + 4000 + 2000 + 8000
        assert_eq!(income.net_investment_income, dec!(15500.00));
    }

    #[test]
    fn losses_net_by_type_and_reduce_gross_income() {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2 {
            wages: dec!(50000),
            federal_withholding: dec!(0),
        });
        input.forms_1099_b.push(Form1099B {
            short_term_gain: dec!(3000),
            long_term_gain: dec!(-10000),
        });
        input.forms_1099_b.push(Form1099B {
            short_term_gain: dec!(-1000),
            long_term_gain: dec!(2000),
        });

        let income = aggregate_income(&input);

        assert_eq!(income.short_term_gain, dec!(2000.00));
        assert_eq!(income.long_term_gain, dec!(-8000.00));
        assert_eq!(income.total_gross_income, dec!(44000.00));
        // Net investment income may go negative here; NIIT floors later.
        assert_eq!(income.net_investment_income, dec!(-6000.00));
    }

    #[test]
    fn empty_categories_total_zero() {
        let mut input = TaxReturnInput::new(FilingStatus::HeadOfHousehold);
        input.w2s.push(W2::default());

        let income = aggregate_income(&input);

        assert_eq!(income.total_gross_income, dec!(0.00));
        assert_eq!(income.net_investment_income, dec!(0.00));
    }
}
