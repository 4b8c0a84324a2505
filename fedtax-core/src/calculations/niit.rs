//! Net Investment Income Tax: the 3.8% surtax above a filing-status MAGI
//! threshold.
//!
//! The taxable base is the lesser of net investment income and the MAGI
//! excess over the threshold. Net investment income arrives unfloored from
//! the aggregation stage (losses may have driven it negative); it is floored
//! at zero here, at evaluation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::models::FilingStatus;
use crate::rates::NiitRates;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiitOutcome {
    pub magi: Decimal,
    pub threshold: Decimal,
    pub excess_magi: Decimal,
    pub net_investment_income: Decimal,
    pub niit: Decimal,
}

/// Computes the 3.8% Net Investment Income Tax.
pub fn net_investment_income_tax(
    rates: &NiitRates,
    status: FilingStatus,
    magi: Decimal,
    net_investment_income: Decimal,
) -> NiitOutcome {
    let threshold = *rates.threshold.get(status);
    let excess_magi = max(magi - threshold, Decimal::ZERO);
    let taxable_base = max(net_investment_income, Decimal::ZERO).min(excess_magi);
    let niit = round_half_up(taxable_base * rates.rate);

    NiitOutcome {
        magi,
        threshold,
        excess_magi,
        net_investment_income,
        niit,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::rates::year2024;

    #[test]
    fn magi_below_the_threshold_owes_nothing() {
        let table = year2024::rate_table();
        let outcome = net_investment_income_tax(
            &table.niit,
            FilingStatus::Single,
            dec!(150000),
            dec!(30000),
        );

        assert_eq!(outcome.excess_magi, dec!(0));
        assert_eq!(outcome.niit, dec!(0.00));
    }

    #[test]
    fn investment_income_caps_the_base() {
        // min(30000, 250000 − 200000) × 3.8%
        let table = year2024::rate_table();
        let outcome = net_investment_income_tax(
            &table.niit,
            FilingStatus::Single,
            dec!(250000),
            dec!(30000),
        );

        assert_eq!(outcome.excess_magi, dec!(50000));
        assert_eq!(outcome.niit, dec!(1140.00));
    }

    #[test]
    fn magi_excess_caps_the_base() {
        let table = year2024::rate_table();
        let outcome = net_investment_income_tax(
            &table.niit,
            FilingStatus::Single,
            dec!(210000),
            dec!(30000),
        );

        // min(30000, 10000) × 3.8%
        assert_eq!(outcome.niit, dec!(380.00));
    }

    #[test]
    fn negative_investment_income_floors_to_zero() {
        let table = year2024::rate_table();
        let outcome = net_investment_income_tax(
            &table.niit,
            FilingStatus::Single,
            dec!(300000),
            dec!(-5000),
        );

        assert_eq!(outcome.niit, dec!(0.00));
    }

    #[test]
    fn thresholds_vary_by_filing_status() {
        let table = year2024::rate_table();
        let mfj = net_investment_income_tax(
            &table.niit,
            FilingStatus::MarriedFilingJointly,
            dec!(240000),
            dec!(30000),
        );
        let mfs = net_investment_income_tax(
            &table.niit,
            FilingStatus::MarriedFilingSeparately,
            dec!(240000),
            dec!(30000),
        );

        assert_eq!(mfj.niit, dec!(0.00));
        assert_eq!(mfs.niit, dec!(1140.00));
    }
}
