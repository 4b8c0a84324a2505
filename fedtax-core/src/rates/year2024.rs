//! Tax year 2024 federal constants.
//!
//! Sources: Rev. Proc. 2023-34 (inflation adjustments), IRS Pub 17 / Pub 501,
//! IRC §1(j) brackets, §1(h) capital-gains rates, §1411 NIIT, §§3101/3111
//! FICA, §24 Child Tax Credit, SSA 2024 fact sheet.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::rates::{
    CapitalGainsBracket, ChildTaxCreditRates, FicaRates, NiitRates, PerStatus, RateTable,
    StandardDeductionTable, TaxBracket,
};

fn tier(
    lower: Decimal,
    upper: Option<Decimal>,
    rate: Decimal,
) -> TaxBracket {
    TaxBracket { lower, upper, rate }
}

fn gains_tier(
    upper: Option<Decimal>,
    rate: Decimal,
) -> CapitalGainsBracket {
    CapitalGainsBracket { upper, rate }
}

/// Seven-tier ordinary schedules. MFS shares the Single edges up to the 35%
/// tier, which tops out at half the MFJ amount; QSS uses the MFJ schedule.
fn brackets() -> PerStatus<Vec<TaxBracket>> {
    let single = vec![
        tier(dec!(0), Some(dec!(11600)), dec!(0.10)),
        tier(dec!(11600), Some(dec!(47150)), dec!(0.12)),
        tier(dec!(47150), Some(dec!(100525)), dec!(0.22)),
        tier(dec!(100525), Some(dec!(191950)), dec!(0.24)),
        tier(dec!(191950), Some(dec!(243725)), dec!(0.32)),
        tier(dec!(243725), Some(dec!(609350)), dec!(0.35)),
        tier(dec!(609350), None, dec!(0.37)),
    ];
    let married_joint = vec![
        tier(dec!(0), Some(dec!(23200)), dec!(0.10)),
        tier(dec!(23200), Some(dec!(94300)), dec!(0.12)),
        tier(dec!(94300), Some(dec!(201050)), dec!(0.22)),
        tier(dec!(201050), Some(dec!(383900)), dec!(0.24)),
        tier(dec!(383900), Some(dec!(487450)), dec!(0.32)),
        tier(dec!(487450), Some(dec!(731200)), dec!(0.35)),
        tier(dec!(731200), None, dec!(0.37)),
    ];
    let married_separate = vec![
        tier(dec!(0), Some(dec!(11600)), dec!(0.10)),
        tier(dec!(11600), Some(dec!(47150)), dec!(0.12)),
        tier(dec!(47150), Some(dec!(100525)), dec!(0.22)),
        tier(dec!(100525), Some(dec!(191950)), dec!(0.24)),
        tier(dec!(191950), Some(dec!(243725)), dec!(0.32)),
        tier(dec!(243725), Some(dec!(365600)), dec!(0.35)),
        tier(dec!(365600), None, dec!(0.37)),
    ];
    let head_of_household = vec![
        tier(dec!(0), Some(dec!(16550)), dec!(0.10)),
        tier(dec!(16550), Some(dec!(63100)), dec!(0.12)),
        tier(dec!(63100), Some(dec!(100500)), dec!(0.22)),
        tier(dec!(100500), Some(dec!(191950)), dec!(0.24)),
        tier(dec!(191950), Some(dec!(243700)), dec!(0.32)),
        tier(dec!(243700), Some(dec!(609350)), dec!(0.35)),
        tier(dec!(609350), None, dec!(0.37)),
    ];

    PerStatus {
        single,
        qualifying_surviving_spouse: married_joint.clone(),
        married_filing_jointly: married_joint,
        married_filing_separately: married_separate,
        head_of_household,
    }
}

fn capital_gains() -> PerStatus<Vec<CapitalGainsBracket>> {
    let single = vec![
        gains_tier(Some(dec!(47025)), dec!(0.00)),
        gains_tier(Some(dec!(518900)), dec!(0.15)),
        gains_tier(None, dec!(0.20)),
    ];
    let married_joint = vec![
        gains_tier(Some(dec!(94050)), dec!(0.00)),
        gains_tier(Some(dec!(583750)), dec!(0.15)),
        gains_tier(None, dec!(0.20)),
    ];
    let married_separate = vec![
        gains_tier(Some(dec!(47025)), dec!(0.00)),
        gains_tier(Some(dec!(291850)), dec!(0.15)),
        gains_tier(None, dec!(0.20)),
    ];
    let head_of_household = vec![
        gains_tier(Some(dec!(63000)), dec!(0.00)),
        gains_tier(Some(dec!(551350)), dec!(0.15)),
        gains_tier(None, dec!(0.20)),
    ];

    PerStatus {
        single,
        qualifying_surviving_spouse: married_joint.clone(),
        married_filing_jointly: married_joint,
        married_filing_separately: married_separate,
        head_of_household,
    }
}

/// The complete 2024 rate table.
pub fn rate_table() -> RateTable {
    RateTable {
        tax_year: 2024,
        brackets: brackets(),
        standard_deduction: StandardDeductionTable {
            base: PerStatus {
                single: dec!(14600),
                married_filing_jointly: dec!(29200),
                married_filing_separately: dec!(14600),
                head_of_household: dec!(21900),
                qualifying_surviving_spouse: dec!(29200),
            },
            additional_single_hoh: dec!(1950),
            additional_married: dec!(1550),
        },
        capital_gains: capital_gains(),
        niit: NiitRates {
            rate: dec!(0.038),
            threshold: PerStatus {
                single: dec!(200000),
                married_filing_jointly: dec!(250000),
                married_filing_separately: dec!(125000),
                head_of_household: dec!(200000),
                qualifying_surviving_spouse: dec!(250000),
            },
        },
        fica: FicaRates {
            ss_wage_base: dec!(168600),
            ss_rate_employee: dec!(0.062),
            medicare_rate_employee: dec!(0.0145),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_threshold: PerStatus {
                single: dec!(200000),
                married_filing_jointly: dec!(250000),
                married_filing_separately: dec!(125000),
                head_of_household: dec!(200000),
                qualifying_surviving_spouse: dec!(250000),
            },
            se_taxable_fraction: dec!(0.9235),
            se_ss_rate: dec!(0.124),
            se_medicare_rate: dec!(0.029),
            se_deductible_fraction: dec!(0.50),
        },
        child_tax_credit: ChildTaxCreditRates {
            per_child: dec!(2000),
            refundable_cap_per_child: dec!(1700),
            phaseout_threshold: PerStatus {
                single: dec!(200000),
                married_filing_jointly: dec!(400000),
                married_filing_separately: dec!(200000),
                head_of_household: dec!(200000),
                qualifying_surviving_spouse: dec!(400000),
            },
            phaseout_step: dec!(1000),
            phaseout_per_step: dec!(50),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FilingStatus;

    #[test]
    fn every_status_has_seven_ordinary_tiers() {
        let table = rate_table();

        for status in FilingStatus::ALL {
            assert_eq!(table.brackets(status).len(), 7, "{status}");
        }
    }

    #[test]
    fn every_status_has_three_capital_gains_tiers() {
        let table = rate_table();

        for status in FilingStatus::ALL {
            assert_eq!(table.capital_gains(status).len(), 3, "{status}");
        }
    }

    #[test]
    fn qss_mirrors_mfj_schedules() {
        let table = rate_table();

        assert_eq!(
            table.brackets(FilingStatus::QualifyingSurvivingSpouse),
            table.brackets(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            table.capital_gains(FilingStatus::QualifyingSurvivingSpouse),
            table.capital_gains(FilingStatus::MarriedFilingJointly)
        );
    }

    #[test]
    fn standard_deduction_amounts_match_rev_proc() {
        let table = rate_table();

        assert_eq!(table.standard_deduction_base(FilingStatus::Single), dec!(14600));
        assert_eq!(
            table.standard_deduction_base(FilingStatus::MarriedFilingJointly),
            dec!(29200)
        );
        assert_eq!(
            table.standard_deduction_base(FilingStatus::HeadOfHousehold),
            dec!(21900)
        );
    }

    #[test]
    fn ss_wage_base_matches_ssa_fact_sheet() {
        assert_eq!(rate_table().fica.ss_wage_base, dec!(168600));
    }
}
