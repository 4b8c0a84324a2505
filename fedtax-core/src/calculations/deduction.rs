//! Deduction selection and the ordinary/preferential partition of taxable
//! income.
//!
//! The standard deduction is a table lookup plus a fixed add-on per over-65
//! and blindness flag (each adds independently). The itemized total is the
//! plain sum of the six Schedule A categories. The larger of the two wins
//! unless the filer forces the standard deduction.
//!
//! Taxable income = AGI − deduction, floored at zero, then partitioned:
//! qualified dividends and net long-term gain form the preferential pool
//! taxed at 0/15/20% by the stacker; everything else (including short-term
//! gains) is ordinary. When the preferential pool exceeds taxable income the
//! components are scaled proportionally so the partition still sums to
//! taxable income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::agi::AgiResult;
use crate::calculations::common::{max, round_half_up};
use crate::calculations::income::IncomeResult;
use crate::models::{FilingStatus, ItemizedDeductions, TaxReturnInput};
use crate::rates::StandardDeductionTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// Standard deduction including age/blindness add-ons.
    pub standard_deduction: Decimal,

    /// Sum of the six itemized categories (zero when none were supplied).
    pub itemized_total: Decimal,

    pub used_standard: bool,

    /// The deduction actually applied.
    pub deduction_amount: Decimal,

    /// AGI minus the deduction, floored at zero.
    pub taxable_income: Decimal,

    pub ordinary_taxable_income: Decimal,
    pub preferential_qualified_dividends: Decimal,
    pub preferential_long_term_gain: Decimal,
}

/// Selects the deduction and partitions taxable income.
#[derive(Debug, Clone)]
pub struct DeductionSelector<'a> {
    table: &'a StandardDeductionTable,
}

impl<'a> DeductionSelector<'a> {
    pub fn new(table: &'a StandardDeductionTable) -> Self {
        Self { table }
    }

    pub fn select(
        &self,
        input: &TaxReturnInput,
        income: &IncomeResult,
        agi: &AgiResult,
    ) -> DeductionResult {
        let standard_deduction =
            self.standard_deduction(input.filing_status, input.is_over_65, input.is_blind);
        let itemized_total = input
            .itemized_deductions
            .as_ref()
            .map(itemized_sum)
            .unwrap_or(Decimal::ZERO);

        let (deduction_amount, used_standard) = if input.force_standard_deduction {
            (standard_deduction, true)
        } else if input.itemized_deductions.is_some() && itemized_total > standard_deduction {
            (itemized_total, false)
        } else {
            (standard_deduction, true)
        };

        let taxable_income = round_half_up(max(agi.agi - deduction_amount, Decimal::ZERO));

        // Preferential pool: qualified dividends plus net long-term gain.
        // Short-term gains stay ordinary; a net long-term loss contributes
        // nothing preferential (it already reduced gross income).
        let mut preferential_qualified_dividends = income.qualified_dividends;
        let mut preferential_long_term_gain = max(income.long_term_gain, Decimal::ZERO);
        let total_preferential = preferential_qualified_dividends + preferential_long_term_gain;

        if total_preferential > taxable_income && total_preferential > Decimal::ZERO {
            warn!(
                preferential = %total_preferential,
                taxable_income = %taxable_income,
                "preferential income exceeds taxable income; scaling components"
            );
            let ratio = taxable_income / total_preferential;
            preferential_qualified_dividends =
                round_half_up(preferential_qualified_dividends * ratio);
            preferential_long_term_gain =
                round_half_up(taxable_income - preferential_qualified_dividends);
        }

        let ordinary_taxable_income = max(
            taxable_income - preferential_qualified_dividends - preferential_long_term_gain,
            Decimal::ZERO,
        );

        DeductionResult {
            standard_deduction,
            itemized_total,
            used_standard,
            deduction_amount,
            taxable_income,
            ordinary_taxable_income: round_half_up(ordinary_taxable_income),
            preferential_qualified_dividends,
            preferential_long_term_gain,
        }
    }

    fn standard_deduction(
        &self,
        status: FilingStatus,
        is_over_65: bool,
        is_blind: bool,
    ) -> Decimal {
        let base = *self.table.base.get(status);
        let conditions = Decimal::from(u32::from(is_over_65) + u32::from(is_blind));
        round_half_up(base + self.table.additional_per_condition(status) * conditions)
    }
}

fn itemized_sum(itemized: &ItemizedDeductions) -> Decimal {
    round_half_up(
        itemized.medical
            + itemized.state_and_local_taxes
            + itemized.mortgage_interest
            + itemized.charitable
            + itemized.casualty
            + itemized.other,
    )
}
