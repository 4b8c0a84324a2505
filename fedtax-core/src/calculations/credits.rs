//! Child Tax Credit application.
//!
//! The credit is $2,000 per qualifying child, reduced by $50 for each $1,000
//! of AGI over the filing-status threshold. The nonrefundable portion is
//! applied first and can only take the liability to zero; whatever credit
//! remains becomes refundable up to $1,700 per child (the Additional Child
//! Tax Credit) and is treated as a payment by the summary stage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::models::FilingStatus;
use crate::rates::ChildTaxCreditRates;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditsResult {
    /// Child Tax Credit after phase-out, before the refundable split.
    pub child_tax_credit: Decimal,

    pub nonrefundable_applied: Decimal,

    /// Refundable (Additional CTC) portion; paid out, not netted against tax.
    pub refundable_applied: Decimal,

    pub total_credits_applied: Decimal,

    /// Liability minus the nonrefundable portion, never negative.
    pub tax_after_credits: Decimal,
}

/// Applies the Child Tax Credit to the income-tax liability.
#[derive(Debug, Clone)]
pub struct CreditsApplier<'a> {
    rates: &'a ChildTaxCreditRates,
}

impl<'a> CreditsApplier<'a> {
    pub fn new(rates: &'a ChildTaxCreditRates) -> Self {
        Self { rates }
    }

    pub fn apply(
        &self,
        status: FilingStatus,
        qualifying_children: u32,
        agi: Decimal,
        tax_before_credits: Decimal,
    ) -> CreditsResult {
        let child_tax_credit = self.child_tax_credit(status, qualifying_children, agi);

        let nonrefundable_applied = child_tax_credit.min(tax_before_credits);
        let tax_after_credits = round_half_up(tax_before_credits - nonrefundable_applied);

        let unused = child_tax_credit - nonrefundable_applied;
        let refundable_cap =
            self.rates.refundable_cap_per_child * Decimal::from(qualifying_children);
        let refundable_applied = unused.min(refundable_cap);

        CreditsResult {
            child_tax_credit,
            nonrefundable_applied: round_half_up(nonrefundable_applied),
            refundable_applied: round_half_up(refundable_applied),
            total_credits_applied: round_half_up(nonrefundable_applied + refundable_applied),
            tax_after_credits,
        }
    }

    /// Per-child credit with the AGI phase-out: $50 per $1,000 of excess,
    /// with the excess counted in half-up thousand-dollar units.
    fn child_tax_credit(
        &self,
        status: FilingStatus,
        qualifying_children: u32,
        agi: Decimal,
    ) -> Decimal {
        if qualifying_children == 0 {
            return Decimal::ZERO;
        }

        let maximum = self.rates.per_child * Decimal::from(qualifying_children);
        let threshold = *self.rates.phaseout_threshold.get(status);
        let excess = max(agi - threshold, Decimal::ZERO);
        let units = (excess / self.rates.phaseout_step).round_dp_with_strategy(
            0,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        );
        let phaseout = units * self.rates.phaseout_per_step;

        round_half_up(max(maximum - phaseout, Decimal::ZERO))
    }
}
