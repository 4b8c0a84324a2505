//! Form-level input records for one federal tax return.
//!
//! All monetary fields are [`Decimal`]; capital-gain fields on 1099-B records
//! may be negative (losses), every other amount must be non-negative. Sign and
//! cross-field constraints are enforced at the boundary by
//! [`crate::validate::validate_return`], not by these types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FilingStatus;

/// W-2 wage and withholding data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2 {
    /// Box 1: wages, tips, other compensation.
    #[serde(default)]
    pub wages: Decimal,

    /// Box 2: federal income tax withheld.
    #[serde(default)]
    pub federal_withholding: Decimal,
}

/// 1099-NEC nonemployee (self-employment) compensation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form1099Nec {
    /// Box 1: nonemployee compensation.
    #[serde(default)]
    pub compensation: Decimal,
}

/// 1099-INT interest income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form1099Int {
    /// Box 1: interest income.
    #[serde(default)]
    pub interest: Decimal,
}

/// 1099-DIV dividend income.
///
/// Invariant (checked at the boundary): `qualified_dividends` never exceeds
/// `ordinary_dividends`; qualified dividends are the preferentially-taxed
/// subset of the ordinary total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form1099Div {
    /// Box 1a: total ordinary dividends.
    #[serde(default)]
    pub ordinary_dividends: Decimal,

    /// Box 1b: qualified dividends.
    #[serde(default)]
    pub qualified_dividends: Decimal,
}

/// 1099-B net capital gains, by holding period. Either field may be negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form1099B {
    #[serde(default)]
    pub short_term_gain: Decimal,

    #[serde(default)]
    pub long_term_gain: Decimal,
}

/// Schedule A itemized deduction breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemizedDeductions {
    #[serde(default)]
    pub medical: Decimal,

    #[serde(default)]
    pub state_and_local_taxes: Decimal,

    #[serde(default)]
    pub mortgage_interest: Decimal,

    #[serde(default)]
    pub charitable: Decimal,

    #[serde(default)]
    pub casualty: Decimal,

    #[serde(default)]
    pub other: Decimal,
}

/// Above-the-line (Schedule 1) deductions supplied by the filer.
///
/// The half-self-employment-tax deduction is NOT an input; it is produced by
/// the FICA stage and injected by the AGI stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboveTheLineDeductions {
    #[serde(default)]
    pub hsa: Decimal,

    #[serde(default)]
    pub student_loan_interest: Decimal,

    #[serde(default)]
    pub educator_expenses: Decimal,

    #[serde(default)]
    pub ira: Decimal,

    #[serde(default)]
    pub self_employed_health_insurance: Decimal,
}

/// Credit inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditInputs {
    /// Number of qualifying children for the Child Tax Credit.
    #[serde(default)]
    pub qualifying_children: u32,
}

/// Immutable snapshot of one tax return, the input to the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReturnInput {
    pub filing_status: FilingStatus,

    #[serde(default)]
    pub is_over_65: bool,

    #[serde(default)]
    pub is_blind: bool,

    #[serde(default)]
    pub w2s: Vec<W2>,

    #[serde(default)]
    pub forms_1099_nec: Vec<Form1099Nec>,

    #[serde(default)]
    pub forms_1099_int: Vec<Form1099Int>,

    #[serde(default)]
    pub forms_1099_div: Vec<Form1099Div>,

    #[serde(default)]
    pub forms_1099_b: Vec<Form1099B>,

    /// `None` means the standard-deduction path.
    #[serde(default)]
    pub itemized_deductions: Option<ItemizedDeductions>,

    /// Take the standard deduction even when itemizing would be larger.
    #[serde(default)]
    pub force_standard_deduction: bool,

    #[serde(default)]
    pub above_the_line: AboveTheLineDeductions,

    #[serde(default)]
    pub credits: CreditInputs,

    /// Estimated tax payments already made for the year.
    #[serde(default)]
    pub estimated_payments: Decimal,
}

impl TaxReturnInput {
    /// An empty return for the given filing status; callers fill in records.
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            is_over_65: false,
            is_blind: false,
            w2s: Vec::new(),
            forms_1099_nec: Vec::new(),
            forms_1099_int: Vec::new(),
            forms_1099_div: Vec::new(),
            forms_1099_b: Vec::new(),
            itemized_deductions: None,
            force_standard_deduction: false,
            above_the_line: AboveTheLineDeductions::default(),
            credits: CreditInputs::default(),
            estimated_payments: Decimal::ZERO,
        }
    }
}
