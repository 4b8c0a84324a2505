//! Boundary validation for [`TaxReturnInput`].
//!
//! All input errors are raised here, before the pipeline runs; the stage
//! calculators assume validated input. Messages identify the offending field
//! and 1-based record index (e.g. `W-2 #2: wages must be non-negative`) so
//! callers can surface them directly.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{FilingStatus, TaxReturnInput};

/// Input rejection kinds. Everything here is a caller error, recoverable by
/// fixing the return; failures past validation indicate a defect instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The filing-status tag is not one of the five recognized codes.
    #[error("unrecognized filing status '{0}'")]
    InvalidFilingStatus(String),

    /// A required part of the return is missing or structurally invalid.
    #[error("incomplete input: {0}")]
    IncompleteInput(String),

    /// A monetary field fails its numeric or sign constraint.
    #[error("{0}")]
    Validation(String),

    /// A combination the model does not cover (e.g. negative AGI).
    #[error("unsupported scenario: {0}")]
    UnsupportedScenario(String),
}

/// Parses a filing-status code (`S`, `MFJ`, `MFS`, `HOH`, `QSS`) at the
/// boundary, mapping unknown codes to [`InputError::InvalidFilingStatus`].
pub fn parse_filing_status(code: &str) -> Result<FilingStatus, InputError> {
    FilingStatus::parse(code).ok_or_else(|| InputError::InvalidFilingStatus(code.to_string()))
}

fn non_negative(
    value: Decimal,
    label: &str,
) -> Result<(), InputError> {
    if value < Decimal::ZERO {
        return Err(InputError::Validation(format!(
            "{label} must be non-negative"
        )));
    }
    Ok(())
}

/// Validates a return before the pipeline runs.
///
/// Checks, in order:
/// - the return carries at least one income record of any type;
/// - every non-gain monetary field is non-negative (capital-gain fields on
///   1099-B records may be negative);
/// - per 1099-DIV record, qualified dividends do not exceed ordinary
///   dividends.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fedtax_core::models::{FilingStatus, TaxReturnInput, W2};
/// use fedtax_core::validate::{validate_return, InputError};
///
/// let mut input = TaxReturnInput::new(FilingStatus::Single);
/// input.w2s.push(W2 { wages: dec!(-1), federal_withholding: dec!(0) });
///
/// assert_eq!(
///     validate_return(&input),
///     Err(InputError::Validation(
///         "W-2 #1: wages must be non-negative".to_string()
///     ))
/// );
/// ```
pub fn validate_return(input: &TaxReturnInput) -> Result<(), InputError> {
    let record_count = input.w2s.len()
        + input.forms_1099_nec.len()
        + input.forms_1099_int.len()
        + input.forms_1099_div.len()
        + input.forms_1099_b.len();
    if record_count == 0 {
        return Err(InputError::IncompleteInput(
            "tax return contains no income records".to_string(),
        ));
    }

    for (i, w2) in input.w2s.iter().enumerate() {
        non_negative(w2.wages, &format!("W-2 #{}: wages", i + 1))?;
        non_negative(
            w2.federal_withholding,
            &format!("W-2 #{}: federal withholding", i + 1),
        )?;
    }

    for (i, nec) in input.forms_1099_nec.iter().enumerate() {
        non_negative(nec.compensation, &format!("1099-NEC #{}: compensation", i + 1))?;
    }

    for (i, int) in input.forms_1099_int.iter().enumerate() {
        non_negative(int.interest, &format!("1099-INT #{}: interest", i + 1))?;
    }

    for (i, div) in input.forms_1099_div.iter().enumerate() {
        non_negative(
            div.ordinary_dividends,
            &format!("1099-DIV #{}: ordinary dividends", i + 1),
        )?;
        non_negative(
            div.qualified_dividends,
            &format!("1099-DIV #{}: qualified dividends", i + 1),
        )?;
        if div.qualified_dividends > div.ordinary_dividends {
            return Err(InputError::Validation(format!(
                "1099-DIV #{}: qualified dividends cannot exceed ordinary dividends",
                i + 1
            )));
        }
    }

    if let Some(itemized) = &input.itemized_deductions {
        non_negative(itemized.medical, "itemized deductions: medical")?;
        non_negative(
            itemized.state_and_local_taxes,
            "itemized deductions: state and local taxes",
        )?;
        non_negative(
            itemized.mortgage_interest,
            "itemized deductions: mortgage interest",
        )?;
        non_negative(itemized.charitable, "itemized deductions: charitable")?;
        non_negative(itemized.casualty, "itemized deductions: casualty")?;
        non_negative(itemized.other, "itemized deductions: other")?;
    }

    let above = &input.above_the_line;
    non_negative(above.hsa, "above-the-line deductions: HSA")?;
    non_negative(
        above.student_loan_interest,
        "above-the-line deductions: student loan interest",
    )?;
    non_negative(
        above.educator_expenses,
        "above-the-line deductions: educator expenses",
    )?;
    non_negative(above.ira, "above-the-line deductions: IRA")?;
    non_negative(
        above.self_employed_health_insurance,
        "above-the-line deductions: self-employed health insurance",
    )?;

    non_negative(input.estimated_payments, "estimated payments")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Form1099B, Form1099Div, Form1099Nec, W2};

    fn minimal_return() -> TaxReturnInput {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2 {
            wages: dec!(50000),
            federal_withholding: dec!(5000),
        });
        input
    }

    #[test]
    fn accepts_a_plain_w2_return() {
        assert_eq!(validate_return(&minimal_return()), Ok(()));
    }

    #[test]
    fn rejects_a_return_with_no_income_records() {
        let input = TaxReturnInput::new(FilingStatus::Single);

        assert_eq!(
            validate_return(&input),
            Err(InputError::IncompleteInput(
                "tax return contains no income records".to_string()
            ))
        );
    }

    #[test]
    fn rejects_negative_wages_with_record_index() {
        let mut input = minimal_return();
        input.w2s.push(W2 {
            wages: dec!(-100),
            federal_withholding: dec!(0),
        });

        assert_eq!(
            validate_return(&input),
            Err(InputError::Validation(
                "W-2 #2: wages must be non-negative".to_string()
            ))
        );
    }

    #[test]
    fn rejects_negative_se_compensation() {
        let mut input = minimal_return();
        input.forms_1099_nec.push(Form1099Nec {
            compensation: dec!(-1),
        });

        assert_eq!(
            validate_return(&input),
            Err(InputError::Validation(
                "1099-NEC #1: compensation must be non-negative".to_string()
            ))
        );
    }

    #[test]
    fn rejects_qualified_dividends_exceeding_ordinary() {
        let mut input = minimal_return();
        input.forms_1099_div.push(Form1099Div {
            ordinary_dividends: dec!(1000),
            qualified_dividends: dec!(1000),
        });
        input.forms_1099_div.push(Form1099Div {
            ordinary_dividends: dec!(500),
            qualified_dividends: dec!(600),
        });

        assert_eq!(
            validate_return(&input),
            Err(InputError::Validation(
                "1099-DIV #2: qualified dividends cannot exceed ordinary dividends".to_string()
            ))
        );
    }

    #[test]
    fn allows_capital_losses() {
        let mut input = minimal_return();
        input.forms_1099_b.push(Form1099B {
            short_term_gain: dec!(-4000),
            long_term_gain: dec!(-12000),
        });

        assert_eq!(validate_return(&input), Ok(()));
    }

    #[test]
    fn rejects_negative_estimated_payments() {
        let mut input = minimal_return();
        input.estimated_payments = dec!(-0.01);

        assert_eq!(
            validate_return(&input),
            Err(InputError::Validation(
                "estimated payments must be non-negative".to_string()
            ))
        );
    }

    #[test]
    fn parse_filing_status_accepts_known_codes() {
        assert_eq!(parse_filing_status("HOH"), Ok(FilingStatus::HeadOfHousehold));
    }

    #[test]
    fn parse_filing_status_rejects_unknown_codes() {
        assert_eq!(
            parse_filing_status("SINGLE"),
            Err(InputError::InvalidFilingStatus("SINGLE".to_string()))
        );
    }
}
