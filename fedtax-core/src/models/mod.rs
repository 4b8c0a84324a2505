mod calculation_record;
mod filing_status;
mod tax_return;

pub use calculation_record::{CalculationRecord, NewCalculationRecord};
pub use filing_status::FilingStatus;
pub use tax_return::{
    AboveTheLineDeductions, CreditInputs, Form1099B, Form1099Div, Form1099Int, Form1099Nec,
    ItemizedDeductions, TaxReturnInput, W2,
};
