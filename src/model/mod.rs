//! Types that represent the input data model, such as `MonetaryRecord` and `Jurisdiction`.
mod amount;
mod category;
mod jurisdiction;
mod record;

pub use amount::{format_cents, round_cents, Amount, AmountError, AmountFormat};
pub use category::{Category, ExpenseCategory, IncomeCategory};
pub use jurisdiction::Jurisdiction;
pub use record::{read_records, ExpenseRecord, IncomeRecord, MonetaryRecord, DATE_FORMAT};
