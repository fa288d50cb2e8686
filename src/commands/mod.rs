//! Command handlers for the taxport CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod cca;
mod decompose;
mod estimate;
mod export;
mod init;
mod summary;

use crate::args::RecordArgs;
use crate::error::{ErrorType, IntoResult};
use crate::model::{read_records, Category, ExpenseRecord, IncomeRecord, MonetaryRecord};
use crate::{utils, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;
use tracing::{debug, info};

pub use cca::cca;
pub use decompose::decompose;
pub use estimate::estimate;
pub use export::{export, ExportOutput};
pub use init::init;
pub use summary::summary;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

/// Checks the year and reads the record files named in `args`. A missing file option means no
/// records of that kind.
async fn load_records(args: &RecordArgs) -> Result<(Vec<IncomeRecord>, Vec<ExpenseRecord>)> {
    let year = args.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(anyhow!(
            "The year {year} is out of range, expected {MIN_YEAR} to {MAX_YEAR}"
        ))
        .pub_result(ErrorType::Validation);
    }

    let income = match args.income() {
        Some(path) => read_file(path).await?,
        None => Vec::new(),
    };
    let expenses = match args.expenses() {
        Some(path) => read_file(path).await?,
        None => Vec::new(),
    };
    Ok((income, expenses))
}

async fn read_file<C: Category>(path: &Path) -> Result<Vec<MonetaryRecord<C>>> {
    let bytes = utils::read_bytes(path).await.pub_result(ErrorType::Io)?;
    read_records(bytes.as_slice(), &path.display().to_string()).pub_result(ErrorType::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::test::{TestEnv, EXPENSES_CSV, INCOME_CSV};

    #[tokio::test]
    async fn test_load_records() {
        let env = TestEnv::new().await;
        let income = env.write_file("income.csv", INCOME_CSV).await;
        let expenses = env.write_file("expenses.csv", EXPENSES_CSV).await;
        let args = RecordArgs::new(2024, Some(income), Some(expenses), None);
        let (income, expenses) = load_records(&args).await.unwrap();
        assert_eq!(income.len(), 3);
        assert_eq!(expenses.len(), 4);
    }

    #[tokio::test]
    async fn test_load_records_without_files() {
        let args = RecordArgs::new(2024, None, None, None);
        let (income, expenses) = load_records(&args).await.unwrap();
        assert!(income.is_empty());
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_bad_year_is_validation_error() {
        let args = RecordArgs::new(24, None, None, None);
        let err = load_records(&args).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let env = TestEnv::new().await;
        let args = RecordArgs::new(2024, Some(env.path("nope.csv")), None, None);
        let err = load_records(&args).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Io));
    }

    #[tokio::test]
    async fn test_malformed_row_is_validation_error() {
        let env = TestEnv::new().await;
        let bad = env
            .write_file("bad.csv", "Date,Description,Amount,Category\n2024-01-01,x,abc,rent\n")
            .await;
        let args = RecordArgs::new(2024, None, Some(bad), None);
        let err = load_records(&args).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
        assert!(format!("{err:#}").contains("'abc' is not a valid amount"));
    }

    #[test]
    fn test_out_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }
}
