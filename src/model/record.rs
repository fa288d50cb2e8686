use crate::model::{Amount, Category, ExpenseCategory, IncomeCategory};
use crate::Result;
use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

/// The date format of the `Date` column in input files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An income or expense entry. `amount` is always tax-inclusive.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonetaryRecord<C> {
    date: NaiveDate,
    description: String,
    amount: Amount,
    category: C,
    counterpart: String,
    reference: String,
}

pub type IncomeRecord = MonetaryRecord<IncomeCategory>;
pub type ExpenseRecord = MonetaryRecord<ExpenseCategory>;

impl<C> MonetaryRecord<C>
where
    C: Category,
{
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: impl Into<Amount>,
        category: C,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount: amount.into(),
            category,
            counterpart: String::new(),
            reference: String::new(),
        }
    }

    /// Sets the client or vendor name.
    pub fn with_counterpart(mut self, counterpart: impl Into<String>) -> Self {
        self.counterpart = counterpart.into();
        self
    }

    /// Sets the invoice number or receipt reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> C {
        self.category
    }

    pub fn counterpart(&self) -> &str {
        &self.counterpart
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The text for a report's `Description` column: the description, or the counterpart when the
    /// description is blank.
    pub fn display_description(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.counterpart
        } else {
            &self.description
        }
    }

    /// True when the record falls between January 1 and December 31 of `year`, inclusive.
    pub fn in_year(&self, year: i32) -> bool {
        self.date.year() == year
    }
}

// "Date","Description","Amount","Category","Counterpart","Reference"
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRecord {
    date: String,
    #[serde(default)]
    description: String,
    amount: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    counterpart: String,
    #[serde(default)]
    reference: String,
}

impl CsvRecord {
    fn into_record<C: Category>(self) -> Result<MonetaryRecord<C>> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).with_context(|| {
            format!("Invalid date '{}', expected YYYY-MM-DD", self.date.trim())
        })?;
        let amount = Amount::from_str(&self.amount)?;
        Ok(MonetaryRecord {
            date,
            description: self.description,
            amount,
            category: C::parse_lenient(&self.category),
            counterpart: self.counterpart,
            reference: self.reference,
        })
    }
}

/// Reads records from CSV with the header `Date,Description,Amount,Category,Counterpart,Reference`.
///
/// `source` names the input in error messages. Any malformed row fails the whole read.
pub fn read_records<C, R>(reader: R, source: &str) -> Result<Vec<MonetaryRecord<C>>>
where
    C: Category,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut records = Vec::new();
    for (ix, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        // Row 1 is the header
        let row = ix + 2;
        let csv_record =
            result.with_context(|| format!("Unable to read row {row} of {source}"))?;
        let record = csv_record
            .into_record()
            .with_context(|| format!("Invalid record at row {row} of {source}"))?;
        records.push(record);
    }
    tracing::debug!("Read {} records from {source}", records.len());
    Ok(records)
}
