//! Tax-software exports: CRA T2125, corporate GIFI, TurboTax and Wealthsimple.
//!
//! An export is built in two steps. First the records of the year are split into a `Ledger`, then
//! the format's builder turns the ledger into a list of `ExportRow`s. Serializing those rows to
//! CSV is the last step and the only one that deals with bytes. For the same input the bytes are
//! always the same; the only clock-dependent value is the suggested filename.

mod gifi;
pub mod mapping;
mod t2125;
mod turbotax;
mod wealthsimple;

use crate::ledger::Ledger;
use crate::model::{format_cents, ExpenseRecord, IncomeRecord, Jurisdiction};
use crate::rates;
use crate::Result;
use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The target tax software or form.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// CRA form T2125, Statement of Business or Professional Activities.
    #[value(name = "t2125")]
    T2125,
    /// Corporate T2 return lines coded with the General Index of Financial Information.
    #[value(name = "gifi")]
    Gifi,
    /// A flat list for import into TurboTax.
    #[value(name = "turbotax")]
    TurboTax,
    /// A flat list for import into Wealthsimple Tax.
    #[value(name = "wealthsimple")]
    Wealthsimple,
}

serde_plain::derive_display_from_serialize!(ExportFormat);
serde_plain::derive_fromstr_from_deserialize!(ExportFormat);

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::T2125,
        ExportFormat::Gifi,
        ExportFormat::TurboTax,
        ExportFormat::Wealthsimple,
    ];

    /// The leading part of the suggested filename.
    fn file_prefix(&self) -> &'static str {
        match self {
            ExportFormat::T2125 => "T2125_CRA",
            ExportFormat::Gifi => "GIFI_CRA",
            ExportFormat::TurboTax => "TurboTax",
            ExportFormat::Wealthsimple => "Wealthsimple",
        }
    }

    /// The suggested filename, e.g. `T2125_CRA_export_2024_20250102_030405.csv`.
    pub fn filename(&self, year: i32, generated_at: NaiveDateTime) -> String {
        format!(
            "{}_export_{year}_{}.csv",
            self.file_prefix(),
            generated_at.format("%Y%m%d_%H%M%S")
        )
    }
}

/// What a row of an export represents.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// An empty separator line.
    Blank,
    /// A single-cell section title such as `INCOME SECTION`.
    Section,
    /// Column names.
    Header,
    /// One income record.
    Income,
    /// One expense record.
    Expense,
    /// A running total.
    Total,
    /// Any other synthetic line: metadata, net income, schedule lines.
    Note,
}

/// One line of an export.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    kind: RowKind,
    cells: Vec<String>,
}

impl ExportRow {
    fn new<S: Into<String>>(kind: RowKind, cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn blank() -> Self {
        Self {
            kind: RowKind::Blank,
            cells: Vec::new(),
        }
    }

    pub(crate) fn section(title: impl Into<String>) -> Self {
        Self::new(RowKind::Section, [title.into()])
    }

    pub(crate) fn header<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self::new(RowKind::Header, cells)
    }

    pub(crate) fn income<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self::new(RowKind::Income, cells)
    }

    pub(crate) fn expense<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self::new(RowKind::Expense, cells)
    }

    pub(crate) fn total<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self::new(RowKind::Total, cells)
    }

    pub(crate) fn note<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self::new(RowKind::Note, cells)
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// A complete export, ready to be serialized.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Export {
    format: ExportFormat,
    year: i32,
    jurisdiction: Jurisdiction,
    rows: Vec<ExportRow>,
}

impl Export {
    /// Lays out `ledger` in `format`.
    ///
    /// # Errors
    /// When a figure derived from the ledger totals does not fit in a `Decimal`.
    pub fn build(format: ExportFormat, ledger: &Ledger<'_>) -> Result<Self> {
        let tax_label = rates::sales_tax_label(ledger.jurisdiction());
        let rows = match format {
            ExportFormat::T2125 => t2125::rows(ledger, tax_label),
            ExportFormat::Gifi => gifi::rows(ledger, tax_label)?,
            ExportFormat::TurboTax => turbotax::rows(ledger, tax_label),
            ExportFormat::Wealthsimple => wealthsimple::rows(ledger, tax_label),
        };
        tracing::debug!("Built {format} export with {} rows", rows.len());
        Ok(Self {
            format,
            year: ledger.year(),
            jurisdiction: ledger.jurisdiction().clone(),
            rows,
        })
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    /// The number of rows of the given kind.
    pub fn count(&self, kind: RowKind) -> usize {
        self.rows.iter().filter(|r| r.kind == kind).count()
    }

    /// Serializes the rows as CSV with `\r\n` line endings. A blank row is an empty line.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for row in &self.rows {
            // The csv writer would emit `""` for an empty record
            if row.kind == RowKind::Blank {
                out.extend_from_slice(b"\r\n");
                continue;
            }
            let mut wtr = csv::WriterBuilder::new()
                .terminator(csv::Terminator::CRLF)
                .from_writer(&mut out);
            wtr.write_record(&row.cells)
                .context("Unable to write CSV row")?;
            wtr.flush().context("Unable to flush CSV row")?;
        }
        Ok(out)
    }

    /// The suggested filename for this export.
    pub fn filename(&self, generated_at: NaiveDateTime) -> String {
        self.format.filename(self.year, generated_at)
    }
}

/// The serialized export and the name it should be saved under.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub income_rows: usize,
    pub expense_rows: usize,
}

/// Builds and serializes one export.
///
/// Records outside of `year` are ignored. Empty record lists produce an export with headers and
/// zero totals only.
pub fn export(
    format: ExportFormat,
    year: i32,
    jurisdiction: &Jurisdiction,
    income: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    generated_at: NaiveDateTime,
) -> Result<ExportFile> {
    let ledger = Ledger::new(year, jurisdiction, income, expenses)?;
    let export = Export::build(format, &ledger)?;
    Ok(ExportFile {
        bytes: export.to_csv()?,
        filename: export.filename(generated_at),
        income_rows: export.count(RowKind::Income),
        expense_rows: export.count(RowKind::Expense),
    })
}

fn date_cell(date: NaiveDate) -> String {
    date.format(crate::model::DATE_FORMAT).to_string()
}

fn money(value: Decimal) -> String {
    format_cents(value)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{ExpenseCategory, IncomeCategory};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn sample_income() -> Vec<IncomeRecord> {
        vec![
            IncomeRecord::new(date(2024, 2, 1), "Website build", dec!(1130.00), IncomeCategory::Consulting)
                .with_counterpart("Acme Corp")
                .with_reference("INV-001"),
            IncomeRecord::new(date(2024, 5, 9), "", dec!(565.00), IncomeCategory::Sales)
                .with_counterpart("Globex")
                .with_reference("INV-002"),
            IncomeRecord::new(date(2023, 12, 30), "Last year", dec!(99.00), IncomeCategory::Other),
        ]
    }

    pub(crate) fn sample_expenses() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new(date(2024, 3, 3), "Laptop", dec!(1000.00), ExpenseCategory::Hardware)
                .with_reference("R-77"),
            ExpenseRecord::new(date(2024, 1, 20), "Client lunch", dec!(123.45), ExpenseCategory::MealsEntertainment),
            ExpenseRecord::new(date(2024, 7, 7), "Mystery", dec!(11.30), ExpenseCategory::Other),
            ExpenseRecord::new(date(2025, 1, 1), "Next year", dec!(50.00), ExpenseCategory::Rent),
        ]
    }

    pub(crate) fn build(format: ExportFormat, jurisdiction: &Jurisdiction) -> Export {
        let income = sample_income();
        let expenses = sample_expenses();
        let ledger = Ledger::new(2024, jurisdiction, &income, &expenses).unwrap();
        Export::build(format, &ledger).unwrap()
    }

    pub(crate) fn csv_text(export: &Export) -> String {
        String::from_utf8(export.to_csv().unwrap()).unwrap()
    }

    fn generated_at() -> NaiveDateTime {
        date(2025, 1, 2).and_hms_opt(3, 4, 5).unwrap()
    }

    #[test]
    fn test_filenames() {
        let at = generated_at();
        assert_eq!(
            ExportFormat::T2125.filename(2024, at),
            "T2125_CRA_export_2024_20250102_030405.csv"
        );
        assert_eq!(
            ExportFormat::Gifi.filename(2024, at),
            "GIFI_CRA_export_2024_20250102_030405.csv"
        );
        assert_eq!(
            ExportFormat::TurboTax.filename(2024, at),
            "TurboTax_export_2024_20250102_030405.csv"
        );
        assert_eq!(
            ExportFormat::Wealthsimple.filename(2024, at),
            "Wealthsimple_export_2024_20250102_030405.csv"
        );
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::TurboTax.to_string(), "turbotax");
        assert_eq!(
            "wealthsimple".parse::<ExportFormat>().unwrap(),
            ExportFormat::Wealthsimple
        );
    }

    #[test]
    fn test_row_counts_match_records_in_year() {
        for format in ExportFormat::ALL {
            let export = build(format, &Jurisdiction::Ontario);
            assert_eq!(export.count(RowKind::Income), 2, "{format}");
            assert_eq!(export.count(RowKind::Expense), 3, "{format}");
        }
    }

    #[test]
    fn test_export_is_idempotent() {
        for format in ExportFormat::ALL {
            let income = sample_income();
            let expenses = sample_expenses();
            let a = export(format, 2024, &Jurisdiction::Quebec, &income, &expenses, generated_at())
                .unwrap();
            let b = export(format, 2024, &Jurisdiction::Quebec, &income, &expenses, generated_at())
                .unwrap();
            assert_eq!(a, b, "{format}");
        }
    }

    #[test]
    fn test_export_file_counts_rows_of_the_year() {
        let income = sample_income();
        let expenses = sample_expenses();
        let file = export(
            ExportFormat::Wealthsimple,
            2024,
            &Jurisdiction::Ontario,
            &income,
            &expenses,
            generated_at(),
        )
        .unwrap();
        assert_eq!(file.income_rows, 2);
        assert_eq!(file.expense_rows, 3);
        assert_eq!(file.filename, "Wealthsimple_export_2024_20250102_030405.csv");
        assert!(String::from_utf8(file.bytes).unwrap().ends_with("\r\n"));
    }

    #[test]
    fn test_empty_records_give_headers_only() {
        for format in ExportFormat::ALL {
            let file = export(format, 2024, &Jurisdiction::Ontario, &[], &[], generated_at()).unwrap();
            let text = String::from_utf8(file.bytes).unwrap();
            assert!(text.starts_with("Date,") || text.starts_with("INCOME STATEMENT"), "{format}");
            assert!(!text.contains("2024-"), "{format}");
        }
    }

    #[test]
    fn test_quebec_uses_qst_label_everywhere() {
        for format in ExportFormat::ALL {
            let text = csv_text(&build(format, &Jurisdiction::Quebec));
            assert!(text.contains("GST/QST"), "{format}");
            assert!(!text.contains("GST/HST"), "{format}");
        }
    }

    #[test]
    fn test_blank_rows_are_empty_lines() {
        let text = csv_text(&build(ExportFormat::T2125, &Jurisdiction::Ontario));
        assert!(text.contains("\r\n\r\nINCOME SECTION\r\n"));
        assert!(!text.contains("\"\""));
    }

    #[test]
    fn test_amounts_always_have_two_decimals() {
        let text = csv_text(&build(ExportFormat::Wealthsimple, &Jurisdiction::Ontario));
        assert!(text.contains(",1130.00,"));
        assert!(text.contains(",130.00,"));
        assert!(text.contains(",14.20,"));
    }
}
