//! TurboTax layout: one flat list, expenses then income, every row tagged with its tax form.

use super::mapping::{turbotax_expense, TURBOTAX_INCOME};
use super::{date_cell, money, ExportRow};
use crate::ledger::Ledger;
use crate::model::Category;

const TAX_FORM: &str = "T2125";

pub(super) fn rows(ledger: &Ledger<'_>, tax_label: &str) -> Vec<ExportRow> {
    let mut rows = vec![ExportRow::header([
        "Date",
        "Description",
        "Amount",
        "Category",
        tax_label,
        "Tax Form",
        "TurboTax Category",
    ])];

    for entry in ledger.expenses().entries() {
        let record = entry.record;
        rows.push(ExportRow::expense([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            record.category().name().to_string(),
            money(entry.breakdown.tax),
            TAX_FORM.to_string(),
            turbotax_expense(record.category()).to_string(),
        ]));
    }
    for entry in ledger.income().entries() {
        let record = entry.record;
        rows.push(ExportRow::income([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            record.category().name().to_string(),
            money(entry.breakdown.tax),
            TAX_FORM.to_string(),
            TURBOTAX_INCOME.to_string(),
        ]));
    }

    rows.push(ExportRow::blank());
    rows.push(ExportRow::total([
        "TOTAL EXPENSES".to_string(),
        String::new(),
        money(ledger.expenses().total_amount()),
        String::new(),
        money(ledger.expenses().total_tax()),
        String::new(),
        String::new(),
    ]));
    rows.push(ExportRow::total([
        "TOTAL INCOME".to_string(),
        String::new(),
        money(ledger.income().total_amount()),
        String::new(),
        money(ledger.income().total_tax()),
        String::new(),
        String::new(),
    ]));
    rows
}
