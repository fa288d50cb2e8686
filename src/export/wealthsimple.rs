//! Wealthsimple Tax layout: one flat list with an `Income`/`Expense` type column.

use super::mapping::{wealthsimple_expense, wealthsimple_income};
use super::{date_cell, money, ExportRow};
use crate::ledger::Ledger;

const INCOME: &str = "Income";
const EXPENSE: &str = "Expense";

pub(super) fn rows(ledger: &Ledger<'_>, tax_label: &str) -> Vec<ExportRow> {
    let mut rows = vec![ExportRow::header([
        "Date",
        "Description",
        "Amount",
        "Category",
        tax_label,
        "Type",
    ])];

    for entry in ledger.expenses().entries() {
        let record = entry.record;
        rows.push(ExportRow::expense([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            wealthsimple_expense(record.category()).to_string(),
            money(entry.breakdown.tax),
            EXPENSE.to_string(),
        ]));
    }
    for entry in ledger.income().entries() {
        let record = entry.record;
        rows.push(ExportRow::income([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            wealthsimple_income(record.category()).to_string(),
            money(entry.breakdown.tax),
            INCOME.to_string(),
        ]));
    }

    rows.push(ExportRow::blank());
    rows.push(ExportRow::total([
        "TOTAL EXPENSES".to_string(),
        String::new(),
        money(ledger.expenses().total_amount()),
        String::new(),
        money(ledger.expenses().total_tax()),
        EXPENSE.to_string(),
    ]));
    rows.push(ExportRow::total([
        "TOTAL INCOME".to_string(),
        String::new(),
        money(ledger.income().total_amount()),
        String::new(),
        money(ledger.income().total_tax()),
        INCOME.to_string(),
    ]));
    rows
}
