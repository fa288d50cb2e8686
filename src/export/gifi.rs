//! Corporate T2 layout coded with GIFI lines, followed by the Schedule 1 and Schedule 8 stubs.

use super::mapping::{
    gifi_expense, gifi_income, GIFI_NET_INCOME, GIFI_TOTAL_EXPENSES, GIFI_TOTAL_REVENUE,
};
use super::{date_cell, money, ExportRow};
use crate::cca::first_year_cca;
use crate::ledger::Ledger;
use crate::model::{round_cents, ExpenseCategory};
use crate::rates::CcaClass;
use crate::Result;
use anyhow::anyhow;
use rust_decimal::Decimal;

/// Computer hardware is the only capital purchase the expense categories can express.
const HARDWARE_CLASS: CcaClass = CcaClass::Class50;

pub(super) fn rows(ledger: &Ledger<'_>, tax_label: &str) -> Result<Vec<ExportRow>> {
    let mut rows = vec![
        ExportRow::section("INCOME STATEMENT"),
        ExportRow::note(["Fiscal Year".to_string(), ledger.year().to_string()]),
        ExportRow::note(["Jurisdiction".to_string(), ledger.jurisdiction().to_string()]),
        ExportRow::blank(),
    ];

    rows.push(ExportRow::section("REVENUE"));
    rows.push(header(&format!("{tax_label} Collected"), "Source"));
    let income = ledger.income();
    for entry in income.entries() {
        let record = entry.record;
        let line = gifi_income(record.category());
        rows.push(ExportRow::income([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            line.code.to_string(),
            line.description.to_string(),
            money(entry.breakdown.tax),
            record.counterpart().to_string(),
        ]));
    }
    rows.push(ExportRow::total([
        "Total Revenue".to_string(),
        String::new(),
        money(income.total_amount()),
        GIFI_TOTAL_REVENUE.code.to_string(),
        GIFI_TOTAL_REVENUE.description.to_string(),
        money(income.total_tax()),
        String::new(),
    ]));
    rows.push(ExportRow::blank());

    rows.push(ExportRow::section("EXPENSES"));
    rows.push(header(&format!("{tax_label} Paid"), "Reference"));
    let expenses = ledger.expenses();
    for entry in expenses.entries() {
        let record = entry.record;
        let line = gifi_expense(record.category());
        rows.push(ExportRow::expense([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            line.code.to_string(),
            line.description.to_string(),
            money(entry.breakdown.tax),
            record.reference().to_string(),
        ]));
    }
    rows.push(ExportRow::total([
        "Total Expenses".to_string(),
        String::new(),
        money(expenses.total_amount()),
        GIFI_TOTAL_EXPENSES.code.to_string(),
        GIFI_TOTAL_EXPENSES.description.to_string(),
        money(expenses.total_tax()),
        String::new(),
    ]));
    rows.push(ExportRow::blank());

    let net_income = ledger.net_income();
    rows.push(ExportRow::note([
        "Net Income".to_string(),
        String::new(),
        money(net_income),
        GIFI_NET_INCOME.code.to_string(),
        GIFI_NET_INCOME.description.to_string(),
        String::new(),
        String::new(),
    ]));

    rows.extend(schedule_1(ledger, net_income)?);
    rows.extend(schedule_8(ledger));
    Ok(rows)
}

fn header(tax_column: &str, last_column: &str) -> ExportRow {
    ExportRow::header([
        "Date",
        "Description",
        "Amount",
        "GIFI Code",
        "GIFI Description",
        tax_column,
        last_column,
    ])
}

/// Reconciles accounting net income with net income for tax purposes. Only the meals add-back is
/// derived from the records: half of the pre-tax cost of meals and entertainment.
fn schedule_1(ledger: &Ledger<'_>, net_income: Decimal) -> Result<Vec<ExportRow>> {
    let meals = ledger
        .expenses()
        .category_totals(ExpenseCategory::MealsEntertainment)
        .net;
    let add_back = round_cents(meals / Decimal::TWO);
    let taxable = net_income
        .checked_add(add_back)
        .ok_or_else(|| anyhow!("Overflow while adding the meals add-back to {net_income}"))?;

    Ok(vec![
        ExportRow::blank(),
        ExportRow::section("SCHEDULE 1 - NET INCOME (LOSS) FOR INCOME TAX PURPOSES"),
        ExportRow::header(["Line", "Description", "Amount"]),
        ExportRow::note([
            "A".to_string(),
            "Net income (loss) after taxes and extraordinary items".to_string(),
            money(net_income),
        ]),
        ExportRow::note([
            "121".to_string(),
            "Non-deductible meals and entertainment expenses (50%)".to_string(),
            money(add_back),
        ]),
        ExportRow::note([
            "500".to_string(),
            "Net income (loss) for income tax purposes".to_string(),
            money(taxable),
        ]),
    ])
}

/// Lists the year's hardware purchases as additions to class 50. Opening balances are not known,
/// so the UCC column is left empty. Omitted when there are no hardware purchases.
fn schedule_8(ledger: &Ledger<'_>) -> Vec<ExportRow> {
    let additions = ledger
        .expenses()
        .category_totals(ExpenseCategory::Hardware)
        .net;
    if additions.is_zero() {
        return Vec::new();
    }

    vec![
        ExportRow::blank(),
        ExportRow::section("SCHEDULE 8 - CAPITAL COST ALLOWANCE"),
        ExportRow::header([
            "Class",
            "Description",
            "Cost of Additions",
            "UCC Beginning",
            "CCA Rate",
            "CCA Claimed",
        ]),
        ExportRow::note([
            HARDWARE_CLASS.to_string(),
            HARDWARE_CLASS.description().to_string(),
            money(additions),
            String::new(),
            format!("{}%", (HARDWARE_CLASS.rate() * Decimal::ONE_HUNDRED).normalize()),
            money(first_year_cca(HARDWARE_CLASS, additions)),
        ]),
    ]
}
