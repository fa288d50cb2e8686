//! CRA T2125 layout: expenses first, then an `INCOME SECTION` with its own header.

use super::mapping::{t2125_expense, t2125_income};
use super::{date_cell, money, ExportRow};
use crate::ledger::Ledger;

pub(super) fn rows(ledger: &Ledger<'_>, tax_label: &str) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    rows.push(ExportRow::header([
        "Date".to_string(),
        "Description".to_string(),
        "Amount".to_string(),
        "T2125 Category".to_string(),
        format!("{tax_label} Paid"),
        "Receipt Reference".to_string(),
    ]));
    let expenses = ledger.expenses();
    for entry in expenses.entries() {
        let record = entry.record;
        rows.push(ExportRow::expense([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            t2125_expense(record.category()).to_string(),
            money(entry.breakdown.tax),
            record.reference().to_string(),
        ]));
    }
    rows.push(ExportRow::total([
        "TOTAL EXPENSES".to_string(),
        String::new(),
        money(expenses.total_amount()),
        String::new(),
        money(expenses.total_tax()),
        String::new(),
    ]));

    rows.push(ExportRow::blank());
    rows.push(ExportRow::section("INCOME SECTION"));
    rows.push(ExportRow::header([
        "Date".to_string(),
        "Description".to_string(),
        "Amount".to_string(),
        "T2125 Income Type".to_string(),
        format!("{tax_label} Collected"),
        "Reference".to_string(),
    ]));
    let income = ledger.income();
    for entry in income.entries() {
        let record = entry.record;
        rows.push(ExportRow::income([
            date_cell(record.date()),
            record.display_description().to_string(),
            money(record.amount().value()),
            t2125_income(record.category()).to_string(),
            money(entry.breakdown.tax),
            record.reference().to_string(),
        ]));
    }
    rows.push(ExportRow::total([
        "TOTAL INCOME".to_string(),
        String::new(),
        money(income.total_amount()),
        String::new(),
        money(income.total_tax()),
        String::new(),
    ]));

    rows
}

#[cfg(test)]
mod tests {
    use crate::export::tests::{build, csv_text};
    use crate::export::ExportFormat;
    use crate::model::Jurisdiction;

    #[test]
    fn test_t2125_layout() {
        let text = csv_text(&build(ExportFormat::T2125, &Jurisdiction::Ontario));
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(
            lines,
            vec![
                "Date,Description,Amount,T2125 Category,GST/HST Paid,Receipt Reference",
                "2024-03-03,Laptop,1000.00,Capital cost allowance (9936),115.04,R-77",
                "2024-01-20,Client lunch,123.45,Meals and entertainment (8523),14.20,",
                "2024-07-07,Mystery,11.30,Other expenses (9270),1.30,",
                "TOTAL EXPENSES,,1134.75,,130.54,",
                "",
                "INCOME SECTION",
                "Date,Description,Amount,T2125 Income Type,GST/HST Collected,Reference",
                "2024-02-01,Website build,1130.00,Gross professional fees (8000),130.00,INV-001",
                "2024-05-09,Globex,565.00,Gross sales (8000),65.00,INV-002",
                "TOTAL INCOME,,1695.00,,195.00,",
                "",
            ]
        );
    }

    #[test]
    fn test_t2125_quebec_header() {
        let text = csv_text(&build(ExportFormat::T2125, &Jurisdiction::Quebec));
        assert!(text.starts_with(
            "Date,Description,Amount,T2125 Category,GST/QST Paid,Receipt Reference\r\n"
        ));
        assert!(text.contains(",GST/QST Collected,"));
    }
}
