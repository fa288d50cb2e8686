//! Category to form-field tables, one per export format.
//!
//! The tables are exhaustive matches over the category enums. Free text that matches no category
//! was already turned into `Other` when the record was read, and `Other` lands in each format's
//! catch-all line, so a lookup here cannot fail.

use crate::model::{ExpenseCategory, IncomeCategory};

/// A line of the General Index of Financial Information.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GifiLine {
    pub code: u16,
    pub description: &'static str,
}

impl GifiLine {
    const fn new(code: u16, description: &'static str) -> Self {
        Self { code, description }
    }
}

pub const GIFI_TOTAL_REVENUE: GifiLine = GifiLine::new(8299, "Total revenue");
pub const GIFI_TOTAL_EXPENSES: GifiLine = GifiLine::new(9368, "Total expenses");
pub const GIFI_NET_INCOME: GifiLine =
    GifiLine::new(9999, "Net income/loss after taxes and extraordinary items");

pub fn t2125_expense(category: ExpenseCategory) -> &'static str {
    match category {
        ExpenseCategory::Advertising => "Advertising (8521)",
        ExpenseCategory::MealsEntertainment => "Meals and entertainment (8523)",
        ExpenseCategory::Insurance => "Insurance (8690)",
        ExpenseCategory::InterestBankCharges => "Interest and bank charges (8710)",
        ExpenseCategory::OfficeExpenses | ExpenseCategory::Software => "Office expenses (8810)",
        ExpenseCategory::Supplies => "Supplies (8811)",
        ExpenseCategory::ProfessionalFees => {
            "Legal, accounting, and other professional fees (8860)"
        }
        ExpenseCategory::Rent => "Rent (8910)",
        ExpenseCategory::Travel => "Travel expenses (9200)",
        ExpenseCategory::TelephoneUtilities => "Telephone and utilities (9220)",
        ExpenseCategory::Vehicle => "Motor vehicle expenses (9281)",
        ExpenseCategory::Hardware => "Capital cost allowance (9936)",
        ExpenseCategory::HomeOffice => "Business-use-of-home expenses (9945)",
        ExpenseCategory::Other => "Other expenses (9270)",
    }
}

pub fn t2125_income(category: IncomeCategory) -> &'static str {
    match category {
        IncomeCategory::Consulting => "Gross professional fees (8000)",
        IncomeCategory::Sales => "Gross sales (8000)",
        IncomeCategory::Other => "Other income (8230)",
    }
}

pub fn gifi_expense(category: ExpenseCategory) -> GifiLine {
    match category {
        ExpenseCategory::Advertising => GifiLine::new(8520, "Advertising and promotion"),
        ExpenseCategory::MealsEntertainment => GifiLine::new(8523, "Meals and entertainment"),
        ExpenseCategory::Insurance => GifiLine::new(8690, "Insurance"),
        ExpenseCategory::InterestBankCharges => GifiLine::new(8710, "Interest and bank charges"),
        ExpenseCategory::OfficeExpenses => GifiLine::new(8810, "Office expenses"),
        ExpenseCategory::Supplies => GifiLine::new(8811, "Office stationery and supplies"),
        ExpenseCategory::ProfessionalFees => GifiLine::new(8860, "Professional fees"),
        ExpenseCategory::Rent => GifiLine::new(8910, "Rental"),
        ExpenseCategory::Travel => GifiLine::new(9200, "Travel expenses"),
        ExpenseCategory::TelephoneUtilities => GifiLine::new(9220, "Utilities"),
        ExpenseCategory::Vehicle => GifiLine::new(9281, "Vehicle expenses"),
        ExpenseCategory::Software => GifiLine::new(9150, "Computer-related expenses"),
        ExpenseCategory::Hardware => GifiLine::new(8670, "Amortization of tangible assets"),
        ExpenseCategory::HomeOffice | ExpenseCategory::Other => {
            GifiLine::new(9270, "Other expenses")
        }
    }
}

pub fn gifi_income(category: IncomeCategory) -> GifiLine {
    match category {
        IncomeCategory::Consulting | IncomeCategory::Sales => {
            GifiLine::new(8000, "Trade sales of goods and services")
        }
        IncomeCategory::Other => GifiLine::new(8230, "Other revenue"),
    }
}

pub const TURBOTAX_INCOME: &str = "Self-employment income";

pub fn turbotax_expense(category: ExpenseCategory) -> &'static str {
    match category {
        ExpenseCategory::Advertising => "Advertising",
        ExpenseCategory::MealsEntertainment => "Meals and entertainment",
        ExpenseCategory::Insurance => "Insurance",
        ExpenseCategory::InterestBankCharges => "Interest and bank charges",
        ExpenseCategory::OfficeExpenses | ExpenseCategory::Software => "Office expenses",
        ExpenseCategory::Supplies => "Supplies",
        ExpenseCategory::ProfessionalFees => "Legal, accounting and other professional fees",
        ExpenseCategory::Rent => "Rent",
        ExpenseCategory::Travel => "Travel",
        ExpenseCategory::TelephoneUtilities => "Telephone and utilities",
        ExpenseCategory::Vehicle => "Motor vehicle expenses",
        ExpenseCategory::Hardware => "Capital cost allowance",
        ExpenseCategory::HomeOffice => "Business-use-of-home expenses",
        ExpenseCategory::Other => "Other expenses",
    }
}

pub fn wealthsimple_expense(category: ExpenseCategory) -> &'static str {
    match category {
        ExpenseCategory::Advertising => "Advertising & promotion",
        ExpenseCategory::MealsEntertainment => "Meals & entertainment",
        ExpenseCategory::Insurance => "Insurance",
        ExpenseCategory::InterestBankCharges => "Bank fees & interest",
        ExpenseCategory::OfficeExpenses => "Office expenses",
        ExpenseCategory::Supplies => "Supplies",
        ExpenseCategory::ProfessionalFees => "Professional fees",
        ExpenseCategory::Rent => "Rent",
        ExpenseCategory::Travel => "Travel",
        ExpenseCategory::TelephoneUtilities => "Phone & utilities",
        ExpenseCategory::Vehicle => "Vehicle expenses",
        ExpenseCategory::Software => "Software & subscriptions",
        ExpenseCategory::Hardware => "Equipment",
        ExpenseCategory::HomeOffice => "Home office",
        ExpenseCategory::Other => "Other expenses",
    }
}

pub fn wealthsimple_income(category: IncomeCategory) -> &'static str {
    match category {
        IncomeCategory::Consulting | IncomeCategory::Sales => "Business income",
        IncomeCategory::Other => "Other income",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gifi_codes_are_four_digits() {
        for category in ExpenseCategory::ALL {
            let line = gifi_expense(category);
            assert!((1000..10000).contains(&line.code), "{category}");
        }
    }

    #[test]
    fn test_other_goes_to_catch_all_lines() {
        assert_eq!(t2125_expense(ExpenseCategory::Other), "Other expenses (9270)");
        assert_eq!(gifi_expense(ExpenseCategory::Other).code, 9270);
        assert_eq!(turbotax_expense(ExpenseCategory::Other), "Other expenses");
        assert_eq!(wealthsimple_expense(ExpenseCategory::Other), "Other expenses");
        assert_eq!(gifi_income(IncomeCategory::Other).code, 8230);
    }

    #[test]
    fn test_gifi_is_not_the_t2125_table() {
        assert_eq!(gifi_expense(ExpenseCategory::Advertising).code, 8520);
        assert_eq!(t2125_expense(ExpenseCategory::Advertising), "Advertising (8521)");
    }
}
