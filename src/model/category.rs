//! The closed sets of income and expense categories that records can carry.
//!
//! Category strings in input files are free text. They are normalized and matched against a list
//! of known spellings; anything unknown becomes `Other`. Parsing a category never fails.

use serde::{Deserialize, Serialize};

/// Behavior shared by `IncomeCategory` and `ExpenseCategory`.
pub trait Category: Copy + Eq + Ord + std::fmt::Debug {
    /// The bucket used when a category string is not recognized.
    const OTHER: Self;

    /// Matches an already-normalized key (see `normalize`) against known spellings.
    fn from_key(key: &str) -> Option<Self>;

    /// A human readable name, e.g. `Meals & Entertainment`.
    fn name(&self) -> &'static str;

    /// Parses free text into a category, falling back to `OTHER`.
    fn parse_lenient(s: &str) -> Self {
        let key = normalize(s);
        match Self::from_key(&key) {
            Some(category) => category,
            None => {
                tracing::debug!("Unrecognized category '{s}', using {:?}", Self::OTHER);
                Self::OTHER
            }
        }
    }
}

/// Categories of business expenses.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Advertising,
    MealsEntertainment,
    Insurance,
    InterestBankCharges,
    OfficeExpenses,
    Supplies,
    ProfessionalFees,
    Rent,
    Travel,
    TelephoneUtilities,
    Vehicle,
    Software,
    Hardware,
    HomeOffice,
    #[default]
    Other,
}

serde_plain::derive_display_from_serialize!(ExpenseCategory);
serde_plain::derive_fromstr_from_deserialize!(ExpenseCategory);

impl ExpenseCategory {
    /// Every expense category, in the order they are presented in summaries.
    pub const ALL: [ExpenseCategory; 15] = [
        ExpenseCategory::Advertising,
        ExpenseCategory::MealsEntertainment,
        ExpenseCategory::Insurance,
        ExpenseCategory::InterestBankCharges,
        ExpenseCategory::OfficeExpenses,
        ExpenseCategory::Supplies,
        ExpenseCategory::ProfessionalFees,
        ExpenseCategory::Rent,
        ExpenseCategory::Travel,
        ExpenseCategory::TelephoneUtilities,
        ExpenseCategory::Vehicle,
        ExpenseCategory::Software,
        ExpenseCategory::Hardware,
        ExpenseCategory::HomeOffice,
        ExpenseCategory::Other,
    ];
}

impl Category for ExpenseCategory {
    const OTHER: Self = ExpenseCategory::Other;

    fn from_key(key: &str) -> Option<Self> {
        let category = match key {
            "advertising" | "marketing" | "advertising_and_promotion" | "promotion" => {
                ExpenseCategory::Advertising
            }
            "meals" | "meals_entertainment" | "meals_and_entertainment" | "entertainment" => {
                ExpenseCategory::MealsEntertainment
            }
            "insurance" => ExpenseCategory::Insurance,
            "interest" | "bank_charges" | "bank_fees" | "interest_bank_charges"
            | "interest_and_bank_charges" => ExpenseCategory::InterestBankCharges,
            "office" | "office_expenses" | "office_expense" => ExpenseCategory::OfficeExpenses,
            "supplies" | "office_supplies" => ExpenseCategory::Supplies,
            "professional_fees" | "accounting" | "legal" | "legal_and_accounting" => {
                ExpenseCategory::ProfessionalFees
            }
            "rent" => ExpenseCategory::Rent,
            "travel" => ExpenseCategory::Travel,
            "telephone" | "phone" | "internet" | "utilities" | "telephone_utilities"
            | "telephone_and_utilities" => ExpenseCategory::TelephoneUtilities,
            "vehicle" | "auto" | "fuel" | "motor_vehicle" => ExpenseCategory::Vehicle,
            "software" | "subscriptions" | "software_subscriptions" => ExpenseCategory::Software,
            "hardware" | "equipment" | "computer_equipment" => ExpenseCategory::Hardware,
            "home_office" | "business_use_of_home" => ExpenseCategory::HomeOffice,
            "other" | "other_expenses" | "misc" => ExpenseCategory::Other,
            _ => return None,
        };
        Some(category)
    }

    fn name(&self) -> &'static str {
        match self {
            ExpenseCategory::Advertising => "Advertising",
            ExpenseCategory::MealsEntertainment => "Meals & Entertainment",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::InterestBankCharges => "Interest & Bank Charges",
            ExpenseCategory::OfficeExpenses => "Office Expenses",
            ExpenseCategory::Supplies => "Supplies",
            ExpenseCategory::ProfessionalFees => "Professional Fees",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::TelephoneUtilities => "Telephone & Utilities",
            ExpenseCategory::Vehicle => "Vehicle",
            ExpenseCategory::Software => "Software",
            ExpenseCategory::Hardware => "Hardware",
            ExpenseCategory::HomeOffice => "Home Office",
            ExpenseCategory::Other => "Other",
        }
    }
}

/// Categories of business income.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Consulting,
    Sales,
    #[default]
    Other,
}

serde_plain::derive_display_from_serialize!(IncomeCategory);
serde_plain::derive_fromstr_from_deserialize!(IncomeCategory);

impl Category for IncomeCategory {
    const OTHER: Self = IncomeCategory::Other;

    fn from_key(key: &str) -> Option<Self> {
        let category = match key {
            "consulting" | "services" | "professional_services" | "contract" | "fees" => {
                IncomeCategory::Consulting
            }
            "sales" | "product_sales" | "products" => IncomeCategory::Sales,
            "other" | "other_income" => IncomeCategory::Other,
            _ => return None,
        };
        Some(category)
    }

    fn name(&self) -> &'static str {
        match self {
            IncomeCategory::Consulting => "Consulting",
            IncomeCategory::Sales => "Sales",
            IncomeCategory::Other => "Other Income",
        }
    }
}

/// Lowercases `s` and turns every run of non-alphanumeric characters into a single underscore.
/// An ampersand becomes `and`, so `Meals & Entertainment` and `meals-and-entertainment` agree.
pub(crate) fn normalize(s: &str) -> String {
    let lower = s.trim().to_lowercase().replace('&', " and ");
    let mut key = String::with_capacity(lower.len());
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c);
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    while key.ends_with('_') {
        key.pop();
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Meals & Entertainment "), "meals_and_entertainment");
        assert_eq!(normalize("office-supplies"), "office_supplies");
        assert_eq!(normalize("__Rent__"), "rent");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_expense_lenient_spellings() {
        assert_eq!(
            ExpenseCategory::parse_lenient("Meals & Entertainment"),
            ExpenseCategory::MealsEntertainment
        );
        assert_eq!(
            ExpenseCategory::parse_lenient("meals_entertainment"),
            ExpenseCategory::MealsEntertainment
        );
        assert_eq!(
            ExpenseCategory::parse_lenient("Office Supplies"),
            ExpenseCategory::Supplies
        );
        assert_eq!(
            ExpenseCategory::parse_lenient("SOFTWARE"),
            ExpenseCategory::Software
        );
    }

    #[test]
    fn test_expense_unknown_is_other() {
        assert_eq!(
            ExpenseCategory::parse_lenient("llama grooming"),
            ExpenseCategory::Other
        );
        assert_eq!(ExpenseCategory::parse_lenient(""), ExpenseCategory::Other);
    }

    #[test]
    fn test_income_lenient_spellings() {
        assert_eq!(
            IncomeCategory::parse_lenient("Professional Services"),
            IncomeCategory::Consulting
        );
        assert_eq!(
            IncomeCategory::parse_lenient("product sales"),
            IncomeCategory::Sales
        );
        assert_eq!(IncomeCategory::parse_lenient("grant"), IncomeCategory::Other);
    }

    #[test]
    fn test_every_expense_snake_case_name_parses_to_itself() {
        for category in ExpenseCategory::ALL {
            assert_eq!(
                ExpenseCategory::parse_lenient(&category.to_string()),
                category
            );
        }
    }

    #[test]
    fn test_every_expense_name_parses_to_itself() {
        for category in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::parse_lenient(category.name()), category);
        }
    }
}
