//! Year-end totals and a rough income tax estimate.

use crate::ledger::Ledger;
use crate::model::{round_cents, ExpenseCategory, ExpenseRecord, IncomeRecord, Jurisdiction};
use crate::rates::{
    provincial_rate, TaxBracket, CPP_BASIC_EXEMPTION, CPP_MAX_PENSIONABLE_EARNINGS,
    CPP_SELF_EMPLOYED_RATE, FEDERAL_BRACKETS,
};
use crate::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals for one year of income and expenses.
///
/// Tax figures are sums of the per-row rounded values, so they match the totals rows of every
/// export built from the same records.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub year: i32,
    pub jurisdiction: Jurisdiction,
    pub income_records: usize,
    pub expense_records: usize,
    /// Tax-inclusive income.
    pub gross_income: Decimal,
    pub tax_collected: Decimal,
    pub net_revenue: Decimal,
    /// Tax-inclusive expenses.
    pub gross_expenses: Decimal,
    /// Input tax credits.
    pub tax_paid: Decimal,
    pub net_expenses: Decimal,
    /// `net_revenue - net_expenses`.
    pub net_business_income: Decimal,
    /// Sales tax owed to the government, negative when a refund is due.
    pub remittance: Decimal,
    /// Tax-inclusive expenses per category. Categories without records are absent.
    pub expenses_by_category: BTreeMap<ExpenseCategory, Decimal>,
}

impl TaxSummary {
    pub fn from_ledger(ledger: &Ledger<'_>) -> Self {
        let income = ledger.income();
        let expenses = ledger.expenses();

        let expenses_by_category = expenses
            .by_category()
            .iter()
            .map(|(category, totals)| (*category, totals.amount))
            .collect();

        Self {
            year: ledger.year(),
            jurisdiction: ledger.jurisdiction().clone(),
            income_records: income.len(),
            expense_records: expenses.len(),
            gross_income: income.total_amount(),
            tax_collected: income.total_tax(),
            net_revenue: income.total_net(),
            gross_expenses: expenses.total_amount(),
            tax_paid: expenses.total_tax(),
            net_expenses: expenses.total_net(),
            net_business_income: ledger.net_business_income(),
            remittance: ledger.remittance(),
            expenses_by_category,
        }
    }
}

/// Summarizes the records dated in `year`.
pub fn summary(
    year: i32,
    jurisdiction: &Jurisdiction,
    income: &[IncomeRecord],
    expenses: &[ExpenseRecord],
) -> Result<TaxSummary> {
    let ledger = Ledger::new(year, jurisdiction, income, expenses)?;
    Ok(TaxSummary::from_ledger(&ledger))
}

/// Income tax and CPP owed on a year of self-employment income.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxEstimate {
    pub jurisdiction: Jurisdiction,
    pub net_income: Decimal,
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub cpp_contribution: Decimal,
    pub total: Decimal,
    /// `total / net_income` to four places, zero when there is no income.
    pub effective_rate: Decimal,
}

/// Estimates the tax owed on `net_income`.
///
/// Federal tax uses the graduated brackets, provincial tax a single flat rate. No credits are
/// applied, so the result overstates what is actually owed.
pub fn estimate(net_income: Decimal, jurisdiction: &Jurisdiction) -> IncomeTaxEstimate {
    let income = net_income.max(Decimal::ZERO);
    let federal_tax = round_cents(graduated_tax(income, &FEDERAL_BRACKETS));
    let provincial_tax = round_cents(income * provincial_rate(jurisdiction));
    let cpp_contribution = round_cents(cpp_contribution(income));
    let total = federal_tax + provincial_tax + cpp_contribution;
    let effective_rate = if income.is_zero() {
        Decimal::ZERO
    } else {
        (total / income).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    };
    tracing::trace!(
        "Estimate on {income} in {jurisdiction}: federal {federal_tax}, provincial \
         {provincial_tax}, CPP {cpp_contribution}"
    );
    IncomeTaxEstimate {
        jurisdiction: jurisdiction.clone(),
        net_income,
        federal_tax,
        provincial_tax,
        cpp_contribution,
        total,
        effective_rate,
    }
}

fn graduated_tax(income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for bracket in brackets {
        let upper = bracket.upper_bound.map_or(income, |b| b.min(income));
        if upper > lower {
            tax += (upper - lower) * bracket.marginal_rate;
        }
        match bracket.upper_bound {
            Some(bound) if bound < income => lower = bound,
            _ => break,
        }
    }
    tax
}

fn cpp_contribution(income: Decimal) -> Decimal {
    let pensionable = income.min(CPP_MAX_PENSIONABLE_EARNINGS) - CPP_BASIC_EXEMPTION;
    pensionable.max(Decimal::ZERO) * CPP_SELF_EMPLOYED_RATE
}
