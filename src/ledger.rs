//! The records of one calendar year with their tax already split out.
//!
//! Exports and summaries are both built from a `Ledger`, so a tax figure printed on a row and the
//! same figure inside a total always come from the same rounded value. Every total is summed with
//! checked arithmetic here, once, so the layouts built on top of a `Ledger` cannot overflow.

use crate::decompose::{decompose, TaxBreakdown};
use crate::model::{
    Category, ExpenseCategory, ExpenseRecord, IncomeCategory, IncomeRecord, Jurisdiction,
    MonetaryRecord,
};
use crate::Result;
use anyhow::{anyhow, Context};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A record together with its split.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a, C> {
    pub record: &'a MonetaryRecord<C>,
    pub breakdown: TaxBreakdown,
}

/// Sums of the tax-inclusive amount, the tax and the pre-tax net of a group of rows.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Totals {
    pub amount: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
}

impl Totals {
    fn add(self, breakdown: &TaxBreakdown) -> Result<Self> {
        Ok(Self {
            amount: add(self.amount, breakdown.gross)?,
            tax: add(self.tax, breakdown.tax)?,
            net: add(self.net, breakdown.net)?,
        })
    }
}

/// The entries of one kind (income or expense) and their running totals.
#[derive(Debug, Clone)]
pub struct Section<'a, C> {
    entries: Vec<Entry<'a, C>>,
    totals: Totals,
    by_category: BTreeMap<C, Totals>,
}

impl<'a, C> Section<'a, C>
where
    C: Category,
{
    fn new(
        year: i32,
        jurisdiction: &Jurisdiction,
        records: &'a [MonetaryRecord<C>],
    ) -> Result<Self> {
        let mut entries = Vec::new();
        let mut totals = Totals::default();
        let mut by_category: BTreeMap<C, Totals> = BTreeMap::new();
        // Input order is kept, records are never re-sorted.
        for record in records.iter().filter(|r| r.in_year(year)) {
            let context = || {
                format!(
                    "Unable to split the tax out of '{}' dated {}",
                    record.amount(),
                    record.date()
                )
            };
            let breakdown = decompose(record.amount().value(), jurisdiction).with_context(context)?;
            totals = totals.add(&breakdown).with_context(context)?;
            let category = by_category.entry(record.category()).or_default();
            *category = category.add(&breakdown).with_context(context)?;
            entries.push(Entry { record, breakdown });
        }
        Ok(Self {
            entries,
            totals,
            by_category,
        })
    }

    pub fn entries(&self) -> &[Entry<'a, C>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Sum of the tax-inclusive amounts.
    pub fn total_amount(&self) -> Decimal {
        self.totals.amount
    }

    /// Sum of the per-row rounded tax values.
    pub fn total_tax(&self) -> Decimal {
        self.totals.tax
    }

    /// Sum of the per-row nets, equal to `total_amount - total_tax`.
    pub fn total_net(&self) -> Decimal {
        self.totals.net
    }

    /// Totals per category, in category order. Categories without records are absent.
    pub fn by_category(&self) -> &BTreeMap<C, Totals> {
        &self.by_category
    }

    /// Totals of one category, zero when it has no records.
    pub fn category_totals(&self, category: C) -> Totals {
        self.by_category.get(&category).copied().unwrap_or_default()
    }
}

/// Income and expenses for one year in one jurisdiction.
#[derive(Debug, Clone)]
pub struct Ledger<'a> {
    year: i32,
    jurisdiction: Jurisdiction,
    income: Section<'a, IncomeCategory>,
    expenses: Section<'a, ExpenseCategory>,
    net_income: Decimal,
    net_business_income: Decimal,
    remittance: Decimal,
}

impl<'a> Ledger<'a> {
    /// Keeps the records dated in `year` and splits the tax out of each.
    ///
    /// # Errors
    /// When a split or a total does not fit in a `Decimal`.
    pub fn new(
        year: i32,
        jurisdiction: &Jurisdiction,
        income: &'a [IncomeRecord],
        expenses: &'a [ExpenseRecord],
    ) -> Result<Self> {
        let income_section = Section::new(year, jurisdiction, income)?;
        let expense_section = Section::new(year, jurisdiction, expenses)?;
        let net_income = sub(income_section.total_amount(), expense_section.total_amount())
            .context("Unable to compute net income")?;
        let net_business_income = sub(income_section.total_net(), expense_section.total_net())
            .context("Unable to compute net business income")?;
        let remittance = sub(income_section.total_tax(), expense_section.total_tax())
            .context("Unable to compute the sales tax remittance")?;
        let ledger = Self {
            year,
            jurisdiction: jurisdiction.clone(),
            income: income_section,
            expenses: expense_section,
            net_income,
            net_business_income,
            remittance,
        };
        tracing::debug!(
            "Ledger for {year} in {jurisdiction}: {} of {} income records, {} of {} expense records",
            ledger.income.len(),
            income.len(),
            ledger.expenses.len(),
            expenses.len()
        );
        Ok(ledger)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    pub fn income(&self) -> &Section<'a, IncomeCategory> {
        &self.income
    }

    pub fn expenses(&self) -> &Section<'a, ExpenseCategory> {
        &self.expenses
    }

    /// Revenue minus expenses, both tax-inclusive.
    pub fn net_income(&self) -> Decimal {
        self.net_income
    }

    /// Pre-tax revenue minus pre-tax expenses.
    pub fn net_business_income(&self) -> Decimal {
        self.net_business_income
    }

    /// Tax collected minus tax paid, negative when a refund is due.
    pub fn remittance(&self) -> Decimal {
        self.remittance
    }
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| anyhow!("Overflow while adding {b} to {a}"))
}

fn sub(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| anyhow!("Overflow while subtracting {b} from {a}"))
}
