//! Splits a tax-inclusive amount into its pre-tax base and the sales tax embedded in it.
//!
//! Every tax figure is rounded half-up to cents, and the net is computed last as
//! `amount - tax`, so `net + tax == amount` holds exactly for every input.

use crate::model::{round_cents, Jurisdiction};
use crate::rates::{self, TaxRate};
use crate::Result;
use anyhow::anyhow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The result of splitting a tax-inclusive amount.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// The tax-inclusive amount that was split.
    pub gross: Decimal,
    /// The GST or HST portion.
    pub gst: Decimal,
    /// The QST portion, zero outside of Quebec.
    pub qst: Decimal,
    /// `gst + qst`.
    pub tax: Decimal,
    /// `gross - tax`.
    pub net: Decimal,
}

/// Splits `amount` using the sales tax rates of `jurisdiction`.
pub fn decompose(amount: Decimal, jurisdiction: &Jurisdiction) -> Result<TaxBreakdown> {
    decompose_with_rate(amount, rates::tax_rate(jurisdiction))
}

/// Splits `amount` using an explicit rate.
///
/// # Errors
/// Only when the arithmetic overflows the range of `Decimal`.
pub fn decompose_with_rate(amount: Decimal, rate: TaxRate) -> Result<TaxBreakdown> {
    let (gst, qst) = match rate {
        TaxRate::Single { rate } => (single_tax(amount, rate)?, Decimal::ZERO),
        TaxRate::Compound { gst, qst } => compound_tax(amount, gst, qst)?,
    };
    let tax = gst + qst;
    let breakdown = TaxBreakdown {
        gross: amount,
        gst,
        qst,
        tax,
        net: amount - tax,
    };
    tracing::trace!("{amount} at {rate:?} -> {breakdown:?}");
    Ok(breakdown)
}

/// `A - A / (1 + r)`, falling back to `A * r / (1 + r)` when the first form is not positive
/// for a positive rate.
fn single_tax(amount: Decimal, rate: Decimal) -> Result<Decimal> {
    if amount.is_zero() || rate.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let divisor = Decimal::ONE + rate;
    let tax = round_cents(amount - div(amount, divisor)?);
    if tax <= Decimal::ZERO && rate > Decimal::ZERO {
        return Ok(round_cents(div(mul(amount, rate)?, divisor)?));
    }
    Ok(tax)
}

/// GST is `A * g / (1 + g + g * q)`, then QST is `(A - GST) * q / (1 + q)` on the rounded GST.
fn compound_tax(amount: Decimal, gst_rate: Decimal, qst_rate: Decimal) -> Result<(Decimal, Decimal)> {
    if amount.is_zero() {
        return Ok((Decimal::ZERO, Decimal::ZERO));
    }
    let gst_divisor = Decimal::ONE + gst_rate + mul(gst_rate, qst_rate)?;
    let gst = round_cents(div(mul(amount, gst_rate)?, gst_divisor)?);
    let qst = round_cents(div(mul(amount - gst, qst_rate)?, Decimal::ONE + qst_rate)?);
    Ok((gst, qst))
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| anyhow!("Overflow while multiplying {a} by {b}"))
}

fn div(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_div(b)
        .ok_or_else(|| anyhow!("Unable to divide {a} by {b}"))
}
