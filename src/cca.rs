//! Capital cost allowance for assets bought during the year.

use crate::model::round_cents;
use crate::rates::CcaClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The first-year claim for one asset class.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct CcaClaim {
    pub class: CcaClass,
    pub rate: Decimal,
    pub cost: Decimal,
    pub claim: Decimal,
    /// Undepreciated capital cost carried into the next year.
    pub closing_ucc: Decimal,
}

/// The allowance that can be claimed in the year of purchase.
///
/// Only half of the net addition is eligible in the first year, so the claim is
/// `cost * rate / 2`, rounded to cents.
///
/// ```
/// # use taxport::cca::first_year_cca;
/// # use taxport::rates::CcaClass;
/// # use rust_decimal::Decimal;
/// assert_eq!(first_year_cca(CcaClass::Class50, Decimal::new(2000, 0)), Decimal::new(55000, 2));
/// ```
pub fn first_year_cca(class: CcaClass, cost: Decimal) -> Decimal {
    round_cents(cost * class.rate() / Decimal::TWO)
}

/// Computes the first-year claim and the balance left over.
pub fn first_year_claim(class: CcaClass, cost: Decimal) -> CcaClaim {
    let claim = first_year_cca(class, cost);
    tracing::trace!("Class {class} on {cost}: claim {claim}");
    CcaClaim {
        class,
        rate: class.rate(),
        cost,
        claim,
        closing_ucc: cost - claim,
    }
}
