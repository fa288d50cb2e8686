use crate::args::CcaArgs;
use crate::cca::{first_year_claim, CcaClaim};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::format_cents;
use crate::Result;
use anyhow::anyhow;

/// Computes the first-year capital cost allowance for the asset in `args`.
pub async fn cca(args: CcaArgs) -> Result<Out<CcaClaim>> {
    let cost = args.cost().value();
    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(anyhow!("The cost of an asset cannot be negative, got {cost}"))
            .pub_result(ErrorType::Validation);
    }
    let class = args.class();
    let claim = first_year_claim(class, cost);
    let message = format!(
        "Class {class} ({}): first-year CCA {} on a cost of {}, closing UCC {}",
        class.description(),
        format_cents(claim.claim),
        format_cents(claim.cost),
        format_cents(claim.closing_ucc),
    );
    Ok(Out::new(message, claim))
}
