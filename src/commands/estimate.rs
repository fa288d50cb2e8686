use crate::args::EstimateArgs;
use crate::commands::Out;
use crate::model::format_cents;
use crate::summary::IncomeTaxEstimate;
use crate::{summary, Config, Result};
use rust_decimal::Decimal;

/// Estimates income tax and CPP on the net income in `args`.
pub async fn estimate(config: Config, args: EstimateArgs) -> Result<Out<IncomeTaxEstimate>> {
    let province = args.province().unwrap_or(config.province());
    let estimate = summary::estimate(args.income_amount().value(), province);
    let percent = (estimate.effective_rate * Decimal::ONE_HUNDRED).round_dp(2);
    let message = format!(
        "Estimated tax in {province} on {}: federal {}, provincial {}, CPP {}, total {} \
         ({percent}%)",
        format_cents(estimate.net_income),
        format_cents(estimate.federal_tax),
        format_cents(estimate.provincial_tax),
        format_cents(estimate.cpp_contribution),
        format_cents(estimate.total),
    );
    Ok(Out::new(message, estimate))
}
