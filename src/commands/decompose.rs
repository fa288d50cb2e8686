use crate::args::DecomposeArgs;
use crate::commands::Out;
use crate::decompose::TaxBreakdown;
use crate::error::{ErrorType, IntoResult};
use crate::model::format_cents;
use crate::{decompose, rates, Config, Result};

/// Splits the tax out of the amount in `args` using the province from the args or the config.
pub async fn decompose(config: Config, args: DecomposeArgs) -> Result<Out<TaxBreakdown>> {
    let province = args.province().unwrap_or(config.province());
    let amount = args.amount().value();
    let breakdown = decompose::decompose(amount, province).pub_result(ErrorType::Export)?;

    let taxes = if rates::is_compound_jurisdiction(province) {
        format!(
            "GST {}, QST {}",
            format_cents(breakdown.gst),
            format_cents(breakdown.qst)
        )
    } else {
        format!(
            "{} {}",
            rates::sales_tax_label(province),
            format_cents(breakdown.tax)
        )
    };
    let message = format!(
        "{} in {province}: {taxes}, net {}",
        format_cents(amount),
        format_cents(breakdown.net)
    );
    Ok(Out::new(message, breakdown))
}
