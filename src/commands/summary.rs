use crate::args::SummaryArgs;
use crate::commands::{load_records, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::format_cents;
use crate::summary::TaxSummary;
use crate::{rates, summary, Config, Result};

/// Totals the records of one year.
pub async fn summary(config: Config, args: SummaryArgs) -> Result<Out<TaxSummary>> {
    let records = args.records();
    let (income, expenses) = load_records(records).await?;
    let province = records.province().unwrap_or(config.province());

    let summary = summary::summary(records.year(), province, &income, &expenses)
        .pub_result(ErrorType::Export)?;

    let label = rates::sales_tax_label(province);
    let message = format!(
        "{} in {}: net business income {}, {label} collected {}, {label} paid {}, remittance {}",
        summary.year,
        summary.jurisdiction,
        format_cents(summary.net_business_income),
        format_cents(summary.tax_collected),
        format_cents(summary.tax_paid),
        format_cents(summary.remittance),
    );
    Ok(Out::new(message, summary))
}
