use crate::args::ExportArgs;
use crate::commands::{load_records, Out};
use crate::error::{ErrorType, IntoResult};
use crate::export::{self, ExportFormat};
use crate::model::Jurisdiction;
use crate::{utils, Config, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// What was written by `taxport export`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExportOutput {
    pub format: ExportFormat,
    pub year: i32,
    pub jurisdiction: Jurisdiction,
    pub path: PathBuf,
    pub income_rows: usize,
    pub expense_rows: usize,
    pub bytes: usize,
}

/// Writes the records of one year in the requested format.
///
/// The file goes to `--out` when given, otherwise to the export directory under a name that
/// carries the format, the year and the current time.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<ExportOutput>> {
    let records = args.records();
    let (income, expenses) = load_records(records).await?;
    let province = records.province().unwrap_or(config.province());
    let year = records.year();
    let format = args.format();

    let generated_at = chrono::Local::now().naive_local();
    let file = export::export(format, year, province, &income, &expenses, generated_at)
        .pub_result(ErrorType::Export)?;

    let path = match args.out() {
        Some(out) => out.to_path_buf(),
        None => config.export_dir().join(&file.filename),
    };
    debug!("Writing {} bytes to {}", file.bytes.len(), path.display());
    utils::write(&path, &file.bytes)
        .await
        .pub_result(ErrorType::Io)?;

    let output = ExportOutput {
        format,
        year,
        jurisdiction: province.clone(),
        path,
        income_rows: file.income_rows,
        expense_rows: file.expense_rows,
        bytes: file.bytes.len(),
    };
    let message = format!(
        "Exported {} income and {} expense records for {year} to {}",
        output.income_rows,
        output.expense_rows,
        output.path.display()
    );
    Ok(Out::new(message, output))
}
