//! These structs provide the CLI interface for the taxport CLI.

use crate::export::ExportFormat;
use crate::model::{Amount, Jurisdiction};
use crate::rates::CcaClass;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// taxport: Sales tax decomposition and tax-software exports for Canadian small businesses.
///
/// Income and expense records are read from CSV files with the header
/// `Date,Description,Amount,Category,Counterpart,Reference`. Amounts are tax-inclusive. taxport
/// splits the GST, HST or QST out of every amount and lays the records out for CRA form T2125,
/// corporate GIFI lines, TurboTax or Wealthsimple Tax.
///
/// Start with `taxport init` to create the home directory.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and its configuration file.
    ///
    /// The home directory defaults to $HOME/taxport, pass --taxport-home to put it elsewhere. The
    /// province given here is used by every other command unless it is overridden with
    /// --province.
    Init(InitArgs),
    /// Split the sales tax out of one tax-inclusive amount.
    Decompose(DecomposeArgs),
    /// Write a year of records as a CSV file for tax software.
    Export(ExportArgs),
    /// Print income, expense and sales tax totals for a year.
    Summary(SummaryArgs),
    /// Estimate federal tax, provincial tax and CPP on a year of self-employment income.
    Estimate(EstimateArgs),
    /// Compute the first-year capital cost allowance for an asset.
    Cca(CcaArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where taxport configuration and exports are held. Defaults to ~/taxport
    #[arg(long, env = "TAXPORT_HOME", default_value_t = default_taxport_home())]
    taxport_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, taxport_home: PathBuf) -> Self {
        Self {
            log_level,
            taxport_home: taxport_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn taxport_home(&self) -> &DisplayPath {
        &self.taxport_home
    }
}

/// (Not shown): Args for the `taxport init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The province or territory, by name or two-letter code, e.g. "Ontario" or "QC".
    #[arg(long, default_value_t = Jurisdiction::default())]
    province: Jurisdiction,

    /// The name of the business, for your own reference.
    #[arg(long, default_value = "")]
    business_name: String,
}

impl InitArgs {
    pub fn new(province: Jurisdiction, business_name: impl Into<String>) -> Self {
        Self {
            province,
            business_name: business_name.into(),
        }
    }

    pub fn province(&self) -> &Jurisdiction {
        &self.province
    }

    pub fn business_name(&self) -> &str {
        &self.business_name
    }
}

/// (Not shown): Args for the `taxport decompose` command.
#[derive(Debug, Parser, Clone)]
pub struct DecomposeArgs {
    /// The tax-inclusive amount, e.g. 1130.00 or '$1,130.00'.
    #[arg(allow_hyphen_values = true)]
    amount: Amount,

    /// Overrides the province from the config file.
    #[arg(long)]
    province: Option<Jurisdiction>,
}

impl DecomposeArgs {
    pub fn new(amount: Amount, province: Option<Jurisdiction>) -> Self {
        Self { amount, province }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn province(&self) -> Option<&Jurisdiction> {
        self.province.as_ref()
    }
}

/// (Not shown): The record files and year shared by `export` and `summary`.
#[derive(Debug, Parser, Clone)]
pub struct RecordArgs {
    /// The calendar year to report. Records dated in other years are ignored.
    #[arg(long)]
    year: i32,

    /// A CSV file of income records.
    #[arg(long)]
    income: Option<PathBuf>,

    /// A CSV file of expense records.
    #[arg(long)]
    expenses: Option<PathBuf>,

    /// Overrides the province from the config file.
    #[arg(long)]
    province: Option<Jurisdiction>,
}

impl RecordArgs {
    pub fn new(
        year: i32,
        income: Option<PathBuf>,
        expenses: Option<PathBuf>,
        province: Option<Jurisdiction>,
    ) -> Self {
        Self {
            year,
            income,
            expenses,
            province,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn income(&self) -> Option<&Path> {
        self.income.as_deref()
    }

    pub fn expenses(&self) -> Option<&Path> {
        self.expenses.as_deref()
    }

    pub fn province(&self) -> Option<&Jurisdiction> {
        self.province.as_ref()
    }
}

/// (Not shown): Args for the `taxport export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The target tax software or form.
    format: ExportFormat,

    #[clap(flatten)]
    records: RecordArgs,

    /// Where to write the file. Defaults to the export directory with a generated filename.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(format: ExportFormat, records: RecordArgs, out: Option<PathBuf>) -> Self {
        Self {
            format,
            records,
            out,
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn records(&self) -> &RecordArgs {
        &self.records
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

/// (Not shown): Args for the `taxport summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    #[clap(flatten)]
    records: RecordArgs,
}

impl SummaryArgs {
    pub fn new(records: RecordArgs) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &RecordArgs {
        &self.records
    }
}

/// (Not shown): Args for the `taxport estimate` command.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Net business income for the year, after expenses and excluding sales tax.
    #[arg(long, allow_hyphen_values = true)]
    income_amount: Amount,

    /// Overrides the province from the config file.
    #[arg(long)]
    province: Option<Jurisdiction>,
}

impl EstimateArgs {
    pub fn new(income_amount: Amount, province: Option<Jurisdiction>) -> Self {
        Self {
            income_amount,
            province,
        }
    }

    pub fn income_amount(&self) -> Amount {
        self.income_amount
    }

    pub fn province(&self) -> Option<&Jurisdiction> {
        self.province.as_ref()
    }
}

/// (Not shown): Args for the `taxport cca` command.
#[derive(Debug, Parser, Clone)]
pub struct CcaArgs {
    /// The CCA class: 8, 10, 12, 14.1, 46, 50 or 53.
    #[arg(long)]
    class: CcaClass,

    /// The cost of the asset, excluding recoverable sales tax.
    #[arg(long)]
    cost: Amount,
}

impl CcaArgs {
    pub fn new(class: CcaClass, cost: Amount) -> Self {
        Self { class, cost }
    }

    pub fn class(&self) -> CcaClass {
        self.class
    }

    pub fn cost(&self) -> Amount {
        self.cost
    }
}

fn default_taxport_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("taxport"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --taxport-home or TAXPORT_HOME instead of relying on the \
                default taxport home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("taxport")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_export() {
        let args = Args::try_parse_from([
            "taxport",
            "--taxport-home",
            "/tmp/tp",
            "export",
            "t2125",
            "--year",
            "2024",
            "--expenses",
            "expenses.csv",
            "--province",
            "QC",
        ])
        .unwrap();
        assert_eq!(args.common().taxport_home().path(), Path::new("/tmp/tp"));
        let Command::Export(export) = args.command() else {
            panic!("expected export, got {:?}", args.command());
        };
        assert_eq!(export.format(), ExportFormat::T2125);
        assert_eq!(export.records().year(), 2024);
        assert!(export.records().income().is_none());
        assert_eq!(
            export.records().expenses(),
            Some(Path::new("expenses.csv"))
        );
        assert_eq!(export.records().province(), Some(&Jurisdiction::Quebec));
    }

    #[test]
    fn test_parse_decompose_with_dollar_sign() {
        let args = Args::try_parse_from(["taxport", "decompose", "$1,130.00"]).unwrap();
        let Command::Decompose(decompose) = args.command() else {
            panic!("expected decompose");
        };
        assert_eq!(decompose.amount().value(), dec!(1130.00));
        assert!(decompose.province().is_none());
    }

    #[test]
    fn test_parse_negative_amount() {
        let args = Args::try_parse_from(["taxport", "decompose", "-113"]).unwrap();
        let Command::Decompose(decompose) = args.command() else {
            panic!("expected decompose");
        };
        assert_eq!(decompose.amount().value(), dec!(-113));
    }

    #[test]
    fn test_parse_cca() {
        let args =
            Args::try_parse_from(["taxport", "cca", "--class", "14.1", "--cost", "5000"]).unwrap();
        let Command::Cca(cca) = args.command() else {
            panic!("expected cca");
        };
        assert_eq!(cca.class(), CcaClass::Class14_1);
        assert_eq!(cca.cost().value(), dec!(5000));
    }

    #[test]
    fn test_bad_format_is_rejected() {
        let result = Args::try_parse_from(["taxport", "export", "quickbooks", "--year", "2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_init_defaults_to_ontario() {
        let args = Args::try_parse_from(["taxport", "init"]).unwrap();
        let Command::Init(init) = args.command() else {
            panic!("expected init");
        };
        assert_eq!(init.province(), &Jurisdiction::Ontario);
        assert_eq!(init.business_name(), "");
    }
}
