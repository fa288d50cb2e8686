use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use taxport::args::{Args, Command};
use taxport::error::{ErrorType, IntoResult};
use taxport::{commands, Config, Result};
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().taxport_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => {
            commands::init(home, init_args.province(), init_args.business_name())
                .await?
                .print()
        }

        Command::Decompose(decompose_args) => {
            let config = load_config(home).await?;
            commands::decompose(config, decompose_args.clone())
                .await?
                .print()
        }

        Command::Export(export_args) => {
            let config = load_config(home).await?;
            commands::export(config, export_args.clone()).await?.print()
        }

        Command::Summary(summary_args) => {
            let config = load_config(home).await?;
            commands::summary(config, summary_args.clone())
                .await?
                .print()
        }

        Command::Estimate(estimate_args) => {
            let config = load_config(home).await?;
            commands::estimate(config, estimate_args.clone())
                .await?
                .print()
        }

        Command::Cca(cca_args) => commands::cca(cca_args.clone()).await?.print(),
    };
    Ok(())
}

async fn load_config(home: &Path) -> Result<Config> {
    Config::load(home).await.pub_result(ErrorType::Config)
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
