//! Carte CLI
//!
//! Local entry point for the acquisition and normalization passes.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use carte_ingest::{
    archive::SevenZipOpener,
    catalog::SpreadsheetWorkbook,
    error::Result,
    models::Config,
    pipeline::{self, JsonLinesSink},
};

/// Carte - chart catalog ingestion
#[derive(Parser, Debug)]
#[command(
    name = "carte",
    version,
    about = "Download, extract and normalize a spreadsheet chart catalog"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "carte.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the scratch directory for downloads
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Override the result store directory
    #[arg(long)]
    result_dir: Option<PathBuf>,

    /// Wipe scratch and result directories before starting
    #[arg(long)]
    wipe: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download and extract every catalog item not yet in the result store
    Extract {
        /// Spreadsheet listing the archives (xlsx, xls, ods)
        workbook: PathBuf,
    },

    /// Print one JSON record per extracted unit
    Normalize,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = cli.scratch_dir {
        config.paths.scratch_dir = dir;
    }
    if let Some(dir) = cli.result_dir {
        config.paths.result_dir = dir;
    }
    if cli.wipe {
        config.paths.wipe_on_start = true;
    }
    config.validate()?;

    match cli.command {
        Command::Extract { workbook } => {
            log::info!("Opening catalog {}", workbook.display());
            let workbook = SpreadsheetWorkbook::open(&workbook)?;
            let report =
                pipeline::run_acquisition(&config, workbook, Arc::new(SevenZipOpener)).await?;

            log::info!(
                "Result store: {} ({} new units)",
                config.paths.result_dir.display(),
                report.extracted_units
            );
            if report.failures() > 0 {
                log::warn!(
                    "{} items failed; re-run to retry them",
                    report.failures()
                );
            }
        }

        Command::Normalize => {
            let stdout = io::stdout().lock();
            let mut sink = JsonLinesSink::new(io::BufWriter::new(stdout));
            pipeline::run_normalizer(&config, &mut sink)?;
            sink.into_inner().flush()?;
        }

        Command::Validate => {
            log::info!("Configuration is valid");
            log::info!("  Scratch dir: {}", config.paths.scratch_dir.display());
            log::info!("  Result dir: {}", config.paths.result_dir.display());
            log::info!("  URL column marker: {}", config.catalog.url_column_marker);
            log::info!("  Extraction workers: {}", config.extraction.workers);
            log::info!(
                "  Unit files: {:?} + .{}",
                config.walker.image_extensions,
                config.walker.descriptor_extension
            );
        }
    }

    Ok(())
}
