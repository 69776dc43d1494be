//! TruckersMP Installer - headless front-end
//!
//! Runs the bundled installer script from a terminal with the same log and
//! progress handling as the graphical installer.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use truckersmp_installer::config::{LaunchConfig, APPDIR_ENV};
use truckersmp_installer::reporter::{run_headless, JsonReporter, TextReporter};
use truckersmp_installer::utils::error::InstallerError;
use truckersmp_installer::utils::prompt::{confirm_start, success};

#[derive(Parser)]
#[command(name = "truckersmp-installer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Installation root containing usr/bin/install_truckersmp.sh
    #[arg(long, env = APPDIR_ENV, global = true)]
    appdir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the installer script
    Install {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check that the installer script is present and executable
    Check,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the installer log, diagnostics go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = LaunchConfig::resolve(cli.appdir);

    let status = match cli.command {
        Some(Commands::Install { yes, format }) => cmd_install(&config, yes, format)?,
        Some(Commands::Check) => {
            cmd_check(&config)?;
            ExitCode::SUCCESS
        }
        // Default: run the installer interactively
        None => cmd_install(&config, false, OutputFormat::Text)?,
    };

    Ok(status)
}

/// The run's failure has already been reported by the reporter; only the
/// exit status is passed on.
fn cmd_install(config: &LaunchConfig, yes: bool, format: OutputFormat) -> Result<ExitCode> {
    let script = config.script_path();
    info!("Installer script: {}", script.display());

    if !confirm_start(&script, yes)? {
        return Err(InstallerError::UserCancelled.into());
    }

    let outcome = match format {
        OutputFormat::Text => run_headless(config, &mut TextReporter::new())?,
        OutputFormat::Json => run_headless(config, &mut JsonReporter::new(std::io::stdout()))?,
    };

    Ok(ExitCode::from(outcome.process_exit_status()))
}

fn cmd_check(config: &LaunchConfig) -> Result<()> {
    let script = config.validate()?;
    success(&format!("Installer script found: {}", script.display()));
    Ok(())
}
