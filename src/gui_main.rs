//! TruckersMP Installer GUI
//!
//! This is the entry point for the graphical installer.

use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use truckersmp_installer::config::{LaunchConfig, APPDIR_ENV};
use truckersmp_installer::gui::InstallerGui;

#[derive(Parser)]
#[command(name = "truckersmp-installer-gui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Installation root containing usr/bin/install_truckersmp.sh
    #[arg(long, env = APPDIR_ENV)]
    appdir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose { "debug" } else { "info" })
        .with_target(false)
        .init();

    let config = LaunchConfig::resolve(args.appdir);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TruckersMP Installer")
            .with_inner_size([600.0, 400.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TruckersMP Installer",
        options,
        Box::new(|cc| Ok(Box::new(InstallerGui::new(cc, config)))),
    )
}
