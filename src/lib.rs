//! TruckersMP installer library - runs the AppImage installer script

pub mod config;
#[cfg(feature = "gui")]
pub mod gui;
pub mod install;
pub mod protocol;
pub mod reporter;
pub mod utils;

pub use config::LaunchConfig;
pub use utils::error::InstallerError;
