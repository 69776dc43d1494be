//! Configuration

pub mod launch;

pub use launch::{LaunchConfig, APPDIR_ENV, SCRIPT_RELATIVE_PATH};
