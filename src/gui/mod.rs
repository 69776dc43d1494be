//! Installer GUI module
//!
//! A single window with the installer log, a progress bar and an Install
//! button. The installer script runs on a worker thread; its events are
//! drained on every frame.

mod app;
mod panels;

pub use app::InstallerGui;
