//! Main GUI application

use crate::config::LaunchConfig;
use crate::install::{start_installation, InstallSession, Notice, RunEvent};
use eframe::egui;
use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use tracing::warn;

use super::panels;

/// Installer window state
pub struct InstallerGui {
    config: LaunchConfig,
    session: InstallSession,
    install_receiver: Option<Receiver<RunEvent>>,
    // Shown one at a time, oldest first
    notices: VecDeque<Notice>,
}

impl InstallerGui {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: LaunchConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: LaunchConfig) -> Self {
        Self {
            config,
            session: InstallSession::new(),
            install_receiver: None,
            notices: VecDeque::new(),
        }
    }

    fn start_installation(&mut self) {
        let script = self.config.script_path();
        match start_installation(&mut self.session, script) {
            Ok(rx) => self.install_receiver = Some(rx),
            Err(e) => warn!("Could not start installation: {}", e),
        }
    }

    fn poll_install_messages(&mut self) {
        let mut should_clear_receiver = false;

        if let Some(ref rx) = self.install_receiver {
            loop {
                match rx.try_recv() {
                    Ok(event) => {
                        if let Some(notice) = self.session.apply(event) {
                            self.notices.push_back(notice);
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        should_clear_receiver = true;
                        break;
                    }
                }
            }
        }

        if should_clear_receiver {
            self.install_receiver = None;
        }
    }

    /// Drop the front notice; returns `true` when the window should close.
    fn acknowledge_notice(&mut self) -> bool {
        matches!(self.notices.pop_front(), Some(Notice::Complete))
    }
}

impl eframe::App for InstallerGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.install_receiver.is_some() {
            self.poll_install_messages();
            // Keep polling while the worker is alive; throttled to spare the CPU
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(8.0);
            if panels::controls_panel(ui, self.session.progress(), self.session.can_start()) {
                self.start_installation();
            }
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::log_panel(ui, self.session.log());
        });

        if let Some(notice) = self.notices.front() {
            if panels::notice_modal(ctx, notice) && self.acknowledge_notice() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::RunOutcome;
    use std::sync::mpsc::channel;
    use uuid::Uuid;

    fn running_gui() -> (InstallerGui, std::sync::mpsc::Sender<RunEvent>) {
        let mut gui = InstallerGui::with_config(LaunchConfig::default());
        let script = gui.config.script_path();
        gui.session.begin(Uuid::new_v4(), &script).unwrap();
        let (tx, rx) = channel();
        gui.install_receiver = Some(rx);
        (gui, tx)
    }

    #[test]
    fn queued_events_are_drained_in_order() {
        let (mut gui, tx) = running_gui();
        tx.send(RunEvent::LogLine("one".to_string())).unwrap();
        tx.send(RunEvent::Error("disk full".to_string())).unwrap();
        tx.send(RunEvent::Progress(100)).unwrap();
        tx.send(RunEvent::LogLine("two".to_string())).unwrap();

        gui.poll_install_messages();

        assert_eq!(gui.session.log(), ["one", "two"]);
        assert_eq!(gui.session.progress(), 100);
        assert_eq!(
            gui.notices,
            [Notice::Error("disk full".to_string()), Notice::Complete]
        );
        assert!(gui.install_receiver.is_some());
    }

    #[test]
    fn only_the_completion_notice_closes_the_window() {
        let (mut gui, tx) = running_gui();
        tx.send(RunEvent::Error("disk full".to_string())).unwrap();
        tx.send(RunEvent::Progress(100)).unwrap();
        gui.poll_install_messages();

        assert!(!gui.acknowledge_notice());
        assert!(gui.acknowledge_notice());
        assert!(gui.notices.is_empty());
    }

    #[test]
    fn receiver_is_released_when_the_worker_exits() {
        let (mut gui, tx) = running_gui();
        tx.send(RunEvent::StreamEnded(RunOutcome::Exited { code: 1 }))
            .unwrap();
        drop(tx);

        gui.poll_install_messages();

        assert!(gui.install_receiver.is_none());
        assert_eq!(gui.session.log(), ["Installation failed with code 1."]);
        assert!(!gui.session.can_start());
    }
}
