//! Panel components for the installer window

use crate::install::Notice;
use egui::{RichText, Ui};

/// Read-only installer log, pinned to the newest line
pub fn log_panel(ui: &mut Ui, log_messages: &[String]) {
    let scroll_area = egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true);

    scroll_area.show(ui, |ui| {
        for msg in log_messages {
            ui.label(RichText::new(msg).monospace().size(11.0));
        }
    });
}

/// Progress bar and Install button. Returns `true` when Install was clicked.
pub fn controls_panel(ui: &mut Ui, progress: u8, can_start: bool) -> bool {
    let fraction = f32::from(progress) / 100.0;
    ui.add(egui::ProgressBar::new(fraction).show_percentage());
    ui.add_space(8.0);

    let mut clicked = false;
    ui.vertical_centered_justified(|ui| {
        clicked = ui
            .add_enabled(can_start, egui::Button::new("Install"))
            .clicked();
    });
    clicked
}

/// Modal dialog for an error or the completion notice.
///
/// Returns `true` once the user has dismissed it.
pub fn notice_modal(ctx: &egui::Context, notice: &Notice) -> bool {
    let mut acknowledged = false;

    let modal = egui::Modal::new(egui::Id::new("installer_notice")).show(ctx, |ui| {
        ui.set_width(320.0);
        match notice {
            Notice::Error(_) => {
                ui.heading(RichText::new(notice.title()).color(egui::Color32::RED));
            }
            Notice::Complete => {
                ui.heading(RichText::new(notice.title()).color(egui::Color32::GREEN));
            }
        }
        ui.add_space(8.0);
        ui.label(notice.message());
        ui.add_space(12.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("OK").clicked() {
                acknowledged = true;
            }
        });
    });

    acknowledged || modal.should_close()
}
