//! Console panel: leveled log lines with a clear control.

use egui::{Align, Layout, RichText, ScrollArea, Ui};

use textmill_core::ConsoleBuffer;

use crate::theme;

/// Scrollable console view over a [`ConsoleBuffer`].
pub struct ConsolePanel<'a> {
    buffer: &'a mut ConsoleBuffer,
}

impl<'a> ConsolePanel<'a> {
    pub fn new(buffer: &'a mut ConsoleBuffer) -> Self {
        Self { buffer }
    }

    pub fn show(self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Console").strong().size(12.0));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("Clear").clicked() {
                    self.buffer.clear();
                }
            });
        });
        ui.separator();
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if self.buffer.is_empty() {
                    ui.weak("No messages");
                    return;
                }
                for entry in self.buffer.entries() {
                    ui.label(
                        RichText::new(entry.display_line())
                            .monospace()
                            .size(11.0)
                            .color(theme::level_color(entry.level)),
                    );
                }
            });
    }
}
