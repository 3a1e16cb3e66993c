//! Editor pane: a titled multiline text editor that fills its region.

use egui::{RichText, ScrollArea, TextEdit, Ui};

pub struct EditorPane<'a> {
    title: &'a str,
    hint: &'a str,
    editable: bool,
}

impl<'a> EditorPane<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            hint: "",
            editable: true,
        }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = hint;
        self
    }

    /// Read-only rendering for output panes.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn show(self, ui: &mut Ui, text: &mut String) {
        ui.label(RichText::new(self.title).strong().size(12.0));
        ScrollArea::vertical()
            .id_salt(self.title)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_sized(
                    ui.available_size(),
                    TextEdit::multiline(text)
                        .hint_text(self.hint)
                        .interactive(self.editable)
                        .frame(false),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_edit_by_default_and_output_opts_out() {
        assert!(EditorPane::new("Input").editable);
        assert!(!EditorPane::new("Output").editable(false).editable);
    }
}
