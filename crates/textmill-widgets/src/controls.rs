//! Transform button row and the status bar.

use egui::{Align, Layout, RichText, Ui};

use crate::theme;

/// Row of transformation buttons, one per prompt.
pub struct TransformBar<'a> {
    prompts: &'a [String],
    busy: bool,
}

/// What the user clicked this frame.
#[derive(Debug, Default)]
pub struct TransformBarResponse {
    /// Name of the prompt whose button was clicked.
    pub transform: Option<String>,
    pub list_models: bool,
}

impl<'a> TransformBar<'a> {
    pub fn new(prompts: &'a [String]) -> Self {
        Self {
            prompts,
            busy: false,
        }
    }

    /// Disable the buttons while a request is in flight.
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    pub fn show(self, ui: &mut Ui) -> TransformBarResponse {
        let mut response = TransformBarResponse::default();
        ui.horizontal_wrapped(|ui| {
            for prompt in self.prompts {
                let button = ui.add_enabled(!self.busy, egui::Button::new(prompt.as_str()));
                if button.clicked() {
                    response.transform = Some(prompt.clone());
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.add_enabled(!self.busy, egui::Button::new("Models")).clicked() {
                    response.list_models = true;
                }
                if self.busy {
                    ui.spinner();
                }
            });
        });
        response
    }
}

/// Bottom status bar. Shows the last status message and, when the console is
/// collapsed, an affordance to bring it back.
pub struct StatusBar<'a> {
    message: &'a str,
    console_collapsed: bool,
    variant: Option<(usize, usize)>,
}

#[derive(Debug, Default)]
pub struct StatusBarResponse {
    pub restore_console: bool,
    pub prev_variant: bool,
    pub next_variant: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            console_collapsed: false,
            variant: None,
        }
    }

    pub fn console_collapsed(mut self, collapsed: bool) -> Self {
        self.console_collapsed = collapsed;
        self
    }

    /// Show a `position/total` variant indicator with cycling arrows.
    pub fn variant(mut self, position: usize, total: usize) -> Self {
        if total > 1 {
            self.variant = Some((position, total));
        }
        self
    }

    pub fn show(self, ui: &mut Ui) -> StatusBarResponse {
        let mut response = StatusBarResponse::default();
        ui.horizontal(|ui| {
            ui.set_height(theme::STATUS_BAR_HEIGHT);
            ui.label(
                RichText::new(self.message)
                    .size(11.0)
                    .color(theme::STATUS_TEXT),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if self.console_collapsed && ui.small_button("Console ^").clicked() {
                    response.restore_console = true;
                }
                if let Some((position, total)) = self.variant {
                    if ui.small_button(">").clicked() {
                        response.next_variant = true;
                    }
                    ui.label(RichText::new(format!("{position}/{total}")).size(11.0));
                    if ui.small_button("<").clicked() {
                        response.prev_variant = true;
                    }
                }
            });
        });
        response
    }
}
