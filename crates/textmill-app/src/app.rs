//! Application state and the per-frame update loop.
//!
//! The frame order matters: drain worker events, translate pointer input and
//! route it through the layout controller, sync the geometry model against
//! last frame's measurements, then render and record fresh measurements for
//! the next frame.

use eframe::egui;
use egui_extras::{Size, StripBuilder};
use kurbo::Point;

use textmill_core::credentials::CredentialsStore;
use textmill_core::prompts::{fill_template, PromptLibrary};
use textmill_core::transform::{format_variants, DEFAULT_MODEL};
use textmill_core::{
    AxisBinding, AxisConfig, AxisId, ConsoleBuffer, InputState, LayoutController, LayoutError,
    LogLevel, MouseButton, Orientation, PointerEvent, SnapConfig, SplitKind, TransformClient,
    TransformEvent, TransformRequest, TransformationList,
};
use textmill_widgets::{
    theme, ConsolePanel, EditorPane, ResizeHandle, StatusBar, TransformBar,
};

use crate::host::{
    PaneHost, CONSOLE, CONSOLE_HANDLE, EDITORS, EDITOR_A, EDITOR_B, EDITOR_HANDLE, WINDOW,
};

const EDITOR_MIN_WIDTH: f64 = 300.0;
const EDITOR_MIN_HEIGHT: f64 = 150.0;
const CONSOLE_DEFAULT_HEIGHT: f64 = 150.0;
const CONSOLE_MIN_HEIGHT: f64 = 80.0;
const CONSOLE_COLLAPSED_HEIGHT: f64 = 0.0;
const SNAP_THRESHOLD: f64 = 30.0;

fn editor_axis_config() -> AxisConfig {
    AxisConfig {
        orientation: Orientation::Vertical,
        kind: SplitKind::Panes,
        min_primary: EDITOR_MIN_WIDTH,
        min_secondary: EDITOR_MIN_WIDTH,
        snap: None,
    }
}

fn console_axis_config() -> AxisConfig {
    AxisConfig {
        orientation: Orientation::Horizontal,
        kind: SplitKind::Drawer,
        min_primary: CONSOLE_MIN_HEIGHT,
        min_secondary: EDITOR_MIN_HEIGHT,
        snap: Some(SnapConfig {
            collapsed_extent: CONSOLE_COLLAPSED_HEIGHT,
            expanded_extent: CONSOLE_DEFAULT_HEIGHT,
            threshold: SNAP_THRESHOLD,
        }),
    }
}

pub struct TextmillApp {
    controller: LayoutController,
    host: PaneHost,
    input: InputState,
    editor_axis: AxisId,
    console_axis: AxisId,
    attached: bool,
    editor_handle_rect: Option<egui::Rect>,
    console_handle_rect: Option<egui::Rect>,

    input_text: String,
    output_text: String,
    console: ConsoleBuffer,
    prompts: PromptLibrary,
    prompt_names: Vec<String>,
    variants: TransformationList,

    credentials: CredentialsStore,
    client: Option<TransformClient>,
    in_flight: usize,
    status: String,

    show_settings: bool,
    api_key_draft: String,
}

impl TextmillApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, LayoutError> {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut controller = LayoutController::new();
        let editor_axis = controller.create_axis(editor_axis_config())?;
        let console_axis = controller.create_axis(console_axis_config())?;

        let credentials = CredentialsStore::default_location().unwrap_or_else(|err| {
            log::warn!("no config directory, keeping credentials beside the binary: {err}");
            CredentialsStore::at(".")
        });
        let client = credentials.resolve_api_key().ok().map(TransformClient::new);

        let prompts = PromptLibrary::builtin();
        let mut prompt_names: Vec<String> = prompts.names().map(str::to_string).collect();
        prompt_names.sort();

        let mut console = ConsoleBuffer::new();
        console.info("textmill ready");
        if client.is_none() {
            console.warning("no API key found; transforms are disabled until one is saved");
        }

        Ok(Self {
            controller,
            host: PaneHost::new(),
            input: InputState::new(),
            editor_axis,
            console_axis,
            attached: false,
            editor_handle_rect: None,
            console_handle_rect: None,
            input_text: String::new(),
            output_text: String::new(),
            console,
            prompts,
            prompt_names,
            variants: TransformationList::default(),
            credentials,
            client,
            in_flight: 0,
            status: "ready".into(),
            show_settings: false,
            api_key_draft: String::new(),
        })
    }

    fn poll_transform_events(&mut self) {
        let Some(client) = &mut self.client else {
            return;
        };
        let events = client.poll_events();
        for event in events {
            match event {
                TransformEvent::Started { label } => {
                    self.status = format!("transforming with {label}...");
                    self.console.info(format!("running {label}"));
                }
                TransformEvent::Completed { label, output } => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    let variants = format_variants(&output);
                    if variants.len() > 1 {
                        self.console
                            .info(format!("{label} returned {} variants", variants.len()));
                        self.variants.set_texts(variants);
                        self.output_text = self.variants.current().to_string();
                    } else {
                        self.variants.set_texts(Vec::new());
                        self.output_text = variants.into_iter().next().unwrap_or_default();
                        self.console.info(format!("{label} complete"));
                    }
                    self.status = format!("{label} complete");
                }
                TransformEvent::Failed { label, message } => {
                    if label != "models" {
                        self.in_flight = self.in_flight.saturating_sub(1);
                    }
                    self.console.error(format!("{label} failed: {message}"));
                    self.status = format!("{label} failed");
                }
                TransformEvent::ModelsListed(models) => {
                    self.console.info(format!("{} models available", models.len()));
                    for id in models {
                        self.console.log(LogLevel::Debug, id);
                    }
                    self.status = "model list loaded".into();
                }
            }
        }
    }

    /// Translate this frame's raw pointer events and route them through the
    /// layout controller.
    fn handle_pointer_input(&mut self, ctx: &egui::Context) {
        self.input.begin_frame();
        let events = gather_pointer_events(ctx);
        for event in events {
            self.input.handle_event(&event);
            match event {
                PointerEvent::Down {
                    position,
                    button: MouseButton::Left,
                } => self.pointer_down(position),
                PointerEvent::Move { position } => {
                    self.controller.pointer_move(position, &mut self.host);
                }
                PointerEvent::Up { .. } => self.controller.pointer_up(),
                PointerEvent::Down { .. } => {}
            }
        }
    }

    fn pointer_down(&mut self, position: Point) {
        if rect_contains(self.console_handle_rect, position) {
            if self.input.double_clicked() {
                // The first click of the pair opened a session; drop it so
                // the toggle is not followed by a drag.
                self.controller.pointer_up();
                if let Err(err) = self.controller.toggle_collapse(self.console_axis, &mut self.host)
                {
                    log::warn!("console toggle failed: {err}");
                }
            } else if let Err(err) = self.controller.pointer_down(self.console_axis, position) {
                log::warn!("console drag start failed: {err}");
            }
        } else if rect_contains(self.editor_handle_rect, position) {
            if let Err(err) = self.controller.pointer_down(self.editor_axis, position) {
                log::warn!("editor drag start failed: {err}");
            }
        }
    }

    fn try_attach(&mut self) {
        let required = [
            EDITOR_A,
            EDITOR_B,
            EDITOR_HANDLE,
            EDITORS,
            CONSOLE,
            CONSOLE_HANDLE,
            WINDOW,
        ];
        if !self.host.is_measurable(&required) {
            return;
        }
        let editors = AxisBinding {
            primary: EDITOR_A,
            secondary: EDITOR_B,
            handle: EDITOR_HANDLE,
            container: WINDOW,
        };
        let console = AxisBinding {
            primary: CONSOLE,
            secondary: EDITORS,
            handle: CONSOLE_HANDLE,
            container: WINDOW,
        };
        let attach = self
            .controller
            .attach_handle(self.editor_axis, editors, &mut self.host)
            .and_then(|_| {
                self.controller
                    .attach_handle(self.console_axis, console, &mut self.host)
            });
        match attach {
            Ok(()) => {
                self.attached = true;
                log::debug!("layout axes attached");
            }
            Err(err) => log::warn!("layout attach failed: {err}"),
        }
    }

    fn run_transform(&mut self, name: &str) {
        let Some(client) = &self.client else {
            self.console
                .error("no API key configured; save one in settings first");
            self.show_settings = true;
            return;
        };
        if self.input_text.trim().is_empty() {
            self.console.warning("nothing to transform");
            return;
        }
        let template = match self.prompts.get(name) {
            Ok(template) => template,
            Err(err) => {
                self.console.error(err.to_string());
                return;
            }
        };
        let request = TransformRequest {
            text: self.input_text.clone(),
            system_prompt: fill_template(template, &[("grade", "8"), ("count", "5")]),
            model: DEFAULT_MODEL.into(),
        };
        match client.transform(name, request) {
            Ok(()) => {
                self.in_flight += 1;
                self.status = format!("queued {name}");
            }
            Err(err) => self.console.error(format!("could not queue {name}: {err}")),
        }
    }

    fn request_model_list(&mut self) {
        let Some(client) = &self.client else {
            self.console.error("no API key configured");
            return;
        };
        if let Err(err) = client.list_models() {
            self.console.error(format!("could not request models: {err}"));
        }
    }

    fn editors_cell(&mut self, ui: &mut egui::Ui) {
        self.host.record(EDITORS, f64::from(ui.max_rect().height()));
        let bar = TransformBar::new(&self.prompt_names)
            .busy(self.in_flight > 0)
            .show(ui);
        if let Some(name) = bar.transform {
            self.run_transform(&name);
        }
        if bar.list_models {
            self.request_model_list();
        }

        let default_left = f64::from(ui.available_width() / 2.0);
        let left = self.host.extent_or(EDITOR_A, default_left) as f32;
        StripBuilder::new(ui)
            .size(Size::exact(left).at_least(EDITOR_MIN_WIDTH as f32))
            .size(Size::exact(theme::HANDLE_THICKNESS))
            .size(Size::remainder().at_least(EDITOR_MIN_WIDTH as f32))
            .horizontal(|mut strip| {
                strip.cell(|ui| {
                    self.host.record(EDITOR_A, f64::from(ui.max_rect().width()));
                    EditorPane::new("Input")
                        .hint("Paste text to transform")
                        .show(ui, &mut self.input_text);
                });
                strip.cell(|ui| {
                    let response = ResizeHandle::vertical().show(ui);
                    self.host
                        .record(EDITOR_HANDLE, f64::from(response.rect.width()));
                    self.editor_handle_rect = Some(response.rect);
                });
                strip.cell(|ui| {
                    self.host.record(EDITOR_B, f64::from(ui.max_rect().width()));
                    EditorPane::new("Output")
                        .editable(false)
                        .show(ui, &mut self.output_text);
                });
            });
    }

    fn console_cell(&mut self, ui: &mut egui::Ui) {
        self.host.record(CONSOLE, f64::from(ui.max_rect().height()));
        if ui.max_rect().height() < 1.0 {
            return;
        }
        ConsolePanel::new(&mut self.console).show(ui);
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("OpenAI API key");
                ui.add(
                    egui::TextEdit::singleline(&mut self.api_key_draft)
                        .password(true)
                        .desired_width(320.0),
                );
                if ui.button("Save").clicked() {
                    let key = self.api_key_draft.trim().to_string();
                    match self.credentials.save_api_key(&key) {
                        Ok(()) => {
                            self.client = Some(TransformClient::new(key));
                            self.console.info("API key saved");
                            self.api_key_draft.clear();
                            self.show_settings = false;
                        }
                        Err(err) => {
                            self.console.error(format!("could not save API key: {err}"));
                        }
                    }
                }
            });
        if !open {
            self.show_settings = false;
        }
    }
}

impl eframe::App for TextmillApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_transform_events();
        self.handle_pointer_input(ctx);

        if self.attached {
            for axis in [self.editor_axis, self.console_axis] {
                if let Err(err) = self.controller.sync(axis, &self.host) {
                    log::warn!("layout sync failed: {err}");
                }
            }
        }

        let status_response = egui::TopBottomPanel::bottom("status-bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                let collapsed = self
                    .controller
                    .is_collapsed(self.console_axis)
                    .unwrap_or(false);
                let mut bar = StatusBar::new(&self.status).console_collapsed(collapsed);
                if !self.variants.is_empty() {
                    bar = bar.variant(self.variants.position(), self.variants.len());
                }
                ui.horizontal(|ui| {
                    let response = bar.show(ui);
                    if ui.small_button("Settings").clicked() {
                        self.show_settings = true;
                    }
                    response
                })
                .inner
            })
            .inner;
        if status_response.restore_console {
            if let Err(err) = self.controller.toggle_collapse(self.console_axis, &mut self.host) {
                log::warn!("console restore failed: {err}");
            }
        }
        if status_response.next_variant {
            self.output_text = self.variants.next().to_string();
        }
        if status_response.prev_variant {
            self.output_text = self.variants.prev().to_string();
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(theme::PANEL_BACKGROUND)
                    .inner_margin(egui::Margin::ZERO),
            )
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);
                self.host.record(WINDOW, f64::from(ui.max_rect().bottom()));

                let console_height =
                    self.host.extent_or(CONSOLE, CONSOLE_DEFAULT_HEIGHT) as f32;
                let console_collapsed = self.host.handle_collapsed(CONSOLE_HANDLE);
                StripBuilder::new(ui)
                    .size(Size::remainder().at_least(EDITOR_MIN_HEIGHT as f32))
                    .size(Size::exact(theme::HANDLE_THICKNESS))
                    .size(Size::exact(console_height))
                    .vertical(|mut strip| {
                        strip.cell(|ui| self.editors_cell(ui));
                        strip.cell(|ui| {
                            let response = ResizeHandle::horizontal()
                                .collapsed(console_collapsed)
                                .show(ui);
                            self.host
                                .record(CONSOLE_HANDLE, f64::from(response.rect.height()));
                            self.console_handle_rect = Some(response.rect);
                        });
                        strip.cell(|ui| self.console_cell(ui));
                    });
            });

        self.settings_window(ctx);

        if !self.attached {
            self.try_attach();
        }

        if self.controller.any_dragging() || self.in_flight > 0 {
            ctx.request_repaint();
        }
    }
}

fn gather_pointer_events(ctx: &egui::Context) -> Vec<PointerEvent> {
    ctx.input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerMoved(pos) => Some(PointerEvent::Move {
                    position: to_point(*pos),
                }),
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let button = match button {
                        egui::PointerButton::Primary => MouseButton::Left,
                        egui::PointerButton::Secondary => MouseButton::Right,
                        egui::PointerButton::Middle => MouseButton::Middle,
                        _ => return None,
                    };
                    let position = to_point(*pos);
                    Some(if *pressed {
                        PointerEvent::Down { position, button }
                    } else {
                        PointerEvent::Up { position, button }
                    })
                }
                egui::Event::PointerGone => Some(PointerEvent::Up {
                    position: Point::ZERO,
                    button: MouseButton::Left,
                }),
                _ => None,
            })
            .collect()
    })
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(f64::from(pos.x), f64::from(pos.y))
}

fn rect_contains(rect: Option<egui::Rect>, position: Point) -> bool {
    rect.is_some_and(|rect| {
        // A little slack keeps thin handles grabbable.
        rect.expand(2.0)
            .contains(egui::pos2(position.x as f32, position.y as f32))
    })
}
