//! Divider handle between resizable regions.
//!
//! The handle only draws itself and reports hover for the cursor icon; drag
//! gestures are routed through the layout controller from raw pointer
//! events, so the widget allocates with hover sense only.

use egui::{vec2, CursorIcon, Pos2, Rect, Response, Sense, Ui};

use textmill_core::Orientation;

use crate::theme;

/// A divider bar with a grabber indicator.
pub struct ResizeHandle {
    orientation: Orientation,
    collapsed: bool,
    thickness: f32,
}

impl ResizeHandle {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            collapsed: false,
            thickness: theme::HANDLE_THICKNESS,
        }
    }

    /// A vertical divider between side-by-side regions.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// A horizontal divider between stacked regions.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Draw in the collapsed presentation.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let size = match self.orientation {
            Orientation::Horizontal => vec2(ui.available_width(), self.thickness),
            Orientation::Vertical => vec2(self.thickness, ui.available_height()),
        };
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        if ui.is_rect_visible(rect) {
            let fill = if self.collapsed {
                theme::HANDLE_COLLAPSED
            } else if response.hovered() {
                theme::HANDLE_HOVER
            } else {
                theme::HANDLE_FILL
            };
            ui.painter().rect_filled(rect, 0.0, fill);
            self.paint_grabber(ui, rect);
        }

        let cursor = match self.orientation {
            Orientation::Horizontal => CursorIcon::ResizeVertical,
            Orientation::Vertical => CursorIcon::ResizeHorizontal,
        };
        response.on_hover_cursor(cursor)
    }

    fn paint_grabber(&self, ui: &Ui, rect: Rect) {
        let color = if self.collapsed {
            theme::HANDLE_INDICATOR
        } else {
            theme::HANDLE_GRABBER
        };
        let center = rect.center();
        let spacing = 5.0;
        let radius = 1.5;
        for offset in [-spacing, 0.0, spacing] {
            let dot = match self.orientation {
                Orientation::Horizontal => Pos2::new(center.x + offset, center.y),
                Orientation::Vertical => Pos2::new(center.x, center.y + offset),
            };
            ui.painter().circle_filled(dot, radius, color);
        }
    }
}
