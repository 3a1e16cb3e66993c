//! Colors and fixed sizes shared across the widgets.

use egui::Color32;

use textmill_core::LogLevel;

pub const HANDLE_FILL: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xe0);
pub const HANDLE_HOVER: Color32 = Color32::from_rgb(0xb0, 0xb0, 0xb0);
pub const HANDLE_COLLAPSED: Color32 = Color32::from_rgb(0xf0, 0xf0, 0xf0);
pub const HANDLE_INDICATOR: Color32 = Color32::from_rgb(0x9e, 0x9e, 0x9e);
pub const HANDLE_GRABBER: Color32 = Color32::from_rgb(0xa0, 0xa0, 0xaf);

pub const PANEL_BACKGROUND: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfa);
pub const STATUS_TEXT: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);

pub const HANDLE_THICKNESS: f32 = 6.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;

/// Text color for a console entry of the given severity.
pub fn level_color(level: LogLevel) -> Color32 {
    match level {
        LogLevel::Debug => Color32::from_rgb(0x19, 0x76, 0xd2),
        LogLevel::Info => Color32::from_rgb(0x38, 0x8e, 0x3c),
        LogLevel::Warning => Color32::from_rgb(0xfb, 0xc0, 0x2d),
        LogLevel::Error => Color32::from_rgb(0xd3, 0x2f, 0x2f),
    }
}
