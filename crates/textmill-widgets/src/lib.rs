//! egui widgets for textmill.
//!
//! Everything here is presentation only. Layout geometry is decided by
//! `textmill-core`; these widgets just draw the regions they are given.

pub mod console;
pub mod controls;
pub mod editor;
pub mod handle;
pub mod theme;

pub use console::ConsolePanel;
pub use controls::{StatusBar, StatusBarResponse, TransformBar, TransformBarResponse};
pub use editor::EditorPane;
pub use handle::ResizeHandle;
