//! Core library for textmill.
//!
//! Platform-agnostic logic for the text-transformation tool: the resizable
//! split-pane layout engine, pointer input state, the console log model,
//! prompt templates, credential storage, and the transform service client.
//! Rendering lives in `textmill-widgets`; the window shell in `textmill-app`.

pub mod console;
pub mod credentials;
pub mod input;
pub mod layout;
pub mod prompts;
pub mod transform;

pub use console::{ConsoleBuffer, ConsoleEntry, LogLevel};
pub use input::{InputState, MouseButton, PointerEvent};
pub use layout::{
    AxisBinding, AxisConfig, AxisId, LayoutController, LayoutError, LayoutHost, Orientation,
    RegionId, SnapConfig, SplitKind,
};
pub use transform::{TransformClient, TransformEvent, TransformRequest, TransformationList};
