//! Resizable split-pane layout engine with snap-to-collapse.
//!
//! Four pieces cooperate here. The geometry model ([`AxisStore`]) owns the
//! authoritative extents of every resizable boundary. The snap engine
//! ([`decide`]) is a pure function from a drag displacement to a decision.
//! A [`DragSession`] captures baselines for one gesture and is discarded at
//! pointer-up. The [`LayoutController`] ties them together and pushes
//! committed geometry out through the [`LayoutHost`] trait so the engine
//! never touches a UI toolkit directly.

mod axis;
mod controller;
mod drag;
mod snap;

pub use axis::{AxisConfig, AxisId, AxisStore, Orientation, PaneAxis, SnapConfig, SplitKind};
pub use controller::{AxisBinding, LayoutController, LayoutHost, RegionId};
pub use drag::DragSession;
pub use snap::{decide, SnapDecision};

use thiserror::Error;

/// Errors from axis construction, binding, and collapse control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("non-finite or negative axis config value: {field}")]
    InvalidValue { field: &'static str },
    #[error("collapsed extent {collapsed} exceeds the primary minimum {min}")]
    CollapsedExceedsMin { collapsed: f64, min: f64 },
    #[error("expanded extent {expanded} is below the primary minimum {min}")]
    ExpandedBelowMin { expanded: f64, min: f64 },
    #[error("unknown axis {0:?}")]
    UnknownAxis(AxisId),
    #[error("region {0} is not measurable by the layout host")]
    MissingRegion(RegionId),
    #[error("axis {0:?} has no attached handle")]
    Unbound(AxisId),
    #[error("axis {0:?} has no snap configuration and cannot collapse")]
    NotCollapsible(AxisId),
}
