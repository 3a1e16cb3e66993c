//! The egui side of the layout host.

use std::collections::HashMap;

use textmill_core::{LayoutHost, RegionId};

pub const EDITOR_A: RegionId = RegionId("editor-a");
pub const EDITOR_B: RegionId = RegionId("editor-b");
pub const EDITOR_HANDLE: RegionId = RegionId("editor-handle");
pub const EDITORS: RegionId = RegionId("editors");
pub const CONSOLE: RegionId = RegionId("console");
pub const CONSOLE_HANDLE: RegionId = RegionId("console-handle");
pub const WINDOW: RegionId = RegionId("window");

/// Region extents as the shell last rendered them or the controller last
/// committed them. The render pass records measurements into the same map
/// the controller writes, so the two stay reconciled frame over frame.
#[derive(Default)]
pub struct PaneHost {
    extents: HashMap<RegionId, f64>,
    collapsed: HashMap<RegionId, bool>,
}

impl PaneHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measured extent after rendering.
    pub fn record(&mut self, region: RegionId, extent: f64) {
        self.extents.insert(region, extent);
    }

    pub fn extent_or(&self, region: RegionId, default: f64) -> f64 {
        self.extents.get(&region).copied().unwrap_or(default)
    }

    pub fn is_measurable(&self, regions: &[RegionId]) -> bool {
        regions.iter().all(|region| self.extents.contains_key(region))
    }

    pub fn handle_collapsed(&self, region: RegionId) -> bool {
        self.collapsed.get(&region).copied().unwrap_or(false)
    }
}

impl LayoutHost for PaneHost {
    fn measure(&self, region: RegionId) -> Option<f64> {
        self.extents.get(&region).copied()
    }

    fn set_extent(&mut self, region: RegionId, extent: f64) {
        self.extents.insert(region, extent);
    }

    fn set_collapsed(&mut self, region: RegionId, collapsed: bool) {
        self.collapsed.insert(region, collapsed);
    }
}
