//! The layout controller: bindings, drag routing, and the apply step.

use std::collections::HashMap;
use std::fmt;

use kurbo::Point;

use super::axis::{AxisConfig, AxisId, AxisStore, PaneAxis, SplitKind};
use super::drag::DragSession;
use super::snap::{self, SnapDecision};
use super::LayoutError;

/// Name of a visual region known to the layout host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub &'static str);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The visual surface a layout renders to.
///
/// The controller never touches a UI toolkit. The host measures regions,
/// resizes them when geometry commits, and flips the collapsed marker on
/// handles so they can change their presentation.
pub trait LayoutHost {
    /// Current rendered extent of a region along its axis orientation, if
    /// the region exists.
    fn measure(&self, region: RegionId) -> Option<f64>;
    /// Set the extent a region should render at.
    fn set_extent(&mut self, region: RegionId, extent: f64);
    /// Flip the collapsed presentation marker on a handle region.
    fn set_collapsed(&mut self, region: RegionId, collapsed: bool);
}

/// Regions one axis renders to.
#[derive(Debug, Clone, Copy)]
pub struct AxisBinding {
    /// Region sized by the primary extent.
    pub primary: RegionId,
    /// Region sized by the secondary extent.
    pub secondary: RegionId,
    /// The divider itself; carries the collapsed marker.
    pub handle: RegionId,
    /// Region whose trailing edge is the collapse edge for a drawer. Its
    /// measured extent turns pointer positions into edge distances.
    pub container: RegionId,
}

/// Owns the geometry model, the handle bindings, and at most one live drag
/// session per axis.
#[derive(Default)]
pub struct LayoutController {
    store: AxisStore,
    bindings: HashMap<AxisId, AxisBinding>,
    sessions: HashMap<AxisId, DragSession>,
}

impl LayoutController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new axis. The configuration is validated here and never
    /// again.
    pub fn create_axis(&mut self, config: AxisConfig) -> Result<AxisId, LayoutError> {
        self.store.insert(config)
    }

    /// Bind an axis to its regions, adopt the host's measured geometry, and
    /// push the initial state back out.
    ///
    /// Every named region must be measurable by the host at attach time.
    pub fn attach_handle(
        &mut self,
        id: AxisId,
        binding: AxisBinding,
        host: &mut impl LayoutHost,
    ) -> Result<(), LayoutError> {
        self.store.get(id).ok_or(LayoutError::UnknownAxis(id))?;
        for region in [binding.primary, binding.secondary, binding.handle, binding.container] {
            if host.measure(region).is_none() {
                return Err(LayoutError::MissingRegion(region));
            }
        }
        self.bindings.insert(id, binding);
        self.sync(id, host)?;
        self.apply(id, host)
    }

    pub fn axis(&self, id: AxisId) -> Option<&PaneAxis> {
        self.store.get(id)
    }

    pub fn is_collapsed(&self, id: AxisId) -> Option<bool> {
        self.store.get(id).map(|axis| axis.collapsed)
    }

    /// Whether a drag gesture is live on this axis.
    pub fn is_dragging(&self, id: AxisId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Whether any drag gesture is live.
    pub fn any_dragging(&self) -> bool {
        !self.sessions.is_empty()
    }

    /// Refresh the model from the host's measured extents.
    ///
    /// Called once per frame so external resizes (the window, a neighboring
    /// panel) keep the model honest. While a drag is live the session's
    /// commits are authoritative and the measurement is skipped.
    pub fn sync(&mut self, id: AxisId, host: &impl LayoutHost) -> Result<(), LayoutError> {
        let binding = *self.bindings.get(&id).ok_or(LayoutError::Unbound(id))?;
        if self.sessions.contains_key(&id) {
            return Ok(());
        }
        let collapsed = self
            .store
            .get(id)
            .ok_or(LayoutError::UnknownAxis(id))?
            .collapsed;
        let primary = host
            .measure(binding.primary)
            .ok_or(LayoutError::MissingRegion(binding.primary))?;
        let secondary = host
            .measure(binding.secondary)
            .ok_or(LayoutError::MissingRegion(binding.secondary))?;
        self.store.set(id, primary, secondary, collapsed)
    }

    /// Begin a drag gesture on an axis handle.
    ///
    /// A second pointer-down while a gesture is live on the same axis is
    /// ignored; the live session keeps its baselines until pointer-up.
    pub fn pointer_down(&mut self, id: AxisId, pointer: Point) -> Result<(), LayoutError> {
        self.store.get(id).ok_or(LayoutError::UnknownAxis(id))?;
        if !self.bindings.contains_key(&id) {
            return Err(LayoutError::Unbound(id));
        }
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            log::debug!("discarding non-finite pointer-down at {pointer:?}");
            return Ok(());
        }
        if self.sessions.contains_key(&id) {
            log::debug!("ignoring pointer-down on {id:?} during a live drag");
            return Ok(());
        }
        if let Some(session) = DragSession::begin(id, pointer, &self.store) {
            self.sessions.insert(id, session);
        }
        Ok(())
    }

    /// Route a pointer move to every live drag session.
    pub fn pointer_move(&mut self, pointer: Point, host: &mut impl LayoutHost) {
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return;
        }
        let ids: Vec<AxisId> = self.sessions.keys().copied().collect();
        for id in ids {
            if let Err(err) = self.drag_to(id, pointer, host) {
                log::warn!("drag on {id:?} failed: {err}");
            }
        }
    }

    /// End every live drag gesture. Committed geometry stays as the last
    /// pointer move left it.
    pub fn pointer_up(&mut self) {
        self.sessions.clear();
    }

    /// Toggle an axis between its collapsed extent and the extent it had
    /// before collapsing. Errors on axes without a snap configuration.
    pub fn toggle_collapse(
        &mut self,
        id: AxisId,
        host: &mut impl LayoutHost,
    ) -> Result<(), LayoutError> {
        if !self.bindings.contains_key(&id) {
            return Err(LayoutError::Unbound(id));
        }
        let axis = self.store.get(id).ok_or(LayoutError::UnknownAxis(id))?;
        let snap = axis.config.snap.ok_or(LayoutError::NotCollapsible(id))?;
        let (primary, secondary, collapsed, remember) = if axis.collapsed {
            let restored = axis.restore_extent;
            (
                restored,
                axis.secondary + axis.primary - restored,
                false,
                None,
            )
        } else {
            (
                snap.collapsed_extent,
                axis.secondary + axis.primary - snap.collapsed_extent,
                true,
                Some(axis.primary),
            )
        };
        self.store.set(id, primary, secondary, collapsed)?;
        if let (Some(axis), Some(extent)) = (self.store.get_mut(id), remember) {
            axis.restore_extent = extent;
        }
        self.apply(id, host)
    }

    fn drag_to(
        &mut self,
        id: AxisId,
        pointer: Point,
        host: &mut impl LayoutHost,
    ) -> Result<(), LayoutError> {
        let binding = *self.bindings.get(&id).ok_or(LayoutError::Unbound(id))?;
        let session = *self.sessions.get(&id).ok_or(LayoutError::Unbound(id))?;
        let (decision, snap_config) = {
            let axis = self.store.get(id).ok_or(LayoutError::UnknownAxis(id))?;
            let orientation = axis.config.orientation;
            let delta = session.delta(pointer, orientation);
            let edge_distance = match axis.config.kind {
                SplitKind::Drawer => host
                    .measure(binding.container)
                    .map(|total| total - orientation.along(pointer))
                    .unwrap_or(f64::INFINITY),
                SplitKind::Panes => f64::INFINITY,
            };
            (
                snap::decide(
                    axis,
                    session.baseline_primary(),
                    session.baseline_secondary(),
                    delta,
                    edge_distance,
                ),
                axis.config.snap,
            )
        };

        let baseline_total = session.baseline_primary() + session.baseline_secondary();
        match decision {
            SnapDecision::Hold => Ok(()),
            SnapDecision::Collapse => {
                let Some(snap) = snap_config else {
                    return Ok(());
                };
                self.store
                    .set(id, snap.collapsed_extent, baseline_total - snap.collapsed_extent, true)?;
                // A drag-collapse forgets the dragged size; the toggle
                // re-opens to the configured expanded extent.
                if let Some(axis) = self.store.get_mut(id) {
                    axis.restore_extent = snap.expanded_extent;
                }
                self.apply(id, host)
            }
            SnapDecision::Expand(primary) => {
                self.store.set(id, primary, baseline_total - primary, false)?;
                self.apply(id, host)
            }
            SnapDecision::Resize { primary, secondary } => {
                self.store.set(id, primary, secondary, false)?;
                self.apply(id, host)
            }
        }
    }

    /// Push committed geometry out to the host. Reads the model, writes the
    /// host, and does nothing else.
    fn apply(&self, id: AxisId, host: &mut impl LayoutHost) -> Result<(), LayoutError> {
        let binding = *self.bindings.get(&id).ok_or(LayoutError::Unbound(id))?;
        let axis = self.store.get(id).ok_or(LayoutError::UnknownAxis(id))?;
        host.set_extent(binding.primary, axis.primary);
        host.set_extent(binding.secondary, axis.secondary);
        host.set_collapsed(binding.handle, axis.collapsed);
        Ok(())
    }
}
