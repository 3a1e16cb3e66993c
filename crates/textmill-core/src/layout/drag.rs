//! Transient per-gesture drag state.

use kurbo::Point;

use super::axis::{AxisId, AxisStore, Orientation};

/// State captured at pointer-down on a handle.
///
/// A session holds no cross-gesture state; the controller discards it at
/// pointer-up and a fresh gesture captures fresh baselines.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    axis: AxisId,
    origin: Point,
    baseline_primary: f64,
    baseline_secondary: f64,
}

impl DragSession {
    /// Capture baselines from the geometry model at gesture start.
    pub(crate) fn begin(axis: AxisId, origin: Point, store: &AxisStore) -> Option<Self> {
        let pane = store.get(axis)?;
        Some(Self {
            axis,
            origin,
            baseline_primary: pane.primary,
            baseline_secondary: pane.secondary,
        })
    }

    pub fn axis(&self) -> AxisId {
        self.axis
    }

    pub fn baseline_primary(&self) -> f64 {
        self.baseline_primary
    }

    pub fn baseline_secondary(&self) -> f64 {
        self.baseline_secondary
    }

    /// Pointer displacement along the axis orientation since the gesture
    /// began, positive toward the trailing edge.
    pub(crate) fn delta(&self, pointer: Point, orientation: Orientation) -> f64 {
        orientation.along(pointer) - orientation.along(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{AxisConfig, SplitKind};

    #[test]
    fn baselines_come_from_the_store() {
        let mut store = AxisStore::new();
        let id = store
            .insert(AxisConfig {
                orientation: Orientation::Horizontal,
                kind: SplitKind::Drawer,
                min_primary: 80.0,
                min_secondary: 150.0,
                snap: None,
            })
            .unwrap();
        store.set(id, 120.0, 480.0, false).unwrap();

        let session = DragSession::begin(id, Point::new(400.0, 450.0), &store).unwrap();
        assert_eq!(session.baseline_primary(), 120.0);
        assert_eq!(session.baseline_secondary(), 480.0);
        assert_eq!(session.delta(Point::new(400.0, 470.0), Orientation::Horizontal), 20.0);
        assert_eq!(session.delta(Point::new(380.0, 470.0), Orientation::Vertical), -20.0);
    }
}
