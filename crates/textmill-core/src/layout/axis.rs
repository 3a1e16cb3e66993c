//! Axis configuration and the geometry model.
//!
//! An axis is one resizable boundary between two regions. The store is the
//! single writer for live extents; everything else reads from it.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::LayoutError;

/// Direction of a divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Vertical divider between side-by-side regions; measures horizontal
    /// pointer motion.
    Vertical,
    /// Horizontal divider between stacked regions; measures vertical motion.
    Horizontal,
}

impl Orientation {
    /// The component of a pointer position measured along this axis.
    pub fn along(self, point: Point) -> f64 {
        match self {
            Orientation::Vertical => point.x,
            Orientation::Horizontal => point.y,
        }
    }
}

/// How the two extents of an axis trade space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitKind {
    /// Two peer panes share a fixed total; dragging toward the trailing edge
    /// grows the primary at the secondary's expense.
    Panes,
    /// The primary region is a drawer anchored to the trailing edge of its
    /// container; dragging toward that edge shrinks it and the secondary
    /// absorbs the remainder.
    Drawer,
}

/// Collapse behavior for an axis. Axes without one never collapse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Extent of the primary region while collapsed.
    pub collapsed_extent: f64,
    /// Extent the toggle restores when no better size is known.
    pub expanded_extent: f64,
    /// Pointer distance from the collapse edge below which a drag snaps shut.
    pub threshold: f64,
}

/// Static configuration for one resizable boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub orientation: Orientation,
    pub kind: SplitKind,
    /// Smallest extent the primary region may be dragged to.
    pub min_primary: f64,
    /// Smallest extent the secondary region may be dragged to.
    pub min_secondary: f64,
    pub snap: Option<SnapConfig>,
}

impl AxisConfig {
    /// Reject bad configurations at creation time instead of letting them
    /// misbehave mid-drag.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (field, value) in [
            ("min_primary", self.min_primary),
            ("min_secondary", self.min_secondary),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidValue { field });
            }
        }
        if let Some(snap) = &self.snap {
            for (field, value) in [
                ("collapsed_extent", snap.collapsed_extent),
                ("expanded_extent", snap.expanded_extent),
                ("threshold", snap.threshold),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(LayoutError::InvalidValue { field });
                }
            }
            if snap.collapsed_extent > self.min_primary {
                return Err(LayoutError::CollapsedExceedsMin {
                    collapsed: snap.collapsed_extent,
                    min: self.min_primary,
                });
            }
            if snap.expanded_extent < self.min_primary {
                return Err(LayoutError::ExpandedBelowMin {
                    expanded: snap.expanded_extent,
                    min: self.min_primary,
                });
            }
        }
        Ok(())
    }
}

/// One resizable boundary with its live extents.
#[derive(Debug, Clone)]
pub struct PaneAxis {
    pub config: AxisConfig,
    /// Extent of the region the handle leads.
    pub primary: f64,
    /// Extent of the opposing region.
    pub secondary: f64,
    /// Whether the primary region is snapped shut.
    pub collapsed: bool,
    /// Extent the toggle restores when expanding; recorded on collapse.
    pub(crate) restore_extent: f64,
}

impl PaneAxis {
    pub fn restore_extent(&self) -> f64 {
        self.restore_extent
    }
}

/// Handle to an axis in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisId(usize);

/// Every resizable boundary in a layout. [`AxisStore::set`] is the only
/// place live extents change.
#[derive(Debug, Default)]
pub struct AxisStore {
    axes: Vec<PaneAxis>,
}

impl AxisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, config: AxisConfig) -> Result<AxisId, LayoutError> {
        config.validate()?;
        let initial = config
            .snap
            .map(|snap| snap.expanded_extent)
            .unwrap_or(config.min_primary)
            .max(config.min_primary);
        self.axes.push(PaneAxis {
            config,
            primary: initial,
            secondary: config.min_secondary,
            collapsed: false,
            restore_extent: initial,
        });
        Ok(AxisId(self.axes.len() - 1))
    }

    pub fn get(&self, id: AxisId) -> Option<&PaneAxis> {
        self.axes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: AxisId) -> Option<&mut PaneAxis> {
        self.axes.get_mut(id.0)
    }

    /// Commit new extents. Both extents are clamped to their minimums; a
    /// collapse suspends the minimum for the primary extent only. Non-finite
    /// inputs are discarded and the last known-good state kept.
    pub fn set(
        &mut self,
        id: AxisId,
        primary: f64,
        secondary: f64,
        collapsed: bool,
    ) -> Result<(), LayoutError> {
        let axis = self.axes.get_mut(id.0).ok_or(LayoutError::UnknownAxis(id))?;
        if !primary.is_finite() || !secondary.is_finite() {
            log::debug!("discarding non-finite axis extents {primary}/{secondary}");
            return Ok(());
        }
        axis.primary = if collapsed {
            primary.max(0.0)
        } else {
            primary.max(axis.config.min_primary)
        };
        axis.secondary = secondary.max(axis.config.min_secondary);
        axis.collapsed = collapsed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawer_config() -> AxisConfig {
        AxisConfig {
            orientation: Orientation::Horizontal,
            kind: SplitKind::Drawer,
            min_primary: 80.0,
            min_secondary: 150.0,
            snap: Some(SnapConfig {
                collapsed_extent: 0.0,
                expanded_extent: 150.0,
                threshold: 30.0,
            }),
        }
    }

    #[test]
    fn insert_seeds_expanded_extent() {
        let mut store = AxisStore::new();
        let id = store.insert(drawer_config()).unwrap();
        let axis = store.get(id).unwrap();
        assert_eq!(axis.primary, 150.0);
        assert!(!axis.collapsed);
    }

    #[test]
    fn validate_rejects_negative_minimum() {
        let config = AxisConfig {
            min_primary: -1.0,
            ..drawer_config()
        };
        assert_eq!(
            config.validate(),
            Err(LayoutError::InvalidValue {
                field: "min_primary"
            })
        );
    }

    #[test]
    fn validate_rejects_collapsed_above_minimum() {
        let mut config = drawer_config();
        config.snap = Some(SnapConfig {
            collapsed_extent: 100.0,
            expanded_extent: 150.0,
            threshold: 30.0,
        });
        assert!(matches!(
            config.validate(),
            Err(LayoutError::CollapsedExceedsMin { .. })
        ));
    }

    #[test]
    fn validate_rejects_non_finite_threshold() {
        let mut config = drawer_config();
        config.snap = Some(SnapConfig {
            collapsed_extent: 0.0,
            expanded_extent: 150.0,
            threshold: f64::NAN,
        });
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidValue { field: "threshold" })
        ));
    }

    #[test]
    fn set_clamps_to_minimums() {
        let mut store = AxisStore::new();
        let id = store.insert(drawer_config()).unwrap();
        store.set(id, 40.0, 60.0, false).unwrap();
        let axis = store.get(id).unwrap();
        assert_eq!(axis.primary, 80.0);
        assert_eq!(axis.secondary, 150.0);
    }

    #[test]
    fn set_suspends_primary_minimum_while_collapsed() {
        let mut store = AxisStore::new();
        let id = store.insert(drawer_config()).unwrap();
        store.set(id, 0.0, 600.0, true).unwrap();
        let axis = store.get(id).unwrap();
        assert_eq!(axis.primary, 0.0);
        assert!(axis.collapsed);
    }

    #[test]
    fn set_discards_non_finite_extents() {
        let mut store = AxisStore::new();
        let id = store.insert(drawer_config()).unwrap();
        store.set(id, 200.0, 400.0, false).unwrap();
        store.set(id, f64::NAN, 400.0, false).unwrap();
        store.set(id, 200.0, f64::INFINITY, false).unwrap();
        let axis = store.get(id).unwrap();
        assert_eq!(axis.primary, 200.0);
        assert_eq!(axis.secondary, 400.0);
    }

    #[test]
    fn set_unknown_axis_errors() {
        let mut empty = AxisStore::new();
        let mut other = AxisStore::new();
        let id = other.insert(drawer_config()).unwrap();
        assert_eq!(
            empty.set(id, 100.0, 100.0, false),
            Err(LayoutError::UnknownAxis(id))
        );
    }

    #[test]
    fn orientation_selects_pointer_component() {
        let point = Point::new(12.0, 34.0);
        assert_eq!(Orientation::Vertical.along(point), 12.0);
        assert_eq!(Orientation::Horizontal.along(point), 34.0);
    }
}
