//! Snap decisions for divider drags.
//!
//! [`decide`] is pure: it reads the axis and the gesture, and returns what the
//! drag should do. Committing the result is the controller's job.

use super::axis::{PaneAxis, SplitKind};

/// Outcome of feeding one pointer-move to the snap engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapDecision {
    /// Snap the primary region shut to its collapsed extent.
    Collapse,
    /// Re-open a collapsed primary region to the given extent.
    Expand(f64),
    /// Ordinary resize within the minimum-size envelope.
    Resize { primary: f64, secondary: f64 },
    /// The drag hit a minimum-size wall or the input was unusable; keep the
    /// last known-good extents.
    Hold,
}

/// Decide what a drag displacement should do to `axis`.
///
/// `baseline_primary` and `baseline_secondary` are the extents captured at
/// pointer-down. `delta` is the pointer displacement along the axis
/// orientation since then, positive toward the trailing edge in screen
/// coordinates. `edge_distance` is the live pointer distance from the
/// collapse edge; pass infinity for axes with no such edge.
///
/// Collapse is checked before the minimum walls so the divider snaps shut
/// decisively instead of stalling at the minimum, and it only fires on an
/// open axis. Re-opening requires pulling away from the collapse edge, which
/// gives the gesture its one-directional hysteresis.
pub fn decide(
    axis: &PaneAxis,
    baseline_primary: f64,
    baseline_secondary: f64,
    delta: f64,
    edge_distance: f64,
) -> SnapDecision {
    if !delta.is_finite() || edge_distance.is_nan() {
        return SnapDecision::Hold;
    }

    let config = &axis.config;
    // For peer panes the primary leads the handle; for a drawer the handle
    // sits on the drawer's leading edge, so the signs flip.
    let (proposed_primary, proposed_secondary, growth) = match config.kind {
        SplitKind::Panes => (baseline_primary + delta, baseline_secondary - delta, delta),
        SplitKind::Drawer => (baseline_primary - delta, baseline_secondary + delta, -delta),
    };

    if let Some(snap) = &config.snap {
        if !axis.collapsed
            && edge_distance < snap.threshold
            && axis.primary > snap.collapsed_extent
        {
            return SnapDecision::Collapse;
        }
        if axis.collapsed && growth > 0.0 {
            return SnapDecision::Expand((snap.collapsed_extent + growth).max(config.min_primary));
        }
    }

    if proposed_primary > config.min_primary && proposed_secondary > config.min_secondary {
        SnapDecision::Resize {
            primary: proposed_primary,
            secondary: proposed_secondary,
        }
    } else {
        SnapDecision::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{AxisConfig, AxisStore, Orientation, SnapConfig, SplitKind};

    fn pane_axis(primary: f64, secondary: f64) -> PaneAxis {
        let mut store = AxisStore::new();
        let id = store
            .insert(AxisConfig {
                orientation: Orientation::Vertical,
                kind: SplitKind::Panes,
                min_primary: 300.0,
                min_secondary: 300.0,
                snap: None,
            })
            .unwrap();
        store.set(id, primary, secondary, false).unwrap();
        store.get(id).unwrap().clone()
    }

    fn drawer_axis(primary: f64, secondary: f64, collapsed: bool) -> PaneAxis {
        let mut store = AxisStore::new();
        let id = store
            .insert(AxisConfig {
                orientation: Orientation::Horizontal,
                kind: SplitKind::Drawer,
                min_primary: 80.0,
                min_secondary: 150.0,
                snap: Some(SnapConfig {
                    collapsed_extent: 0.0,
                    expanded_extent: 150.0,
                    threshold: 30.0,
                }),
            })
            .unwrap();
        store.set(id, primary, secondary, collapsed).unwrap();
        store.get(id).unwrap().clone()
    }

    #[test]
    fn peer_panes_resize_within_walls() {
        let axis = pane_axis(500.0, 500.0);
        assert_eq!(
            decide(&axis, 500.0, 500.0, 50.0, f64::INFINITY),
            SnapDecision::Resize {
                primary: 550.0,
                secondary: 450.0,
            }
        );
    }

    #[test]
    fn peer_panes_hold_at_minimum_wall() {
        let axis = pane_axis(320.0, 680.0);
        // 290 would cross the wall; exactly 300 is not strictly above it.
        assert_eq!(decide(&axis, 320.0, 680.0, -30.0, f64::INFINITY), SnapDecision::Hold);
        assert_eq!(decide(&axis, 320.0, 680.0, -20.0, f64::INFINITY), SnapDecision::Hold);
        assert_eq!(
            decide(&axis, 320.0, 680.0, -19.0, f64::INFINITY),
            SnapDecision::Resize {
                primary: 301.0,
                secondary: 699.0,
            }
        );
    }

    #[test]
    fn reversing_away_from_a_wall_resumes_resizing() {
        let axis = pane_axis(320.0, 680.0);
        assert_eq!(decide(&axis, 320.0, 680.0, -40.0, f64::INFINITY), SnapDecision::Hold);
        assert_eq!(
            decide(&axis, 320.0, 680.0, 10.0, f64::INFINITY),
            SnapDecision::Resize {
                primary: 330.0,
                secondary: 690.0,
            }
        );
    }

    #[test]
    fn drawer_snaps_shut_inside_threshold() {
        let axis = drawer_axis(120.0, 480.0, false);
        assert_eq!(decide(&axis, 150.0, 450.0, 130.0, 25.0), SnapDecision::Collapse);
    }

    #[test]
    fn collapse_takes_precedence_over_resize() {
        // The proposed extents are still legal, but the pointer is at the edge.
        let axis = drawer_axis(200.0, 400.0, false);
        assert_eq!(decide(&axis, 200.0, 400.0, 10.0, 20.0), SnapDecision::Collapse);
    }

    #[test]
    fn no_collapse_at_exact_threshold() {
        let axis = drawer_axis(120.0, 480.0, false);
        let decision = decide(&axis, 150.0, 450.0, 30.0, 30.0);
        assert_ne!(decision, SnapDecision::Collapse);
    }

    #[test]
    fn collapsed_drawer_holds_until_pulled_open() {
        let axis = drawer_axis(0.0, 600.0, true);
        // Still pushed toward the edge: no re-open, no resize below minimum.
        assert_eq!(decide(&axis, 150.0, 450.0, 135.0, 15.0), SnapDecision::Hold);
    }

    #[test]
    fn collapsed_drawer_expands_when_pulled_away() {
        let axis = drawer_axis(0.0, 600.0, true);
        // 40px of growth is below the 80px minimum and gets promoted to it.
        assert_eq!(decide(&axis, 150.0, 450.0, -40.0, 560.0), SnapDecision::Expand(80.0));
        assert_eq!(decide(&axis, 150.0, 450.0, -150.0, 450.0), SnapDecision::Expand(150.0));
    }

    #[test]
    fn already_collapsed_drawer_never_recollapses() {
        let axis = drawer_axis(0.0, 600.0, true);
        assert_ne!(decide(&axis, 0.0, 600.0, 5.0, 10.0), SnapDecision::Collapse);
    }

    #[test]
    fn non_finite_delta_holds() {
        let axis = drawer_axis(150.0, 450.0, false);
        assert_eq!(decide(&axis, 150.0, 450.0, f64::NAN, 100.0), SnapDecision::Hold);
        assert_eq!(decide(&axis, 150.0, 450.0, f64::INFINITY, 100.0), SnapDecision::Hold);
    }
}
