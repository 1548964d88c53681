//! src/overlay/panel.rs
//! ============================================================================
//! # OverlayPanel: Floating Surface Presentation State Machine
//!
//! Explicit finite-state machine for the overlay's visibility lifecycle:
//! `Hidden → Showing → Visible → Hiding → Hidden`. `Showing`/`Hiding` are
//! transient animation phases; completion is reported back through
//! `finish_show`/`finish_hide` rather than nested callbacks, so the
//! reentrancy guards and transitions are independently testable.
//!
//! There is no animation cancellation: a request that arrives while an
//! animation is in flight is dropped by the phase guards. Pin is orthogonal
//! to phase and only changes what happens on focus loss.

use std::time::Duration;

use crate::overlay::geometry::{Point, Rect, ScreenProbe, Size};

/// Horizontal/vertical offset of the animation start position relative to
/// the anchor target.
const SHOW_OFFSET: f64 = 200.0;
/// Outward drift applied while fading out.
const HIDE_OFFSET: f64 = 20.0;

/// Visibility lifecycle phase. Exactly one overlay exists per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding,
}

/// Everything the presentation layer needs to run a show animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowPlan {
    /// Offset position the surface starts from.
    pub start: Point,
    /// Final anchored position.
    pub target: Point,
    /// Surface size after any height clamping.
    pub frame: Size,
    pub duration: Duration,
}

/// Everything the presentation layer needs to run a hide animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HidePlan {
    /// Position the surface drifts out to while fading.
    pub target: Point,
    pub duration: Duration,
}

#[derive(Debug)]
pub struct OverlayPanel {
    phase: PanelPhase,
    pinned: bool,
    frame: Size,
    /// Anchored origin of the last successful show.
    origin: Point,
    duration: Duration,
}

impl OverlayPanel {
    pub fn new(frame: Size, duration: Duration, pinned: bool) -> Self {
        Self {
            phase: PanelPhase::Hidden,
            pinned,
            frame,
            origin: Point::default(),
            duration,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    /// True while the surface occupies the screen (including both
    /// animation phases).
    pub fn is_on_screen(&self) -> bool {
        matches!(self.phase, PanelPhase::Showing | PanelPhase::Visible)
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Pin toggling never changes visibility by itself.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    pub fn toggle_pinned(&mut self) -> bool {
        self.pinned = !self.pinned;
        self.pinned
    }

    /// Starts the show animation, anchored top-right to the pointer within
    /// the active screen's work area.
    ///
    /// No-op (`None`) while already showing or visible, and when the probe
    /// cannot supply a work area (nothing renders, nothing fails). The
    /// surface height is clamped to the work-area height.
    pub fn begin_show(&mut self, probe: &dyn ScreenProbe) -> Option<ShowPlan> {
        if self.phase != PanelPhase::Hidden {
            return None;
        }
        let area: Rect = probe.work_area()?;

        if self.frame.height > area.size.height {
            self.frame.height = area.size.height;
        }

        // Anchor to the pointer, or the work area's top-right corner when
        // the pointer is unavailable.
        let anchor: Point = probe
            .pointer()
            .unwrap_or_else(|| Point::new(area.max_x(), area.max_y()));

        let target: Point = Point::new(anchor.x - self.frame.width, anchor.y - self.frame.height);
        let start: Point = Point::new(target.x + SHOW_OFFSET, target.y + SHOW_OFFSET);

        self.origin = target;
        self.phase = PanelPhase::Showing;
        Some(ShowPlan {
            start,
            target,
            frame: self.frame,
            duration: self.duration,
        })
    }

    /// Show animation completed. Stale completions (phase moved on) are
    /// ignored.
    pub fn finish_show(&mut self) {
        if self.phase == PanelPhase::Showing {
            self.phase = PanelPhase::Visible;
        }
    }

    /// Starts the hide animation: fade plus a small outward drift.
    /// No-op (`None`) unless currently visible; requests during an in-flight
    /// animation are dropped.
    pub fn begin_hide(&mut self) -> Option<HidePlan> {
        if self.phase != PanelPhase::Visible {
            return None;
        }
        self.phase = PanelPhase::Hiding;
        Some(HidePlan {
            target: Point::new(self.origin.x + HIDE_OFFSET, self.origin.y + HIDE_OFFSET),
            duration: self.duration,
        })
    }

    /// Hide animation completed.
    pub fn finish_hide(&mut self) {
        if self.phase == PanelPhase::Hiding {
            self.phase = PanelPhase::Hidden;
        }
    }

    /// Focus-loss signal: auto-hide unless pinned.
    pub fn focus_lost(&mut self) -> Option<HidePlan> {
        if self.pinned {
            return None;
        }
        self.begin_hide()
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::geometry::{FixedProbe, NullProbe};

    fn probe() -> FixedProbe {
        FixedProbe {
            pointer: Some(Point::new(1800.0, 1000.0)),
            work_area: Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)),
        }
    }

    fn panel() -> OverlayPanel {
        OverlayPanel::new(Size::new(450.0, 800.0), Duration::from_millis(100), false)
    }

    #[test]
    fn full_cycle() {
        let mut panel: OverlayPanel = panel();
        assert_eq!(panel.phase(), PanelPhase::Hidden);

        let plan: ShowPlan = panel.begin_show(&probe()).unwrap();
        assert_eq!(panel.phase(), PanelPhase::Showing);
        // Top-right anchored: pointer minus surface size.
        assert_eq!(plan.target, Point::new(1350.0, 200.0));
        assert_eq!(plan.start, Point::new(1550.0, 400.0));

        panel.finish_show();
        assert_eq!(panel.phase(), PanelPhase::Visible);

        let hide: HidePlan = panel.begin_hide().unwrap();
        assert_eq!(panel.phase(), PanelPhase::Hiding);
        assert_eq!(hide.target, Point::new(1370.0, 220.0));

        panel.finish_hide();
        assert_eq!(panel.phase(), PanelPhase::Hidden);
    }

    #[test]
    fn double_show_yields_a_single_visible_transition() {
        let mut panel: OverlayPanel = panel();
        assert!(panel.begin_show(&probe()).is_some());
        // Second request before the animation completes is dropped.
        assert!(panel.begin_show(&probe()).is_none());

        panel.finish_show();
        assert_eq!(panel.phase(), PanelPhase::Visible);
        // And a show while visible is also a no-op.
        assert!(panel.begin_show(&probe()).is_none());
    }

    #[test]
    fn hide_requests_are_dropped_outside_visible() {
        let mut panel: OverlayPanel = panel();
        assert!(panel.begin_hide().is_none()); // hidden

        panel.begin_show(&probe());
        assert!(panel.begin_hide().is_none()); // showing, in-flight

        panel.finish_show();
        assert!(panel.begin_hide().is_some());
        assert!(panel.begin_hide().is_none()); // hiding, in-flight
    }

    #[test]
    fn height_clamps_to_work_area() {
        let mut panel: OverlayPanel =
            OverlayPanel::new(Size::new(450.0, 2000.0), Duration::from_millis(100), false);
        let plan: ShowPlan = panel.begin_show(&probe()).unwrap();
        assert_eq!(plan.frame.height, 1080.0);
    }

    #[test]
    fn missing_geometry_degrades_to_noop() {
        let mut panel: OverlayPanel = panel();
        assert!(panel.begin_show(&NullProbe).is_none());
        assert_eq!(panel.phase(), PanelPhase::Hidden);
    }

    #[test]
    fn missing_pointer_anchors_to_work_area_corner() {
        let mut panel: OverlayPanel = panel();
        let no_pointer: FixedProbe = FixedProbe {
            pointer: None,
            work_area: Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)),
        };
        let plan: ShowPlan = panel.begin_show(&no_pointer).unwrap();
        assert_eq!(plan.target, Point::new(1920.0 - 450.0, 1080.0 - 800.0));
    }

    #[test]
    fn focus_loss_hides_unless_pinned() {
        let mut panel: OverlayPanel = panel();
        panel.begin_show(&probe());
        panel.finish_show();

        panel.set_pinned(true);
        assert!(panel.focus_lost().is_none());
        assert_eq!(panel.phase(), PanelPhase::Visible);

        panel.set_pinned(false);
        assert!(panel.focus_lost().is_some());
        assert_eq!(panel.phase(), PanelPhase::Hiding);
    }

    #[test]
    fn pin_toggle_does_not_change_phase() {
        let mut panel: OverlayPanel = panel();
        assert!(panel.toggle_pinned());
        assert_eq!(panel.phase(), PanelPhase::Hidden);
        panel.begin_show(&probe());
        panel.finish_show();
        assert!(!panel.toggle_pinned());
        assert_eq!(panel.phase(), PanelPhase::Visible);
    }
}
