//! Pannable/zoomable viewport over the layout plane.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A point in surface (screen pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

/// Pixel size of the rendering surface the viewport is projected onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

/// Pointer button, as reported by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button; the only one that starts a pan.
    Primary,
    Secondary,
    Auxiliary,
}

/// Rectangular window into the unbounded layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Frame every freshly rendered graph starts from.
    pub const INITIAL: Viewport = Viewport {
        x: -150.0,
        y: -150.0,
        width: 300.0,
        height: 300.0,
    };

    /// Map a surface point into plane coordinates under this viewport.
    pub fn to_plane(&self, screen: ScreenPos, surface: SurfaceSize) -> (f64, f64) {
        (
            self.x + screen.x / surface.width * self.width,
            self.y + screen.y / surface.height * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::INITIAL
    }
}

/// Drag state: either idle or panning from a remembered pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Panning { last: ScreenPos },
}

/// Translates pointer and wheel input into viewport transforms.
///
/// One controller instance exists per rendered graph and owns the viewport
/// for its lifetime; rendering a new graph replaces the controller, so state
/// never leaks across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    viewport: Viewport,
    surface: SurfaceSize,
    state: DragState,
}

impl ViewportController {
    /// Create a controller for a surface of the given pixel size.
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            viewport: Viewport::INITIAL,
            surface,
            state: DragState::Idle,
        }
    }

    /// Current viewport frame.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether a pan is in progress.
    pub fn is_panning(&self) -> bool {
        matches!(self.state, DragState::Panning { .. })
    }

    /// Restore the initial frame, e.g. when a new graph is rendered.
    pub fn reset(&mut self) {
        self.viewport = Viewport::INITIAL;
        self.state = DragState::Idle;
    }

    /// Primary-button press starts a pan from this position.
    pub fn pointer_pressed(&mut self, button: PointerButton, pos: ScreenPos) {
        if button == PointerButton::Primary {
            self.state = DragState::Panning { last: pos };
        }
    }

    /// Pointer movement pans the viewport by the incremental delta since the
    /// previous event, scaled from surface pixels to plane units.
    pub fn pointer_moved(&mut self, pos: ScreenPos) {
        let DragState::Panning { last } = self.state else {
            return;
        };
        let dx = (pos.x - last.x) * self.viewport.width / self.surface.width;
        let dy = (pos.y - last.y) * self.viewport.height / self.surface.height;
        self.viewport.x -= dx;
        self.viewport.y -= dy;
        self.state = DragState::Panning { last: pos };
        trace!(dx, dy, "pan");
    }

    /// Button release ends the pan.
    pub fn pointer_released(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pointer leaving the surface ends the pan.
    pub fn pointer_left(&mut self) {
        self.state = DragState::Idle;
    }

    /// Wheel zoom about the cursor: the plane point under the cursor stays
    /// fixed while the frame scales by 1.1 (wheel down) or 0.9 (wheel up).
    /// Not gated on drag state, and no zoom bounds are enforced.
    pub fn wheel(&mut self, delta_y: f64, pos: ScreenPos) {
        let scale = if delta_y > 0.0 { 1.1 } else { 0.9 };
        let (px, py) = self.viewport.to_plane(pos, self.surface);

        self.viewport.x = px - (px - self.viewport.x) * scale;
        self.viewport.y = py - (py - self.viewport.y) * scale;
        self.viewport.width *= scale;
        self.viewport.height *= scale;
        trace!(scale, "zoom");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: SurfaceSize = SurfaceSize {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn pan_moves_viewport_against_drag_direction() {
        let mut ctrl = ViewportController::new(SURFACE);
        ctrl.pointer_pressed(PointerButton::Primary, ScreenPos { x: 100.0, y: 100.0 });
        ctrl.pointer_moved(ScreenPos { x: 180.0, y: 100.0 });

        // 80 px right over an 800 px surface showing 300 plane units.
        let vp = ctrl.viewport();
        assert!((vp.x - (-150.0 - 30.0)).abs() < 1e-9);
        assert_eq!(vp.y, -150.0);
    }

    #[test]
    fn pan_deltas_are_incremental() {
        let mut ctrl = ViewportController::new(SURFACE);
        ctrl.pointer_pressed(PointerButton::Primary, ScreenPos { x: 0.0, y: 0.0 });
        ctrl.pointer_moved(ScreenPos { x: 40.0, y: 0.0 });
        ctrl.pointer_moved(ScreenPos { x: 80.0, y: 0.0 });

        let mut once = ViewportController::new(SURFACE);
        once.pointer_pressed(PointerButton::Primary, ScreenPos { x: 0.0, y: 0.0 });
        once.pointer_moved(ScreenPos { x: 80.0, y: 0.0 });

        assert!((ctrl.viewport().x - once.viewport().x).abs() < 1e-9);
    }

    #[test]
    fn secondary_button_does_not_start_a_pan() {
        let mut ctrl = ViewportController::new(SURFACE);
        ctrl.pointer_pressed(PointerButton::Secondary, ScreenPos::default());
        assert!(!ctrl.is_panning());
        ctrl.pointer_moved(ScreenPos { x: 50.0, y: 50.0 });
        assert_eq!(ctrl.viewport(), Viewport::INITIAL);
    }

    #[test]
    fn release_and_leave_both_end_the_pan() {
        for leave in [false, true] {
            let mut ctrl = ViewportController::new(SURFACE);
            ctrl.pointer_pressed(PointerButton::Primary, ScreenPos::default());
            assert!(ctrl.is_panning());
            if leave {
                ctrl.pointer_left();
            } else {
                ctrl.pointer_released();
            }
            assert!(!ctrl.is_panning());

            // Moves after the pan ended must not pan.
            ctrl.pointer_moved(ScreenPos { x: 300.0, y: 300.0 });
            assert_eq!(ctrl.viewport(), Viewport::INITIAL);
        }
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let cursor = ScreenPos { x: 275.0, y: 130.0 };

        for delta in [120.0, -120.0] {
            let mut ctrl = ViewportController::new(SURFACE);
            // Start from a non-trivial frame: pan a bit and zoom twice.
            ctrl.pointer_pressed(PointerButton::Primary, ScreenPos { x: 10.0, y: 10.0 });
            ctrl.pointer_moved(ScreenPos { x: 90.0, y: 35.0 });
            ctrl.pointer_released();
            ctrl.wheel(120.0, ScreenPos { x: 400.0, y: 300.0 });

            let before = ctrl.viewport().to_plane(cursor, SURFACE);
            ctrl.wheel(delta, cursor);
            let after = ctrl.viewport().to_plane(cursor, SURFACE);

            assert!((before.0 - after.0).abs() < 1e-6);
            assert!((before.1 - after.1).abs() < 1e-6);
        }
    }

    #[test]
    fn zoom_scales_frame_size() {
        let mut ctrl = ViewportController::new(SURFACE);
        ctrl.wheel(1.0, ScreenPos { x: 400.0, y: 300.0 });
        assert!((ctrl.viewport().width - 330.0).abs() < 1e-9);
        ctrl.wheel(-1.0, ScreenPos { x: 400.0, y: 300.0 });
        assert!((ctrl.viewport().width - 297.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_works_mid_pan() {
        let mut ctrl = ViewportController::new(SURFACE);
        ctrl.pointer_pressed(PointerButton::Primary, ScreenPos::default());
        ctrl.wheel(1.0, ScreenPos { x: 100.0, y: 100.0 });
        assert!(ctrl.is_panning());
        assert!((ctrl.viewport().width - 330.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_initial_frame() {
        let mut ctrl = ViewportController::new(SURFACE);
        ctrl.wheel(1.0, ScreenPos { x: 10.0, y: 10.0 });
        ctrl.pointer_pressed(PointerButton::Primary, ScreenPos::default());
        ctrl.reset();
        assert_eq!(ctrl.viewport(), Viewport::INITIAL);
        assert!(!ctrl.is_panning());
    }
}
