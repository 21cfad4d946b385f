//! Pan/zoom state for the poster viewer.
//!
//! The poster is drawn with `translate(offset) scale(scale)` and a transform
//! origin at the top-left corner, so a content point `p` lands on screen at
//! `offset + p * scale`. All inputs are in container-relative pixels.
//!
//! ## Modes
//!
//! ```text
//! Idle -- pointer_down (scale > 1) --> Dragging -- pointer_up/leave --> Idle
//! ```
//!
//! A two-finger pinch is tracked beside the mode and scales relative to the
//! scale at gesture start. It does not recenter on the pinch midpoint.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 4.0;
/// Scale change per wheel delta unit.
pub const WHEEL_SENSITIVITY: f64 = 0.001;
pub const DOUBLE_CLICK_SCALE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Idle,
    Dragging,
}

/// Cursor hint for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    ZoomIn,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Pinch {
    start_distance: f64,
    start_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomView {
    scale: f64,
    offset: Point,
    mode: Mode,
    /// Pointer position minus offset at grab time.
    anchor: Point,
    pinch: Option<Pinch>,
}

impl Default for ZoomView {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            offset: Point::ORIGIN,
            mode: Mode::Idle,
            anchor: Point::ORIGIN,
            pinch: None,
        }
    }
}

fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

impl ZoomView {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_SCALE
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Zoom indicator value, e.g. `250` for 2.5x.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn cursor(&self) -> Cursor {
        match (self.is_zoomed(), self.mode) {
            (false, _) => Cursor::ZoomIn,
            (true, Mode::Dragging) => Cursor::Grabbing,
            (true, Mode::Idle) => Cursor::Grab,
        }
    }

    /// Where content point `p` is drawn on screen.
    pub fn to_screen(&self, p: Point) -> Point {
        self.offset + p * self.scale
    }

    /// Which content point is drawn at screen point `p`.
    pub fn to_content(&self, p: Point) -> Point {
        (p - self.offset) * (1.0 / self.scale)
    }

    // ── Mouse ────────────────────────────────────────────────────────

    /// Zoom toward `cursor`. Returns false when the scale is already at the
    /// clamp limit in that direction.
    pub fn wheel(&mut self, cursor: Point, delta_y: f64) -> bool {
        let new_scale = clamp_scale(self.scale - delta_y * WHEEL_SENSITIVITY);
        if new_scale == self.scale {
            return false;
        }
        let ratio = new_scale / self.scale;
        self.offset = cursor - (cursor - self.offset) * ratio;
        self.scale = new_scale;
        self.settle();
        true
    }

    pub fn pointer_down(&mut self, p: Point) {
        if self.is_zoomed() {
            self.mode = Mode::Dragging;
            self.anchor = p - self.offset;
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        if self.mode == Mode::Dragging && self.is_zoomed() {
            self.offset = p - self.anchor;
            return true;
        }
        false
    }

    pub fn pointer_up(&mut self) {
        self.mode = Mode::Idle;
        self.pinch = None;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Toggle between fit and 2x centered on `p`.
    pub fn double_click(&mut self, p: Point) {
        if self.is_zoomed() {
            self.reset();
        } else {
            self.scale = DOUBLE_CLICK_SCALE;
            self.offset = p - p * DOUBLE_CLICK_SCALE;
        }
    }

    // ── Touch ────────────────────────────────────────────────────────

    pub fn touch_start(&mut self, touches: &[Point]) {
        match touches {
            [a, b] => {
                self.mode = Mode::Idle;
                self.pinch = Some(Pinch {
                    start_distance: a.distance(*b),
                    start_scale: self.scale,
                });
            }
            [p] if self.is_zoomed() => {
                self.mode = Mode::Dragging;
                self.anchor = *p - self.offset;
            }
            _ => {}
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        match (touches, self.pinch) {
            ([a, b], Some(pinch)) if pinch.start_distance > 0.0 => {
                let ratio = a.distance(*b) / pinch.start_distance;
                self.scale = clamp_scale(pinch.start_scale * ratio);
                self.settle();
                true
            }
            ([p], _) => self.pointer_move(*p),
            _ => false,
        }
    }

    pub fn touch_end(&mut self) {
        self.pointer_up();
    }

    pub fn reset(&mut self) {
        self.scale = MIN_SCALE;
        self.offset = Point::ORIGIN;
        self.mode = Mode::Idle;
        self.pinch = None;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn settle(&mut self) {
        if self.scale == MIN_SCALE {
            self.offset = Point::ORIGIN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn wheel_zooms_toward_cursor() {
        let mut view = ZoomView::new();
        let cursor = Point::new(200.0, 100.0);
        assert!(view.wheel(cursor, -500.0));
        assert!((view.scale() - 1.5).abs() < EPS);
        assert_close(view.offset(), Point::new(-100.0, -50.0));
        assert_close(view.to_screen(Point::new(200.0, 100.0)), cursor);
    }

    #[test]
    fn wheel_clamps_and_reports_no_change() {
        let mut view = ZoomView::new();
        assert!(!view.wheel(Point::new(10.0, 10.0), 100.0));
        assert_eq!(view.scale(), MIN_SCALE);

        assert!(view.wheel(Point::new(10.0, 10.0), -10_000.0));
        assert_eq!(view.scale(), MAX_SCALE);
        assert!(!view.wheel(Point::new(10.0, 10.0), -1.0));
    }

    #[test]
    fn zooming_back_to_fit_recenters() {
        let mut view = ZoomView::new();
        view.wheel(Point::new(300.0, 40.0), -1_000.0);
        assert_ne!(view.offset(), Point::ORIGIN);
        view.wheel(Point::new(5.0, 5.0), 5_000.0);
        assert_eq!(view.scale(), MIN_SCALE);
        assert_eq!(view.offset(), Point::ORIGIN);
    }

    #[test]
    fn drag_only_when_zoomed() {
        let mut view = ZoomView::new();
        view.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(view.mode(), Mode::Idle);
        assert!(!view.pointer_move(Point::new(50.0, 50.0)));
        assert_eq!(view.cursor(), Cursor::ZoomIn);

        view.double_click(Point::new(0.0, 0.0));
        view.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(view.mode(), Mode::Dragging);
        assert_eq!(view.cursor(), Cursor::Grabbing);
        assert!(view.pointer_move(Point::new(25.0, 5.0)));
        assert_close(view.offset(), Point::new(15.0, -5.0));

        view.pointer_leave();
        assert_eq!(view.mode(), Mode::Idle);
        assert_eq!(view.cursor(), Cursor::Grab);
        assert!(!view.pointer_move(Point::new(100.0, 100.0)));
    }

    #[test]
    fn double_click_toggles() {
        let mut view = ZoomView::new();
        let p = Point::new(120.0, 80.0);
        view.double_click(p);
        assert_eq!(view.scale(), DOUBLE_CLICK_SCALE);
        assert_close(view.offset(), Point::new(-120.0, -80.0));
        assert_close(view.to_screen(p), p);
        assert_eq!(view.zoom_percent(), 200);

        view.double_click(Point::new(1.0, 1.0));
        assert_eq!(view.scale(), MIN_SCALE);
        assert_eq!(view.offset(), Point::ORIGIN);
    }

    #[test]
    fn pinch_scales_from_gesture_start() {
        let mut view = ZoomView::new();
        view.touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        assert!(view.is_pinching());
        assert!(view.touch_move(&[Point::new(0.0, 0.0), Point::new(250.0, 0.0)]));
        assert!((view.scale() - 2.5).abs() < EPS);

        // Spreading further saturates at the maximum.
        view.touch_move(&[Point::new(0.0, 0.0), Point::new(1_000.0, 0.0)]);
        assert_eq!(view.scale(), MAX_SCALE);

        view.touch_end();
        assert!(!view.is_pinching());
    }

    #[test]
    fn pinch_with_zero_start_distance_is_ignored() {
        let mut view = ZoomView::new();
        let p = Point::new(5.0, 5.0);
        view.touch_start(&[p, p]);
        assert!(!view.touch_move(&[p, Point::new(50.0, 5.0)]));
        assert_eq!(view.scale(), MIN_SCALE);
    }

    #[test]
    fn two_finger_touch_drops_drag() {
        let mut view = ZoomView::new();
        view.double_click(Point::new(50.0, 50.0));
        view.touch_start(&[Point::new(10.0, 10.0)]);
        assert_eq!(view.mode(), Mode::Dragging);
        assert!(view.touch_move(&[Point::new(20.0, 30.0)]));

        view.touch_start(&[Point::new(10.0, 10.0), Point::new(40.0, 50.0)]);
        assert_eq!(view.mode(), Mode::Idle);
        assert!(view.is_pinching());
    }

    proptest! {
        #[test]
        fn wheel_keeps_point_under_cursor(
            start_delta in -3_000.0f64..0.0,
            delta in -3_000.0f64..3_000.0,
            cx in 0.0f64..1_000.0,
            cy in 0.0f64..1_000.0,
        ) {
            let mut view = ZoomView::new();
            view.wheel(Point::new(500.0, 500.0), start_delta);
            let cursor = Point::new(cx, cy);
            let under = view.to_content(cursor);

            view.wheel(cursor, delta);
            prop_assert!(view.scale() >= MIN_SCALE && view.scale() <= MAX_SCALE);
            if view.is_zoomed() {
                let after = view.to_screen(under);
                prop_assert!((after.x - cursor.x).abs() < 1e-6);
                prop_assert!((after.y - cursor.y).abs() < 1e-6);
            } else {
                prop_assert_eq!(view.offset(), Point::ORIGIN);
            }
        }
    }
}
